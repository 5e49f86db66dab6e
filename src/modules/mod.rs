pub mod common;
pub mod reporter;
pub mod shortcut;
pub mod walker;

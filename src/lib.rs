pub mod commands;
pub mod modules;

pub use modules::common::error::CleanerError;
pub use modules::common::utils;
pub use modules::reporter;
pub use modules::shortcut;
pub use modules::walker;

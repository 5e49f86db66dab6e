use anyhow::Result;
use clap::Parser;

use super::TargetArgs;

#[derive(Parser, Debug)]
pub struct ScanCommand {
    #[command(flatten)]
    pub target: TargetArgs,
}

pub async fn execute(cmd: ScanCommand) -> Result<()> {
    tracing::debug!("scan: {:?}", cmd);
    super::run_walk(&cmd.target, false).await?;
    Ok(())
}

use anyhow::Result;
use clap::Parser;

use super::TargetArgs;

#[derive(Parser, Debug)]
pub struct CleanCommand {
    #[command(flatten)]
    pub target: TargetArgs,

    /// 确认删除 (不指定则预览)
    #[arg(long)]
    pub confirm: bool,
}

pub async fn execute(cmd: CleanCommand) -> Result<()> {
    tracing::debug!("clean: {:?}", cmd);

    if !cmd.confirm {
        println!("=== 预览模式 ===");
        println!("使用 --confirm 确认删除\n");
    }

    super::run_walk(&cmd.target, cmd.confirm).await?;
    Ok(())
}

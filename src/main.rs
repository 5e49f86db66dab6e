use anyhow::Result;
use clap::Parser;
use std::process;

use shortcut_cleaner_lib::commands;
use shortcut_cleaner_lib::modules::common::logging;

#[derive(Parser, Debug)]
#[command(name = "shortcut-cleaner")]
#[command(about = "扫描目录树，报告或删除目标已失效的 Windows 快捷方式", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// 详细输出模式
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let log_dir = logging::init_logging(cli.verbose);
    tracing::debug!("日志目录: {}", log_dir.display());

    // 执行命令
    let result = match cli.command {
        commands::Command::Scan(cmd) => commands::scan::execute(cmd).await,
        commands::Command::Clean(cmd) => commands::clean::execute(cmd).await,
    };

    if let Err(e) = result {
        if cli.verbose {
            tracing::error!("错误: {:#}", e);
        } else {
            eprintln!("错误: {:#}", e);
        }
        process::exit(1);
    }

    Ok(())
}

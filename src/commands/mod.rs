pub mod clean;
pub mod scan;

use anyhow::Result;
use clap::{ArgAction, Args, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::modules::common::utils;
use crate::modules::reporter::{json, models::ScanReport};
use crate::modules::shortcut::drives;
use crate::modules::walker::{models::ScanResult, ScanOptions, Walker};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 扫描并报告失效的快捷方式
    Scan(scan::ScanCommand),

    /// 删除失效的快捷方式
    Clean(clean::CleanCommand),
}

/// scan/clean 共用参数
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// 起始目录
    pub directory: PathBuf,

    /// 目标驱动器缺失时仍按失效处理的盘符 (如 E,F:,g，可重复指定)
    #[arg(
        long = "clean-drives",
        action = ArgAction::Append,
        value_delimiter = ',',
        env = "SHORTCUT_CLEANER_CLEAN_DRIVES"
    )]
    pub clean_drives: Vec<String>,

    /// JSON 报告输出路径
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// 在阻塞线程中执行扫描，Ctrl-C 会中断遍历并保留已有结果
pub async fn run_walk(args: &TargetArgs, delete: bool) -> Result<ScanResult> {
    let options = ScanOptions::new(&args.directory)?
        .with_delete(delete)
        .with_clean_drives(drives::parse_clean_drives(&args.clean_drives));

    println!("开始扫描: {}", options.start_dir.display());
    if delete {
        println!("删除模式: 将删除失效的快捷方式");
    }
    println!("缺失时按失效处理的盘符: {}\n", options.clean_drives);

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("收到中断信号，正在停止扫描...");
            flag.store(true, Ordering::Relaxed);
        }
    });

    let walker_options = options.clone();
    let result = tokio::task::spawn_blocking(move || {
        Walker::new(walker_options)
            .with_cancel_flag(cancel)
            .run(|event| println!("{}", event))
    })
    .await??;

    print_summary(&result, delete);

    if let Some(output) = &args.output {
        let report = ScanReport::new(&options, &result);
        json::write_json_report(&report, output)?;
        println!("\n报告已生成: {}", output.display());
    }

    Ok(result)
}

fn print_summary(result: &ScanResult, delete: bool) {
    if result.interrupted {
        println!("\n扫描已中断，以下为部分结果");
    }

    println!("\n--- 扫描完成 ---");
    println!("  用时: {:.3} 秒", result.elapsed_secs());
    println!(
        "  失效快捷方式: {} 个，共 {} 字节 ({})",
        result.total_count,
        result.total_bytes,
        utils::format_size(result.total_bytes)
    );
    if delete {
        println!("  已删除: {}", result.deleted_count());
    }
    if !result.indeterminate.is_empty() || !result.unrecognized.is_empty() {
        println!(
            "  无法判断: {}，无法识别: {}",
            result.indeterminate.len(),
            result.unrecognized.len()
        );
    }
    if !result.skipped_dirs.is_empty() {
        println!("  跳过目录: {}", result.skipped_dirs.len());
    }
}

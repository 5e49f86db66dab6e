use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const APP_DIR: &str = "shortcut-cleaner";

/// 初始化日志，返回日志目录
pub fn init_logging(verbose: bool) -> std::path::PathBuf {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // 创建日志目录
    let log_dir = log_dir_under(dirs::data_local_dir());
    let _ = std::fs::create_dir_all(&log_dir);

    // 设置文件输出
    let file_appender = tracing_appender::rolling::daily(&log_dir, "shortcut-cleaner.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // 保持 guard 存活
    std::mem::forget(_guard);

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "shortcut_cleaner_lib={level},shortcut_cleaner={level},info"
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let _ = subscriber.try_init();
    log_dir
}

fn log_dir_under(base: Option<std::path::PathBuf>) -> std::path::PathBuf {
    base.unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(APP_DIR)
        .join("logs")
}

//! ログ初期化
//!
//! 標準出力はJSON結果に使うため、ログは標準エラーに出す。

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` が優先。未指定なら info（verbose 時は debug）
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

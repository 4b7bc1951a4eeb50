use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// トレースの出力先を設定する。`RUST_LOG` が無ければ info。
/// 2 回目以降の呼び出しは何もしない。
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        // テストなど、既に別の subscriber がある場合はそのまま使う
        let _ = fmt().with_env_filter(filter).with_target(false).try_init();
    });
}

pub mod domain;
pub mod error;

/// ログ出力を初期化する。`RUST_LOG` が無ければ warn 以上だけを出す。
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

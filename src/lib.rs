//! Status-bar load indicator: render loop, RGB image adapter and the
//! login-time auto-launch protocol.

pub mod adapter;
pub mod bootstrap;
pub mod config;
pub mod control;
pub mod host;
pub mod indicator;
pub mod login_item;
pub mod render;
pub mod source;

/// Route `log` output to stderr, `info` and up unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

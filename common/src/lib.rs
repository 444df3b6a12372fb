//! Process bootstrap shared by the workspace binaries.
use env_logger::{Builder, Env, Target};

/// Loads `.env` (if present) and initialises the logger on stdout.
///
/// The log level defaults to `info` and can be raised or lowered with
/// `RUST_LOG`. The `.env` file is read first so `RUST_LOG` may live there.
pub fn setup_env() {
    dotenvy::dotenv().ok();
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .target(Target::Stdout)
        .init();
}

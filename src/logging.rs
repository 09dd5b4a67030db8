//! Console logging setup.

use std::io::Write;

use colored::Colorize;
use log::{Level, LevelFilter};

/// Installs the global logger. `RUST_LOG` overrides `level` when set.
///
/// Lines look like `[2026-01-01 12:00:00 INFO blockmap::blocks] message`.
pub fn init(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let level = match record.level() {
                Level::Error => "ERROR".bright_red().bold(),
                Level::Warn => "WARN".yellow().bold(),
                Level::Info => "INFO".green(),
                Level::Debug => "DEBUG".blue(),
                Level::Trace => "TRACE".dimmed(),
            };

            writeln!(
                buf,
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                level,
                record.target(),
                record.args()
            )
        });

    // Already initialized, keep the first logger.
    let _ = builder.try_init();
}

//! Logger setup and shared warning helpers.

use log::LevelFilter;

/// Install the stderr logger. `verbosity` counts `-v` flags; `RUST_LOG`
/// still wins when set.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp(None);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    // A second init (e.g. from tests) is harmless.
    let _ = builder.try_init();
}

/// Emit a warning through the log facade.
pub fn warn(msg: impl AsRef<str>) {
    log::warn!("{}", msg.as_ref());
}

//! Process-wide logging setup.

/// Tracing subscriber configuration.
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize logging with the format chosen by `LOG_FORMAT` (JSON by default).
///
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init() {
    self::tracing::init(LogFormat::from_env());
}

//! Process-wide logging setup shared by the binaries.

/// Tracing subscriber configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::{LogFormat, LOG_FORMAT_ENV};

/// Initialize process-wide logging with the format chosen by
/// `FRANCHISE_LOG_FORMAT` (JSON unless set to `pretty`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}

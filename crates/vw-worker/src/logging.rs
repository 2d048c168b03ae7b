use vw_core::{AppError, ErrorMetadata, LogLevel};

/// Log an error at the level its variant declares.
pub(crate) fn log_error(error: &AppError, operation: &str) {
    let error_code = error.error_code();
    let recoverable = error.is_recoverable();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(
                error = %error,
                error_code,
                recoverable,
                operation,
                "Operation failed"
            );
        }
        LogLevel::Warn => {
            tracing::warn!(
                error = %error,
                error_code,
                recoverable,
                operation,
                "Operation failed"
            );
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error,
                error_code,
                recoverable,
                operation,
                "Operation failed"
            );
        }
    }
}

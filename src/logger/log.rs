use crate::logger::severity::LogSeverity;
use crate::logger::time::now;
use once_cell::sync::OnceCell;

static MIN_SEVERITY: OnceCell<LogSeverity> = OnceCell::new();

/// Sets the lowest severity that gets printed. Only the first call has an effect,
/// later calls return `false`.
pub fn set_min_severity(severity: LogSeverity) -> bool {
    MIN_SEVERITY.set(severity).is_ok()
}

/// Returns true if a message of the given severity would be printed.
pub fn enabled(severity: LogSeverity) -> bool {
    severity >= *MIN_SEVERITY.get().unwrap_or(&LogSeverity::Info)
}

pub fn log(msg: String, log_severity: LogSeverity) {
    if enabled(log_severity) {
        println!("[{}] {} {}", log_severity, now(), msg);
    }
}

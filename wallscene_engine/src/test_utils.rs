/// Shared helpers for unit tests (no GPU required)
///
/// `CapturingLogger` records every entry so tests can assert on the
/// diagnostics emitted by the frame graph and the graphic manager.
/// Tests installing it must be `#[serial]`.

use std::sync::{Arc, Mutex};
use crate::log::{Logger, LogEntry, LogSeverity};
use crate::engine::Engine;

/// Logger capturing entries into a shared vector
pub struct CapturingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CapturingLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// Install a capturing logger, returning the shared entry list
pub fn capture_logs() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(CapturingLogger { entries: entries.clone() });
    entries
}

/// Messages captured at the given severity
pub fn messages_at(entries: &Arc<Mutex<Vec<LogEntry>>>, severity: LogSeverity) -> Vec<String> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.severity == severity)
        .map(|e| e.message.clone())
        .collect()
}

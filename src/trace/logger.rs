use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::trace::trace::TraceEvent;

struct TraceFile {
    path: PathBuf,
    file: Mutex<File>,
    written: Mutex<u64>,
}

/// JSONL sink for controller evaluations.
///
/// A `FormController` hands every `load` and `handle` result here as a
/// [`TraceEvent`]; a replay appends one line per evaluation. A trace that
/// cannot be opened or written is reported through `tracing` and never
/// fails the evaluation itself.
pub struct TraceLogger {
    sink: Option<TraceFile>,
}

impl TraceLogger {
    /// Open `path` for appending, so consecutive replays share one trace.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Some(TraceFile {
                    path: path.to_path_buf(),
                    file: Mutex::new(file),
                    written: Mutex::new(0),
                }),
            },
            Err(e) => {
                warn!(path = %path.display(), "could not open selection trace: {}", e);
                Self { sink: None }
            }
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|sink| sink.path.as_path())
    }

    /// Evaluations written by this logger (not counting earlier runs in the file).
    pub fn written(&self) -> u64 {
        self.sink
            .as_ref()
            .and_then(|sink| sink.written.lock().ok().map(|n| *n))
            .unwrap_or(0)
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                warn!(step = event.step, "failed to serialize evaluation: {}", e);
                return;
            }
        };

        let Ok(mut file) = sink.file.lock() else {
            warn!(step = event.step, "selection trace lock poisoned");
            return;
        };

        match writeln!(file, "{}", json) {
            Ok(()) => {
                if let Ok(mut written) = sink.written.lock() {
                    *written += 1;
                }
            }
            Err(e) => warn!(
                step = event.step,
                trigger = %event.trigger,
                "failed to write evaluation to trace: {}",
                e
            ),
        }
    }
}

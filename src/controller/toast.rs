use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message rendered by the page (one `.toast` element).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    #[serde(default)]
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Displays toasts. The real implementation lives in the page's UI kit.
pub trait ToastService {
    fn show(&mut self, toast: &Toast);
}

/// Writes toasts to the log instead of the screen.
#[derive(Debug, Default)]
pub struct LogToasts {
    pub shown: usize,
}

impl ToastService for LogToasts {
    fn show(&mut self, toast: &Toast) {
        self.shown += 1;
        match toast.level {
            ToastLevel::Warning | ToastLevel::Error => {
                warn!(level = ?toast.level, "{}", toast.message)
            }
            ToastLevel::Info | ToastLevel::Success => {
                info!(level = ?toast.level, "{}", toast.message)
            }
        }
    }
}

/// Show every toast once, in page order. Returns how many were shown.
pub fn show_toasts<S: ToastService + ?Sized>(toasts: &[Toast], service: &mut S) -> usize {
    for toast in toasts {
        service.show(toast);
    }
    toasts.len()
}

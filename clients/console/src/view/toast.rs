use common::models::Flash;
use std::time::{Duration, Instant};

/// How long a notice stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    shown_at: Instant,
}

/// Single-slot notice; a newer notice replaces the current one and restarts
/// its timer
#[derive(Debug, Clone, Default)]
pub struct ToastState {
    current: Option<Toast>,
}

impl ToastState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the notice carried by a response; an empty flash changes nothing
    pub fn notify(&mut self, flash: &Flash, now: Instant) {
        let (kind, message) = match (&flash.success, &flash.error) {
            (Some(message), _) => (ToastKind::Success, message),
            (None, Some(message)) => (ToastKind::Error, message),
            (None, None) => return,
        };

        self.current = Some(Toast {
            kind,
            message: message.clone(),
            shown_at: now,
        });
    }

    /// Notice on screen at `now`, if it has not expired
    pub fn visible(&self, now: Instant) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|toast| now.saturating_duration_since(toast.shown_at) < TOAST_DURATION)
    }

    /// Drop an expired notice
    pub fn tick(&mut self, now: Instant) {
        if self.visible(now).is_none() {
            self.current = None;
        }
    }
}

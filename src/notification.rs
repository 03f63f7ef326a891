use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_millis(3000);

/// Single-slot status message ("toast").
///
/// Showing a message replaces whatever was there before. Visibility ends on
/// `dismiss`, or once `auto_hide` has elapsed and the toast is polled with
/// `expire`.
#[derive(Debug, Clone)]
pub struct Notification {
    message: String,
    visible: bool,
    shown_at: Option<Instant>,
    auto_hide: Option<Duration>,
}

impl Notification {
    pub fn new(auto_hide: Option<Duration>) -> Self {
        Self {
            message: String::new(),
            visible: false,
            shown_at: None,
            auto_hide,
        }
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.visible = true;
        self.shown_at = Some(Instant::now());
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
        self.shown_at = None;
    }

    /// Hide the toast if its auto-hide delay has passed. Returns whether it
    /// is still visible.
    pub fn expire(&mut self) -> bool {
        if let (true, Some(shown_at), Some(delay)) = (self.visible, self.shown_at, self.auto_hide) {
            if shown_at.elapsed() >= delay {
                self.dismiss();
            }
        }
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last message shown; kept after the toast is hidden.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for Notification {
    fn default() -> Self {
        Self::new(Some(DEFAULT_AUTO_HIDE))
    }
}

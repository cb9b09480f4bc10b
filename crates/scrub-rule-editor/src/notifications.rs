//! Notification banners
//!
//! The alert area holds a single banner. Showing a banner replaces whatever
//! is displayed. Info banners close themselves after a delay; error banners
//! stay until dismissed or replaced.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use scrub_core::BackendFailure;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub kind: BannerKind,
    pub message: String,
}

#[derive(Default)]
struct PresenterState {
    current: Option<Banner>,
    next_id: u64,
    dismiss_timer: Option<JoinHandle<()>>,
}

impl PresenterState {
    fn show(&mut self, kind: BannerKind, message: String) -> u64 {
        if let Some(timer) = self.dismiss_timer.take() {
            timer.abort();
        }
        self.next_id += 1;
        let id = self.next_id;
        self.current = Some(Banner { id, kind, message });
        id
    }

    fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|banner| banner.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

/// Owns the banner shown in the editor's alert area
#[derive(Clone)]
pub struct NotificationPresenter {
    state: Arc<Mutex<PresenterState>>,
    info_dismiss_after: Duration,
}

impl NotificationPresenter {
    pub fn new(info_dismiss_after: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(PresenterState::default())),
            info_dismiss_after,
        }
    }

    /// Show a success banner that closes after the configured delay.
    ///
    /// Outside a tokio runtime the banner stays until replaced.
    pub fn info(&self, message: impl Into<String>) -> u64 {
        let message = message.into();
        tracing::info!(%message, "info banner");

        let mut state = self.state.lock();
        let id = state.show(BannerKind::Info, message);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let weak = Arc::downgrade(&self.state);
                let delay = self.info_dismiss_after;
                state.dismiss_timer = Some(handle.spawn(dismiss_later(weak, id, delay)));
            }
            Err(_) => {
                tracing::debug!(banner = id, "no runtime, info banner will not auto-dismiss");
            }
        }
        id
    }

    /// Show an error banner that stays until dismissed or replaced
    pub fn error(&self, message: impl Into<String>) -> u64 {
        let message = message.into();
        tracing::warn!(%message, "error banner");
        self.state.lock().show(BannerKind::Error, message)
    }

    /// Show the message carried by a backend failure.
    ///
    /// A body without an `error` field is returned as an error and no banner
    /// is shown.
    pub fn error_from_failure(&self, failure: &BackendFailure) -> scrub_core::Result<Banner> {
        let message = failure.message()?;
        let id = self.error(message.clone());
        Ok(Banner {
            id,
            kind: BannerKind::Error,
            message,
        })
    }

    /// Close banner `id` if it is still displayed
    pub fn dismiss(&self, id: u64) -> bool {
        self.state.lock().dismiss(id)
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        if let Some(timer) = state.dismiss_timer.take() {
            timer.abort();
        }
        state.current = None;
    }

    pub fn current(&self) -> Option<Banner> {
        self.state.lock().current.clone()
    }
}

async fn dismiss_later(state: Weak<Mutex<PresenterState>>, id: u64, delay: Duration) {
    tokio::time::sleep(delay).await;
    if let Some(state) = state.upgrade() {
        let mut state = state.lock();
        if state.dismiss(id) {
            state.dismiss_timer = None;
            tracing::trace!(banner = id, "info banner dismissed");
        }
    }
}

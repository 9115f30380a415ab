use crate::utils::format;
use crate::view::View;
use chrono::{NaiveDateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Ticking elapsed-time display for the active work session.
///
/// At most one ticker exists at a time: `start` aborts any previous task
/// before spawning, `stop` is idempotent.
pub struct SessionTimer {
    handle: Option<JoinHandle<()>>,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Start ticking from `check_in`. The first paint happens immediately,
    /// then once per `tick`.
    pub fn start<V>(&mut self, check_in: NaiveDateTime, view: Arc<V>, tick: Duration)
    where
        V: View + Send + Sync + 'static,
    {
        self.stop();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            loop {
                interval.tick().await;
                let now = Utc::now().naive_utc();
                view.render_timer(&format::elapsed_hms(check_in, now));
            }
        });

        self.handle = Some(handle);
    }

    /// Safe to call when no timer is running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

pub mod dashboard;
pub mod plain;
pub mod table;

pub use dashboard::Dashboard;
pub use plain::PlainView;

use crate::model::attendance::{AttendanceRecord, DailyStats};

/// Rendering surface for attendance state. Callers report what changed;
/// implementations decide layout. Methods take `&self` so one shared view can
/// be driven from both the poll loop and the timer task.
pub trait View {
    /// Placeholder before the first status fetch lands.
    fn show_loading(&self);

    /// Switch to the "not checked in" panel.
    fn show_not_checked_in(&self);

    /// Switch to the "checked in" panel for the given record.
    fn show_checked_in(&self, record: &AttendanceRecord);

    /// Repaint the elapsed-time line. Called once per tick while checked in.
    fn render_timer(&self, elapsed: &str);

    fn show_stats(&self, stats: &DailyStats);

    fn show_today(&self, records: &[AttendanceRecord]);

    fn notify_success(&self, message: &str);

    fn notify_error(&self, message: &str);
}

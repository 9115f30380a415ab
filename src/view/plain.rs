use super::View;
use crate::model::attendance::{AttendanceRecord, DailyStats};
use crate::utils::format;
use crate::view::table::AttendanceTable;
use chrono::Utc;

/// Line-oriented view for one-shot commands. `detail` controls whether the
/// status panels and error notices print; the quiet variant prints successes
/// only and lets failures propagate to the caller as errors, so they are not
/// reported twice.
pub struct PlainView {
    detail: bool,
}

impl PlainView {
    pub fn detailed() -> Self {
        Self { detail: true }
    }

    pub fn quiet() -> Self {
        Self { detail: false }
    }
}

impl View for PlainView {
    fn show_loading(&self) {}

    fn show_not_checked_in(&self) {
        if self.detail {
            println!("Not checked in.");
        }
    }

    fn show_checked_in(&self, record: &AttendanceRecord) {
        if !self.detail {
            return;
        }
        let elapsed = format::elapsed_hms(record.check_in, Utc::now().naive_utc());
        println!(
            "Checked in from {} since {} ({} so far)",
            record.location.label(),
            format::time_hm(record.check_in),
            elapsed
        );
        if !record.notes.is_empty() {
            println!("Notes: {}", record.notes);
        }
    }

    fn render_timer(&self, _elapsed: &str) {}

    fn show_stats(&self, stats: &DailyStats) {
        if self.detail {
            println!(
                "Working {} | Today {} | Office {} | Remote {}",
                stats.currently_working, stats.checked_in_today, stats.in_office, stats.in_home
            );
        }
    }

    fn show_today(&self, records: &[AttendanceRecord]) {
        if !self.detail {
            return;
        }
        if records.is_empty() {
            println!("No attendance recorded today yet.");
            return;
        }
        for line in AttendanceTable::render(records) {
            println!("{}", line);
        }
    }

    fn notify_success(&self, message: &str) {
        println!("{}", message);
    }

    fn notify_error(&self, message: &str) {
        if self.detail {
            eprintln!("Error: {}", message);
        }
    }
}

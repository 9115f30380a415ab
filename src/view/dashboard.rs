use super::View;
use crate::model::attendance::{AttendanceRecord, DailyStats};
use crate::utils::format;
use crate::view::table::{AttendanceTable, fit};
use chrono::Utc;
use crossterm::{
    cursor::{MoveTo, MoveToNextLine},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{Stdout, Write, stdout};
use std::sync::Mutex;
use tracing::warn;

const STATUS_ROW: u16 = 2;
const TIMER_ROW: u16 = 3;
const STATS_ROW: u16 = 5;
const NOTICE_ROW: u16 = 7;
const TABLE_ROW: u16 = 9;

/// Full-screen terminal dashboard for watch mode. Fixed row layout, each
/// region repainted in place so the timer line can tick without disturbing
/// the rest.
///
/// The timer task and the poll loop paint concurrently; the writer sits
/// behind a mutex held across each full cursor-move-and-print sequence, so
/// one region's escape codes never land inside another's.
pub struct Dashboard<W: Write = Stdout> {
    out: Mutex<W>,
}

impl Dashboard {
    pub fn new() -> std::io::Result<Self> {
        Self::init(stdout())
    }
}

impl<W: Write + Send> Dashboard<W> {
    fn init(writer: W) -> std::io::Result<Self> {
        let dashboard = Self {
            out: Mutex::new(writer),
        };

        {
            let mut guard = dashboard.out.lock().unwrap();
            let out = &mut *guard;
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            queue!(
                out,
                Print(format!("Fichaje  {}", format::date(Utc::now().naive_utc())))
            )?;
            queue!(out, MoveTo(0, 1), Print("─".repeat(72)))?;
            out.flush()?;
        }

        Ok(dashboard)
    }

    fn paint_line(&self, row: u16, text: &str) {
        let mut guard = self.out.lock().unwrap();
        let out = &mut *guard;
        let result = queue!(out, MoveTo(0, row), Clear(ClearType::CurrentLine), Print(text))
            .and_then(|_| out.flush());
        if let Err(e) = result {
            warn!(error = %e, "Terminal write failed");
        }
    }

    fn paint_block(&self, row: u16, lines: &[String]) {
        let mut guard = self.out.lock().unwrap();
        let out = &mut *guard;
        let result = (|| -> std::io::Result<()> {
            queue!(out, MoveTo(0, row), Clear(ClearType::FromCursorDown))?;
            for line in lines {
                queue!(out, Print(line), MoveToNextLine(1))?;
            }
            out.flush()
        })();
        if let Err(e) = result {
            warn!(error = %e, "Terminal write failed");
        }
    }
}

impl<W: Write + Send> View for Dashboard<W> {
    fn show_loading(&self) {
        self.paint_line(STATUS_ROW, "Loading current status...");
    }

    fn show_not_checked_in(&self) {
        self.paint_line(STATUS_ROW, "Not checked in");
        self.paint_line(TIMER_ROW, "");
    }

    fn show_checked_in(&self, record: &AttendanceRecord) {
        let mut line = format!(
            "Checked in from {} since {}",
            record.location.label(),
            format::time_hm(record.check_in)
        );
        if !record.notes.is_empty() {
            line.push_str(&format!("  ({})", fit(&record.notes, 30).trim_end()));
        }
        self.paint_line(STATUS_ROW, &line);
    }

    fn render_timer(&self, elapsed: &str) {
        self.paint_line(TIMER_ROW, &format!("Session time {}", elapsed));
    }

    fn show_stats(&self, stats: &DailyStats) {
        self.paint_line(
            STATS_ROW,
            &format!(
                "Working {} | Today {} | Office {} | Remote {}",
                stats.currently_working, stats.checked_in_today, stats.in_office, stats.in_home
            ),
        );
    }

    fn show_today(&self, records: &[AttendanceRecord]) {
        if records.is_empty() {
            self.paint_block(TABLE_ROW, &["No attendance recorded today yet.".to_string()]);
            return;
        }

        let mut lines = vec!["Today".to_string()];
        lines.extend(AttendanceTable::render(records));
        self.paint_block(TABLE_ROW, &lines);
    }

    fn notify_success(&self, message: &str) {
        self.paint_line(NOTICE_ROW, &format!("OK: {}", message));
    }

    fn notify_error(&self, message: &str) {
        self.paint_line(NOTICE_ROW, &format!("ERROR: {}", message));
    }
}

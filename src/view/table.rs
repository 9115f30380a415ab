use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::utils::format;
use chrono::Utc;

/// Fit a string into a display width: pad with spaces, truncate with "..." if
/// too long. Char-based so multi-byte names stay on a boundary.
pub fn fit(s: &str, width: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= width {
        format!("{:<w$}", s, w = width)
    } else {
        let truncated: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{:<w$}", format!("{}...", truncated), w = width)
    }
}

pub struct AttendanceTable {
    employee_width: usize,
    location_width: usize,
    in_width: usize,
    out_width: usize,
    duration_width: usize,
    status_width: usize,
}

impl AttendanceTable {
    fn new(records: &[AttendanceRecord]) -> Self {
        let employee_width = records
            .iter()
            .map(|r| r.employee_name.chars().count())
            .max()
            .unwrap_or(8)
            .clamp(8, 24);

        Self {
            employee_width,
            location_width: 13,
            in_width: 5,
            out_width: 5,
            duration_width: 8,
            status_width: 6,
        }
    }

    /// Widths are sized to the given records, so one call does both.
    pub fn render(records: &[AttendanceRecord]) -> Vec<String> {
        let table = Self::new(records);
        let mut lines = vec![
            table.border('┌', '┬', '┐'),
            table.header_row(),
            table.border('├', '┼', '┤'),
        ];
        for record in records {
            lines.push(table.row(record));
        }
        lines.push(table.border('└', '┴', '┘'));
        lines
    }

    fn widths(&self) -> [usize; 6] {
        [
            self.employee_width,
            self.location_width,
            self.in_width,
            self.out_width,
            self.duration_width,
            self.status_width,
        ]
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self
            .widths()
            .iter()
            .map(|w| "─".repeat(w + 2))
            .collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn header_row(&self) -> String {
        self.cells(["Employee", "Location", "In", "Out", "Duration", "Status"])
    }

    fn row(&self, record: &AttendanceRecord) -> String {
        let out_cell = record
            .check_out
            .map(format::time_hm)
            .unwrap_or_else(|| "-".to_string());
        let status = if record.is_active { "active" } else { "done" };

        self.cells([
            record.employee_name.as_str(),
            record.location.label(),
            &format::time_hm(record.check_in),
            &out_cell,
            &duration_cell(record),
            status,
        ])
    }

    fn cells(&self, values: [&str; 6]) -> String {
        let widths = self.widths();
        let cols: Vec<String> = values
            .iter()
            .zip(widths.iter())
            .map(|(v, w)| fit(v, *w))
            .collect();
        format!("│ {} │", cols.join(" │ "))
    }
}

/// Server-computed duration string when present, locally computed otherwise
/// (open entries measure up to now).
fn duration_cell(record: &AttendanceRecord) -> String {
    if let Some(d) = &record.duration_formatted {
        return d.clone();
    }
    let end = record.check_out.unwrap_or_else(|| Utc::now().naive_utc());
    format::short_duration((end - record.check_in).num_seconds())
}

pub struct EmployeeTable {
    id_width: usize,
    name_width: usize,
    email_width: usize,
    position_width: usize,
    active_width: usize,
}

impl EmployeeTable {
    fn new(employees: &[Employee]) -> Self {
        let name_width = employees
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or(8)
            .clamp(8, 24);
        let email_width = employees
            .iter()
            .map(|e| e.email.chars().count())
            .max()
            .unwrap_or(12)
            .clamp(12, 32);

        Self {
            id_width: 4,
            name_width,
            email_width,
            position_width: 14,
            active_width: 6,
        }
    }

    pub fn render(employees: &[Employee]) -> Vec<String> {
        let table = Self::new(employees);
        let mut lines = vec![
            table.border('┌', '┬', '┐'),
            table.header_row(),
            table.border('├', '┼', '┤'),
        ];
        for employee in employees {
            lines.push(table.row(employee));
        }
        lines.push(table.border('└', '┴', '┘'));
        lines
    }

    fn widths(&self) -> [usize; 5] {
        [
            self.id_width,
            self.name_width,
            self.email_width,
            self.position_width,
            self.active_width,
        ]
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self
            .widths()
            .iter()
            .map(|w| "─".repeat(w + 2))
            .collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn header_row(&self) -> String {
        self.cells(["Id", "Name", "Email", "Position", "Active"])
    }

    fn row(&self, employee: &Employee) -> String {
        self.cells([
            &employee.id.to_string(),
            &employee.name,
            &employee.email,
            employee.position.as_deref().unwrap_or("-"),
            if employee.is_active { "yes" } else { "no" },
        ])
    }

    fn cells(&self, values: [&str; 5]) -> String {
        let widths = self.widths();
        let cols: Vec<String> = values
            .iter()
            .zip(widths.iter())
            .map(|(v, w)| fit(v, *w))
            .collect();
        format!("│ {} │", cols.join(" │ "))
    }
}

use crate::api::{ApiError, AttendanceApi};
use crate::model::attendance::{AttendanceRecord, CheckInRequest, CheckOutRequest, Location};
use crate::timer::SessionTimer;
use crate::view::View;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

pub const ADMIN_CHECK_IN_NOTE: &str = "Checked in by administrator";
pub const ADMIN_CHECK_OUT_NOTE: &str = "Checked out by administrator";

/// Owns the client-side attendance state: the latest status snapshot, the
/// session ticker and the rendering surface. All state changes go through
/// here; nothing module-global.
///
/// Construction puts the view in its loading state; the first refresh
/// resolves it to one of the two panels.
pub struct AttendanceController<A, V> {
    api: A,
    view: Arc<V>,
    current: Option<AttendanceRecord>,
    timer: SessionTimer,
    tick: Duration,
}

impl<A, V> AttendanceController<A, V>
where
    A: AttendanceApi,
    V: View + Send + Sync + 'static,
{
    pub fn new(api: A, view: Arc<V>, tick: Duration) -> Self {
        view.show_loading();
        Self {
            api,
            view,
            current: None,
            timer: SessionTimer::new(),
            tick,
        }
    }

    /// Fetch current status, today's stats and today's list, then re-render.
    /// The fetches run concurrently and degrade independently: a failed one
    /// is logged, its panel keeps its previous content, and the next cycle
    /// retries. Returns the first failure so one-shot callers can report it.
    pub async fn refresh_all(&mut self) -> Result<(), ApiError> {
        let (current, stats, today) = futures::join!(
            self.api.current_attendance(),
            self.api.today_stats(),
            self.api.today_attendances(),
        );

        let mut first_error = None;

        match current {
            Ok(attendance) => self.apply_status(attendance),
            Err(e) => {
                error!(error = %e, "Failed to load current status");
                first_error.get_or_insert(e);
            }
        }

        match stats {
            Ok(stats) => self.view.show_stats(&stats),
            Err(e) => {
                error!(error = %e, "Failed to load today's stats");
                first_error.get_or_insert(e);
            }
        }

        match today {
            Ok(records) => self.view.show_today(&records),
            Err(e) => {
                error!(error = %e, "Failed to load today's attendances");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Replace the status snapshot and select the matching panel. A record
    /// that is no longer active counts as not checked in.
    fn apply_status(&mut self, attendance: Option<AttendanceRecord>) {
        match attendance {
            Some(record) if record.is_active => {
                debug!(employee_id = record.employee_id, "Session is active");
                self.view.show_checked_in(&record);
                self.timer
                    .start(record.check_in, Arc::clone(&self.view), self.tick);
                self.current = Some(record);
            }
            _ => {
                self.view.show_not_checked_in();
                self.timer.stop();
                self.current = None;
            }
        }
    }

    /// Register a check-in, for the session holder or (with `employee_id`)
    /// on behalf of another employee. No client-side pre-validation: the
    /// server owns the one-active-session rule.
    #[instrument(skip(self))]
    pub async fn check_in(
        &mut self,
        location: Location,
        notes: Option<String>,
        employee_id: Option<u64>,
    ) -> Result<(), ApiError> {
        let req = CheckInRequest {
            location,
            notes: normalize_notes(notes, employee_id, ADMIN_CHECK_IN_NOTE),
            employee_id,
        };

        match self.api.check_in(&req).await {
            Ok(resp) => {
                info!(employee_id, "Check-in registered");
                self.view.notify_success(&action_message(resp.message, "Checked in successfully"));
                let _ = self.refresh_all().await;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, employee_id, "Check-in failed");
                self.view.notify_error(&e.to_string());
                Err(e)
            }
        }
    }

    /// Register a check-out. A self check-out with no active session stays
    /// local; the server never sees a request.
    #[instrument(skip(self))]
    pub async fn check_out(
        &mut self,
        notes: Option<String>,
        employee_id: Option<u64>,
    ) -> Result<(), ApiError> {
        if employee_id.is_none() && self.current.is_none() {
            debug!("Check-out requested with no active session");
            self.view.notify_error("No active check-in found");
            return Ok(());
        }

        let req = CheckOutRequest {
            notes: normalize_notes(notes, employee_id, ADMIN_CHECK_OUT_NOTE),
            employee_id,
        };

        match self.api.check_out(&req).await {
            Ok(resp) => {
                info!(employee_id, "Check-out registered");
                self.view.notify_success(&action_message(resp.message, "Checked out successfully"));
                let _ = self.refresh_all().await;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, employee_id, "Check-out failed");
                self.view.notify_error(&e.to_string());
                Err(e)
            }
        }
    }

    pub fn current(&self) -> Option<&AttendanceRecord> {
        self.current.as_ref()
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }
}

/// Empty notes are dropped; on-behalf actions get a default note when none
/// is given.
fn normalize_notes(
    notes: Option<String>,
    employee_id: Option<u64>,
    admin_default: &str,
) -> Option<String> {
    match (notes.filter(|n| !n.trim().is_empty()), employee_id) {
        (Some(notes), _) => Some(notes),
        (None, Some(_)) => Some(admin_default.to_string()),
        (None, None) => None,
    }
}

fn action_message(server_message: String, fallback: &str) -> String {
    if server_message.trim().is_empty() {
        fallback.to_string()
    } else {
        server_message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::{ActionResponse, DailyStats};
    use chrono::Utc;
    use std::sync::Mutex;

    fn active_record(employee_id: u64, location: Location) -> AttendanceRecord {
        AttendanceRecord {
            id: 100 + employee_id,
            employee_id,
            employee_name: format!("Employee {}", employee_id),
            check_in: Utc::now().naive_utc() - chrono::Duration::seconds(90),
            check_out: None,
            location,
            notes: String::new(),
            is_active: true,
            duration_formatted: None,
        }
    }

    fn server_error(status: u16, message: &str) -> ApiError {
        ApiError::Server {
            status,
            message: message.to_string(),
        }
    }

    #[derive(Default)]
    struct FakeState {
        current: Mutex<Option<AttendanceRecord>>,
        stats: Mutex<DailyStats>,
        today: Mutex<Vec<AttendanceRecord>>,
        fail_current: Mutex<bool>,
        fail_stats: Mutex<bool>,
        reject_check_in: Mutex<Option<String>>,
        check_ins: Mutex<Vec<(Location, Option<String>, Option<u64>)>>,
        check_outs: Mutex<Vec<(Option<String>, Option<u64>)>>,
    }

    #[derive(Clone, Default)]
    struct FakeApi {
        state: Arc<FakeState>,
    }

    impl FakeApi {
        fn set_current(&self, record: Option<AttendanceRecord>) {
            *self.state.current.lock().unwrap() = record;
        }

        fn reject_next_check_in(&self, message: &str) {
            *self.state.reject_check_in.lock().unwrap() = Some(message.to_string());
        }

        fn check_ins(&self) -> Vec<(Location, Option<String>, Option<u64>)> {
            self.state.check_ins.lock().unwrap().clone()
        }

        fn check_outs(&self) -> Vec<(Option<String>, Option<u64>)> {
            self.state.check_outs.lock().unwrap().clone()
        }
    }

    impl AttendanceApi for FakeApi {
        async fn current_attendance(&self) -> Result<Option<AttendanceRecord>, ApiError> {
            if *self.state.fail_current.lock().unwrap() {
                return Err(server_error(500, "status unavailable"));
            }
            Ok(self.state.current.lock().unwrap().clone())
        }

        async fn today_stats(&self) -> Result<DailyStats, ApiError> {
            if *self.state.fail_stats.lock().unwrap() {
                return Err(server_error(500, "stats unavailable"));
            }
            Ok(*self.state.stats.lock().unwrap())
        }

        async fn today_attendances(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
            Ok(self.state.today.lock().unwrap().clone())
        }

        async fn check_in(&self, req: &CheckInRequest) -> Result<ActionResponse, ApiError> {
            self.state.check_ins.lock().unwrap().push((
                req.location,
                req.notes.clone(),
                req.employee_id,
            ));

            if let Some(message) = self.state.reject_check_in.lock().unwrap().clone() {
                return Err(server_error(409, &message));
            }

            // A self check-in changes the session holder's own status; an
            // on-behalf one does not.
            let record = active_record(req.employee_id.unwrap_or(1), req.location);
            if req.employee_id.is_none() {
                *self.state.current.lock().unwrap() = Some(record.clone());
            }

            Ok(ActionResponse {
                message: "Checked in successfully".into(),
                attendance: Some(record),
            })
        }

        async fn check_out(&self, req: &CheckOutRequest) -> Result<ActionResponse, ApiError> {
            self.state
                .check_outs
                .lock()
                .unwrap()
                .push((req.notes.clone(), req.employee_id));

            if req.employee_id.is_none() {
                *self.state.current.lock().unwrap() = None;
            }

            Ok(ActionResponse {
                message: "Checked out successfully".into(),
                attendance: None,
            })
        }
    }

    #[derive(Default)]
    struct RecordingView {
        events: Mutex<Vec<String>>,
    }

    impl RecordingView {
        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn last_panel(&self) -> Option<String> {
            self.events()
                .into_iter()
                .rev()
                .find(|e| e.starts_with("panel:"))
        }

        fn last_notice(&self) -> Option<String> {
            self.events()
                .into_iter()
                .rev()
                .find(|e| e.starts_with("success:") || e.starts_with("error:"))
        }
    }

    impl View for RecordingView {
        fn show_loading(&self) {
            self.push("panel:loading".into());
        }
        fn show_not_checked_in(&self) {
            self.push("panel:not-checked-in".into());
        }
        fn show_checked_in(&self, record: &AttendanceRecord) {
            self.push(format!("panel:checked-in:{}", record.location.label()));
        }
        fn render_timer(&self, elapsed: &str) {
            self.push(format!("timer:{}", elapsed));
        }
        fn show_stats(&self, stats: &DailyStats) {
            self.push(format!("stats:{}", stats.currently_working));
        }
        fn show_today(&self, records: &[AttendanceRecord]) {
            self.push(format!("today:{}", records.len()));
        }
        fn notify_success(&self, message: &str) {
            self.push(format!("success:{}", message));
        }
        fn notify_error(&self, message: &str) {
            self.push(format!("error:{}", message));
        }
    }

    fn controller(
        api: FakeApi,
        view: Arc<RecordingView>,
    ) -> AttendanceController<FakeApi, RecordingView> {
        AttendanceController::new(api, view, Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_poll_with_null_attendance_shows_not_checked_in_panel() {
        let api = FakeApi::default();
        let view = Arc::new(RecordingView::default());
        let mut c = controller(api, Arc::clone(&view));

        assert_eq!(view.last_panel().as_deref(), Some("panel:loading"));
        c.refresh_all().await.unwrap();

        assert_eq!(view.last_panel().as_deref(), Some("panel:not-checked-in"));
        assert!(!c.timer_running());
        assert!(c.current().is_none());
    }

    #[tokio::test]
    async fn test_poll_with_active_record_shows_checked_in_and_starts_timer() {
        let api = FakeApi::default();
        api.set_current(Some(active_record(1, Location::Office)));
        let view = Arc::new(RecordingView::default());
        let mut c = controller(api, Arc::clone(&view));

        c.refresh_all().await.unwrap();

        assert_eq!(view.last_panel().as_deref(), Some("panel:checked-in:Office"));
        assert!(c.timer_running());

        tokio::time::sleep(Duration::from_millis(30)).await;
        let timer_events: Vec<String> = view
            .events()
            .into_iter()
            .filter(|e| e.starts_with("timer:"))
            .collect();
        assert!(!timer_events.is_empty());
        assert!(timer_events.iter().all(|e| e.starts_with("timer:00:01:3")));
    }

    #[tokio::test]
    async fn test_check_in_then_poll_transitions_panel() {
        let api = FakeApi::default();
        let view = Arc::new(RecordingView::default());
        let mut c = controller(api.clone(), Arc::clone(&view));

        c.refresh_all().await.unwrap();
        assert_eq!(view.last_panel().as_deref(), Some("panel:not-checked-in"));

        c.check_in(Location::Office, None, None).await.unwrap();

        assert_eq!(
            view.last_notice().as_deref(),
            Some("success:Checked in successfully")
        );
        assert_eq!(view.last_panel().as_deref(), Some("panel:checked-in:Office"));
        assert!(c.timer_running());
        assert_eq!(api.check_ins(), vec![(Location::Office, None, None)]);
    }

    #[tokio::test]
    async fn test_check_out_with_no_active_session_is_a_local_no_op() {
        let api = FakeApi::default();
        let view = Arc::new(RecordingView::default());
        let mut c = controller(api.clone(), Arc::clone(&view));

        c.refresh_all().await.unwrap();
        c.check_out(None, None).await.unwrap();

        assert!(api.check_outs().is_empty());
        assert_eq!(
            view.last_notice().as_deref(),
            Some("error:No active check-in found")
        );
        assert_eq!(view.last_panel().as_deref(), Some("panel:not-checked-in"));
    }

    #[tokio::test]
    async fn test_check_out_closes_the_active_session() {
        let api = FakeApi::default();
        api.set_current(Some(active_record(1, Location::Home)));
        let view = Arc::new(RecordingView::default());
        let mut c = controller(api.clone(), Arc::clone(&view));

        c.refresh_all().await.unwrap();
        assert!(c.timer_running());

        c.check_out(Some("Done for today".into()), None).await.unwrap();

        assert_eq!(
            api.check_outs(),
            vec![(Some("Done for today".to_string()), None)]
        );
        assert_eq!(
            view.last_notice().as_deref(),
            Some("success:Checked out successfully")
        );
        assert_eq!(view.last_panel().as_deref(), Some("panel:not-checked-in"));
        assert!(!c.timer_running());
    }

    #[tokio::test]
    async fn test_failed_check_in_keeps_panel_and_surfaces_exact_message() {
        let api = FakeApi::default();
        api.reject_next_check_in("You already have an active check-in since 08:30");
        let view = Arc::new(RecordingView::default());
        let mut c = controller(api.clone(), Arc::clone(&view));

        c.refresh_all().await.unwrap();
        let result = c.check_in(Location::Home, None, None).await;

        assert!(result.is_err());
        assert_eq!(
            view.last_notice().as_deref(),
            Some("error:You already have an active check-in since 08:30")
        );
        assert_eq!(view.last_panel().as_deref(), Some("panel:not-checked-in"));
        assert!(!c.timer_running());
    }

    #[tokio::test]
    async fn test_admin_actions_default_their_note() {
        let api = FakeApi::default();
        let view = Arc::new(RecordingView::default());
        let mut c = controller(api.clone(), Arc::clone(&view));

        c.check_in(Location::Home, None, Some(7)).await.unwrap();
        c.check_out(None, Some(7)).await.unwrap();
        c.check_in(Location::Office, Some("Client visit".into()), Some(7))
            .await
            .unwrap();

        let check_ins = api.check_ins();
        assert_eq!(
            check_ins[0],
            (
                Location::Home,
                Some(ADMIN_CHECK_IN_NOTE.to_string()),
                Some(7)
            )
        );
        assert_eq!(
            check_ins[1],
            (
                Location::Office,
                Some("Client visit".to_string()),
                Some(7)
            )
        );
        assert_eq!(
            api.check_outs(),
            vec![(Some(ADMIN_CHECK_OUT_NOTE.to_string()), Some(7))]
        );
    }

    #[tokio::test]
    async fn test_stats_failure_leaves_other_panels_applied() {
        let api = FakeApi::default();
        api.set_current(Some(active_record(1, Location::Office)));
        *api.state.fail_stats.lock().unwrap() = true;
        let view = Arc::new(RecordingView::default());
        let mut c = controller(api, Arc::clone(&view));

        let result = c.refresh_all().await;

        assert!(result.is_err());
        assert_eq!(view.last_panel().as_deref(), Some("panel:checked-in:Office"));
        let events = view.events();
        assert!(events.iter().any(|e| e.starts_with("today:")));
        assert!(!events.iter().any(|e| e.starts_with("stats:")));
    }

    #[tokio::test]
    async fn test_current_status_failure_keeps_previous_panel() {
        let api = FakeApi::default();
        api.set_current(Some(active_record(1, Location::Office)));
        let view = Arc::new(RecordingView::default());
        let mut c = controller(api.clone(), Arc::clone(&view));

        c.refresh_all().await.unwrap();
        assert_eq!(view.last_panel().as_deref(), Some("panel:checked-in:Office"));

        *api.state.fail_current.lock().unwrap() = true;
        let result = c.refresh_all().await;

        assert!(result.is_err());
        assert_eq!(view.last_panel().as_deref(), Some("panel:checked-in:Office"));
        assert!(c.timer_running());
    }

    #[tokio::test]
    async fn test_inactive_record_counts_as_not_checked_in() {
        let api = FakeApi::default();
        let mut closed = active_record(1, Location::Office);
        closed.is_active = false;
        closed.check_out = Some(Utc::now().naive_utc());
        api.set_current(Some(closed));
        let view = Arc::new(RecordingView::default());
        let mut c = controller(api, Arc::clone(&view));

        c.refresh_all().await.unwrap();

        assert_eq!(view.last_panel().as_deref(), Some("panel:not-checked-in"));
        assert!(!c.timer_running());
    }

    #[test]
    fn test_normalize_notes() {
        assert_eq!(normalize_notes(None, None, "default"), None);
        assert_eq!(normalize_notes(Some("  ".into()), None, "default"), None);
        assert_eq!(
            normalize_notes(None, Some(3), "default"),
            Some("default".to_string())
        );
        assert_eq!(
            normalize_notes(Some("kept".into()), Some(3), "default"),
            Some("kept".to_string())
        );
    }

    #[test]
    fn test_action_message_falls_back_when_server_is_silent() {
        assert_eq!(action_message("".into(), "fallback"), "fallback");
        assert_eq!(action_message("Done".into(), "fallback"), "Done");
    }
}

//! Session and page navigation around the pipeline
//!
//! Owns the login gate, the current page, the cohort and the report
//! timers. Leaving a page cancels whatever timers that page scheduled.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{Credentials, MonitorConfig};
use crate::error::{MonitorError, Result};
use crate::models::{Page, View};
use crate::pipeline::{Cohort, Edit, Snapshot};
use crate::presentation::ChartSeries;
use crate::report::WeeklyReport;
use crate::scheduler::{Task, TimerQueue};

pub const WEEK_RESET_DELAY: Duration = Duration::from_secs(10);
pub const NOTIFICATION_DISMISS_DELAY: Duration = Duration::from_secs(5);
pub const WEEK_RESET_NOTICE: &str =
    "Week completed! Report has been reset to Day 1. Factory manager has been notified.";

/// What a page shows when it is opened
#[derive(Debug, Clone)]
pub enum PageView {
    Home,
    Bottleneck(Arc<Snapshot>),
    Energy(Arc<Snapshot>),
    Graph(ChartSeries),
    Report(WeeklyReport),
}

/// Something a timer did while the clock advanced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    NotificationShown(String),
    NotificationDismissed,
    ReportRegenerated,
}

#[derive(Debug)]
pub struct Dashboard {
    credentials: Credentials,
    currency: String,
    cohort: Cohort,
    report: WeeklyReport,
    logged_in: bool,
    page: Page,
    timers: TimerQueue,
    notification: Option<String>,
}

impl Dashboard {
    pub fn new(config: &MonitorConfig) -> Result<Self> {
        Ok(Dashboard {
            credentials: config.credentials.clone(),
            currency: config.currency.clone(),
            cohort: Cohort::new(config.cohort(), config.pipeline)?,
            report: WeeklyReport::fixture(),
            logged_in: false,
            page: Page::Home,
            timers: TimerQueue::new(),
            notification: None,
        })
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if username != self.credentials.username || password != self.credentials.password {
            warn!(username, "login rejected");
            return Err(MonitorError::AuthenticationFailed);
        }
        info!(username, "logged in");
        self.logged_in = true;
        self.page = Page::Home;
        Ok(())
    }

    pub fn logout(&mut self) {
        self.timers.clear();
        self.notification = None;
        self.logged_in = false;
        self.page = Page::Home;
        info!("logged out");
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.cohort.latest()
    }

    pub fn show_page(&mut self, page: Page) -> Result<PageView> {
        self.ensure_logged_in()?;

        // Timers never outlive the page visit that scheduled them
        self.timers.cancel_owned_by(self.page);
        if self.page == Page::Report {
            // The dismiss timer was just cancelled, so nothing else would clear the notice
            self.notification = None;
        }
        self.page = page;

        let view = match page {
            Page::Home => PageView::Home,
            Page::Bottleneck => PageView::Bottleneck(self.cohort.recalculate(View::Bottleneck, &[])?),
            Page::Energy => PageView::Energy(self.cohort.recalculate(View::Energy, &[])?),
            Page::Graph => PageView::Graph(ChartSeries::from_metrics(&self.cohort.latest().metrics)),
            Page::Report => {
                self.timers.schedule(Page::Report, WEEK_RESET_DELAY, Task::WeekReset);
                PageView::Report(self.report.clone())
            }
        };
        Ok(view)
    }

    pub fn recalculate(&mut self, view: View, edits: &[Edit]) -> Result<Arc<Snapshot>> {
        self.ensure_logged_in()?;
        self.cohort.recalculate(view, edits)
    }

    /// Advance the clock, running every timer that comes due
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Event> {
        let until = self.timers.now() + elapsed;
        let mut events = Vec::new();

        while let Some((owner, task)) = self.timers.pop_due(until) {
            match task {
                Task::WeekReset => {
                    self.notification = Some(WEEK_RESET_NOTICE.to_string());
                    self.timers
                        .schedule(owner, NOTIFICATION_DISMISS_DELAY, Task::DismissNotification);
                    events.push(Event::NotificationShown(WEEK_RESET_NOTICE.to_string()));
                }
                Task::DismissNotification => {
                    self.notification = None;
                    self.report = WeeklyReport::fixture();
                    events.push(Event::NotificationDismissed);
                    events.push(Event::ReportRegenerated);
                }
            }
        }
        self.timers.settle(until);
        events
    }

    pub fn chart(&self) -> ChartSeries {
        ChartSeries::from_metrics(&self.cohort.latest().metrics)
    }

    pub fn report(&self) -> &WeeklyReport {
        &self.report
    }

    fn ensure_logged_in(&self) -> Result<()> {
        if self.logged_in {
            Ok(())
        } else {
            Err(MonitorError::NotLoggedIn)
        }
    }
}

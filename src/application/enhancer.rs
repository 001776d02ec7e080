// Page enhancer - wires a server-rendered page to the dashboard JSON API
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time::Instant;

use crate::application::refresh::{RefreshOutcome, RefreshTask, RequestSequence};
use crate::application::stats_gateway::StatsGateway;
use crate::domain::chart::ChartSpec;
use crate::domain::stats::DashboardStats;
use crate::presentation::page::{ChartHandle, ElementRef, PageSurface, selectors};

/// Markup swapped in by [`PageEnhancer::show_loading`]: the centered
/// Bootstrap spinner.
pub const LOADING_MARKUP: &str = r#"<div class="text-center"><div class="spinner-border text-primary" role="status"><span class="visually-hidden">Loading...</span></div></div>"#;

/// What one `enhance` pass wired up, for the host's log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnhanceSummary {
    pub cards_faded: usize,
    pub tooltips_installed: usize,
    pub ajax_forms_bound: usize,
    pub dashboard_wired: bool,
}

/// Decorates a ready page and keeps its dashboard stats fresh.
///
/// The enhancer never touches UI state directly; everything goes through the
/// injected [`PageSurface`], so it can drive a browser bridge and an
/// in-memory page alike.
pub struct PageEnhancer {
    page: Arc<dyn PageSurface>,
    gateway: Arc<dyn StatsGateway>,
    refresh_interval: Duration,
    sequence: RequestSequence,
    chart: Mutex<Option<ChartHandle>>,
    refresh_task: Mutex<Option<RefreshTask>>,
    last_applied: Mutex<Option<DateTime<Utc>>>,
}

impl PageEnhancer {
    pub fn new(
        page: Arc<dyn PageSurface>,
        gateway: Arc<dyn StatsGateway>,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            page,
            gateway,
            refresh_interval,
            sequence: RequestSequence::new(),
            chart: Mutex::new(None),
            refresh_task: Mutex::new(None),
            last_applied: Mutex::new(None),
        }
    }

    /// Run every page-ready operation once. Must be called from within the
    /// hosting runtime; on pages carrying the stats elements, the stats load
    /// and the periodic refresh run as background tasks.
    ///
    /// Each operation stands alone; a page missing some of the expected
    /// elements simply gets the remainder.
    pub fn enhance(self: Arc<Self>) -> EnhanceSummary {
        let mut summary = EnhanceSummary::default();

        // Fade-in decoration for the summary cards.
        let cards = self.page.select_all(selectors::CARD);
        for card in &cards {
            self.page.add_class(*card, "fade-in");
        }
        summary.cards_faded = cards.len();

        // Tooltip widgets for every trigger element.
        let triggers = self.page.select_all(selectors::TOOLTIP_TRIGGER);
        for trigger in &triggers {
            self.page.install_tooltip(*trigger);
        }
        summary.tooltips_installed = triggers.len();

        // The stats elements only exist on the dashboard page; their
        // presence decides whether the one-shot load and the refresh timer
        // start at all. Elements added after ready change nothing.
        if self.page.select(selectors::TOTAL_EMPLOYEES).is_some() {
            summary.dashboard_wired = true;
            let enhancer = self.clone();
            tokio::spawn(async move {
                enhancer.load_dashboard_stats().await;
            });
            self.clone().spawn_refresh_task();
        }

        self.refresh_business_grid();

        // Native submission is suppressed for AJAX-flagged forms; the host
        // routes their submit events to `submit_ajax_form`.
        let forms = self.page.select_all(selectors::AJAX_FORM);
        for form in &forms {
            self.page.intercept_submit(*form);
        }
        summary.ajax_forms_bound = forms.len();

        summary
    }

    /// One-shot stats load: both summary text fields plus the sales chart
    /// when the canvas is present.
    pub async fn load_dashboard_stats(&self) -> RefreshOutcome {
        self.refresh_stats(true).await
    }

    async fn refresh_stats(&self, render_chart: bool) -> RefreshOutcome {
        let Some(employees_el) = self.page.select(selectors::TOTAL_EMPLOYEES) else {
            return RefreshOutcome::Skipped;
        };

        let ticket = self.sequence.begin();
        let stats = match self.gateway.fetch_dashboard_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!("Error fetching dashboard stats: {}", e);
                return RefreshOutcome::Failed;
            }
        };

        if !self.sequence.is_current(ticket) {
            tracing::debug!("Discarding superseded stats response (ticket {})", ticket);
            return RefreshOutcome::Stale;
        }

        if stats.error {
            tracing::error!("Unauthorized");
            return RefreshOutcome::Unauthorized;
        }

        self.page.set_text(employees_el, &stats.employees_text());
        if let Some(revenue_el) = self.page.select(selectors::TOTAL_REVENUE) {
            self.page.set_text(revenue_el, &stats.revenue_text());
        }

        let chart_rendered = render_chart && self.render_sales_chart(&stats);

        *self.last_applied.lock().unwrap() = Some(Utc::now());
        RefreshOutcome::Applied { chart_rendered }
    }

    /// Render the sales line chart, tearing down the previous instance so
    /// the canvas is never painted twice.
    fn render_sales_chart(&self, stats: &DashboardStats) -> bool {
        let Some(canvas) = self.page.select(selectors::SALES_CHART) else {
            return false;
        };

        let spec = ChartSpec::sales(stats.sales_labels.clone(), stats.sales_values.clone());
        let mut chart = self.chart.lock().unwrap();
        if let Some(previous) = chart.take() {
            self.page.destroy_chart(previous);
        }
        *chart = Some(self.page.render_chart(canvas, &spec));
        true
    }

    /// Handle a submit event on an intercepted form: forward the field data
    /// to the form's action and apply the JSON verdict. Success reloads the
    /// page outright; a rejection surfaces the server's message in a
    /// blocking alert. Transport and decode failures are logged only.
    pub async fn submit_ajax_form(&self, form: ElementRef) {
        let Some(submission) = self.page.form_submission(form) else {
            tracing::warn!("Submit event for an element without form data");
            return;
        };

        match self.gateway.submit_form(&submission).await {
            Ok(outcome) if outcome.success => self.page.reload(),
            Ok(outcome) => self.page.alert(outcome.message.as_deref().unwrap_or_default()),
            Err(e) => tracing::error!("Error submitting form: {}", e),
        }
    }

    /// Swap an element's content for the centered loading spinner.
    pub fn show_loading(&self, element: ElementRef) {
        self.page.set_html(element, LOADING_MARKUP);
    }

    /// Put `content` back into an element previously given the spinner.
    pub fn hide_loading(&self, element: ElementRef, content: &str) {
        self.page.set_html(element, content);
    }

    /// Auto-refresh hook for the notification badge. Inert until the
    /// recent-notifications endpoint is wired into the page templates.
    pub fn refresh_notifications(&self) {
        // if let Some(badge) = self.page.select(".notification-badge") {
        //     let recent = self.gateway.fetch_recent_notifications().await;
        //     self.page.set_text(badge, &recent.len().to_string());
        // }
    }

    /// Businesses render server-side inside the grid; nothing to do here
    /// until the grid gets client-side updates.
    fn refresh_business_grid(&self) {
        let _ = self.page.select(selectors::BUSINESS_GRID);
    }

    fn spawn_refresh_task(self: Arc<Self>) {
        let mut slot = self.refresh_task.lock().unwrap();
        if slot.is_some() {
            return;
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        // First tick one full period after wiring, like a plain repeating
        // timer; ticks update the text fields only.
        let first_tick = Instant::now() + self.refresh_interval;
        let period = self.refresh_interval;
        let enhancer = self.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first_tick, period);
            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    _ = shutdown_rx.changed() => break,
                }
                // Fetches carry no timeout, so shutdown mid-tick drops the
                // in-flight request instead of waiting it out.
                tokio::select! {
                    outcome = enhancer.refresh_stats(false) => {
                        tracing::debug!("Periodic stats refresh: {:?}", outcome);
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
        });

        *slot = Some(RefreshTask::new(handle, shutdown_tx));
    }

    /// Stop the periodic refresh and wait for its task to wind down. Safe
    /// to call on an enhancer that never started one.
    pub async fn dispose(&self) {
        let task = self.refresh_task.lock().unwrap().take();
        if let Some(task) = task {
            task.stop().await;
        }
    }

    /// When fresh stats were last applied to the page.
    pub fn last_applied(&self) -> Option<DateTime<Utc>> {
        *self.last_applied.lock().unwrap()
    }
}

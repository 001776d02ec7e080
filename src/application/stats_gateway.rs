// Gateway trait for the dashboard JSON API
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::form::{FormOutcome, FormSubmission};
use crate::domain::stats::DashboardStats;

/// Failures crossing the network seam. The enhancer logs these and leaves
/// the page untouched; none of them reach the user.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response body.
    #[error("request failed: {0}")]
    Transport(String),
    /// A body arrived but was not the JSON shape expected.
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait StatsGateway: Send + Sync {
    /// One GET against the dashboard stats endpoint.
    ///
    /// The error-flag payload rides on non-success statuses too, so
    /// implementations decode the body regardless of status and leave the
    /// flag check to the caller.
    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, GatewayError>;

    /// Submit an intercepted form to its action URL and decode the JSON
    /// verdict.
    async fn submit_form(
        &self,
        submission: &FormSubmission,
    ) -> Result<FormOutcome, GatewayError>;
}

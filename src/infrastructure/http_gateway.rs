// HTTP gateway to the dashboard JSON API
use async_trait::async_trait;

use crate::application::stats_gateway::{GatewayError, StatsGateway};
use crate::domain::form::{FormMethod, FormOutcome, FormSubmission};
use crate::domain::stats::DashboardStats;
use crate::infrastructure::config::ApiSettings;

#[derive(Debug, Clone)]
pub struct HttpStatsGateway {
    client: reqwest::Client,
    base_url: String,
    stats_path: String,
}

impl HttpStatsGateway {
    pub fn new(settings: &ApiSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            stats_path: settings.stats_path.clone(),
        }
    }

    fn stats_url(&self) -> String {
        format!("{}{}", self.base_url, self.stats_path)
    }

    /// Resolve a form action against the API host. Absolute actions pass
    /// through untouched.
    fn action_url(&self, action: &str) -> String {
        if action.starts_with("http://") || action.starts_with("https://") {
            action.to_string()
        } else {
            format!("{}{}", self.base_url, action)
        }
    }

    fn classify(error: reqwest::Error) -> GatewayError {
        if error.is_decode() {
            GatewayError::Malformed(error.to_string())
        } else {
            GatewayError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl StatsGateway for HttpStatsGateway {
    async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, GatewayError> {
        let response = self
            .client
            .get(self.stats_url())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(Self::classify)?;

        // The error-flag payload rides on non-success statuses too, so the
        // body is decoded regardless of status.
        response
            .json::<DashboardStats>()
            .await
            .map_err(Self::classify)
    }

    async fn submit_form(
        &self,
        submission: &FormSubmission,
    ) -> Result<FormOutcome, GatewayError> {
        let url = self.action_url(&submission.action);
        let request = match submission.method {
            FormMethod::Get => self.client.get(&url).query(&submission.fields),
            FormMethod::Post => self.client.post(&url).form(&submission.fields),
        };

        let response = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(Self::classify)?;

        response.json::<FormOutcome>().await.map_err(Self::classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> HttpStatsGateway {
        HttpStatsGateway::new(&ApiSettings {
            base_url: "http://localhost:5000/".to_string(),
            stats_path: "/api/dashboard/stats".to_string(),
        })
    }

    #[test]
    fn test_stats_url_joins_without_double_slash() {
        assert_eq!(
            gateway().stats_url(),
            "http://localhost:5000/api/dashboard/stats"
        );
    }

    #[test]
    fn test_action_url_resolves_relative_actions() {
        let gateway = gateway();
        assert_eq!(
            gateway.action_url("/employees/add"),
            "http://localhost:5000/employees/add"
        );
        assert_eq!(
            gateway.action_url("https://other.example.com/submit"),
            "https://other.example.com/submit"
        );
    }
}

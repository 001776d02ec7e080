// Dashboard stats payload
use serde::{Deserialize, Deserializer};

/// Summary metrics plus the sales time series served by the stats endpoint.
///
/// Every field carries a default because the API answers auth failures with
/// an error-only body; the payload must still deserialize far enough for the
/// flag check.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStats {
    /// The API flags auth failures with a bare message string here, so both
    /// the boolean form and a string (non-empty reads as set) are accepted.
    #[serde(default, deserialize_with = "error_flag")]
    pub error: bool,
    #[serde(default)]
    pub total_employees: u64,
    #[serde(default)]
    pub total_revenue: f64,
    /// Served by the API; not wired to any display element yet.
    #[serde(default)]
    pub total_businesses: u64,
    #[serde(default)]
    pub sales_labels: Vec<String>,
    #[serde(default)]
    pub sales_values: Vec<f64>,
}

impl DashboardStats {
    /// Text rendered into the total-employees element.
    pub fn employees_text(&self) -> String {
        self.total_employees.to_string()
    }

    /// Text rendered into the total-revenue element: fixed two-decimal US
    /// dollars.
    pub fn revenue_text(&self) -> String {
        format!("${:.2}", self.total_revenue)
    }
}

fn error_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ErrorFlag {
        Flag(bool),
        Message(String),
    }

    Ok(match ErrorFlag::deserialize(deserializer)? {
        ErrorFlag::Flag(value) => value,
        ErrorFlag::Message(message) => !message.is_empty(),
    })
}

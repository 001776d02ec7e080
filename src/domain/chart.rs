// Chart configuration handed to the chart-rendering collaborator
use serde::Serialize;

pub const SALES_DATASET_LABEL: &str = "Sales ($)";
pub const SALES_BORDER_COLOR: &str = "#007bff";
pub const SALES_FILL_COLOR: &str = "rgba(0, 123, 255, 0.1)";
pub const SALES_CHART_TITLE: &str = "Sales Over Last 30 Days";

/// Complete declarative chart description. Serializes to the camel-cased
/// config object the charting collaborator consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub tension: f64,
    pub fill: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: ChartPlugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPlugins {
    pub legend: LegendOptions,
    pub title: TitleOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendOptions {
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
}

impl ChartSpec {
    /// Line chart for the last-30-days sales series. Labels and values are
    /// forwarded as received; a length mismatch is left for the chart
    /// collaborator to resolve.
    pub fn sales(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            kind: ChartKind::Line,
            data: ChartData {
                labels,
                datasets: vec![ChartDataset {
                    label: SALES_DATASET_LABEL.to_string(),
                    data: values,
                    border_color: SALES_BORDER_COLOR.to_string(),
                    background_color: SALES_FILL_COLOR.to_string(),
                    tension: 0.1,
                    fill: true,
                }],
            },
            options: ChartOptions {
                responsive: true,
                plugins: ChartPlugins {
                    legend: LegendOptions {
                        position: "top".to_string(),
                    },
                    title: TitleOptions {
                        display: true,
                        text: SALES_CHART_TITLE.to_string(),
                    },
                },
            },
        }
    }
}

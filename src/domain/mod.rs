// Domain layer - Payloads and view models for the dashboard page
pub mod chart;
pub mod form;
pub mod stats;

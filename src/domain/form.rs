// Form submission model for AJAX-flagged forms
use serde::Deserialize;

/// Field data lifted off a form element, forwarded to its action URL
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub action: String,
    pub method: FormMethod,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

impl FormMethod {
    /// Parse a form's declared method attribute. Anything that is not
    /// `post` submits as `get`, matching how forms behave in the wild.
    pub fn parse(attr: &str) -> Self {
        if attr.trim().eq_ignore_ascii_case("post") {
            FormMethod::Post
        } else {
            FormMethod::Get
        }
    }
}

/// JSON verdict returned by a form endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FormOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// Page surface - the seam between the enhancer and the host page
use crate::domain::chart::ChartSpec;
use crate::domain::form::FormSubmission;

/// Selector contract shared with the server-rendered templates. These
/// strings must match the markup exactly.
pub mod selectors {
    pub const CARD: &str = ".card";
    pub const TOOLTIP_TRIGGER: &str = "[data-bs-toggle=\"tooltip\"]";
    pub const TOTAL_EMPLOYEES: &str = "#total-employees";
    pub const TOTAL_REVENUE: &str = "#total-revenue";
    pub const SALES_CHART: &str = "#sales-chart";
    pub const BUSINESS_GRID: &str = ".business-grid";
    pub const AJAX_FORM: &str = "form[data-ajax=\"true\"]";
}

/// Opaque handle to one page element, minted by the page implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(u64);

impl ElementRef {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Opaque handle to one rendered chart instance. Held so the chart can be
/// torn down before the next render on the same canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(u64);

impl ChartHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Everything the enhancer is allowed to do to the page it decorates.
///
/// Implementations own the actual page state and must stay shareable across
/// the enhancer's tasks; the enhancer only ever holds element and chart
/// handles, never the elements themselves.
pub trait PageSurface: Send + Sync {
    /// First element matching a selector, if any.
    fn select(&self, selector: &str) -> Option<ElementRef>;

    /// Every element matching a selector, in document order.
    fn select_all(&self, selector: &str) -> Vec<ElementRef>;

    fn add_class(&self, element: ElementRef, class: &str);

    fn set_text(&self, element: ElementRef, text: &str);

    fn set_html(&self, element: ElementRef, html: &str);

    /// Hand an element to the tooltip widget collaborator.
    fn install_tooltip(&self, element: ElementRef);

    /// Suppress a form's native submission; the host delivers its submit
    /// events to the enhancer instead.
    fn intercept_submit(&self, element: ElementRef);

    /// Action, declared method and current field values of a form element.
    /// `None` when the element carries no form data.
    fn form_submission(&self, element: ElementRef) -> Option<FormSubmission>;

    /// Hand a chart config to the chart collaborator for the given canvas.
    fn render_chart(&self, canvas: ElementRef, spec: &ChartSpec) -> ChartHandle;

    /// Tear down a previously rendered chart instance.
    fn destroy_chart(&self, chart: ChartHandle);

    /// Blocking alert dialog.
    fn alert(&self, message: &str);

    /// Full page reload, discarding all client-side state.
    fn reload(&self);
}

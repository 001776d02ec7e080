// Virtual page - in-memory PageSurface for headless hosting and tests
use std::sync::Mutex;

use crate::domain::chart::ChartSpec;
use crate::domain::form::{FormMethod, FormSubmission};
use crate::presentation::page::{ChartHandle, ElementRef, PageSurface};

/// One element of a virtual page, built up through the `with_*` methods
/// before insertion.
#[derive(Debug, Clone, Default)]
pub struct VirtualElement {
    tag: String,
    dom_id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    text: String,
    html: String,
    form: Option<FormData>,
    tooltip_installed: bool,
    submit_intercepted: bool,
}

#[derive(Debug, Clone, Default)]
struct FormData {
    action: String,
    method: String,
    fields: Vec<(String, String)>,
}

impl VirtualElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_dom_id(mut self, dom_id: &str) -> Self {
        self.dom_id = Some(dom_id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Mark this element as a form with the given action and declared
    /// method attribute.
    pub fn with_form(mut self, action: &str, method: &str) -> Self {
        let form = self.form.get_or_insert_with(FormData::default);
        form.action = action.to_string();
        form.method = method.to_string();
        self
    }

    /// Add one field value to this element's form data.
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.form
            .get_or_insert_with(FormData::default)
            .fields
            .push((name.to_string(), value.to_string()));
        self
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(dom_id) => self.dom_id.as_deref() == Some(dom_id),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Attr { tag, name, value } => {
                if let Some(tag) = tag {
                    if !self.tag.eq_ignore_ascii_case(tag) {
                        return false;
                    }
                }
                self.attrs.iter().any(|(n, v)| {
                    n == name
                        && match value {
                            Some(want) => v == want,
                            None => true,
                        }
                })
            }
            Selector::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
        }
    }
}

/// The slice of selector syntax the page templates actually use: `#id`,
/// `.class`, `tag`, and `tag[attr="value"]` with tag and value optional.
#[derive(Debug, PartialEq, Eq)]
enum Selector {
    Id(String),
    Class(String),
    Attr {
        tag: Option<String>,
        name: String,
        value: Option<String>,
    },
    Tag(String),
}

fn parse_selector(selector: &str) -> Selector {
    let selector = selector.trim();
    if let Some(dom_id) = selector.strip_prefix('#') {
        return Selector::Id(dom_id.to_string());
    }
    if let Some(class) = selector.strip_prefix('.') {
        return Selector::Class(class.to_string());
    }
    if let Some(open) = selector.find('[') {
        let tag = &selector[..open];
        let tag = (!tag.is_empty()).then(|| tag.to_string());
        let body = selector[open + 1..].trim_end_matches(']');
        let (name, value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value.trim_matches('"').to_string())),
            None => (body, None),
        };
        return Selector::Attr {
            tag,
            name: name.to_string(),
            value,
        };
    }
    Selector::Tag(selector.to_string())
}

/// Record of one chart render, kept for inspection.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub canvas: ElementRef,
    pub handle: ChartHandle,
    pub config: serde_json::Value,
}

#[derive(Default)]
struct PageState {
    elements: Vec<VirtualElement>,
    alerts: Vec<String>,
    reloads: usize,
    charts: Vec<RenderedChart>,
    destroyed_charts: Vec<ChartHandle>,
    next_chart_id: u64,
}

/// In-memory page. Stands in for a browser document when the enhancer runs
/// headless, and records every side effect so tests can inspect what the
/// enhancer did to it.
pub struct VirtualPage {
    state: Mutex<PageState>,
}

impl VirtualPage {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PageState::default()),
        }
    }

    /// The element contract of the server-rendered dashboard: summary
    /// cards, the two stat fields, the sales canvas, the business grid and
    /// one AJAX-flagged form.
    pub fn dashboard_template() -> Self {
        let page = Self::new();
        page.insert(
            VirtualElement::new("div")
                .with_class("card")
                .with_attr("data-bs-toggle", "tooltip")
                .with_attr("title", "Across all your businesses"),
        );
        page.insert(VirtualElement::new("div").with_class("card"));
        page.insert(
            VirtualElement::new("h2")
                .with_dom_id("total-employees")
                .with_text("--"),
        );
        page.insert(
            VirtualElement::new("h2")
                .with_dom_id("total-revenue")
                .with_text("--"),
        );
        page.insert(VirtualElement::new("canvas").with_dom_id("sales-chart"));
        page.insert(VirtualElement::new("div").with_class("business-grid"));
        page.insert(
            VirtualElement::new("form")
                .with_attr("data-ajax", "true")
                .with_form("/api/feedback", "post")
                .with_field("message", ""),
        );
        page
    }

    pub fn insert(&self, element: VirtualElement) -> ElementRef {
        let mut state = self.state.lock().unwrap();
        state.elements.push(element);
        ElementRef::new(state.elements.len() as u64 - 1)
    }

    pub fn text_of(&self, element: ElementRef) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .elements
            .get(element.id() as usize)
            .map(|e| e.text.clone())
    }

    pub fn html_of(&self, element: ElementRef) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .elements
            .get(element.id() as usize)
            .map(|e| e.html.clone())
    }

    pub fn has_class(&self, element: ElementRef, class: &str) -> bool {
        let state = self.state.lock().unwrap();
        state
            .elements
            .get(element.id() as usize)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    pub fn tooltip_installed(&self, element: ElementRef) -> bool {
        let state = self.state.lock().unwrap();
        state
            .elements
            .get(element.id() as usize)
            .is_some_and(|e| e.tooltip_installed)
    }

    pub fn submit_intercepted(&self, element: ElementRef) -> bool {
        let state = self.state.lock().unwrap();
        state
            .elements
            .get(element.id() as usize)
            .is_some_and(|e| e.submit_intercepted)
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.lock().unwrap().alerts.clone()
    }

    pub fn reload_count(&self) -> usize {
        self.state.lock().unwrap().reloads
    }

    pub fn rendered_charts(&self) -> Vec<RenderedChart> {
        self.state.lock().unwrap().charts.clone()
    }

    pub fn destroyed_charts(&self) -> Vec<ChartHandle> {
        self.state.lock().unwrap().destroyed_charts.clone()
    }
}

impl Default for VirtualPage {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSurface for VirtualPage {
    fn select(&self, selector: &str) -> Option<ElementRef> {
        let parsed = parse_selector(selector);
        let state = self.state.lock().unwrap();
        state
            .elements
            .iter()
            .position(|e| e.matches(&parsed))
            .map(|i| ElementRef::new(i as u64))
    }

    fn select_all(&self, selector: &str) -> Vec<ElementRef> {
        let parsed = parse_selector(selector);
        let state = self.state.lock().unwrap();
        state
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.matches(&parsed))
            .map(|(i, _)| ElementRef::new(i as u64))
            .collect()
    }

    fn add_class(&self, element: ElementRef, class: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(e) = state.elements.get_mut(element.id() as usize) {
            if !e.classes.iter().any(|c| c == class) {
                e.classes.push(class.to_string());
            }
        }
    }

    fn set_text(&self, element: ElementRef, text: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(e) = state.elements.get_mut(element.id() as usize) {
            e.text = text.to_string();
        }
    }

    fn set_html(&self, element: ElementRef, html: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(e) = state.elements.get_mut(element.id() as usize) {
            e.html = html.to_string();
        }
    }

    fn install_tooltip(&self, element: ElementRef) {
        let mut state = self.state.lock().unwrap();
        if let Some(e) = state.elements.get_mut(element.id() as usize) {
            e.tooltip_installed = true;
        }
    }

    fn intercept_submit(&self, element: ElementRef) {
        let mut state = self.state.lock().unwrap();
        if let Some(e) = state.elements.get_mut(element.id() as usize) {
            e.submit_intercepted = true;
        }
    }

    fn form_submission(&self, element: ElementRef) -> Option<FormSubmission> {
        let state = self.state.lock().unwrap();
        let element = state.elements.get(element.id() as usize)?;
        let form = element.form.as_ref()?;
        Some(FormSubmission {
            action: form.action.clone(),
            method: FormMethod::parse(&form.method),
            fields: form.fields.clone(),
        })
    }

    fn render_chart(&self, canvas: ElementRef, spec: &ChartSpec) -> ChartHandle {
        let mut state = self.state.lock().unwrap();
        state.next_chart_id += 1;
        let handle = ChartHandle::new(state.next_chart_id);
        let config = serde_json::to_value(spec).unwrap_or(serde_json::Value::Null);
        state.charts.push(RenderedChart {
            canvas,
            handle,
            config,
        });
        handle
    }

    fn destroy_chart(&self, chart: ChartHandle) {
        self.state.lock().unwrap().destroyed_charts.push(chart);
    }

    fn alert(&self, message: &str) {
        self.state.lock().unwrap().alerts.push(message.to_string());
    }

    fn reload(&self) {
        self.state.lock().unwrap().reloads += 1;
    }
}

//! Page element model.
//!
//! The dashboard never looks elements up by id. Each handler is built with
//! [`Handle`]s to exactly the elements it reads and writes, so a handler can
//! be exercised against a bare [`Page`] with no rendering surface at all.
//!
//! Everything here is single-threaded: handles are `Rc<RefCell<_>>` and
//! every mutation happens on the thread that dispatches events.

mod select;

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::render::AnomalyRow;

pub use select::{Select, SelectOption};

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Shared reference to a page element.
pub struct Handle<T>(Rc<RefCell<T>>);

impl<T> Handle<T> {
    pub fn new(element: T) -> Self {
        Self(Rc::new(RefCell::new(element)))
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same element.
    pub fn same_element(&self, other: &Handle<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Clone> Handle<T> {
    /// Snapshot of the element's current state.
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for Handle<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&*self.0.borrow()).finish()
    }
}

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

/// A form's submit control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub enabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }
}

/// Text content or an input's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Text {
    pub value: String,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScrollBehavior {
    Smooth,
}

/// A results section. Hidden until its form first succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Region {
    pub visible: bool,
    /// Most recent scroll-into-view request.
    pub scroll: Option<ScrollBehavior>,
}

impl Region {
    pub fn reveal(&mut self) {
        self.visible = true;
    }

    pub fn scroll_into_view(&mut self, behavior: ScrollBehavior) {
        self.scroll = Some(behavior);
    }
}

/// Table body rebuilt from scratch on each result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableBody<R> {
    pub rows: Vec<R>,
}

impl<R> Default for TableBody<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R> TableBody<R> {
    pub fn replace(&mut self, rows: Vec<R>) {
        self.rows = rows;
    }
}

/// Ordered list of text items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListGroup {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavBar {
    pub links: Vec<NavLink>,
}

impl NavBar {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let links = labels
            .into_iter()
            .map(|label| NavLink {
                label: label.into(),
                active: false,
            })
            .collect();
        Self { links }
    }

    /// Make `index` the single active link. Returns `false` if out of range.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.links.len() {
            return false;
        }
        for (i, link) in self.links.iter_mut().enumerate() {
            link.active = i == index;
        }
        true
    }

    pub fn active(&self) -> Option<usize> {
        self.links.iter().position(|l| l.active)
    }
}

// ---------------------------------------------------------------------------
// Page layout
// ---------------------------------------------------------------------------

pub const GENERATE_LABEL: &str = "Generate Data";
pub const DETECT_LABEL: &str = "Detect Anomalies";
pub const PRIORITIZE_LABEL: &str = "Prioritize Tests";

pub const DATA_FILE_PLACEHOLDER: &str = "Use sample data";

/// Data type preselected in the anomaly form.
pub const DEFAULT_DATA_TYPE: &str = "response_times";

#[derive(Debug, Clone)]
pub struct GenerationElements {
    pub num_accounts: Handle<Text>,
    pub transactions_per_day: Handle<Text>,
    pub num_days: Handle<Text>,
    pub submit: Handle<Button>,
    pub results: Handle<Region>,
    pub message: Handle<Text>,
    pub stat_accounts: Handle<Text>,
    pub stat_transactions: Handle<Text>,
    pub stat_anomalies: Handle<Text>,
    pub stat_value: Handle<Text>,
    pub stat_avg_transaction: Handle<Text>,
    pub stat_categories: Handle<Text>,
    pub filename: Handle<Text>,
    pub viz_category_amounts: Handle<Image>,
    pub viz_timeline: Handle<Image>,
}

#[derive(Debug, Clone)]
pub struct AnomalyElements {
    pub data_type: Handle<Text>,
    /// Shared with the data-file loader.
    pub data_file: Handle<Select>,
    pub submit: Handle<Button>,
    pub results: Handle<Region>,
    pub message: Handle<Text>,
    pub visualization: Handle<Image>,
    pub table: Handle<TableBody<AnomalyRow>>,
}

#[derive(Debug, Clone)]
pub struct PrioritizationElements {
    pub test_list: Handle<Text>,
    pub submit: Handle<Button>,
    pub results: Handle<Region>,
    pub message: Handle<Text>,
    pub prioritized: Handle<ListGroup>,
    pub visualization: Handle<Image>,
}

/// The whole dashboard page.
#[derive(Debug, Clone)]
pub struct Page {
    pub nav: Handle<NavBar>,
    pub generation: GenerationElements,
    pub anomaly: AnomalyElements,
    pub prioritization: PrioritizationElements,
}

impl Page {
    /// Build the dashboard layout with empty inputs and hidden results.
    pub fn standard() -> Self {
        Self {
            nav: Handle::new(NavBar::new([
                "Data Generation",
                "Anomaly Detection",
                "Test Prioritization",
            ])),
            generation: GenerationElements {
                num_accounts: Handle::default(),
                transactions_per_day: Handle::default(),
                num_days: Handle::default(),
                submit: Handle::new(Button::new(GENERATE_LABEL)),
                results: Handle::default(),
                message: Handle::default(),
                stat_accounts: Handle::default(),
                stat_transactions: Handle::default(),
                stat_anomalies: Handle::default(),
                stat_value: Handle::default(),
                stat_avg_transaction: Handle::default(),
                stat_categories: Handle::default(),
                filename: Handle::default(),
                viz_category_amounts: Handle::default(),
                viz_timeline: Handle::default(),
            },
            anomaly: AnomalyElements {
                data_type: Handle::new(Text::new(DEFAULT_DATA_TYPE)),
                data_file: Handle::new(Select::new(SelectOption::new("", DATA_FILE_PLACEHOLDER))),
                submit: Handle::new(Button::new(DETECT_LABEL)),
                results: Handle::default(),
                message: Handle::default(),
                visualization: Handle::default(),
                table: Handle::default(),
            },
            prioritization: PrioritizationElements {
                test_list: Handle::default(),
                submit: Handle::new(Button::new(PRIORITIZE_LABEL)),
                results: Handle::default(),
                message: Handle::default(),
                prioritized: Handle::default(),
                visualization: Handle::default(),
            },
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

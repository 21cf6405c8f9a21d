use serde::Serialize;

use crate::compliance::ProductSummary;
use crate::record::DetailField;
use crate::{Category, ControlId};

pub const BULK_IDLE_LABEL: &str = "Send bulk email";
pub const BULK_CONFIRM_LABEL: &str = "Confirm";
pub const ALERT_LABEL: &str = "Send email alert";
pub const LOADING_LABEL: &str = "Sending...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Tone {
    #[default]
    Normal,
    Warning,
}

/// Rendered state of a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlView {
    pub label: &'static str,
    pub enabled: bool,
    pub tone: Tone,
}

impl ControlView {
    pub(crate) fn ready(label: &'static str) -> Self {
        Self {
            label,
            enabled: true,
            tone: Tone::Normal,
        }
    }

    pub(crate) fn loading() -> Self {
        Self {
            label: LOADING_LABEL,
            enabled: false,
            tone: Tone::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub index: usize,
    pub label: String,
}

/// Alert control attached to a detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertTarget {
    pub control_id: ControlId,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub index: usize,
    pub fields: Vec<DetailField>,
    pub alert: Option<AlertTarget>,
    /// Raw service catalog payload, pretty-printed JSON.
    pub payload_json: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertView {
    pub email: String,
    pub control: ControlView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPanelView {
    pub category: Category,
    pub rows: Vec<RowView>,
    pub selected: Option<usize>,
    pub detail: Option<DetailView>,
    pub alert: Option<AlertView>,
    pub bulk: ControlView,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PanelViewModel {
    pub summary: ProductSummary,
    pub products: Vec<RowView>,
    pub overview: Option<DetailView>,
    pub panels: Vec<CategoryPanelView>,
    pub in_flight: usize,
    pub dirty: bool,
}

impl PanelViewModel {
    pub fn panel(&self, category: Category) -> Option<&CategoryPanelView> {
        self.panels.iter().find(|panel| panel.category == category)
    }
}

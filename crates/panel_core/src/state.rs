use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use crate::view_model::{
    AlertView, CategoryPanelView, ControlView, DetailView, PanelViewModel, Tone, ALERT_LABEL,
    BULK_CONFIRM_LABEL, BULK_IDLE_LABEL,
};
use crate::{Category, RecordSet};

pub type RequestId = u64;
pub type ConfirmToken = u64;

/// Identity of a rendered alert control. Every new detail view gets a
/// fresh control, so a request still in flight for a replaced view does
/// not disable the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ControlId(pub u64);

pub const DEFAULT_CONFIRM_WINDOW: Duration = Duration::from_secs(3);

/// Bulk-send control state, one per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkPhase {
    #[default]
    Idle,
    PendingConfirm {
        token: ConfirmToken,
    },
    Sending {
        request_id: RequestId,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct CategoryPanel {
    pub(crate) detail: Option<DetailView>,
    pub(crate) bulk: BulkPhase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    records: RecordSet,
    confirm_window: Duration,
    panels: BTreeMap<Category, CategoryPanel>,
    overview: Option<DetailView>,
    alerts_in_flight: BTreeMap<RequestId, ControlId>,
    next_control_id: u64,
    next_request_id: RequestId,
    next_confirm_token: ConfirmToken,
    dirty: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(RecordSet::default(), DEFAULT_CONFIRM_WINDOW)
    }
}

impl PanelState {
    /// Builds a panel that owns `records`. `confirm_window` bounds the time
    /// between the two clicks of a bulk send.
    pub fn new(records: RecordSet, confirm_window: Duration) -> Self {
        Self {
            records,
            confirm_window,
            panels: Category::ALL
                .into_iter()
                .map(|category| (category, CategoryPanel::default()))
                .collect(),
            overview: None,
            alerts_in_flight: BTreeMap::new(),
            next_control_id: 1,
            next_request_id: 1,
            next_confirm_token: 1,
            dirty: true,
        }
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn confirm_window(&self) -> Duration {
        self.confirm_window
    }

    pub fn bulk_phase(&self, category: Category) -> BulkPhase {
        self.panels
            .get(&category)
            .map(|panel| panel.bulk)
            .unwrap_or_default()
    }

    pub fn view(&self) -> PanelViewModel {
        let panels = Category::ALL
            .into_iter()
            .map(|category| self.panel_view(category))
            .collect();
        PanelViewModel {
            summary: self.records.summary.clone(),
            products: self.records.product_rows(),
            overview: self.overview.clone(),
            panels,
            in_flight: self.in_flight(),
            dirty: self.dirty,
        }
    }

    fn panel_view(&self, category: Category) -> CategoryPanelView {
        let panel = self.panels.get(&category).cloned().unwrap_or_default();
        let alert = panel
            .detail
            .as_ref()
            .and_then(|detail| detail.alert.as_ref())
            .map(|target| AlertView {
                email: target.email.clone(),
                control: if self.is_control_busy(target.control_id) {
                    ControlView::loading()
                } else {
                    ControlView::ready(ALERT_LABEL)
                },
            });
        let bulk = match panel.bulk {
            BulkPhase::Idle => ControlView::ready(BULK_IDLE_LABEL),
            BulkPhase::PendingConfirm { .. } => ControlView {
                label: BULK_CONFIRM_LABEL,
                enabled: true,
                tone: Tone::Warning,
            },
            BulkPhase::Sending { .. } => ControlView::loading(),
        };
        CategoryPanelView {
            category,
            rows: self.records.rows(category),
            selected: panel.detail.as_ref().map(|detail| detail.index),
            detail: panel.detail,
            alert,
            bulk,
        }
    }

    fn in_flight(&self) -> usize {
        let bulk = self
            .panels
            .values()
            .filter(|panel| matches!(panel.bulk, BulkPhase::Sending { .. }))
            .count();
        self.alerts_in_flight.len() + bulk
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn panel(&self, category: Category) -> Option<&CategoryPanel> {
        self.panels.get(&category)
    }

    pub(crate) fn panel_mut(&mut self, category: Category) -> &mut CategoryPanel {
        self.panels.entry(category).or_default()
    }

    pub(crate) fn set_overview(&mut self, detail: DetailView) {
        self.overview = Some(detail);
    }

    pub(crate) fn allocate_control_id(&mut self) -> ControlId {
        let id = ControlId(self.next_control_id);
        self.next_control_id += 1;
        id
    }

    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub(crate) fn allocate_confirm_token(&mut self) -> ConfirmToken {
        let token = self.next_confirm_token;
        self.next_confirm_token += 1;
        token
    }

    pub(crate) fn is_control_busy(&self, control_id: ControlId) -> bool {
        self.alerts_in_flight.values().any(|id| *id == control_id)
    }

    pub(crate) fn track_alert(&mut self, request_id: RequestId, control_id: ControlId) {
        self.alerts_in_flight.insert(request_id, control_id);
    }

    pub(crate) fn finish_alert(&mut self, request_id: RequestId) -> Option<ControlId> {
        self.alerts_in_flight.remove(&request_id)
    }

    /// Category whose bulk send owns `request_id`, if any.
    pub(crate) fn bulk_sender(&self, request_id: RequestId) -> Option<Category> {
        self.panels.iter().find_map(|(category, panel)| match panel.bulk {
            BulkPhase::Sending { request_id: id } if id == request_id => Some(*category),
            _ => None,
        })
    }
}

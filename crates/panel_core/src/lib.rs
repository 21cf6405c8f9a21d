//! Panel core: pure state machine, record model and compliance checks.
mod category;
pub mod compliance;
mod effect;
mod email;
mod msg;
mod record;
mod record_set;
mod state;
mod update;
mod view_model;

pub use category::{Category, CategoryParseError};
pub use compliance::{build_record_set, ComplianceThresholds, ProductSummary, Snapshot};
pub use effect::{Effect, ToastKind};
pub use email::{extract_emails, EmailRequest};
pub use msg::{Msg, SendOutcome};
pub use record::{
    DetailField, NameDiscrepancy, ProvisionedProduct, Record, StaleProduct, UnauthorizedUser,
    UserLaunches, UserRef,
};
pub use record_set::RecordSet;
pub use state::{BulkPhase, ConfirmToken, ControlId, PanelState, RequestId, DEFAULT_CONFIRM_WINDOW};
pub use update::{update, SEND_FAILURE_MESSAGE, SEND_SUCCESS_MESSAGE};
pub use view_model::{
    AlertTarget, AlertView, CategoryPanelView, ControlView, DetailView, PanelViewModel, RowView,
    Tone, ALERT_LABEL, BULK_CONFIRM_LABEL, BULK_IDLE_LABEL, LOADING_LABEL,
};

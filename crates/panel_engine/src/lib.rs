//! Panel engine: executes the effects the panel state machine emits.
mod engine;
mod report;
mod send;
mod slack;
mod snapshot;
mod timer;
mod types;

pub use engine::{EngineHandle, EngineStopped};
pub use report::{ensure_output_dir, export_report, AtomicFileWriter, PersistError, REPORT_FILENAME};
pub use send::{EmailSender, ReqwestEmailSender, SendSettings};
pub use slack::SlackNotifier;
pub use snapshot::{load_snapshot, SnapshotError};
pub use timer::{ChannelEventSink, ConfirmTimers, EventSink};
pub use types::{EngineEvent, FailureKind, SendError};

use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use panel_core::{Category, ConfirmToken, EmailRequest, RequestId};
use panel_logging::{panel_debug, panel_error};

use crate::timer::{ChannelEventSink, ConfirmTimers, EventSink};
use crate::{EmailSender, EngineEvent};

enum EngineCommand {
    Send {
        request_id: RequestId,
        request: EmailRequest,
    },
    ArmTimer {
        category: Category,
        token: ConfirmToken,
        after: Duration,
    },
    CancelTimer {
        category: Category,
        token: ConfirmToken,
    },
}

/// The engine thread is gone; the command was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("engine stopped")]
pub struct EngineStopped;

/// Runs sends and confirm timers on a background tokio runtime. Results
/// come back through [`EngineHandle::try_recv`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(sender: Arc<dyn EmailSender>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));

        thread::spawn(move || {
            let mut timers = ConfirmTimers::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Send {
                        request_id,
                        request,
                    } => {
                        let sender = sender.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            let result = sender.send(&request).await;
                            sink.emit(EngineEvent::SendCompleted { request_id, result });
                        });
                    }
                    EngineCommand::ArmTimer {
                        category,
                        token,
                        after,
                    } => timers.arm(runtime.handle(), category, token, after, sink.clone()),
                    EngineCommand::CancelTimer { category, token } => {
                        timers.cancel(category, token)
                    }
                }
            }
            panel_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn send(&self, request_id: RequestId, request: EmailRequest) -> Result<(), EngineStopped> {
        self.submit(EngineCommand::Send {
            request_id,
            request,
        })
    }

    pub fn arm_timer(
        &self,
        category: Category,
        token: ConfirmToken,
        after: Duration,
    ) -> Result<(), EngineStopped> {
        self.submit(EngineCommand::ArmTimer {
            category,
            token,
            after,
        })
    }

    pub fn cancel_timer(&self, category: Category, token: ConfirmToken) -> Result<(), EngineStopped> {
        self.submit(EngineCommand::CancelTimer { category, token })
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn submit(&self, command: EngineCommand) -> Result<(), EngineStopped> {
        self.cmd_tx.send(command).map_err(|_| {
            panel_error!("Engine thread is not running; command dropped");
            EngineStopped
        })
    }
}

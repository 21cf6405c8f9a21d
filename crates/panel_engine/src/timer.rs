use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use panel_core::{Category, ConfirmToken};
use panel_logging::panel_trace;
use tokio_util::sync::CancellationToken;

use crate::EngineEvent;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// One pending confirm timer per category.
#[derive(Default)]
pub struct ConfirmTimers {
    pending: HashMap<Category, (ConfirmToken, CancellationToken)>,
}

impl ConfirmTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the timer for `category`, replacing (and cancelling) any
    /// earlier one. Emits `ConfirmWindowElapsed` unless cancelled first.
    pub fn arm(
        &mut self,
        runtime: &tokio::runtime::Handle,
        category: Category,
        token: ConfirmToken,
        after: Duration,
        sink: Arc<dyn EventSink>,
    ) {
        let cancel = CancellationToken::new();
        if let Some((_, previous)) = self.pending.insert(category, (token, cancel.clone())) {
            previous.cancel();
        }
        runtime.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    panel_trace!("Confirm timer {} for {} cancelled", token, category);
                }
                _ = tokio::time::sleep(after) => {
                    sink.emit(EngineEvent::ConfirmWindowElapsed { category, token });
                }
            }
        });
    }

    /// Cancels the timer for `category` if it is still the one armed with `token`.
    pub fn cancel(&mut self, category: Category, token: ConfirmToken) {
        let armed = self
            .pending
            .get(&category)
            .is_some_and(|(armed, _)| *armed == token);
        if !armed {
            panel_trace!("No armed timer {} for {} to cancel", token, category);
            return;
        }
        if let Some((_, cancel)) = self.pending.remove(&category) {
            cancel.cancel();
        }
    }
}

//! In-memory engine and notifier doubles for host tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use panel_core::{Category, ConfirmToken, EmailRequest, RequestId, ToastKind};
use panel_engine::{EngineEvent, EngineStopped};

use super::effects::EngineControl;
use super::ui::toast::Notifier;

#[derive(Default)]
struct EngineLog {
    sent: Vec<(RequestId, EmailRequest)>,
    armed: Vec<(Category, ConfirmToken)>,
    cancelled: Vec<(Category, ConfirmToken)>,
    events: VecDeque<EngineEvent>,
}

/// Records commands and replays queued events. Clones share one log.
#[derive(Clone, Default)]
pub struct ScriptedEngine {
    log: Rc<RefCell<EngineLog>>,
    rejects_sends: bool,
    rejects_timers: bool,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_sends() -> Self {
        Self {
            rejects_sends: true,
            ..Self::default()
        }
    }

    pub fn stopped() -> Self {
        Self {
            rejects_sends: true,
            rejects_timers: true,
            ..Self::default()
        }
    }

    pub fn push_event(&self, event: EngineEvent) {
        self.log.borrow_mut().events.push_back(event);
    }

    pub fn sent(&self) -> Vec<(RequestId, EmailRequest)> {
        self.log.borrow().sent.clone()
    }

    pub fn armed(&self) -> Vec<(Category, ConfirmToken)> {
        self.log.borrow().armed.clone()
    }

    pub fn cancelled(&self) -> Vec<(Category, ConfirmToken)> {
        self.log.borrow().cancelled.clone()
    }
}

impl EngineControl for ScriptedEngine {
    fn send(&self, request_id: RequestId, request: EmailRequest) -> Result<(), EngineStopped> {
        if self.rejects_sends {
            return Err(EngineStopped);
        }
        self.log.borrow_mut().sent.push((request_id, request));
        Ok(())
    }

    fn arm_timer(
        &self,
        category: Category,
        token: ConfirmToken,
        _after: Duration,
    ) -> Result<(), EngineStopped> {
        if self.rejects_timers {
            return Err(EngineStopped);
        }
        self.log.borrow_mut().armed.push((category, token));
        Ok(())
    }

    fn cancel_timer(&self, category: Category, token: ConfirmToken) -> Result<(), EngineStopped> {
        if self.rejects_timers {
            return Err(EngineStopped);
        }
        self.log.borrow_mut().cancelled.push((category, token));
        Ok(())
    }

    fn try_recv(&self) -> Option<EngineEvent> {
        self.log.borrow_mut().events.pop_front()
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    toasts: Rc<RefCell<Vec<(String, ToastKind)>>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<(String, ToastKind)> {
        self.toasts.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str, kind: ToastKind) {
        self.toasts.borrow_mut().push((message.to_string(), kind));
    }
}

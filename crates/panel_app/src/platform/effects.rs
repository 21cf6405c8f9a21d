use std::time::Duration;

use panel_core::{Category, ConfirmToken, EmailRequest, Effect, Msg, RequestId, SendOutcome};
use panel_engine::{EngineEvent, EngineHandle, EngineStopped};
use panel_logging::panel_debug;

use super::ui::toast::Notifier;

/// The engine operations the host relies on.
pub trait EngineControl {
    fn send(&self, request_id: RequestId, request: EmailRequest) -> Result<(), EngineStopped>;
    fn arm_timer(
        &self,
        category: Category,
        token: ConfirmToken,
        after: Duration,
    ) -> Result<(), EngineStopped>;
    fn cancel_timer(&self, category: Category, token: ConfirmToken) -> Result<(), EngineStopped>;
    fn try_recv(&self) -> Option<EngineEvent>;
}

impl EngineControl for EngineHandle {
    fn send(&self, request_id: RequestId, request: EmailRequest) -> Result<(), EngineStopped> {
        EngineHandle::send(self, request_id, request)
    }

    fn arm_timer(
        &self,
        category: Category,
        token: ConfirmToken,
        after: Duration,
    ) -> Result<(), EngineStopped> {
        EngineHandle::arm_timer(self, category, token, after)
    }

    fn cancel_timer(&self, category: Category, token: ConfirmToken) -> Result<(), EngineStopped> {
        EngineHandle::cancel_timer(self, category, token)
    }

    fn try_recv(&self) -> Option<EngineEvent> {
        EngineHandle::try_recv(self)
    }
}

/// Hands panel effects to the engine and the notifier, and turns engine
/// events back into panel messages.
pub struct EffectRunner {
    engine: Box<dyn EngineControl>,
    notifier: Box<dyn Notifier>,
}

impl EffectRunner {
    pub fn new(engine: Box<dyn EngineControl>, notifier: Box<dyn Notifier>) -> Self {
        Self { engine, notifier }
    }

    /// Runs `effects`. Returns messages that must be fed back immediately,
    /// e.g. a failed completion when the engine refused a send.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut feedback = Vec::new();
        for effect in effects {
            match effect {
                Effect::SendEmail {
                    request_id,
                    request,
                } => {
                    if let Err(err) = self.engine.send(request_id, request) {
                        feedback.push(Msg::SendCompleted {
                            request_id,
                            outcome: SendOutcome::Failed {
                                reason: err.to_string(),
                            },
                        });
                    }
                }
                Effect::ArmConfirmTimer {
                    category,
                    token,
                    after,
                } => {
                    panel_debug!("Arming confirm timer {} for {} ({:?})", token, category, after);
                    if self.engine.arm_timer(category, token, after).is_err() {
                        // Without a timer the confirmation would never expire.
                        feedback.push(Msg::ConfirmWindowElapsed { category, token });
                    }
                }
                Effect::CancelConfirmTimer { category, token } => {
                    let _ = self.engine.cancel_timer(category, token);
                }
                Effect::ShowToast { message, kind } => self.notifier.show(&message, kind),
            }
        }
        feedback
    }

    /// Drains engine events that arrived since the last poll.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SendCompleted { request_id, result } => Msg::SendCompleted {
            request_id,
            outcome: match result {
                Ok(()) => SendOutcome::Delivered,
                Err(err) => SendOutcome::Failed {
                    reason: err.to_string(),
                },
            },
        },
        EngineEvent::ConfirmWindowElapsed { category, token } => {
            Msg::ConfirmWindowElapsed { category, token }
        }
    }
}

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use panel_core::{update, Msg, PanelState};
use panel_logging::{panel_info, panel_warn};

use super::effects::EffectRunner;
use super::ui::input::{parse_line, HostInput, HELP_TEXT};
use super::ui::render::render;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Runs the interactive panel until the operator quits or stdin closes.
pub fn run_panel(state: PanelState, runner: EffectRunner) {
    let (input_tx, input_rx) = mpsc::channel::<HostInput>();

    let stdin_tx = input_tx.clone();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let input = match line {
                Ok(line) => parse_line(&line),
                Err(err) => {
                    panel_warn!("Could not read operator input: {}", err);
                    break;
                }
            };
            if stdin_tx.send(input).is_err() {
                return;
            }
        }
        let _ = stdin_tx.send(HostInput::Quit);
    });

    // Background tick to poll engine events.
    thread::spawn(move || {
        while input_tx.send(HostInput::Panel(Msg::Tick)).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    let mut host = PanelHost { state, runner };
    host.render_if_dirty();
    println!("Type `help` for commands.");

    while let Ok(input) = input_rx.recv() {
        match input {
            HostInput::Panel(Msg::Tick) => host.drain_engine(),
            HostInput::Panel(msg) => host.operator(msg),
            HostInput::Help => println!("{HELP_TEXT}"),
            HostInput::Invalid(reason) => println!("?? {reason}"),
            HostInput::Quit => break,
        }
        host.render_if_dirty();
    }

    let in_flight = host.state.view().in_flight;
    if in_flight > 0 {
        panel_warn!("Leaving with {} request(s) still in flight", in_flight);
    }
    panel_info!("Panel closed");
}

struct PanelHost {
    state: PanelState,
    runner: EffectRunner,
}

impl PanelHost {
    /// Applies an operator message. Engine events that arrived since the
    /// last tick go first, so an expired confirm window is seen before the
    /// click that follows it.
    fn operator(&mut self, msg: Msg) {
        self.drain_engine();
        self.dispatch(msg);
    }

    fn drain_engine(&mut self) {
        for msg in self.runner.poll() {
            self.dispatch(msg);
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            queue.extend(self.runner.run(effects));
        }
    }

    fn render_if_dirty(&mut self) {
        if self.state.consume_dirty() {
            for line in render(&self.state.view()) {
                println!("{line}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::test_support::{RecordingNotifier, ScriptedEngine};
    use panel_core::{BulkPhase, Category, RecordSet, ToastKind, SEND_SUCCESS_MESSAGE};
    use panel_engine::EngineEvent;

    fn host(engine: &ScriptedEngine, notifier: &RecordingNotifier) -> PanelHost {
        PanelHost {
            state: PanelState::new(RecordSet::default(), Duration::from_millis(10)),
            runner: EffectRunner::new(Box::new(engine.clone()), Box::new(notifier.clone())),
        }
    }

    fn click_bulk(host: &mut PanelHost) {
        host.operator(Msg::BulkSendClicked {
            tag: "stale".to_string(),
        });
    }

    #[test]
    fn click_after_expired_window_arms_again_without_waiting_for_tick() {
        let engine = ScriptedEngine::new();
        let notifier = RecordingNotifier::default();
        let mut host = host(&engine, &notifier);

        click_bulk(&mut host);
        let (category, token) = engine.armed()[0];
        // Timer fired between ticks.
        engine.push_event(EngineEvent::ConfirmWindowElapsed { category, token });
        click_bulk(&mut host);

        assert!(engine.sent().is_empty());
        assert_eq!(engine.armed().len(), 2);
        assert!(matches!(
            host.state.bulk_phase(Category::Stale),
            BulkPhase::PendingConfirm { token: second } if second != token
        ));
    }

    #[test]
    fn click_inside_window_sends_once() {
        let engine = ScriptedEngine::new();
        let notifier = RecordingNotifier::default();
        let mut host = host(&engine, &notifier);

        click_bulk(&mut host);
        click_bulk(&mut host);

        assert_eq!(engine.sent().len(), 1);
        assert_eq!(engine.cancelled(), engine.armed());
        assert!(matches!(
            host.state.bulk_phase(Category::Stale),
            BulkPhase::Sending { .. }
        ));
    }

    #[test]
    fn completion_polled_on_tick_restores_control_and_toasts() {
        let engine = ScriptedEngine::new();
        let notifier = RecordingNotifier::default();
        let mut host = host(&engine, &notifier);

        click_bulk(&mut host);
        click_bulk(&mut host);
        let request_id = engine.sent()[0].0;
        engine.push_event(EngineEvent::SendCompleted {
            request_id,
            result: Ok(()),
        });
        host.drain_engine();

        assert_eq!(host.state.bulk_phase(Category::Stale), BulkPhase::Idle);
        assert_eq!(
            notifier.toasts(),
            vec![(SEND_SUCCESS_MESSAGE.to_string(), ToastKind::Success)]
        );
    }

    #[test]
    fn stopped_engine_failure_is_fed_back_within_one_dispatch() {
        let engine = ScriptedEngine::rejecting_sends();
        let notifier = RecordingNotifier::default();
        let mut host = host(&engine, &notifier);

        click_bulk(&mut host);
        click_bulk(&mut host);

        assert_eq!(host.state.bulk_phase(Category::Stale), BulkPhase::Idle);
        assert_eq!(notifier.toasts().len(), 1);
        assert_eq!(notifier.toasts()[0].1, ToastKind::Failure);
        assert_eq!(host.state.view().in_flight, 0);
    }
}

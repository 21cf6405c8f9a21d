use panel_logging::{panel_debug, panel_error, panel_info, panel_trace, panel_warn};

use crate::state::BulkPhase;
use crate::{Category, Effect, EmailRequest, Msg, PanelState, SendOutcome, ToastKind};

pub const SEND_SUCCESS_MESSAGE: &str = "Email sent successfully";
pub const SEND_FAILURE_MESSAGE: &str = "Failed to send email";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::RowSelected { tag, index } => {
            if let Some(category) = parse_tag(&tag) {
                select_row(&mut state, category, index);
            }
            Vec::new()
        }
        Msg::ProductSelected { index } => {
            match state.records().product_detail(index) {
                Some(detail) => {
                    state.set_overview(detail);
                    state.mark_dirty();
                }
                None => panel_error!(
                    "Product index {} out of range ({} products)",
                    index,
                    state.records().products.len()
                ),
            }
            Vec::new()
        }
        Msg::AlertClicked { tag } => match parse_tag(&tag) {
            Some(category) => send_alert(&mut state, category),
            None => Vec::new(),
        },
        Msg::BulkSendClicked { tag } => match parse_tag(&tag) {
            Some(category) => request_bulk_send(&mut state, category),
            None => Vec::new(),
        },
        Msg::ConfirmWindowElapsed { category, token } => {
            if state.bulk_phase(category) == (BulkPhase::PendingConfirm { token }) {
                panel_debug!("Bulk confirmation for {} expired", category);
                state.panel_mut(category).bulk = BulkPhase::Idle;
                state.mark_dirty();
            } else {
                panel_trace!("Ignoring stale confirm timer {} for {}", token, category);
            }
            Vec::new()
        }
        Msg::SendCompleted {
            request_id,
            outcome,
        } => complete_send(&mut state, request_id, outcome),
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn parse_tag(tag: &str) -> Option<Category> {
    match tag.parse::<Category>() {
        Ok(category) => Some(category),
        Err(err) => {
            panel_warn!("Ignoring event: {}", err);
            None
        }
    }
}

fn select_row(state: &mut PanelState, category: Category, index: usize) {
    let control_id = state.allocate_control_id();
    match state.records().detail(category, index, control_id) {
        Some(detail) => {
            state.panel_mut(category).detail = Some(detail);
            state.mark_dirty();
        }
        None => panel_error!(
            "Row {} out of range for {} ({} rows)",
            index,
            category,
            state.records().len(category)
        ),
    }
}

fn send_alert(state: &mut PanelState, category: Category) -> Vec<Effect> {
    let Some(detail) = state
        .panel(category)
        .and_then(|panel| panel.detail.as_ref())
    else {
        panel_warn!("Alert clicked for {} with no detail shown", category);
        return Vec::new();
    };
    let Some(target) = detail.alert.clone() else {
        panel_warn!(
            "Alert clicked for {} row {} which has no user email",
            category,
            detail.index
        );
        return Vec::new();
    };
    if state.is_control_busy(target.control_id) {
        panel_debug!("Alert control for {} is busy; click ignored", category);
        return Vec::new();
    }

    let request_id = state.allocate_request_id();
    state.track_alert(request_id, target.control_id);
    state.mark_dirty();
    panel_info!(
        "Sending {} alert to {} (request {})",
        category,
        panel_logging::mask_email(&target.email),
        request_id
    );
    vec![Effect::SendEmail {
        request_id,
        request: EmailRequest::single(target.email, category),
    }]
}

fn request_bulk_send(state: &mut PanelState, category: Category) -> Vec<Effect> {
    match state.bulk_phase(category) {
        BulkPhase::Idle => {
            let token = state.allocate_confirm_token();
            state.panel_mut(category).bulk = BulkPhase::PendingConfirm { token };
            state.mark_dirty();
            vec![Effect::ArmConfirmTimer {
                category,
                token,
                after: state.confirm_window(),
            }]
        }
        BulkPhase::PendingConfirm { token } => {
            let emails = state.records().emails_for(category);
            let request_id = state.allocate_request_id();
            state.panel_mut(category).bulk = BulkPhase::Sending { request_id };
            state.mark_dirty();
            panel_info!(
                "Sending bulk {} email to {} recipients (request {})",
                category,
                emails.len(),
                request_id
            );
            vec![
                Effect::CancelConfirmTimer { category, token },
                Effect::SendEmail {
                    request_id,
                    request: EmailRequest::bulk(emails, category),
                },
            ]
        }
        BulkPhase::Sending { request_id } => {
            panel_debug!(
                "Bulk send for {} already in flight (request {}); click ignored",
                category,
                request_id
            );
            Vec::new()
        }
    }
}

fn complete_send(
    state: &mut PanelState,
    request_id: crate::RequestId,
    outcome: SendOutcome,
) -> Vec<Effect> {
    if state.finish_alert(request_id).is_none() {
        match state.bulk_sender(request_id) {
            Some(category) => state.panel_mut(category).bulk = BulkPhase::Idle,
            None => {
                panel_warn!("Completion for unknown request {}", request_id);
                return Vec::new();
            }
        }
    }
    state.mark_dirty();

    let (message, kind) = match outcome {
        SendOutcome::Delivered => {
            panel_info!("Request {} delivered", request_id);
            (SEND_SUCCESS_MESSAGE, ToastKind::Success)
        }
        SendOutcome::Failed { reason } => {
            panel_warn!("Request {} failed: {}", request_id, reason);
            (SEND_FAILURE_MESSAGE, ToastKind::Failure)
        }
    };
    vec![Effect::ShowToast {
        message: message.to_string(),
        kind,
    }]
}

use std::time::Duration;

use crate::{Category, ConfirmToken, EmailRequest, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the request to `/send-email`; answer with `Msg::SendCompleted`.
    SendEmail {
        request_id: RequestId,
        request: EmailRequest,
    },
    /// Answer with `Msg::ConfirmWindowElapsed` once `after` has passed.
    ArmConfirmTimer {
        category: Category,
        token: ConfirmToken,
        after: Duration,
    },
    CancelConfirmTimer {
        category: Category,
        token: ConfirmToken,
    },
    ShowToast { message: String, kind: ToastKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

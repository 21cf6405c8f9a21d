#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Operator picked a row of a category list. `tag` is the raw
    /// category tag supplied by the host.
    RowSelected { tag: String, index: usize },
    /// Operator picked a row of the product overview.
    ProductSelected { index: usize },
    /// Operator clicked the alert control of a category's detail view.
    AlertClicked { tag: String },
    /// Operator clicked a category's bulk-send control.
    BulkSendClicked { tag: String },
    /// A confirm timer fired.
    ConfirmWindowElapsed {
        category: crate::Category,
        token: crate::ConfirmToken,
    },
    /// A `/send-email` request finished.
    SendCompleted {
        request_id: crate::RequestId,
        outcome: SendOutcome,
    },
    /// Host tick used to poll background events.
    Tick,
    /// Fallback for unrecognised input.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered,
    /// Non-2xx status or network failure; `reason` is for diagnostics only.
    Failed { reason: String },
}

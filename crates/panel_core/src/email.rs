use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::Category;

/// Body of `POST /send-email`. `email` is always a list, even for a
/// single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: Vec<String>,
    pub check: Category,
}

impl EmailRequest {
    pub fn single(email: impl Into<String>, check: Category) -> Self {
        Self {
            email: vec![email.into()],
            check,
        }
    }

    pub fn bulk(emails: Vec<String>, check: Category) -> Self {
        Self {
            email: emails,
            check,
        }
    }
}

/// Collects the user address of every record that has one, in input order.
/// Records without a reference are skipped; duplicates are kept.
pub fn extract_emails<R: Record>(records: &[R]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.user_email())
        .map(ToOwned::to_owned)
        .collect()
}

use serde::{Deserialize, Serialize};

use crate::compliance::ProductSummary;
use crate::email::extract_emails;
use crate::record::{
    NameDiscrepancy, ProvisionedProduct, Record, StaleProduct, UnauthorizedUser, UserLaunches,
};
use crate::view_model::{AlertTarget, DetailView, RowView};
use crate::{Category, ControlId};

/// Record collections owned by the panel for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordSet {
    pub products: Vec<ProvisionedProduct>,
    pub stale: Vec<StaleProduct>,
    pub launches: Vec<UserLaunches>,
    pub name_disc: Vec<NameDiscrepancy>,
    pub unauthorized: Vec<UnauthorizedUser>,
    pub summary: ProductSummary,
}

impl RecordSet {
    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Stale => self.stale.len(),
            Category::Launches => self.launches.len(),
            Category::NameDisc => self.name_disc.len(),
            Category::Unauthorized => self.unauthorized.len(),
        }
    }

    /// Every address a bulk send for `category` goes to.
    pub fn emails_for(&self, category: Category) -> Vec<String> {
        match category {
            Category::Stale => extract_emails(&self.stale),
            Category::Launches => extract_emails(&self.launches),
            Category::NameDisc => extract_emails(&self.name_disc),
            Category::Unauthorized => extract_emails(&self.unauthorized),
        }
    }

    pub fn rows(&self, category: Category) -> Vec<RowView> {
        match category {
            Category::Stale => rows_of(&self.stale),
            Category::Launches => rows_of(&self.launches),
            Category::NameDisc => rows_of(&self.name_disc),
            Category::Unauthorized => rows_of(&self.unauthorized),
        }
    }

    pub fn product_rows(&self) -> Vec<RowView> {
        rows_of(&self.products)
    }

    /// Detail for a category row, with an alert control bound to the
    /// record's user when it has one. `None` when `index` is out of range.
    pub fn detail(
        &self,
        category: Category,
        index: usize,
        control_id: ControlId,
    ) -> Option<DetailView> {
        let alert = Some(control_id);
        match category {
            Category::Stale => detail_of(&self.stale, index, alert),
            Category::Launches => detail_of(&self.launches, index, alert),
            Category::NameDisc => detail_of(&self.name_disc, index, alert),
            Category::Unauthorized => detail_of(&self.unauthorized, index, alert),
        }
    }

    /// Overview detail for a product; display only.
    pub fn product_detail(&self, index: usize) -> Option<DetailView> {
        detail_of(&self.products, index, None)
    }
}

fn rows_of<R: Record>(records: &[R]) -> Vec<RowView> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| RowView {
            index,
            label: record.row_label(),
        })
        .collect()
}

fn detail_of<R: Record>(
    records: &[R],
    index: usize,
    alert_control: Option<ControlId>,
) -> Option<DetailView> {
    let record = records.get(index)?;
    let alert = alert_control.and_then(|control_id| {
        record.user_email().map(|email| AlertTarget {
            control_id,
            email: email.to_string(),
        })
    });
    let payload_json = match serde_json::to_string_pretty(record.payload()) {
        Ok(json) => json,
        Err(err) => {
            panel_logging::panel_warn!("Could not render payload for row {}: {}", index, err);
            String::new()
        }
    };
    Some(DetailView {
        index,
        fields: record.detail_fields(),
        alert,
        payload_json,
    })
}

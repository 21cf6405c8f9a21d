//! Compliance checks over a service catalog snapshot.
//!
//! Everything here is pure: the caller supplies the snapshot and the
//! current time, and gets back the record lists the panel displays.
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{
    NameDiscrepancy, ProvisionedProduct, StaleProduct, UnauthorizedUser, UserLaunches, UserRef,
};
use crate::RecordSet;

pub const NAMING_REASON: &str = "Naming convention not followed";
pub const UNAUTHORIZED_REASON: &str = "User does not exist in the list of users";

/// Provisioned products plus the user directory they are checked against.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "ProvisionedProducts", default)]
    pub products: Vec<ProvisionedProduct>,
    #[serde(default)]
    pub users: Vec<UserRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceThresholds {
    /// Products older than this many hours are stale.
    pub stale_after_hours: u32,
    /// Users owning more products than this are flagged in the summary.
    pub high_product_count: usize,
    /// Minimum launches for a user to appear in the launches list.
    pub launch_count: usize,
}

impl Default for ComplianceThresholds {
    fn default() -> Self {
        Self {
            stale_after_hours: 8,
            high_product_count: 2,
            launch_count: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductSummary {
    pub total_products: usize,
    pub distinct_owners: usize,
    pub stale_products: usize,
    pub heavy_users: usize,
    pub name_discrepancies: usize,
    pub unauthorized_users: usize,
    pub stale_threshold_hours: u32,
    pub high_product_count_threshold: usize,
}

/// The owner's address is the last `/` segment of the ARN session.
pub fn email_from_arn_session(arn_session: &str) -> &str {
    arn_session.rsplit('/').next().unwrap_or(arn_session)
}

/// Derives the owner from a `first-last-product` name. Names with fewer
/// than three dash-separated parts carry no user reference.
pub fn user_ref_from_product(product: &ProvisionedProduct) -> Option<UserRef> {
    let parts: Vec<&str> = product.name.split('-').collect();
    if parts.len() < 3 {
        return None;
    }
    Some(UserRef {
        first_name: parts[0].to_string(),
        last_name: parts[1].to_string(),
        email: email_from_arn_session(&product.user_arn_session).to_string(),
    })
}

pub fn format_duration(hours: f64) -> String {
    if hours >= 24.0 {
        let days = (hours / 24.0).floor() as u64;
        if days == 1 {
            "1 day".to_string()
        } else {
            format!("{days} days")
        }
    } else {
        format!("{hours:.2} hours")
    }
}

pub fn stale_products(
    products: &[ProvisionedProduct],
    now: DateTime<Utc>,
    threshold_hours: u32,
) -> Vec<StaleProduct> {
    let threshold = now - Duration::hours(i64::from(threshold_hours));
    products
        .iter()
        .enumerate()
        .filter_map(|(index, product)| {
            let created = product.created_time.with_timezone(&Utc);
            if created >= threshold {
                return None;
            }
            let age_hours = (now - created).num_seconds() as f64 / 3600.0;
            Some(StaleProduct {
                index,
                duration: format_duration(age_hours),
                user_info: user_ref_from_product(product),
                product: product.clone(),
            })
        })
        .collect()
}

/// Counts products per owner, in first-seen order. Each entry carries the
/// owner's most recently listed product.
pub fn track_user_launches(products: &[ProvisionedProduct], threshold: usize) -> Vec<UserLaunches> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, (usize, &ProvisionedProduct)> = HashMap::new();
    for product in products {
        let email = email_from_arn_session(&product.user_arn_session);
        counts
            .entry(email)
            .and_modify(|(count, last)| {
                *count += 1;
                *last = product;
            })
            .or_insert_with(|| {
                order.push(email);
                (1, product)
            });
    }

    order
        .into_iter()
        .filter_map(|email| {
            let (count, last) = counts.get(email)?;
            (*count >= threshold).then(|| (email, *count, *last))
        })
        .enumerate()
        .map(|(index, (email, product_count, last))| UserLaunches {
            index,
            email: email.to_string(),
            product_count,
            product_info: last.clone(),
        })
        .collect()
}

fn find_user<'a>(users: &'a [UserRef], email: &str) -> Option<&'a UserRef> {
    users.iter().find(|user| user.email == email)
}

pub fn check_naming_convention(
    users: &[UserRef],
    products: &[ProvisionedProduct],
) -> Vec<NameDiscrepancy> {
    products
        .iter()
        .enumerate()
        .filter_map(|(index, product)| {
            let email = email_from_arn_session(&product.user_arn_session);
            let user = find_user(users, email)?;
            let expected_name = format!(
                "{}-{}-{}",
                user.first_name, user.last_name, product.product_name
            );
            if product.name == expected_name {
                return None;
            }
            Some(NameDiscrepancy {
                index,
                provided_name: product.name.clone(),
                expected_name,
                email: user.email.clone(),
                reason: NAMING_REASON.to_string(),
                product_info: product.clone(),
            })
        })
        .collect()
}

pub fn unauthorized_users(
    users: &[UserRef],
    products: &[ProvisionedProduct],
) -> Vec<UnauthorizedUser> {
    products
        .iter()
        .enumerate()
        .filter_map(|(index, product)| {
            let email = email_from_arn_session(&product.user_arn_session);
            if find_user(users, email).is_some() {
                return None;
            }
            Some(UnauthorizedUser {
                index,
                email: email.to_string(),
                reason: UNAUTHORIZED_REASON.to_string(),
                product_info: product.clone(),
            })
        })
        .collect()
}

/// Totals shown in the panel header. Owners are counted over all products,
/// not just the filtered launch list.
pub fn product_summary(
    products: &[ProvisionedProduct],
    thresholds: ComplianceThresholds,
    stale_products: usize,
    name_discrepancies: usize,
    unauthorized_users: usize,
) -> ProductSummary {
    let all_owners = track_user_launches(products, 1);
    ProductSummary {
        total_products: products.len(),
        distinct_owners: all_owners.len(),
        stale_products,
        heavy_users: all_owners
            .iter()
            .filter(|user| user.product_count > thresholds.high_product_count)
            .count(),
        name_discrepancies,
        unauthorized_users,
        stale_threshold_hours: thresholds.stale_after_hours,
        high_product_count_threshold: thresholds.high_product_count,
    }
}

/// Runs every check and assembles the panel's record collections.
pub fn build_record_set(
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    thresholds: ComplianceThresholds,
) -> RecordSet {
    let stale = stale_products(&snapshot.products, now, thresholds.stale_after_hours);
    let launches = track_user_launches(&snapshot.products, thresholds.launch_count);
    let name_disc = check_naming_convention(&snapshot.users, &snapshot.products);
    let unauthorized = unauthorized_users(&snapshot.users, &snapshot.products);

    let summary = product_summary(
        &snapshot.products,
        thresholds,
        stale.len(),
        name_disc.len(),
        unauthorized.len(),
    );

    panel_logging::panel_info!(
        "Compliance checks: products={} stale={} launches={} name_disc={} unauthorized={}",
        summary.total_products,
        summary.stale_products,
        launches.len(),
        summary.name_discrepancies,
        summary.unauthorized_users
    );

    RecordSet {
        products: snapshot.products.clone(),
        stale,
        launches,
        name_disc,
        unauthorized,
        summary,
    }
}

/// Plain-text report of stale products for chat notifications, or `None`
/// when there is nothing to report.
pub fn stale_report_message(stale: &[StaleProduct]) -> Option<String> {
    if stale.is_empty() {
        return None;
    }
    let mut message = String::new();
    for item in stale {
        message.push_str(&format!("Product Name: {}\n", item.product.name));
        message.push_str(&format!("Duration: {}\n", item.duration));
        message.push_str(&format!("Status: {}\n\n", item.product.status));
    }
    Some(message)
}

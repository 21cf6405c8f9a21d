#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use panel_core::{
    build_record_set, update, ComplianceThresholds, Effect, Msg, PanelState, ProvisionedProduct,
    RecordSet, Snapshot, UserRef,
};
use serde_json::json;

pub const CONFIRM_WINDOW: Duration = Duration::from_secs(3);

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(panel_logging::initialize_for_tests);
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
}

pub fn product(name: &str, product_name: &str, email: &str, created: &str) -> ProvisionedProduct {
    serde_json::from_value(json!({
        "Name": name,
        "Id": format!("pp-{name}"),
        "Status": "AVAILABLE",
        "CreatedTime": created,
        "ProductName": product_name,
        "UserArnSession": format!("arn:aws:sts::123456789012:assumed-role/Dev/{email}"),
        "Type": "CFN_STACK",
    }))
    .expect("valid product")
}

pub fn user(first: &str, last: &str, email: &str) -> UserRef {
    UserRef {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
    }
}

/// Four products: two stale ones for alice, a badly named fresh one for
/// bob, and a stale one for eve who is not in the directory.
pub fn snapshot() -> Snapshot {
    Snapshot {
        products: vec![
            product("alice-smith-ec2", "ec2", "alice@x.com", "2024-01-01T00:00:00.000000+0000"),
            product("bobs-box", "rds", "bob@x.com", "2024-01-09T20:00:00.000000+0000"),
            product("eve-x-s3", "s3", "eve@x.com", "2024-01-05T00:00:00.000000+0000"),
            product("alice-smith-rds", "rds", "alice@x.com", "2024-01-08T00:00:00Z"),
        ],
        users: vec![
            user("alice", "smith", "alice@x.com"),
            user("bob", "jones", "bob@x.com"),
        ],
    }
}

pub fn records() -> RecordSet {
    build_record_set(&snapshot(), now(), ComplianceThresholds::default())
}

pub fn panel() -> PanelState {
    init_logging();
    PanelState::new(records(), CONFIRM_WINDOW)
}

pub fn select(state: PanelState, tag: &str, index: usize) -> PanelState {
    let (state, effects) = update(
        state,
        Msg::RowSelected {
            tag: tag.to_string(),
            index,
        },
    );
    assert!(effects.is_empty());
    state
}

pub fn click_bulk(state: PanelState, tag: &str) -> (PanelState, Vec<Effect>) {
    update(
        state,
        Msg::BulkSendClicked {
            tag: tag.to_string(),
        },
    )
}

pub fn click_alert(state: PanelState, tag: &str) -> (PanelState, Vec<Effect>) {
    update(
        state,
        Msg::AlertClicked {
            tag: tag.to_string(),
        },
    )
}

pub fn sent_requests(effects: &[Effect]) -> Vec<&Effect> {
    effects
        .iter()
        .filter(|effect| matches!(effect, Effect::SendEmail { .. }))
        .collect()
}

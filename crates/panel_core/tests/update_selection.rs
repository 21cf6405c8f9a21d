mod common;

use common::{panel, select};
use panel_core::{update, Category, DetailField, Msg, ALERT_LABEL};
use pretty_assertions::assert_eq;

#[test]
fn selecting_every_row_reveals_its_own_panel() {
    for category in Category::ALL {
        let rows = panel().records().len(category);
        assert!(rows > 0, "fixture has rows for {category}");
        for index in 0..rows {
            let state = select(panel(), category.as_str(), index);
            let view = state.view();

            for other in &view.panels {
                if other.category == category {
                    assert_eq!(other.selected, Some(index));
                    assert!(other.detail.is_some());
                } else {
                    assert!(other.detail.is_none(), "{} shown", other.category);
                }
            }
        }
    }
}

#[test]
fn stale_detail_shows_fields_verbatim() {
    let state = select(panel(), "stale", 1);
    let view = state.view();
    let panel = view.panel(Category::Stale).unwrap();
    let detail = panel.detail.as_ref().unwrap();

    assert_eq!(detail.index, 1);
    assert_eq!(
        detail.fields,
        vec![
            DetailField {
                label: "Product Name",
                value: "eve-x-s3".to_string(),
                emphasis: false,
            },
            DetailField {
                label: "Duration",
                value: "5 days".to_string(),
                emphasis: true,
            },
            DetailField {
                label: "Status",
                value: "AVAILABLE".to_string(),
                emphasis: false,
            },
            DetailField {
                label: "User",
                value: "eve x <eve@x.com>".to_string(),
                emphasis: false,
            },
        ]
    );
    assert!(detail.payload_json.contains("\"Name\": \"eve-x-s3\""));

    let alert = panel.alert.as_ref().unwrap();
    assert_eq!(alert.email, "eve@x.com");
    assert_eq!(alert.control.label, ALERT_LABEL);
    assert!(alert.control.enabled);
}

#[test]
fn markup_in_record_fields_stays_plain_text() {
    let mut records = common::records();
    records.name_disc[0].provided_name = "<img src=x onerror=alert(1)>".to_string();
    let state = panel_core::PanelState::new(records, common::CONFIRM_WINDOW);

    let state = select(state, "name-disc", 0);
    let view = state.view();
    let detail = view.panel(Category::NameDisc).unwrap().detail.clone().unwrap();
    assert_eq!(detail.fields[0].value, "<img src=x onerror=alert(1)>");
}

#[test]
fn reselecting_replaces_detail_in_same_panel() {
    let state = select(panel(), "launches", 0);
    let state = select(state, "launches", 2);
    let view = state.view();
    let launches = view.panel(Category::Launches).unwrap();

    assert_eq!(launches.selected, Some(2));
    assert_eq!(launches.detail.as_ref().unwrap().fields[0].value, "eve@x.com");
}

#[test]
fn selection_in_other_category_keeps_existing_panel() {
    let state = select(panel(), "stale", 0);
    let state = select(state, "unauthorized", 0);
    let view = state.view();

    assert_eq!(view.panel(Category::Stale).unwrap().selected, Some(0));
    assert_eq!(view.panel(Category::Unauthorized).unwrap().selected, Some(0));
}

#[test]
fn out_of_range_selection_is_ignored() {
    let mut state = panel();
    assert!(state.consume_dirty());

    let (mut next, effects) = update(
        state,
        Msg::RowSelected {
            tag: "name-disc".to_string(),
            index: 99,
        },
    );

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert!(next.view().panel(Category::NameDisc).unwrap().detail.is_none());
}

#[test]
fn unknown_tag_selection_is_ignored() {
    let mut state = panel();
    assert!(state.consume_dirty());

    let (mut next, effects) = update(
        state,
        Msg::RowSelected {
            tag: "products".to_string(),
            index: 0,
        },
    );

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn product_overview_detail_has_no_alert() {
    let (mut state, effects) = update(panel(), Msg::ProductSelected { index: 3 });
    assert!(effects.is_empty());
    assert!(state.consume_dirty());

    let overview = state.view().overview.unwrap();
    assert_eq!(overview.index, 3);
    assert_eq!(overview.fields[0].value, "alice-smith-rds");
    assert_eq!(overview.fields[4].value, "alice@x.com");
    assert!(overview.alert.is_none());

    let (mut state, _) = update(state, Msg::ProductSelected { index: 4 });
    assert!(!state.consume_dirty());
    assert_eq!(state.view().overview.unwrap().index, 3);
}

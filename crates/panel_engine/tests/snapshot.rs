use std::fs;

use panel_engine::{load_snapshot, SnapshotError};
use tempfile::TempDir;

#[test]
fn loads_catalog_snapshot() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("snapshot.json");
    fs::write(
        &path,
        r#"{
            "ProvisionedProducts": [{
                "Name": "alice-smith-ec2",
                "Status": "AVAILABLE",
                "CreatedTime": "2024-01-01T00:00:00.000000+0000",
                "ProductName": "ec2",
                "UserArnSession": "arn:aws:sts::1:assumed-role/Dev/alice@x.com"
            }],
            "users": [{"first_name": "alice", "last_name": "smith", "email": "alice@x.com"}]
        }"#,
    )
    .unwrap();

    let snapshot = load_snapshot(&path).unwrap();
    assert_eq!(snapshot.products.len(), 1);
    assert_eq!(snapshot.products[0].name, "alice-smith-ec2");
    assert_eq!(snapshot.users.len(), 1);
}

#[test]
fn missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let err = load_snapshot(&temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SnapshotError::Io { .. }));
}

#[test]
fn malformed_timestamp_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("snapshot.json");
    fs::write(
        &path,
        r#"{"ProvisionedProducts": [{"Name": "x", "CreatedTime": "yesterday"}]}"#,
    )
    .unwrap();

    let err = load_snapshot(&path).unwrap_err();
    assert!(matches!(err, SnapshotError::Parse { .. }));
}

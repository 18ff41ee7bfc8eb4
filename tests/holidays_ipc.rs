mod test_support;

use serde_json::json;
use test_support::{open_and_login, request_err, request_ok, spawn_sidecar, temp_dir};

#[test]
fn toggle_adds_removes_and_ignores_blank_names() {
    let workspace = temp_dir("attendanced-holiday-toggle");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    open_and_login(&mut stdin, &mut reader, &workspace);

    let unchanged = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "holidays.toggle",
        json!({ "date": "2026-10-02", "name": "   " }),
    );
    assert_eq!(unchanged["action"], "unchanged");
    assert!(unchanged["holiday"].is_null());

    let added = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "holidays.toggle",
        json!({ "date": "2026-10-02", "name": "  Gandhi Jayanti " }),
    );
    assert_eq!(added["action"], "added");
    assert_eq!(added["holiday"]["name"], "Gandhi Jayanti");

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "holidays.create",
        json!({ "date": "2026-01-26", "name": "Republic Day" }),
    );
    let listed = request_ok(&mut stdin, &mut reader, "4", "holidays.list", json!({}));
    let dates: Vec<&str> = listed["holidays"]
        .as_array()
        .expect("holidays")
        .iter()
        .filter_map(|h| h["date"].as_str())
        .collect();
    assert_eq!(dates, vec!["2026-01-26", "2026-10-02"]);

    let october = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "holidays.month",
        json!({ "month": "2026-10" }),
    );
    assert_eq!(october["holidays"].as_array().map(|h| h.len()), Some(1));

    let removed = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "holidays.toggle",
        json!({ "date": "2026-10-02" }),
    );
    assert_eq!(removed["action"], "removed");
    assert_eq!(removed["holidays"].as_array().map(|h| h.len()), Some(1));

    let code = request_err(
        &mut stdin,
        &mut reader,
        "7",
        "holidays.create",
        json!({ "date": "26/01/2026", "name": "Bad Date" }),
    );
    assert_eq!(code, "bad_params");

    drop(stdin);
    let _ = child.wait();

    // Toggles commit immediately, without an attendance save.
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    open_and_login(&mut stdin, &mut reader, &workspace);
    let listed = request_ok(&mut stdin, &mut reader, "8", "holidays.list", json!({}));
    assert_eq!(listed["holidays"][0]["name"], "Republic Day");
    assert_eq!(listed["holidays"].as_array().map(|h| h.len()), Some(1));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

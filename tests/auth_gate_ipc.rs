mod test_support;

use serde_json::json;
use test_support::{request_err, request_ok, spawn_sidecar, temp_dir};

#[test]
fn data_methods_are_gated_until_login() {
    let workspace = temp_dir("attendanced-auth-gate");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let code = request_err(&mut stdin, &mut reader, "1", "classes.list", json!({}));
    assert_eq!(code, "no_workspace");

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let status = request_ok(&mut stdin, &mut reader, "3", "auth.status", json!({}));
    assert_eq!(status["authenticated"], false);

    for (i, method) in [
        "classes.list",
        "students.list",
        "holidays.list",
        "attendance.save",
        "dashboard.stats",
    ]
    .iter()
    .enumerate()
    {
        let code = request_err(&mut stdin, &mut reader, &format!("g{}", i), method, json!({}));
        assert_eq!(code, "not_authenticated", "{}", method);
    }

    let code = request_err(
        &mut stdin,
        &mut reader,
        "4",
        "auth.login",
        json!({ "username": "admin", "password": "nope" }),
    );
    assert_eq!(code, "not_authenticated");

    let login = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "auth.login",
        json!({ "username": "admin", "password": "password" }),
    );
    assert_eq!(login["authenticated"], true);
    let _ = request_ok(&mut stdin, &mut reader, "6", "classes.list", json!({}));

    drop(stdin);
    let _ = child.wait();

    // The flag is persisted with the workspace.
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let opened = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(opened["authenticated"], true);
    let _ = request_ok(&mut stdin, &mut reader, "8", "classes.list", json!({}));
    let _ = request_ok(&mut stdin, &mut reader, "9", "auth.logout", json!({}));
    let code = request_err(&mut stdin, &mut reader, "10", "classes.list", json!({}));
    assert_eq!(code, "not_authenticated");

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

mod test_support;

use serde_json::json;
use test_support::{open_and_login, request_err, request_ok, spawn_sidecar, temp_dir};

#[test]
fn deleting_a_class_removes_its_students() {
    let workspace = temp_dir("attendanced-class-cascade");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    open_and_login(&mut stdin, &mut reader, &workspace);

    let a = request_ok(&mut stdin, &mut reader, "1", "classes.create", json!({ "name": "Grade 7" }));
    let b = request_ok(&mut stdin, &mut reader, "2", "classes.create", json!({ "name": "Grade 8" }));
    let a_id = a["classId"].as_str().expect("classId").to_string();
    let b_id = b["classId"].as_str().expect("classId").to_string();

    for (i, (class_id, roll, name)) in [
        (&a_id, "A1", "Ravi"),
        (&a_id, "A2", "Sana"),
        (&b_id, "B1", "Tara"),
    ]
    .iter()
    .enumerate()
    {
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            &format!("s{}", i),
            "students.create",
            json!({ "classId": class_id, "studentId": roll, "name": name, "fatherName": "F" }),
        );
    }

    let listed = request_ok(&mut stdin, &mut reader, "3", "classes.list", json!({}));
    let counts: Vec<i64> = listed["classes"]
        .as_array()
        .expect("classes")
        .iter()
        .map(|c| c["studentCount"].as_i64().unwrap_or(-1))
        .collect();
    assert_eq!(counts, vec![2, 1]);

    let selected = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "classes.select",
        json!({ "classId": a_id }),
    );
    assert_eq!(selected["view"], "students");

    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "classes.delete",
        json!({ "classId": a_id }),
    );
    assert_eq!(deleted["removedStudents"], 2);

    let stats = request_ok(&mut stdin, &mut reader, "6", "dashboard.stats", json!({}));
    assert_eq!(stats["classCount"], 1);
    assert_eq!(stats["studentCount"], 1);

    // Selection went with the class.
    let code = request_err(&mut stdin, &mut reader, "7", "students.list", json!({}));
    assert_eq!(code, "bad_params");
    let code = request_err(
        &mut stdin,
        &mut reader,
        "8",
        "view.select",
        json!({ "view": "students" }),
    );
    assert_eq!(code, "bad_params");

    let remaining = request_ok(
        &mut stdin,
        &mut reader,
        "9",
        "students.list",
        json!({ "classId": b_id }),
    );
    assert_eq!(remaining["students"][0]["name"], "Tara");
    assert_eq!(remaining["students"][0]["motherName"], "");

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn student_records_validate_and_update() {
    let workspace = temp_dir("attendanced-students-crud");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    open_and_login(&mut stdin, &mut reader, &workspace);

    let code = request_err(&mut stdin, &mut reader, "1", "classes.create", json!({ "name": "   " }));
    assert_eq!(code, "bad_params");
    let class = request_ok(&mut stdin, &mut reader, "2", "classes.create", json!({ "name": "Grade 9" }));
    let class_id = class["classId"].as_str().expect("classId").to_string();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "classes.update",
        json!({ "classId": class_id, "name": "Grade 9A" }),
    );

    let code = request_err(
        &mut stdin,
        &mut reader,
        "4",
        "students.create",
        json!({ "classId": class_id, "studentId": "", "name": "No Roll" }),
    );
    assert_eq!(code, "bad_params");

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "students.create",
        json!({ "classId": class_id, "studentId": "9-1", "name": "Kiran" }),
    );
    let id = created["student"]["id"].as_str().expect("id").to_string();
    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "students.update",
        json!({ "id": id, "studentId": "9-1", "name": "Kiran Rao", "motherName": "Lata" }),
    );
    assert_eq!(updated["student"]["name"], "Kiran Rao");
    assert_eq!(updated["student"]["classId"], class_id);

    let code = request_err(
        &mut stdin,
        &mut reader,
        "7",
        "students.import",
        json!({ "classId": class_id, "text": "StudentId,Name,FatherName,MotherName\n9-2,Only Two" }),
    );
    assert_eq!(code, "import_parse_failed");

    let listed = request_ok(
        &mut stdin,
        &mut reader,
        "8",
        "students.list",
        json!({ "classId": class_id }),
    );
    assert_eq!(listed["className"], "Grade 9A");
    assert_eq!(listed["students"].as_array().map(|s| s.len()), Some(1));

    let _ = request_ok(&mut stdin, &mut reader, "9", "students.delete", json!({ "id": id }));
    let code = request_err(&mut stdin, &mut reader, "10", "students.delete", json!({ "id": id }));
    assert_eq!(code, "not_found");

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

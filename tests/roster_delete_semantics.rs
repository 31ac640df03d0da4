mod test_support;

use serde_json::json;
use test_support::{error_code, request, request_ok, spawn_sidecar, temp_dir};

#[test]
fn delete_removes_exactly_one_and_preserves_order() {
    let dir = temp_dir("rosterd-delete");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "roster.open",
        json!({ "path": dir.join("students.json").to_string_lossy() }),
    );

    for (i, (name, id)) in [
        ("Ana", "11111111"),
        ("Bea", "22222222"),
        ("Carla", "33333333"),
    ]
    .iter()
    .enumerate()
    {
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            &format!("add-{}", i),
            "roster.add",
            json!({ "name": name, "birthYear": "2000", "grade": "10", "nationalId": id }),
        );
    }

    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "roster.delete",
        json!({ "index": 1 }),
    );
    assert_eq!(deleted.get("count").and_then(|v| v.as_u64()), Some(2));

    let listed = request_ok(&mut stdin, &mut reader, "3", "roster.list", json!({}));
    let names: Vec<&str> = listed
        .get("students")
        .and_then(|v| v.as_array())
        .expect("students")
        .iter()
        .filter_map(|s| s.get("name").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(names, ["Ana", "Carla"]);
}

#[test]
fn delete_out_of_bounds_is_not_found_and_mutates_nothing() {
    let dir = temp_dir("rosterd-delete-oob");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "roster.open",
        json!({ "path": dir.join("students.json").to_string_lossy() }),
    );

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "roster.add",
        json!({ "name": "Ana", "birthYear": "2000", "grade": "10", "nationalId": "12345678" }),
    );

    let resp = request(
        &mut stdin,
        &mut reader,
        "3",
        "roster.delete",
        json!({ "index": 5 }),
    );
    assert_eq!(error_code(&resp), "not_found");

    let resp = request(
        &mut stdin,
        &mut reader,
        "4",
        "roster.update",
        json!({ "index": 5, "name": "Bea", "birthYear": "2001", "grade": "9", "nationalId": "87654321" }),
    );
    assert_eq!(error_code(&resp), "not_found");

    let listed = request_ok(&mut stdin, &mut reader, "5", "roster.list", json!({}));
    assert_eq!(
        listed.get("students").and_then(|v| v.as_array()).map(Vec::len),
        Some(1)
    );
}

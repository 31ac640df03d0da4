use crate::ipc::error::{err, ok, storage, validation};
use crate::ipc::types::{AppState, Request};
use crate::model::{current_year, StudentRecord};
use crate::store::{FileStorage, RecordStore};
use crate::validate::validate;
use serde_json::json;

fn store(state: &AppState) -> RecordStore<FileStorage> {
    RecordStore::new(state.roster.clone())
}

fn record_json(record: &StudentRecord, year: i32) -> serde_json::Value {
    json!({
        "name": record.name,
        "birthYear": record.birth_year,
        "grade": record.grade,
        "nationalId": record.national_id,
        "age": record.age(year),
    })
}

fn roster_json(records: &[StudentRecord]) -> serde_json::Value {
    let year = current_year();
    json!(records.iter().map(|r| record_json(r, year)).collect::<Vec<_>>())
}

fn string_param(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    match req.params.get(key).and_then(|v| v.as_str()) {
        Some(v) => Ok(v.trim().to_string()),
        None => Err(err(&req.id, "bad_params", format!("missing {}", key), None)),
    }
}

/// Pulls the four record fields out of params, trimmed the same way the form
/// trims them. A missing or non-string param is a framing error; emptiness
/// after trimming is the validator's call, not ours.
fn candidate_from_params(req: &Request) -> Result<StudentRecord, serde_json::Value> {
    Ok(StudentRecord {
        name: string_param(req, "name")?,
        birth_year: string_param(req, "birthYear")?,
        grade: string_param(req, "grade")?,
        national_id: string_param(req, "nationalId")?,
    })
}

fn index_param(req: &Request) -> Result<usize, serde_json::Value> {
    match req.params.get("index").and_then(|v| v.as_u64()) {
        Some(v) => Ok(v as usize),
        None => Err(err(&req.id, "bad_params", "missing index", None)),
    }
}

fn handle_roster_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match store(state).list() {
        Ok(records) => ok(&req.id, json!({ "students": roster_json(&records) })),
        Err(e) => storage(&req.id, &e),
    }
}

fn handle_roster_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let candidate = match candidate_from_params(req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let store = store(state);
    let roster = match store.list() {
        Ok(r) => r,
        Err(e) => return storage(&req.id, &e),
    };
    if let Err(e) = validate(&candidate, &roster, None, current_year()) {
        return validation(&req.id, &e);
    }

    match store.append(candidate) {
        Ok(count) => ok(&req.id, json!({ "count": count })),
        Err(e) => storage(&req.id, &e),
    }
}

fn handle_roster_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let index = match index_param(req) {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    let candidate = match candidate_from_params(req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let store = store(state);
    let roster = match store.list() {
        Ok(r) => r,
        Err(e) => return storage(&req.id, &e),
    };
    if index >= roster.len() {
        return err(&req.id, "not_found", "no record at index", None);
    }
    // Same rules as add; the slot being replaced is excluded from the
    // duplicate scan so a record can keep its own id.
    if let Err(e) = validate(&candidate, &roster, Some(index), current_year()) {
        return validation(&req.id, &e);
    }

    match store.replace_at(index, candidate) {
        Ok(true) => ok(&req.id, json!({ "count": roster.len() })),
        Ok(false) => err(&req.id, "not_found", "no record at index", None),
        Err(e) => storage(&req.id, &e),
    }
}

fn handle_roster_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let index = match index_param(req) {
        Ok(i) => i,
        Err(resp) => return resp,
    };

    let store = store(state);
    match store.remove_at(index) {
        Ok(true) => match store.list() {
            Ok(records) => ok(&req.id, json!({ "count": records.len() })),
            Err(e) => storage(&req.id, &e),
        },
        Ok(false) => err(&req.id, "not_found", "no record at index", None),
        Err(e) => storage(&req.id, &e),
    }
}

fn handle_roster_search(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match req.params.get("nationalId").and_then(|v| v.as_str()) {
        Some(v) => v.trim().to_string(),
        None => return err(&req.id, "bad_params", "missing nationalId", None),
    };

    match store(state).find_by_national_id(&id) {
        Ok(Some((index, record))) => ok(
            &req.id,
            json!({
                "student": record_json(&record, current_year()),
                "index": index
            }),
        ),
        Ok(None) => ok(&req.id, json!({ "student": null, "index": null })),
        Err(e) => storage(&req.id, &e),
    }
}

fn handle_roster_sort(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ascending = req
        .params
        .get("ascending")
        .and_then(|v| v.as_bool())
        .unwrap_or(true);

    match store(state).sort_by_name(ascending) {
        Ok(records) => ok(&req.id, json!({ "students": roster_json(&records) })),
        Err(e) => storage(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "roster.list" => Some(handle_roster_list(state, req)),
        "roster.add" => Some(handle_roster_add(state, req)),
        "roster.update" => Some(handle_roster_update(state, req)),
        "roster.delete" => Some(handle_roster_delete(state, req)),
        "roster.search" => Some(handle_roster_search(state, req)),
        "roster.sort" => Some(handle_roster_sort(state, req)),
        _ => None,
    }
}

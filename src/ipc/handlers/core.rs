use crate::ipc::error::{err, ok, storage};
use crate::ipc::types::{AppState, Request};
use crate::store::{FileStorage, Storage};
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "rosterPath": state.roster.path().to_string_lossy()
        }),
    )
}

fn handle_roster_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    // Load eagerly so a malformed file is reported here and the previous
    // roster stays selected. An absent file is created as an empty array.
    let candidate = FileStorage::new(&path);
    match candidate.load() {
        Ok(records) => {
            state.roster = candidate;
            ok(
                &req.id,
                json!({
                    "rosterPath": path.to_string_lossy(),
                    "count": records.len()
                }),
            )
        }
        Err(e) => storage(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "roster.open" => Some(handle_roster_open(state, req)),
        _ => None,
    }
}

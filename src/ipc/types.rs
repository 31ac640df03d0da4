use serde::Deserialize;

use crate::store::FileStorage;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    /// Backing file for the roster. Starts pointed at `students.json` in the
    /// working directory; `roster.open` re-points it.
    pub roster: FileStorage,
}

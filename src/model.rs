use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// One roster entry as stored in the backing file. All four fields are kept
/// as strings because that is what the form hands over; `grade` and
/// `birthYear` are validated to be numeric before a record is admitted.
///
/// Older roster files used `dni` for the national id and (in one variant)
/// the misspelled `borthYear`; both are accepted on load and written back
/// under the canonical keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    #[serde(rename = "birthYear", alias = "borthYear")]
    pub birth_year: String,
    pub grade: String,
    #[serde(rename = "nationalId", alias = "dni")]
    pub national_id: String,
}

impl StudentRecord {
    /// Age as the UI displays it: plain year difference, no month/day
    /// precision, so it can be off by one versus true age. `None` if the
    /// stored birth year does not parse (possible only for records written
    /// by an external tool).
    pub fn age(&self, current_year: i32) -> Option<i32> {
        self.birth_year
            .parse::<i32>()
            .ok()
            .map(|y| current_year - y)
    }
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

use std::fmt;

use crate::model::StudentRecord;

/// Why a candidate record was refused. Ordering of the checks is fixed (see
/// [`validate`]); callers can rely on the first violated rule being the one
/// reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField(&'static str),
    NonNumeric(&'static str),
    BirthYearInFuture,
    InvalidIdLength,
    DuplicateId,
}

impl ValidationError {
    /// Stable wire code reported over IPC.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyField(_) => "empty_field",
            ValidationError::NonNumeric(_) => "non_numeric",
            ValidationError::BirthYearInFuture => "birth_year_in_future",
            ValidationError::InvalidIdLength => "invalid_id_length",
            ValidationError::DuplicateId => "duplicate_id",
        }
    }

    /// The offending field, where one exists.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::EmptyField(f) | ValidationError::NonNumeric(f) => Some(*f),
            ValidationError::BirthYearInFuture => Some("birthYear"),
            ValidationError::InvalidIdLength | ValidationError::DuplicateId => {
                Some("nationalId")
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField(field) => write!(f, "{} must not be empty", field),
            ValidationError::NonNumeric(field) => write!(f, "{} must be a number", field),
            ValidationError::BirthYearInFuture => {
                write!(f, "birthYear must not be in the future")
            }
            ValidationError::InvalidIdLength => {
                write!(f, "nationalId must be an 8 or 9 digit number")
            }
            ValidationError::DuplicateId => write!(f, "nationalId already exists"),
        }
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Checks a candidate against the roster it would join. `skip_index` is the
/// position being replaced on update, so a record keeps passing the
/// duplicate check against itself; pass `None` on add. The duplicate check
/// runs on both add and update.
///
/// Rules run in a fixed order and the first failure wins:
/// empty fields (name, birthYear, grade, nationalId), then birthYear digits,
/// then birthYear not in the future, then grade digits, then the id shape,
/// then id uniqueness.
pub fn validate(
    candidate: &StudentRecord,
    roster: &[StudentRecord],
    skip_index: Option<usize>,
    current_year: i32,
) -> Result<(), ValidationError> {
    let fields: [(&'static str, &str); 4] = [
        ("name", &candidate.name),
        ("birthYear", &candidate.birth_year),
        ("grade", &candidate.grade),
        ("nationalId", &candidate.national_id),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField(field));
        }
    }

    if !all_digits(&candidate.birth_year) {
        return Err(ValidationError::NonNumeric("birthYear"));
    }
    // A digit string too large for i64 is certainly past the current year.
    match candidate.birth_year.parse::<i64>() {
        Ok(year) if year <= i64::from(current_year) => {}
        _ => return Err(ValidationError::BirthYearInFuture),
    }

    if !all_digits(&candidate.grade) {
        return Err(ValidationError::NonNumeric("grade"));
    }

    let id = candidate.national_id.as_str();
    if !(id.len() == 8 || id.len() == 9) || !all_digits(id) {
        return Err(ValidationError::InvalidIdLength);
    }

    for (i, existing) in roster.iter().enumerate() {
        if Some(i) == skip_index {
            continue;
        }
        if existing.national_id == id {
            return Err(ValidationError::DuplicateId);
        }
    }

    Ok(())
}

use super::model::{ExhibitionDataset, Gender, Record, Status};

// ---------------------------------------------------------------------------
// Filter predicate: one selection per categorical column plus an age limit
// ---------------------------------------------------------------------------

/// A categorical filter: either everything, or exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::All => write!(f, "All"),
            Selection::Only(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("age threshold '{0}' is not a number")]
    InvalidAgeThreshold(String),
}

/// The filter controls as they stand when the user presses Apply.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub nationality: Selection<String>,
    pub status: Selection<Status>,
    pub gender: Selection<Gender>,
    /// Maximum age, as typed. Blank means no limit.
    pub max_age: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            nationality: Selection::All,
            status: Selection::All,
            gender: Selection::All,
            max_age: "100".to_string(),
        }
    }
}

impl FilterState {
    /// Parse the age threshold text into a number.
    pub fn age_threshold(&self) -> Result<Option<f64>, FilterError> {
        let text = self.max_age.trim();
        if text.is_empty() {
            return Ok(None);
        }
        text.parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
            .map(Some)
            .ok_or_else(|| FilterError::InvalidAgeThreshold(self.max_age.clone()))
    }
}

/// Return indices of records that pass all four predicates.
///
/// Predicates are applied in the order nationality, status, gender, age.
/// A record without a numeric age never passes a numeric threshold.
pub fn filtered_indices(
    dataset: &ExhibitionDataset,
    filters: &FilterState,
) -> Result<Vec<usize>, FilterError> {
    let max_age = filters.age_threshold()?;

    Ok(dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| record_matches(r, filters, max_age))
        .map(|(i, _)| i)
        .collect())
}

fn record_matches(record: &Record, filters: &FilterState, max_age: Option<f64>) -> bool {
    if !filters.nationality.matches(&record.nationality) {
        return false;
    }
    if !filters.status.matches(&record.status) {
        return false;
    }
    if !filters.gender.matches(&record.gender) {
        return false;
    }
    match max_age {
        None => true,
        Some(limit) => record.age_at_exhibition.is_some_and(|age| age <= limit),
    }
}

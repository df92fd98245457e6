use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Gender / Status – the two categorical columns with a fixed vocabulary
// ---------------------------------------------------------------------------

/// Artist gender as recorded in the source data.
///
/// Anything other than `Male` / `Female` is kept verbatim so that it never
/// matches a concrete filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

impl Gender {
    /// The concrete values offered by the gender filter (besides "All").
    pub const CHOICES: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            other => Gender::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Whether the artist was alive when the exhibition opened.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Alive,
    Dead,
    Other(String),
}

impl Status {
    pub const CHOICES: [Status; 2] = [Status::Alive, Status::Dead];

    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Alive" => Status::Alive,
            "Dead" => Status::Dead,
            other => Status::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Alive => write!(f, "Alive"),
            Status::Dead => write!(f, "Dead"),
            Status::Other(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the exhibition table
// ---------------------------------------------------------------------------

/// One exhibited-artwork entry, validated at the load boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub firstname: String,
    pub lastname: String,
    pub nationality: String,
    pub gender: Gender,
    pub status: Status,
    /// `None` when the source cell is blank, missing or not a number. All
    /// three are treated alike: such a record never passes a numeric age
    /// threshold.
    pub age_at_exhibition: Option<f64>,
    /// Exhibition year. `None` stands in for a non-numeric source value.
    pub startdate: Option<i32>,
    pub country: String,
    pub city: String,
    /// Exhibition identifier.
    pub eid: String,
    pub paintings: u32,
}

impl Record {
    /// `firstname + " " + lastname`, exactly as stored (case-sensitive).
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

// -- Field coercion shared by every loader --

/// Coerce a year cell. Blank, non-numeric and out-of-range text become
/// `None`; fractional years are truncated.
pub fn coerce_year(s: &str) -> Option<i32> {
    let s = s.trim();
    if let Ok(year) = s.parse::<i32>() {
        return Some(year);
    }
    // "1905.0" style cells written by spreadsheet exports
    s.parse::<f64>()
        .ok()
        .map(f64::trunc)
        .filter(|v| v.is_finite() && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(v))
        .map(|v| v as i32)
}

pub fn coerce_age(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Painting counts fall back to 0 when missing or non-numeric.
pub fn coerce_paintings(s: &str) -> u32 {
    let s = s.trim();
    s.parse::<u32>().unwrap_or_else(|_| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u32)
            .unwrap_or(0)
    })
}

// ---------------------------------------------------------------------------
// ExhibitionDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ExhibitionDataset {
    /// All records in file order.
    pub records: Vec<Record>,
    /// Distinct nationalities, sorted ascending.
    pub nationalities: Vec<String>,
}

impl ExhibitionDataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let nationalities: BTreeSet<String> =
            records.iter().map(|r| r.nationality.clone()).collect();
        ExhibitionDataset {
            records,
            nationalities: nationalities.into_iter().collect(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Compact record builder for tests across the crate.
    pub(crate) fn record(first: &str, last: &str, year: Option<i32>) -> Record {
        Record {
            firstname: first.to_string(),
            lastname: last.to_string(),
            nationality: "FR".to_string(),
            gender: Gender::Male,
            status: Status::Alive,
            age_at_exhibition: Some(40.0),
            startdate: year,
            country: "FR".to_string(),
            city: "Paris".to_string(),
            eid: "1".to_string(),
            paintings: 1,
        }
    }

    #[test]
    fn full_name_joins_with_single_space() {
        let r = record("Claude", "Monet", Some(1905));
        assert_eq!(r.full_name(), "Claude Monet");
    }

    #[test]
    fn year_coercion_tolerates_garbage() {
        assert_eq!(coerce_year("1905"), Some(1905));
        assert_eq!(coerce_year(" 1910.0 "), Some(1910));
        assert_eq!(coerce_year("abc"), None);
        assert_eq!(coerce_year(""), None);
    }

    #[test]
    fn year_coercion_rejects_out_of_range() {
        assert_eq!(coerce_year("1e12"), None);
        assert_eq!(coerce_year("-1e12"), None);
        assert_eq!(coerce_year("inf"), None);
        assert_eq!(coerce_year("NaN"), None);
        assert_eq!(coerce_year("1905.5"), Some(1905));
    }

    #[test]
    fn paintings_default_to_zero() {
        assert_eq!(coerce_paintings("3"), 3);
        assert_eq!(coerce_paintings(""), 0);
        assert_eq!(coerce_paintings("n/a"), 0);
        assert_eq!(coerce_paintings("-2"), 0);
    }

    #[test]
    fn unknown_categories_are_kept() {
        assert_eq!(Gender::parse("Female"), Gender::Female);
        assert_eq!(Gender::parse("?"), Gender::Other("?".into()));
        assert_eq!(Status::parse(" Dead "), Status::Dead);
    }

    #[test]
    fn nationalities_are_sorted_and_distinct() {
        let mut a = record("A", "B", Some(1900));
        a.nationality = "IT".into();
        let b = record("C", "D", Some(1900));
        let c = record("E", "F", Some(1900));
        let ds = ExhibitionDataset::from_records(vec![a, b, c]);
        assert_eq!(ds.nationalities, vec!["FR".to_string(), "IT".to_string()]);
        assert_eq!(ds.len(), 3);
    }
}

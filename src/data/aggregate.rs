use std::collections::{HashMap, HashSet};

use super::model::Record;

/// How many artists the scatter plot shows.
pub const TOP_ARTISTS: usize = 10;

// ---------------------------------------------------------------------------
// Top-N artists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistCount {
    pub artist: String,
    pub count: usize,
}

/// Group by full name and keep the `n` artists with the most records.
///
/// Groups start out in first-occurrence order and the sort is stable, so
/// equal counts keep that order.
pub fn top_artists<'a>(records: impl IntoIterator<Item = &'a Record>, n: usize) -> Vec<ArtistCount> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<ArtistCount> = Vec::new();

    for r in records {
        let name = r.full_name();
        match slots.get(&name) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(name.clone(), counts.len());
                counts.push(ArtistCount {
                    artist: name,
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

// ---------------------------------------------------------------------------
// Artist × year grouping
// ---------------------------------------------------------------------------

/// All records sharing one (artist, year) key.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistYearGroup {
    pub artist: String,
    pub year: Option<i32>,
    /// Positions of the member records in the slice that was grouped.
    pub members: Vec<usize>,
    pub paintings: u64,
}

impl ArtistYearGroup {
    pub fn exhibitions(&self) -> usize {
        self.members.len()
    }
}

/// Two-level grouping by full name, then by start year.
///
/// Only records whose artist is in `artists` take part. Groups come back in
/// artist first-occurrence order, then year first-occurrence order.
pub fn group_by_artist_year(records: &[&Record], artists: &[ArtistCount]) -> Vec<ArtistYearGroup> {
    let wanted: HashSet<&str> = artists.iter().map(|a| a.artist.as_str()).collect();

    let mut artist_order: Vec<String> = Vec::new();
    let mut by_artist: HashMap<String, Vec<ArtistYearGroup>> = HashMap::new();

    for (pos, r) in records.iter().enumerate() {
        let name = r.full_name();
        if !wanted.contains(name.as_str()) {
            continue;
        }
        let years = by_artist.entry(name.clone()).or_insert_with(|| {
            artist_order.push(name.clone());
            Vec::new()
        });
        match years.iter_mut().find(|g| g.year == r.startdate) {
            Some(group) => {
                group.members.push(pos);
                group.paintings += u64::from(r.paintings);
            }
            None => years.push(ArtistYearGroup {
                artist: name,
                year: r.startdate,
                members: vec![pos],
                paintings: u64::from(r.paintings),
            }),
        }
    }

    artist_order
        .into_iter()
        .flat_map(|name| by_artist.remove(&name).unwrap_or_default())
        .collect()
}

// ---------------------------------------------------------------------------
// Country counts (bar chart)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

/// Count records per country, in first-occurrence order.
pub fn country_counts<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<CountryCount> {
    let mut counts: Vec<CountryCount> = Vec::new();
    for r in records {
        match counts.iter_mut().find(|c| c.country == r.country) {
            Some(c) => c.count += 1,
            None => counts.push(CountryCount {
                country: r.country.clone(),
                count: 1,
            }),
        }
    }
    counts
}

/// Count axis for the bar chart: `[0, max]` with integer ticks only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountAxis {
    pub max: usize,
    pub ticks: Vec<usize>,
}

impl CountAxis {
    /// Roughly ten ticks on a 1/2/5 × 10ⁿ step, never finer than 1.
    pub fn for_max(max: usize) -> Self {
        let mut step = 1usize;
        'search: loop {
            for factor in [1, 2, 5] {
                let candidate = step * factor;
                if max / candidate <= 10 {
                    step = candidate;
                    break 'search;
                }
            }
            step *= 10;
        }
        let ticks = (0..=max).step_by(step).collect();
        CountAxis { max, ticks }
    }
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub paintings: u64,
    pub countries: usize,
    pub cities: usize,
    pub exhibitions: usize,
}

impl SummaryStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut paintings = 0u64;
        let mut countries = HashSet::new();
        let mut cities = HashSet::new();
        let mut exhibitions = HashSet::new();
        for r in records {
            paintings += u64::from(r.paintings);
            countries.insert(r.country.as_str());
            cities.insert(r.city.as_str());
            exhibitions.insert(r.eid.as_str());
        }
        SummaryStats {
            paintings,
            countries: countries.len(),
            cities: cities.len(),
            exhibitions: exhibitions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    /// `counts[i]` records for artist `i`, interleaved so first occurrence
    /// follows artist index.
    fn artists_with_counts(counts: &[usize]) -> Vec<Record> {
        let max = counts.iter().copied().max().unwrap_or(0);
        let mut out = Vec::new();
        for round in 0..max {
            for (i, &n) in counts.iter().enumerate() {
                if round < n {
                    out.push(record(&format!("Artist{i}"), "X", Some(1900)));
                }
            }
        }
        out
    }

    #[test]
    fn keeps_ten_highest_counts_in_descending_order() {
        let counts = [3, 12, 1, 7, 9, 2, 11, 5, 8, 4, 10, 6];
        let records = artists_with_counts(&counts);
        let top = top_artists(&records, TOP_ARTISTS);

        assert_eq!(top.len(), 10);
        let got: Vec<usize> = top.iter().map(|a| a.count).collect();
        assert_eq!(got, vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3]);
        assert!(!top.iter().any(|a| a.artist == "Artist2 X" || a.artist == "Artist5 X"));
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let records = vec![
            record("Zoe", "Z", Some(1900)),
            record("Abe", "A", Some(1900)),
            record("Abe", "A", Some(1901)),
            record("Zoe", "Z", Some(1901)),
            record("Max", "M", Some(1900)),
        ];
        let top = top_artists(&records, TOP_ARTISTS);
        let names: Vec<&str> = top.iter().map(|a| a.artist.as_str()).collect();
        assert_eq!(names, vec!["Zoe Z", "Abe A", "Max M"]);
    }

    #[test]
    fn names_are_case_sensitive() {
        let records = vec![record("ann", "Lee", None), record("Ann", "Lee", None)];
        assert_eq!(top_artists(&records, TOP_ARTISTS).len(), 2);
    }

    #[test]
    fn artist_year_groups_sum_paintings() {
        let mut a = record("A", "B", Some(1900));
        a.paintings = 1;
        let mut b = record("A", "B", Some(1900));
        b.paintings = 2;
        let mut c = record("A", "B", Some(1900));
        c.paintings = 0; // missing in the source
        let d = record("A", "B", Some(1901));
        let records = [a, b, c, d];
        let refs: Vec<&Record> = records.iter().collect();
        let top = top_artists(refs.iter().copied(), TOP_ARTISTS);

        let groups = group_by_artist_year(&refs, &top);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].artist, "A B");
        assert_eq!(groups[0].year, Some(1900));
        assert_eq!(groups[0].exhibitions(), 3);
        assert_eq!(groups[0].paintings, 3);
        assert_eq!(groups[0].members, vec![0, 1, 2]);
        assert_eq!(groups[1].year, Some(1901));
    }

    #[test]
    fn grouping_drops_artists_outside_the_top() {
        let records = [record("A", "B", Some(1900)), record("C", "D", Some(1900))];
        let refs: Vec<&Record> = records.iter().collect();
        let chosen = vec![ArtistCount {
            artist: "C D".into(),
            count: 1,
        }];
        let groups = group_by_artist_year(&refs, &chosen);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec![1]);
    }

    #[test]
    fn same_surname_same_year_stay_separate() {
        let records = [record("Camille", "Pissarro", Some(1900)), record("Lucien", "Pissarro", Some(1900))];
        let refs: Vec<&Record> = records.iter().collect();
        let top = top_artists(refs.iter().copied(), TOP_ARTISTS);
        assert_eq!(group_by_artist_year(&refs, &top).len(), 2);
    }

    #[test]
    fn countries_counted_in_first_occurrence_order() {
        let records: Vec<Record> = ["FR", "DE", "FR", "DE", "FR"]
            .iter()
            .map(|c| {
                let mut r = record("A", "B", Some(1900));
                r.country = c.to_string();
                r
            })
            .collect();
        let counts = country_counts(&records);
        assert_eq!(
            counts,
            vec![
                CountryCount { country: "FR".into(), count: 3 },
                CountryCount { country: "DE".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn count_axis_ticks_are_integers_from_zero() {
        assert_eq!(CountAxis::for_max(3).ticks, vec![0, 1, 2, 3]);
        assert_eq!(CountAxis::for_max(0).ticks, vec![0]);

        let axis = CountAxis::for_max(37);
        assert_eq!(axis.ticks, vec![0, 5, 10, 15, 20, 25, 30, 35]);
        assert!(axis.ticks.len() <= 11);

        let wide = CountAxis::for_max(1234);
        assert_eq!(wide.ticks[0], 0);
        assert!(wide.ticks.iter().all(|&t| t <= 1234));
        assert!(wide.ticks.len() <= 11);
    }

    #[test]
    fn summary_counts_distinct_values() {
        let mut a = record("A", "B", Some(1900));
        a.paintings = 4;
        let mut b = record("A", "B", Some(1900));
        b.country = "DE".into();
        b.city = "Berlin".into();
        b.eid = "2".into();
        b.paintings = 0;
        let mut c = record("C", "D", Some(1901));
        c.city = "Lyon".into();
        c.paintings = 5;

        let stats = SummaryStats::from_records(&[a, b, c]);
        assert_eq!(
            stats,
            SummaryStats {
                paintings: 9,
                countries: 2,
                cities: 3,
                exhibitions: 2,
            }
        );
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        assert_eq!(SummaryStats::from_records(&[]), SummaryStats::default());
    }
}

use crate::data::aggregate::{
    ArtistCount, CountAxis, CountryCount, SummaryStats, TOP_ARTISTS, country_counts,
    group_by_artist_year, top_artists,
};
use crate::data::filter::{FilterError, FilterState, filtered_indices};
use crate::data::model::{ExhibitionDataset, Record};

/// Shown in place of the scatter plot when no record passes the filters.
pub const NO_DATA_MESSAGE: &str = "No data matches the selected criteria.";

// ---------------------------------------------------------------------------
// Render models – everything the UI needs, free of any drawing types
// ---------------------------------------------------------------------------

/// One scatter-plot point: an (artist, year) group.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub artist: String,
    pub year: i32,
    /// Row of the artist on the categorical axis (0 = most records).
    pub row: usize,
    pub exhibitions: usize,
    pub paintings: u64,
    /// Dataset indices of the records behind this mark.
    pub records: Vec<usize>,
}

impl Mark {
    pub fn tooltip(&self) -> String {
        format!(
            "{}, {}: {} exhibitions, {} paintings",
            self.artist, self.year, self.exhibitions, self.paintings
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    /// Top artists, highest count first. Their order defines the rows.
    pub artists: Vec<ArtistCount>,
    pub marks: Vec<Mark>,
    /// Min / max year over the whole filtered set, not only the top artists.
    pub year_extent: Option<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScatterModel {
    NoData,
    Chart(ScatterChart),
}

/// Result of pressing Apply.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub filtered_count: usize,
    pub stats: SummaryStats,
    pub scatter: ScatterModel,
}

/// Bar chart for one selected mark.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartModel {
    pub title: String,
    pub bars: Vec<CountryCount>,
    pub axis: CountAxis,
}

// ---------------------------------------------------------------------------
// Session – owns the dataset for its whole lifetime
// ---------------------------------------------------------------------------

/// A loaded dataset and the pipeline commands that run against it.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: ExhibitionDataset,
}

impl Session {
    pub fn new(dataset: ExhibitionDataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &ExhibitionDataset {
        &self.dataset
    }

    /// Filter, aggregate and build the scatter model.
    pub fn apply_filters(&self, filters: &FilterState) -> Result<RenderModel, FilterError> {
        let indices = filtered_indices(&self.dataset, filters)?;
        let filtered: Vec<&Record> = indices.iter().map(|&i| &self.dataset.records[i]).collect();
        log::info!(
            "Filters nationality={} status={} gender={} max_age={:?} kept {} of {} records",
            filters.nationality,
            filters.status,
            filters.gender,
            filters.max_age,
            filtered.len(),
            self.dataset.len()
        );

        let stats = SummaryStats::from_records(filtered.iter().copied());
        if filtered.is_empty() {
            return Ok(RenderModel {
                filtered_count: 0,
                stats,
                scatter: ScatterModel::NoData,
            });
        }

        let artists = top_artists(filtered.iter().copied(), TOP_ARTISTS);
        log::debug!("Top artists: {artists:?}");

        let groups = group_by_artist_year(&filtered, &artists);
        let mut marks = Vec::with_capacity(groups.len());
        let mut yearless = 0usize;
        for group in groups {
            let Some(year) = group.year else {
                yearless += 1;
                continue;
            };
            let row = artists
                .iter()
                .position(|a| a.artist == group.artist)
                .unwrap_or_default();
            marks.push(Mark {
                row,
                year,
                exhibitions: group.exhibitions(),
                paintings: group.paintings,
                records: group.members.iter().map(|&pos| indices[pos]).collect(),
                artist: group.artist,
            });
        }
        if yearless > 0 {
            log::debug!("{yearless} artist group(s) without a numeric year left unplotted");
        }

        let year_extent = filtered
            .iter()
            .filter_map(|r| r.startdate)
            .fold(None, |acc: Option<(i32, i32)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            });

        Ok(RenderModel {
            filtered_count: filtered.len(),
            stats,
            scatter: ScatterModel::Chart(ScatterChart {
                artists,
                marks,
                year_extent,
            }),
        })
    }

    /// Re-aggregate one mark's records by country.
    pub fn select_mark(&self, mark: &Mark) -> BarChartModel {
        let records = mark
            .records
            .iter()
            .filter_map(|&i| self.dataset.records.get(i));
        let bars = country_counts(records);
        let max = bars.iter().map(|b| b.count).max().unwrap_or(0);
        log::debug!("{} ({}): {} countries", mark.artist, mark.year, bars.len());

        BarChartModel {
            title: format!("{} ({})", mark.artist, mark.year),
            bars,
            axis: CountAxis::for_max(max),
        }
    }
}

use std::path::Path;

use exhibition_explorer::data::filter::FilterState;
use exhibition_explorer::data::loader::load_file;
use exhibition_explorer::session::{BarChartModel, RenderModel, ScatterModel, Session};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub session: Option<Session>,

    /// Filter controls as currently edited; only read on Apply.
    pub filters: FilterState,

    /// Output of the last successful Apply.
    pub render: Option<RenderModel>,

    /// Colours for the artists in `render`.
    pub color_map: ColorMap,

    /// Bar chart for the selected mark, cleared on every Apply.
    pub bar: Option<BarChartModel>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn with_filters(filters: FilterState) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    /// Load a file and start a fresh session. Failure leaves no session.
    pub fn load(&mut self, path: &Path) {
        self.session = None;
        self.render = None;
        self.bar = None;
        self.color_map = ColorMap::default();

        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {} ({} nationalities)",
                    dataset.len(),
                    path.display(),
                    dataset.nationalities.len()
                );
                self.session = Some(Session::new(dataset));
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Error loading data: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Run the pipeline with the current filter controls.
    pub fn apply_filters(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        match session.apply_filters(&self.filters) {
            Ok(model) => {
                self.color_map = match &model.scatter {
                    ScatterModel::Chart(chart) => ColorMap::for_artists(&chart.artists),
                    ScatterModel::NoData => ColorMap::default(),
                };
                self.render = Some(model);
                self.bar = None;
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("Filters not applied: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Feed the records of scatter mark `index` into the bar chart.
    pub fn select_mark(&mut self, index: usize) {
        let (Some(session), Some(render)) = (&self.session, &self.render) else {
            return;
        };
        if let ScatterModel::Chart(chart) = &render.scatter {
            if let Some(mark) = chart.marks.get(index) {
                self.bar = Some(session.select_mark(mark));
            }
        }
    }
}

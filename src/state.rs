use crate::color::CategoryColors;
use crate::data::aggregate::{PieChart, pie_chart};
use crate::data::filter::{ScatterChart, scatter_chart};
use crate::data::model::{LaunchTable, PayloadRange, SiteFilter};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded launch table (None until a file loads successfully).
    pub table: Option<LaunchTable>,

    /// Dropdown selection.
    pub site: SiteFilter,

    /// Slider selection.
    pub payload_range: PayloadRange,

    /// Slider step in kg (0 = continuous).
    pub slider_step: f64,

    /// Derived chart data (recomputed by the input handlers).
    pub pie: PieChart,
    pub scatter: ScatterChart,

    pub site_colors: CategoryColors,
    pub booster_colors: CategoryColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            site: SiteFilter::All,
            payload_range: PayloadRange::DEFAULT,
            slider_step: 1000.0,
            pie: PieChart::default(),
            scatter: ScatterChart::default(),
            site_colors: CategoryColors::default(),
            booster_colors: CategoryColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table: reset the payload range to its observed
    /// bounds, rebuild colours and both charts.  The site selection is kept.
    pub fn set_table(&mut self, table: LaunchTable) {
        self.payload_range = table.payload_bounds().unwrap_or(PayloadRange::DEFAULT);
        self.site_colors = CategoryColors::new(table.sites());
        self.booster_colors = CategoryColors::new(table.booster_categories());

        self.table = Some(table);
        self.status_message = None;
        self.update_pie();
        self.update_scatter();
    }

    /// Dropdown handler.  Both charts depend on the site.
    pub fn set_site(&mut self, site: SiteFilter) {
        if self.site == site {
            return;
        }
        self.site = site;
        self.update_pie();
        self.update_scatter();
    }

    /// Slider handler.  Only the scatter chart depends on the range.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.payload_range == range {
            return;
        }
        self.payload_range = range;
        self.update_scatter();
    }

    /// Observed payload range of the table.
    pub fn observed_bounds(&self) -> PayloadRange {
        self.table
            .as_ref()
            .and_then(|t| t.payload_bounds())
            .unwrap_or(PayloadRange::DEFAULT)
    }

    /// Slider bounds: the observed range widened to the slider step grid.
    pub fn slider_bounds(&self) -> PayloadRange {
        self.observed_bounds().aligned_to(self.slider_step)
    }

    /// Top-bar counter.  The plotted count is filtered by site and range.
    pub fn summary(&self) -> Option<String> {
        let table = self.table.as_ref()?;
        Some(format!(
            "{} launches loaded ({} successful), {} plotted for {} in {}",
            table.len(),
            table.success_count(),
            self.scatter.points.len(),
            self.site,
            self.payload_range
        ))
    }

    fn update_pie(&mut self) {
        if let Some(table) = &self.table {
            self.pie = pie_chart(table, &self.site);
            log::debug!("pie recomputed for {}: {} slices", self.site, self.pie.slices.len());
        }
    }

    fn update_scatter(&mut self) {
        if let Some(table) = &self.table {
            self.scatter = scatter_chart(table, &self.site, self.payload_range);
            log::debug!(
                "scatter recomputed for {} in {}: {} points",
                self.site,
                self.payload_range,
                self.scatter.points.len()
            );
        }
    }
}

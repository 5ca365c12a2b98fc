use std::collections::BTreeMap;

use super::model::{LaunchRecord, LaunchTable, Outcome, PayloadRange, SiteFilter};

// ---------------------------------------------------------------------------
// Scatter filter: (site, payload range) → points
// ---------------------------------------------------------------------------

/// One point of the payload-vs-outcome scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
    pub site: String,
}

impl From<&LaunchRecord> for ScatterPoint {
    fn from(rec: &LaunchRecord) -> Self {
        Self {
            payload_kg: rec.payload_kg,
            outcome: rec.outcome,
            booster_category: rec.booster_category.clone(),
            site: rec.site.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterChart {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Points grouped per booster category (one coloured series each).
    pub fn by_booster(&self) -> BTreeMap<&str, Vec<&ScatterPoint>> {
        let mut groups: BTreeMap<&str, Vec<&ScatterPoint>> = BTreeMap::new();
        for p in &self.points {
            groups.entry(p.booster_category.as_str()).or_default().push(p);
        }
        groups
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point of one booster series nearest to a plot position: same outcome
    /// row, closest payload.
    pub fn nearest(&self, booster: &str, payload_kg: f64, class: f64) -> Option<&ScatterPoint> {
        let class = class.round();
        self.points
            .iter()
            .filter(|p| p.booster_category == booster && p.outcome.class() as f64 == class)
            .min_by(|a, b| {
                (a.payload_kg - payload_kg)
                    .abs()
                    .total_cmp(&(b.payload_kg - payload_kg).abs())
            })
    }
}

/// Rows passing both the payload range and the site filter, in table order.
pub fn filtered_records<'a>(
    table: &'a LaunchTable,
    site: &'a SiteFilter,
    range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    table
        .records()
        .iter()
        .filter(move |r| range.contains(r.payload_kg))
        .filter(move |r| site.matches(&r.site))
}

pub fn scatter_chart(table: &LaunchTable, site: &SiteFilter, range: PayloadRange) -> ScatterChart {
    let title = match site {
        SiteFilter::All => "Outcome vs. Payload for All Sites".to_string(),
        SiteFilter::Site(s) => format!("Payload vs. Outcome for {s}"),
    };
    let points = filtered_records(table, site, range)
        .map(ScatterPoint::from)
        .collect();

    ScatterChart { title, points }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LaunchTable {
        LaunchTable::from_records(vec![
            LaunchRecord::new("KSC LC-39A", 5000.0, Outcome::Success, "FT"),
            LaunchRecord::new("KSC LC-39A", 3000.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("CCAFS LC-40", 2000.0, Outcome::Success, "v1.1"),
            LaunchRecord::new("CCAFS LC-40", 9000.0, Outcome::Success, "B5"),
        ])
    }

    #[test]
    fn all_sites_within_range() {
        let range = PayloadRange::new(0.0, 4000.0).unwrap();
        let chart = scatter_chart(&table(), &SiteFilter::All, range);

        let payloads: Vec<f64> = chart.points.iter().map(|p| p.payload_kg).collect();
        assert_eq!(payloads, vec![3000.0, 2000.0]);
        assert_eq!(chart.title, "Outcome vs. Payload for All Sites");
    }

    #[test]
    fn single_site_within_range() {
        let range = PayloadRange::new(0.0, 10_000.0).unwrap();
        let site = SiteFilter::parse("CCAFS LC-40");
        let chart = scatter_chart(&table(), &site, range);

        assert_eq!(chart.points.len(), 2);
        assert!(chart.points.iter().all(|p| p.site == "CCAFS LC-40"));
        assert_eq!(chart.title, "Payload vs. Outcome for CCAFS LC-40");
    }

    #[test]
    fn every_point_lies_in_range() {
        let t = table();
        for (lo, hi) in [(0.0, 0.0), (2000.0, 2000.0), (2500.0, 8000.0), (0.0, 1e9)] {
            let range = PayloadRange::new(lo, hi).unwrap();
            let chart = scatter_chart(&t, &SiteFilter::All, range);
            assert!(chart.points.iter().all(|p| lo <= p.payload_kg && p.payload_kg <= hi));
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = PayloadRange::new(3000.0, 5000.0).unwrap();
        let chart = scatter_chart(&table(), &SiteFilter::All, range);
        assert_eq!(chart.points.len(), 2);
    }

    #[test]
    fn empty_result_is_valid() {
        let range = PayloadRange::new(6000.0, 8000.0).unwrap();
        let chart = scatter_chart(&table(), &SiteFilter::parse("KSC LC-39A"), range);
        assert!(chart.is_empty());
        assert!(chart.by_booster().is_empty());
    }

    #[test]
    fn groups_points_by_booster() {
        let chart = scatter_chart(&table(), &SiteFilter::All, PayloadRange::DEFAULT);
        let groups = chart.by_booster();

        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), ["B5", "FT", "v1.1"]);
        assert_eq!(groups["v1.1"].len(), 2);
    }

    #[test]
    fn nearest_point_matches_outcome_row() {
        let chart = scatter_chart(&table(), &SiteFilter::All, PayloadRange::DEFAULT);

        let hit = chart.nearest("v1.1", 2900.0, 0.1).unwrap();
        assert_eq!((hit.payload_kg, hit.site.as_str()), (3000.0, "KSC LC-39A"));

        let hit = chart.nearest("v1.1", 2100.0, 0.9).unwrap();
        assert_eq!((hit.payload_kg, hit.site.as_str()), (2000.0, "CCAFS LC-40"));

        // Closer B5 point at 9000 kg is ignored for the FT series.
        let hit = chart.nearest("FT", 8800.0, 1.0).unwrap();
        assert_eq!(hit.payload_kg, 5000.0);

        assert!(ScatterChart::default().nearest("FT", 0.0, 1.0).is_none());
    }

    #[test]
    fn filtering_leaves_table_untouched() {
        let t = table();
        let before = t.records().to_vec();
        let _ = scatter_chart(&t, &SiteFilter::parse("KSC LC-39A"), PayloadRange::DEFAULT);
        assert_eq!(t.records(), before.as_slice());
    }
}

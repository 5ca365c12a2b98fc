use std::collections::BTreeMap;

use super::model::{LaunchTable, Outcome, SiteFilter};

// ---------------------------------------------------------------------------
// Pie aggregator: site filter → labelled counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of slice `idx` in `[0, 1]`; zero when the pie is empty.
    pub fn fraction(&self, idx: usize) -> f64 {
        let total = self.total();
        match self.slices.get(idx) {
            Some(slice) if total > 0 => slice.value as f64 / total as f64,
            _ => 0.0,
        }
    }

    #[cfg(test)]
    pub fn value_of(&self, label: &str) -> Option<u64> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.value)
    }
}

/// Build the success pie for the current dropdown selection.
///
/// * `All` → one slice per site, valued by its number of successful launches.
/// * A single site → `Success` and `Failure` slices counting that site's rows.
pub fn pie_chart(table: &LaunchTable, site: &SiteFilter) -> PieChart {
    match site {
        SiteFilter::All => {
            let mut per_site: BTreeMap<&str, u64> = BTreeMap::new();
            for rec in table.records() {
                *per_site.entry(rec.site.as_str()).or_default() += rec.outcome.class() as u64;
            }
            PieChart {
                title: "Total Successful Launches for All Sites".to_string(),
                slices: per_site
                    .into_iter()
                    .map(|(label, value)| PieSlice {
                        label: label.to_string(),
                        value,
                    })
                    .collect(),
            }
        }
        SiteFilter::Site(name) => {
            let (mut success, mut failure) = (0u64, 0u64);
            for rec in table.records().iter().filter(|r| &r.site == name) {
                match rec.outcome {
                    Outcome::Success => success += 1,
                    Outcome::Failure => failure += 1,
                }
            }
            PieChart {
                title: format!("Success vs. Failure for {name}"),
                slices: vec![
                    PieSlice {
                        label: Outcome::Success.label().to_string(),
                        value: success,
                    },
                    PieSlice {
                        label: Outcome::Failure.label().to_string(),
                        value: failure,
                    },
                ],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn table() -> LaunchTable {
        LaunchTable::from_records(vec![
            LaunchRecord::new("KSC LC-39A", 5000.0, Outcome::Success, "FT"),
            LaunchRecord::new("KSC LC-39A", 3000.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("CCAFS LC-40", 2000.0, Outcome::Success, "v1.1"),
            LaunchRecord::new("CCAFS LC-40", 9000.0, Outcome::Success, "B5"),
        ])
    }

    #[test]
    fn all_sites_counts_successes_per_site() {
        let pie = pie_chart(&table(), &SiteFilter::All);

        assert_eq!(pie.value_of("KSC LC-39A"), Some(1));
        assert_eq!(pie.value_of("CCAFS LC-40"), Some(2));
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.slices[0].label, "CCAFS LC-40");
        assert!(pie.title.contains("All Sites"));
    }

    #[test]
    fn all_sites_sum_equals_total_successes() {
        let t = table();
        let pie = pie_chart(&t, &SiteFilter::All);
        assert_eq!(pie.total(), t.success_count() as u64);
    }

    #[test]
    fn single_site_splits_success_and_failure() {
        let pie = pie_chart(&table(), &SiteFilter::parse("KSC LC-39A"));

        assert_eq!(pie.value_of("Success"), Some(1));
        assert_eq!(pie.value_of("Failure"), Some(1));
        assert_eq!(pie.title, "Success vs. Failure for KSC LC-39A");
    }

    #[test]
    fn single_site_total_equals_row_count() {
        let t = table();
        for site in t.sites() {
            let pie = pie_chart(&t, &SiteFilter::Site(site.clone()));
            let rows = t.records().iter().filter(|r| &r.site == site).count();
            assert_eq!(pie.total(), rows as u64);
        }
    }

    #[test]
    fn site_without_successes_does_not_fail() {
        let t = LaunchTable::from_records(vec![
            LaunchRecord::new("VAFB SLC-4E", 500.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("VAFB SLC-4E", 700.0, Outcome::Failure, "v1.1"),
        ]);

        let pie = pie_chart(&t, &SiteFilter::parse("VAFB SLC-4E"));
        assert_eq!(pie.value_of("Success"), Some(0));
        assert_eq!(pie.value_of("Failure"), Some(2));
        assert_eq!(pie.fraction(1), 1.0);

        let all = pie_chart(&t, &SiteFilter::All);
        assert_eq!(all.value_of("VAFB SLC-4E"), Some(0));
        assert_eq!(all.fraction(0), 0.0);
    }

    #[test]
    fn unknown_site_yields_empty_pie() {
        let pie = pie_chart(&table(), &SiteFilter::parse("CCAFS SLC-40"));
        assert_eq!(pie.total(), 0);
        assert_eq!(pie.slices.len(), 2);
    }

    #[test]
    fn fractions_sum_to_one() {
        let pie = pie_chart(&table(), &SiteFilter::All);
        let sum: f64 = (0..pie.slices.len()).map(|i| pie.fraction(i)).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}

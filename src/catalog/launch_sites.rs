use std::collections::HashMap;

use chrono::Datelike;
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::LaunchRecord;
use crate::track::GeoPoint;

/// Selects every site outside the United States.
pub const ALL_COUNTRIES: &str = "ALL";
const EXCLUDED_FROM_ALL: &str = "United States of America";
const OTHER_CATEGORY: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LaunchSiteSummary {
    pub site: String,
    pub count: usize,
    pub coord: GeoPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Launches per year for one purpose category at a site.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PurposeSeries {
    pub category: String,
    pub counts: Vec<YearCount>,
}

/// Count launches per site for a launch country, in order of first appearance.
pub fn summarize_sites(records: &[LaunchRecord], country: &str) -> Vec<LaunchSiteSummary> {
    let relevant = records.iter().filter(|r| {
        if country == ALL_COUNTRIES {
            r.launch_country.as_deref() != Some(EXCLUDED_FROM_ALL)
        } else {
            r.launch_country.as_deref() == Some(country)
        }
    });

    let mut summaries: Vec<LaunchSiteSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for record in relevant {
        match index.get(record.site.as_str()) {
            Some(&i) => summaries[i].count += 1,
            None => {
                index.insert(&record.site, summaries.len());
                summaries.push(LaunchSiteSummary {
                    site: record.site.clone(),
                    count: 1,
                    coord: record.coord,
                });
            }
        }
    }
    summaries
}

/// Purpose category of a launch: the first `/`-separated part of the purpose.
pub fn purpose_category(purpose: Option<&str>) -> String {
    purpose
        .and_then(|p| p.split('/').next())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(OTHER_CATEGORY)
        .to_string()
}

/// Per-category launch counts for a site, zero-filled across `year_extent`.
///
/// Without a global extent each category spans its own years.
pub fn launch_history(
    records: &[LaunchRecord],
    site: &str,
    year_extent: Option<(i32, i32)>,
) -> Vec<PurposeSeries> {
    let mut categories: Vec<(String, HashMap<i32, usize>)> = Vec::new();

    for record in records.iter().filter(|r| r.site == site) {
        let Some(date) = record.launch_date else {
            continue;
        };
        let category = purpose_category(record.purpose.as_deref());
        let position = match categories.iter().position(|(c, _)| *c == category) {
            Some(p) => p,
            None => {
                categories.push((category, HashMap::new()));
                categories.len() - 1
            }
        };
        *categories[position].1.entry(date.year()).or_default() += 1;
    }

    categories
        .into_iter()
        .filter_map(|(category, years)| {
            let (start, end) = year_extent.or_else(|| {
                let min = years.keys().min()?;
                let max = years.keys().max()?;
                Some((*min, *max))
            })?;
            let counts = (start..=end)
                .map(|year| YearCount {
                    year,
                    count: years.get(&year).copied().unwrap_or(0),
                })
                .collect();
            Some(PurposeSeries { category, counts })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(site: &str, country: &str, date: Option<(i32, u32, u32)>, purpose: Option<&str>) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            coord: GeoPoint::new(0.0, 0.0),
            owner_country: "Unknown".to_string(),
            launch_country: Some(country.to_string()),
            launch_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            purpose: purpose.map(String::from),
        }
    }

    fn records() -> Vec<LaunchRecord> {
        vec![
            record("Jiuquan", "China", Some((2018, 1, 9)), Some("Earth Observation")),
            record("Xichang", "China", Some((2019, 3, 1)), Some("Navigation/Global Positioning")),
            record("Jiuquan", "China", Some((2020, 6, 2)), Some("Earth Observation ")),
            record("Cape Canaveral", "United States of America", Some((2019, 5, 23)), Some("Communications")),
            record("Jiuquan", "China", Some((2020, 7, 4)), None),
            record("Jiuquan", "China", None, Some("Technology Development")),
            record("Plesetsk", "Russia", Some((2018, 2, 2)), Some("/Military")),
        ]
    }

    #[test]
    fn test_summarize_country() {
        let summaries = summarize_sites(&records(), "China");
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].site, "Jiuquan");
        assert_eq!(summaries[0].count, 4);
        assert_eq!(summaries[1].site, "Xichang");
        assert_eq!(summaries[1].count, 1);

        assert!(summarize_sites(&records(), "Atlantis").is_empty());
    }

    #[test]
    fn test_summarize_all_excludes_us() {
        let sites: Vec<String> = summarize_sites(&records(), ALL_COUNTRIES)
            .into_iter()
            .map(|s| s.site)
            .collect();
        assert_eq!(sites, vec!["Jiuquan", "Xichang", "Plesetsk"]);
    }

    #[test]
    fn test_purpose_category() {
        assert_eq!(purpose_category(Some("Communications/Navigation")), "Communications");
        assert_eq!(purpose_category(Some("  Earth Observation ")), "Earth Observation");
        assert_eq!(purpose_category(Some("/Military")), "Other");
        assert_eq!(purpose_category(Some("")), "Other");
        assert_eq!(purpose_category(None), "Other");
    }

    #[test]
    fn test_launch_history_global_extent() {
        let history = launch_history(&records(), "Jiuquan", Some((2017, 2020)));
        assert_eq!(history.len(), 2);

        let observation = &history[0];
        assert_eq!(observation.category, "Earth Observation");
        let counts: Vec<usize> = observation.counts.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![0, 1, 0, 1]);
        assert_eq!(observation.counts[0].year, 2017);

        // Missing purpose lands in "Other"; undated launches are ignored
        assert_eq!(history[1].category, "Other");
        assert_eq!(history[1].counts.iter().map(|c| c.count).sum::<usize>(), 1);
    }

    #[test]
    fn test_launch_history_own_extent() {
        let history = launch_history(&records(), "Xichang", None);
        assert_eq!(
            history,
            vec![PurposeSeries {
                category: "Navigation".to_string(),
                counts: vec![YearCount { year: 2019, count: 1 }],
            }]
        );
        assert!(launch_history(&records(), "Nowhere", Some((2000, 2001))).is_empty());
    }
}

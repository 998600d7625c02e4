use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;

use crate::catalog::error::CatalogError;
use crate::catalog::orbit_group::assign_phases;
use crate::catalog::types::{LaunchSiteRow, SatelliteRow};
use crate::catalog::{LaunchRecord, LaunchSite, Satellite};
use crate::track::{make_ground_track, GeoPoint, TrackParams};

const LAUNCH_DATE_FORMAT: &str = "%m/%d/%y";
const UNKNOWN_OWNER: &str = "Unknown";

/// Satellites, launch sites and the launch records joining the two.
pub struct Catalog {
    satellites: Vec<Satellite>,
    launch_sites: HashMap<String, LaunchSite>,
    launches: Vec<LaunchRecord>,
    year_extent: Option<(i32, i32)>,
}

impl Catalog {
    /// Load both tables from disk
    pub fn load(
        satellites_path: &Path,
        launch_sites_path: &Path,
        params: &TrackParams,
    ) -> Result<Self, CatalogError> {
        let satellites = open(satellites_path)?;
        let sites = open(launch_sites_path)?;
        let catalog = Self::from_readers(satellites, sites, params)?;

        log::info!(
            "Loaded {} satellites and {} launch sites ({} located launches)",
            catalog.satellites.len(),
            catalog.launch_sites.len(),
            catalog.launches.len()
        );
        Ok(catalog)
    }

    pub fn from_readers<S: Read, L: Read>(
        satellites: S,
        launch_sites: L,
        params: &TrackParams,
    ) -> Result<Self, CatalogError> {
        let site_rows: Vec<LaunchSiteRow> = read_table(launch_sites, "launch sites")?;
        let launch_sites: HashMap<String, LaunchSite> = site_rows
            .into_iter()
            .filter_map(build_launch_site)
            .map(|site| (site.name.clone(), site))
            .collect();

        let rows: Vec<SatelliteRow> = read_table(satellites, "satellites")?;

        let launches = rows
            .iter()
            .filter_map(|row| build_launch_record(row, &launch_sites))
            .collect();

        let mut satellites: Vec<Satellite> =
            rows.iter().map(|row| build_satellite(row, params)).collect();
        assign_phases(&mut satellites);

        let year_extent = satellites
            .iter()
            .filter_map(|s| s.launch_year)
            .fold(None, |extent: Option<(i32, i32)>, year| match extent {
                Some((lo, hi)) => Some((lo.min(year), hi.max(year))),
                None => Some((year, year)),
            });

        Ok(Self {
            satellites,
            launch_sites,
            launches,
            year_extent,
        })
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn satellite(&self, norad_id: u32) -> Option<&Satellite> {
        self.satellites
            .iter()
            .find(|s| s.norad_id == Some(norad_id))
    }

    /// Satellites grouped by operator country; those without one are left out.
    pub fn satellites_by_operator(&self) -> BTreeMap<&str, Vec<&Satellite>> {
        let mut groups: BTreeMap<&str, Vec<&Satellite>> = BTreeMap::new();
        for sat in &self.satellites {
            if let Some(country) = sat.operator_country.as_deref() {
                groups.entry(country).or_default().push(sat);
            }
        }
        groups
    }

    pub fn launch_sites(&self) -> &HashMap<String, LaunchSite> {
        &self.launch_sites
    }

    pub fn launches(&self) -> &[LaunchRecord] {
        &self.launches
    }

    /// Earliest and latest launch year over the whole catalog.
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        self.year_extent
    }
}

fn open(path: &Path) -> Result<File, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound(path.display().to_string()));
    }
    Ok(File::open(path)?)
}

/// Read a tab separated table, skipping rows that fail to deserialize.
fn read_table<T: DeserializeOwned, R: Read>(reader: R, table: &str) -> Result<Vec<T>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    reader
        .headers()
        .map_err(|e| CatalogError::InvalidTable {
            file: table.to_string(),
            message: e.to_string(),
        })?;

    let mut rows = Vec::new();
    for (i, record) in reader.deserialize().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => {
                // Header is line 1
                log::warn!("Skipping {} row {}: {}", table, i + 2, e);
            }
        }
    }
    Ok(rows)
}

fn build_launch_site(row: LaunchSiteRow) -> Option<LaunchSite> {
    let name = row.site.trim();
    if name.is_empty() {
        return None;
    }
    Some(LaunchSite {
        name: name.to_string(),
        coord: GeoPoint::new(
            parse_number(row.longitude.as_deref()),
            parse_number(row.latitude.as_deref()),
        ),
        country: clean(row.country.as_deref()),
    })
}

fn build_launch_record(
    row: &SatelliteRow,
    sites: &HashMap<String, LaunchSite>,
) -> Option<LaunchRecord> {
    let site_name = clean(row.launch_site.as_deref())?;
    let site = sites.get(&site_name)?;
    Some(LaunchRecord {
        site: site_name,
        coord: site.coord,
        owner_country: clean(row.operator_country.as_deref())
            .unwrap_or_else(|| UNKNOWN_OWNER.to_string()),
        launch_country: site.country.clone(),
        launch_date: parse_launch_date(row.launch_date.as_deref()),
        purpose: clean(row.purpose.as_deref()),
    })
}

pub(crate) fn build_satellite(row: &SatelliteRow, params: &TrackParams) -> Satellite {
    let name = clean(row.official_name.as_deref())
        .or_else(|| clean(row.alternate_names.as_deref()))
        .unwrap_or_default();
    let inclination_deg = parse_number(row.inclination.as_deref());
    let launch_date = parse_launch_date(row.launch_date.as_deref());
    let orbit_class_label = clean(row.orbit_class.as_deref());

    Satellite {
        name,
        norad_id: row
            .norad
            .as_deref()
            .and_then(|n| n.trim().parse().ok()),
        cospar: clean(row.cospar.as_deref()),
        registry_country: clean(row.registry_country.as_deref()),
        operator_country: clean(row.operator_country.as_deref()),
        purpose: clean(row.purpose.as_deref()),
        detailed_purpose: clean(row.detailed_purpose.as_deref()),
        orbit_class: orbit_class_label.as_deref().and_then(|c| c.parse().ok()),
        orbit_class_label,
        orbit_type: clean(row.orbit_type.as_deref()),
        perigee_km: parse_number(row.perigee.as_deref()),
        apogee_km: parse_number(row.apogee.as_deref()),
        inclination_deg,
        period_min: parse_number(row.period.as_deref()),
        launch_site: clean(row.launch_site.as_deref()),
        launch_date,
        launch_year: launch_date.map(|d| d.year()),
        ground_track: make_ground_track(inclination_deg, params),
        phase: 0.0,
    }
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Lenient numeric cell: thousands separators are dropped, anything
/// unparsable becomes 0.
fn parse_number(value: Option<&str>) -> f64 {
    value
        .map(|v| v.trim().replace(',', ""))
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn parse_launch_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, LAUNCH_DATE_FORMAT).ok()
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::track::{GeoPoint, GroundTrack};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum OrbitClass {
    #[strum(to_string = "LEO")]
    #[serde(rename = "LEO")]
    Leo,
    #[strum(to_string = "MEO")]
    #[serde(rename = "MEO")]
    Meo,
    #[strum(to_string = "GEO")]
    #[serde(rename = "GEO")]
    Geo,
    Elliptical,
}

/// One row of the satellite catalog with its derived track.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Satellite {
    pub name: String,
    pub norad_id: Option<u32>,
    pub cospar: Option<String>,
    pub registry_country: Option<String>,
    pub operator_country: Option<String>,
    pub purpose: Option<String>,
    pub detailed_purpose: Option<String>,
    pub orbit_class: Option<OrbitClass>,
    /// `Class of Orbit` cell as written, including classes outside `OrbitClass`
    #[serde(skip)]
    pub orbit_class_label: Option<String>,
    pub orbit_type: Option<String>,
    pub perigee_km: f64,
    pub apogee_km: f64,
    pub inclination_deg: f64,
    pub period_min: f64,
    pub launch_site: Option<String>,
    pub launch_date: Option<NaiveDate>,
    pub launch_year: Option<i32>,
    #[serde(skip)]
    pub ground_track: GroundTrack,
    pub phase: f64,
}

/// Compact listing entry used by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SatelliteSummary {
    pub name: String,
    pub norad_id: Option<u32>,
    pub operator_country: Option<String>,
    pub orbit_class: Option<OrbitClass>,
    pub inclination_deg: f64,
    pub phase: f64,
}

impl From<&Satellite> for SatelliteSummary {
    fn from(sat: &Satellite) -> Self {
        SatelliteSummary {
            name: sat.name.clone(),
            norad_id: sat.norad_id,
            operator_country: sat.operator_country.clone(),
            orbit_class: sat.orbit_class,
            inclination_deg: sat.inclination_deg,
            phase: sat.phase,
        }
    }
}

/// A launch site from the coordinate table.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LaunchSite {
    pub name: String,
    pub coord: GeoPoint,
    pub country: Option<String>,
}

/// A catalog row whose launch site could be located.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LaunchRecord {
    pub site: String,
    pub coord: GeoPoint,
    pub owner_country: String,
    pub launch_country: Option<String>,
    pub launch_date: Option<NaiveDate>,
    pub purpose: Option<String>,
}

/// Raw satellite row as found in the catalog table.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SatelliteRow {
    #[serde(rename = "Current Official Name of Satellite", default)]
    pub official_name: Option<String>,
    #[serde(rename = "Name of Satellite, Alternate Names", default)]
    pub alternate_names: Option<String>,
    #[serde(rename = "Country/Org of UN Registry", default)]
    pub registry_country: Option<String>,
    #[serde(rename = "Country of Operator/Owner", default)]
    pub operator_country: Option<String>,
    #[serde(rename = "Purpose", default)]
    pub purpose: Option<String>,
    #[serde(rename = "Detailed Purpose", default)]
    pub detailed_purpose: Option<String>,
    #[serde(rename = "Class of Orbit", default)]
    pub orbit_class: Option<String>,
    #[serde(rename = "Type of Orbit", default)]
    pub orbit_type: Option<String>,
    #[serde(rename = "Perigee (km)", default)]
    pub perigee: Option<String>,
    #[serde(rename = "Apogee (km)", default)]
    pub apogee: Option<String>,
    #[serde(rename = "Inclination (degrees)", default)]
    pub inclination: Option<String>,
    #[serde(rename = "Period (minutes)", default)]
    pub period: Option<String>,
    #[serde(rename = "NORAD Number", default)]
    pub norad: Option<String>,
    #[serde(rename = "COSPAR Number", default)]
    pub cospar: Option<String>,
    #[serde(rename = "Date of Launch", default)]
    pub launch_date: Option<String>,
    #[serde(rename = "Launch Site", default)]
    pub launch_site: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LaunchSiteRow {
    #[serde(rename = "Site")]
    pub site: String,
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<String>,
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<String>,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
}

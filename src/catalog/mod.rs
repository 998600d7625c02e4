mod error;
mod launch_sites;
mod loader;
mod orbit_group;
mod types;

pub use launch_sites::{
    launch_history, summarize_sites, LaunchSiteSummary, PurposeSeries, YearCount,
};
pub use loader::Catalog;
pub use types::{LaunchRecord, LaunchSite, OrbitClass, Satellite, SatelliteSummary};

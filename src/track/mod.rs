mod error;
mod ground_track;
mod types;
mod visibility;

pub use error::TrackError;
pub use ground_track::make_ground_track;
pub use types::{GeoPoint, GroundTrack, TrackParams};
pub use visibility::{visible_point, DEFAULT_HORIZON_MARGIN_RAD};

mod frame;
mod orientation;
mod projection;

pub use frame::{build_frame, DotPlacement, SatelliteDot};
pub use orientation::{FlyTo, FlyToTarget, GlobeOrientation};
pub use projection::Orthographic;

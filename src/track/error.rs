use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TrackError {
    #[error("track point count must be at least 1")]
    InvalidPointCount,
}

pub mod error;
pub mod globe;
pub mod launch_sites;
pub mod satellites;

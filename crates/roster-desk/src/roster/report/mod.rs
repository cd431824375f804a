mod summary;
pub mod views;

pub use summary::{build_report, RosterReport};

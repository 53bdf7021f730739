//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_date_display_format() -> String {
    "%Y-%m-%d".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the command line front-end.
pub struct AppConfig {
    /// JSON snapshot with trailers, customers and bookings.
    pub snapshot_path: String,
    /// Optional CSV export whose bookings are appended to the snapshot.
    #[serde(default)]
    pub bookings_csv: Option<String>,
    /// `chrono` format used for dates in human-facing output.
    #[serde(default = "default_date_display_format")]
    pub date_display_format: String,
}

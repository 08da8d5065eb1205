use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a performance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowState {
    Upcoming,
    Running,
    Completed,
}

impl ShowState {
    /// Maps the Korean status label used by KOPIS (`공연예정`, `공연중`,
    /// `공연완료`) to a [`ShowState`]. Returns `None` for any other label.
    #[must_use]
    pub fn from_kopis_label(label: &str) -> Option<Self> {
        match label.trim() {
            "공연예정" => Some(Self::Upcoming),
            "공연중" => Some(Self::Running),
            "공연완료" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for ShowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShowState::Upcoming => write!(f, "upcoming"),
            ShowState::Running => write!(f, "running"),
            ShowState::Completed => write!(f, "completed"),
        }
    }
}

/// Venue coordinates and capacity resolved from a venue name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub seat_capacity: u32,
}

/// A performance record normalized from the KOPIS open-data API, ready to be
/// handed to the persistence layer (which upserts by `show_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedShow {
    /// KOPIS performance ID, e.g. `"PF227440"`.
    pub show_id: String,
    pub title: String,
    pub start_date: NaiveDate,
    /// Never earlier than `start_date`.
    pub end_date: NaiveDate,
    /// Region tag supplied by the caller, e.g. `"서울"`.
    pub region: String,
    pub venue: String,
    /// `None` when the venue lookup failed.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub seat_capacity: Option<u32>,
    pub cast: Option<String>,
    pub creator: Option<String>,
    pub runtime: Option<String>,
    pub age: Option<String>,
    pub company: Option<String>,
    /// Price guidance exactly as published, e.g. `"전석 30,000원"`.
    pub price_text: Option<String>,
    /// Lowest tier extracted from `price_text`; `0` for free or unpriced shows.
    pub min_price: u32,
    pub description: Option<String>,
    pub state: Option<ShowState>,
    pub schedule: Option<String>,
    pub poster: Option<String>,
    pub detail_images: Vec<String>,
}

impl NormalizedShow {
    /// Returns `true` when geocode fields are populated.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Returns `true` when the show costs nothing to attend.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.min_price == 0
    }

    /// Number of days the run spans, counting both the first and last day.
    #[must_use]
    pub fn run_length_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

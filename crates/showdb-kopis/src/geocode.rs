//! Venue geocoding: the [`Geocoder`] seam used by the ingestor and its
//! KOPIS-facility implementation.

use async_trait::async_trait;
use showdb_core::GeocodeResult;

use crate::client::KopisClient;
use crate::error::GeocodeError;
use crate::types::{FacilityDetail, FacilitySummary};

/// Resolves a venue name to coordinates and seat capacity.
///
/// Implementations own any caching; the ingestor calls `resolve` once per
/// ingestion and never retries.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, venue: &str) -> Result<GeocodeResult, GeocodeError>;
}

/// [`Geocoder`] backed by the KOPIS facility endpoints: a name search picks
/// the facility, then its detail record supplies `la`, `lo`, and `seatscale`.
#[derive(Debug, Clone)]
pub struct KopisFacilityGeocoder {
    client: KopisClient,
}

impl KopisFacilityGeocoder {
    #[must_use]
    pub fn new(client: KopisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Geocoder for KopisFacilityGeocoder {
    async fn resolve(&self, venue: &str) -> Result<GeocodeResult, GeocodeError> {
        let venue = venue.trim();
        if venue.is_empty() {
            return Err(GeocodeError::NotFound {
                venue: venue.to_string(),
            });
        }

        let candidates = self.client.search_facilities(venue).await?;
        let facility_id = pick_facility(&candidates, venue).ok_or_else(|| GeocodeError::NotFound {
            venue: venue.to_string(),
        })?;
        tracing::debug!(venue, facility_id, "resolved venue to KOPIS facility");

        let detail = self.client.get_facility(facility_id).await?;
        geocode_from_detail(&detail)
    }
}

/// Prefers a facility whose name matches `venue` exactly, falling back to the
/// first search hit.
fn pick_facility<'a>(candidates: &'a [FacilitySummary], venue: &str) -> Option<&'a str> {
    let exact = candidates
        .iter()
        .find(|f| f.fcltynm.as_deref().map(str::trim) == Some(venue));
    exact
        .or_else(|| candidates.first())
        .and_then(|f| f.mt10id.as_deref())
        .map(str::trim)
}

fn geocode_from_detail(detail: &FacilityDetail) -> Result<GeocodeResult, GeocodeError> {
    let latitude = parse_coordinate(detail.la.as_deref(), "la", 90.0)?;
    let longitude = parse_coordinate(detail.lo.as_deref(), "lo", 180.0)?;

    let raw_seats = detail.seatscale.as_deref().unwrap_or_default();
    let seat_capacity = raw_seats
        .trim()
        .replace(',', "")
        .parse::<u32>()
        .map_err(|_| GeocodeError::InvalidField {
            field: "seatscale",
            value: raw_seats.to_string(),
        })?;

    Ok(GeocodeResult {
        latitude,
        longitude,
        seat_capacity,
    })
}

fn parse_coordinate(
    raw: Option<&str>,
    field: &'static str,
    bound: f64,
) -> Result<f64, GeocodeError> {
    let raw = raw.unwrap_or_default();
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= bound)
        .ok_or_else(|| GeocodeError::InvalidField {
            field,
            value: raw.to_string(),
        })
}

//! Single-show ingestion: fetch the KOPIS document and geocode the venue
//! concurrently, then map both into a [`NormalizedShow`].
//!
//! Fetch and parse failures are fatal. A geocode failure is recovered: the
//! record is still produced without coordinates and the failure is returned
//! as an [`IngestWarning`]. Nothing is retried here; retry policy belongs to
//! the caller.

use std::time::Duration;

use showdb_core::{GeocodeResult, NormalizedShow};

use crate::client::KopisClient;
use crate::error::{FetchError, GeocodeError, IngestError};
use crate::geocode::Geocoder;
use crate::normalize::map_show_document;

/// Non-fatal problem encountered while ingesting a show.
#[derive(Debug)]
pub enum IngestWarning {
    /// The venue could not be geocoded; coordinates and seat capacity are empty.
    GeocodeUnavailable { venue: String, error: GeocodeError },
}

impl std::fmt::Display for IngestWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestWarning::GeocodeUnavailable { venue, error } => {
                write!(f, "geocode unavailable for venue {venue:?}: {error}")
            }
        }
    }
}

/// A successfully ingested show plus any non-fatal warnings.
#[derive(Debug)]
pub struct IngestedShow {
    pub show: NormalizedShow,
    pub warnings: Vec<IngestWarning>,
}

impl IngestedShow {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Ingests one KOPIS show per call. Holds no mutable state, so one instance
/// can serve concurrent calls.
pub struct ShowIngestor<G> {
    client: KopisClient,
    geocoder: G,
    call_timeout: Duration,
}

impl<G: Geocoder> ShowIngestor<G> {
    /// `call_timeout` bounds the document fetch and the geocode lookup
    /// individually; a call that exceeds it counts as failed.
    pub fn new(client: KopisClient, geocoder: G, call_timeout: Duration) -> Self {
        Self {
            client,
            geocoder,
            call_timeout,
        }
    }

    /// Fetches, geocodes, and normalizes one show.
    ///
    /// # Errors
    ///
    /// - [`IngestError::Fetch`] if the document cannot be retrieved (network,
    ///   non-2xx status, blank body, KOPIS error envelope, or timeout). No
    ///   mapping is attempted.
    /// - [`IngestError::Parse`] if the document is invalid or lacks mandatory
    ///   fields.
    pub async fn ingest(
        &self,
        show_id: &str,
        venue: &str,
        region: &str,
    ) -> Result<IngestedShow, IngestError> {
        let (document, geocode) =
            tokio::join!(self.fetch_document(show_id), self.resolve_venue(venue));

        let document = match document {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(show_id, error = %e, "KOPIS document fetch failed");
                return Err(e.into());
            }
        };

        let mut warnings = Vec::new();
        let geocode = match geocode {
            Ok(result) => Some(result),
            Err(error) => {
                tracing::warn!(
                    show_id,
                    venue,
                    error = %error,
                    "geocode failed; ingesting without coordinates"
                );
                warnings.push(IngestWarning::GeocodeUnavailable {
                    venue: venue.to_string(),
                    error,
                });
                None
            }
        };

        let show = map_show_document(&document, geocode.as_ref(), region, venue)?;
        tracing::info!(
            show_id = %show.show_id,
            min_price = show.min_price,
            geocoded = geocode.is_some(),
            "show ingested"
        );

        Ok(IngestedShow { show, warnings })
    }

    async fn fetch_document(&self, show_id: &str) -> Result<String, FetchError> {
        tokio::time::timeout(self.call_timeout, self.client.fetch_show_document(show_id))
            .await
            .map_err(|_| FetchError::Timeout {
                resource: format!("pblprfr/{show_id}"),
                after: self.call_timeout,
            })?
    }

    async fn resolve_venue(&self, venue: &str) -> Result<GeocodeResult, GeocodeError> {
        tokio::time::timeout(self.call_timeout, self.geocoder.resolve(venue))
            .await
            .map_err(|_| GeocodeError::Timeout {
                venue: venue.to_string(),
                after: self.call_timeout,
            })?
    }
}

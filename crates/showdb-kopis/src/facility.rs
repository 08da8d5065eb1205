//! Facility (venue) endpoints for the KOPIS API client.

use crate::client::KopisClient;
use crate::error::GeocodeError;
use crate::types::{
    FacilityDetail, FacilityDetailEnvelope, FacilitySearchEnvelope, FacilitySummary,
};

/// Rows requested per facility search; the best match is nearly always first.
const FACILITY_SEARCH_ROWS: &str = "5";

impl KopisClient {
    /// Searches facilities by name.
    ///
    /// Calls `prfplc` with `shprfnmfct` set to `name`. Rows without an
    /// `mt10id` are dropped.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Lookup`] on transport or API-level failure.
    /// - [`GeocodeError::Xml`] if the response does not match the expected shape.
    pub async fn search_facilities(
        &self,
        name: &str,
    ) -> Result<Vec<FacilitySummary>, GeocodeError> {
        let url = self.build_url(
            &["prfplc"],
            &[
                ("cpage", "1"),
                ("rows", FACILITY_SEARCH_ROWS),
                ("shprfnmfct", name),
            ],
        );
        let body = self.request_xml(&url).await?;
        let envelope: FacilitySearchEnvelope = quick_xml::de::from_str(&body)?;
        Ok(envelope
            .db
            .into_iter()
            .filter(|f| f.mt10id.as_deref().is_some_and(|id| !id.trim().is_empty()))
            .collect())
    }

    /// Fetches facility detail (coordinates and seat count) by facility ID.
    ///
    /// Calls `prfplc/{facility_id}`.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Lookup`] on transport or API-level failure.
    /// - [`GeocodeError::Xml`] if the response does not match the expected shape.
    /// - [`GeocodeError::NotFound`] if the response holds no `<db>` record.
    pub async fn get_facility(&self, facility_id: &str) -> Result<FacilityDetail, GeocodeError> {
        let url = self.build_url(&["prfplc", facility_id.trim()], &[]);
        let body = self.request_xml(&url).await?;
        let envelope: FacilityDetailEnvelope = quick_xml::de::from_str(&body)?;
        envelope.db.ok_or_else(|| GeocodeError::NotFound {
            venue: facility_id.to_string(),
        })
    }
}

//! KOPIS open-data API response types.
//!
//! Every KOPIS endpoint answers with a `<dbs>` root holding zero or more
//! `<db>` records. The root element name is not checked by the deserializer;
//! only the child shape matters. All leaf fields are optional text so that a
//! missing element surfaces as a typed validation error in
//! [`crate::normalize`] rather than as a generic deserialization failure.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// pblprfr/{mt20id}
// ---------------------------------------------------------------------------

/// Envelope for the performance-detail endpoint. KOPIS returns exactly one
/// `<db>` per document; a second one is a deserialization error.
#[derive(Debug, Deserialize)]
pub struct ShowDetailEnvelope {
    #[serde(default)]
    pub db: Option<RawShowDocument>,
}

/// One performance record as published by KOPIS.
#[derive(Debug, Default, Deserialize)]
pub struct RawShowDocument {
    /// Performance ID, e.g. `"PF227440"`.
    pub mt20id: Option<String>,
    /// Title.
    pub prfnm: Option<String>,
    /// First performance date, `"YYYY.MM.DD"`.
    pub prfpdfrom: Option<String>,
    /// Last performance date, `"YYYY.MM.DD"`.
    pub prfpdto: Option<String>,
    /// Facility (venue) name.
    pub fcltynm: Option<String>,
    pub prfcast: Option<String>,
    pub prfcrew: Option<String>,
    pub prfruntime: Option<String>,
    pub prfage: Option<String>,
    /// Production company.
    pub entrpsnm: Option<String>,
    /// Free-text ticket price guidance.
    pub pcseguidance: Option<String>,
    /// Synopsis.
    pub sty: Option<String>,
    /// Status label: `공연예정`, `공연중`, or `공연완료`.
    pub prfstate: Option<String>,
    /// Schedule guidance, e.g. `"화요일 ~ 금요일(19:30)"`.
    pub dtguidance: Option<String>,
    pub poster: Option<String>,
    #[serde(default)]
    pub styurls: Option<DetailImages>,
}

/// `<styurls>` container. KOPIS emits zero, one, or many `<styurl>` children;
/// all three shapes land in the same `Vec`.
#[derive(Debug, Default, Deserialize)]
pub struct DetailImages {
    #[serde(rename = "styurl", default)]
    pub urls: Vec<String>,
}

// ---------------------------------------------------------------------------
// prfplc (facility search) and prfplc/{mt10id} (facility detail)
// ---------------------------------------------------------------------------

/// Envelope for the facility search endpoint.
#[derive(Debug, Deserialize)]
pub struct FacilitySearchEnvelope {
    #[serde(default)]
    pub db: Vec<FacilitySummary>,
}

/// A facility row returned by a name search.
#[derive(Debug, Deserialize)]
pub struct FacilitySummary {
    /// Facility ID, e.g. `"FC001247"`.
    pub mt10id: Option<String>,
    pub fcltynm: Option<String>,
}

/// Envelope for the facility detail endpoint.
#[derive(Debug, Deserialize)]
pub struct FacilityDetailEnvelope {
    #[serde(default)]
    pub db: Option<FacilityDetail>,
}

/// Facility detail. Coordinates and capacity arrive as text.
#[derive(Debug, Deserialize)]
pub struct FacilityDetail {
    pub mt10id: Option<String>,
    pub fcltynm: Option<String>,
    /// Seat count across all halls.
    pub seatscale: Option<String>,
    /// Latitude.
    pub la: Option<String>,
    /// Longitude.
    pub lo: Option<String>,
}

// ---------------------------------------------------------------------------
// error envelope
// ---------------------------------------------------------------------------

/// Shape KOPIS uses to report request-level failures (bad service key,
/// missing parameters) inside an otherwise successful HTTP response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    #[serde(default)]
    pub db: Vec<ApiErrorRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorRecord {
    pub returncode: Option<String>,
    pub errmsg: Option<String>,
}

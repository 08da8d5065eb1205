//! Mapping of a raw KOPIS performance document into a [`NormalizedShow`].
//!
//! Date and price parsing is delegated to [`crate::parse`]; this module owns
//! document structure and field validation.

use showdb_core::{GeocodeResult, NormalizedShow, ShowState};

use crate::error::ParseError;
use crate::parse::{parse_dotted_date, parse_min_price};
use crate::types::{RawShowDocument, ShowDetailEnvelope};

/// Deserializes a KOPIS performance-detail document into a [`RawShowDocument`].
///
/// # Errors
///
/// Returns [`ParseError::Xml`] if the XML is malformed or holds more than one
/// `<db>`, and [`ParseError::MissingElement`] if it holds none.
pub fn parse_show_document(xml: &str) -> Result<RawShowDocument, ParseError> {
    let envelope: ShowDetailEnvelope = quick_xml::de::from_str(xml)?;
    envelope.db.ok_or(ParseError::MissingElement)
}

/// Maps a KOPIS performance-detail document into a [`NormalizedShow`].
///
/// `geocode` is `None` when the venue lookup failed; the coordinate and
/// capacity fields are then left empty. `requested_venue` is used as the
/// venue name only when the document itself omits `<fcltynm>`.
///
/// # Errors
///
/// - [`ParseError::Xml`] / [`ParseError::MissingElement`] for a structurally
///   invalid document.
/// - [`ParseError::MissingField`] if `mt20id`, `prfnm`, `prfpdfrom`, or
///   `prfpdto` is absent or blank.
/// - [`ParseError::Date`] if a date is not `YYYY.MM.DD`.
/// - [`ParseError::DateRange`] if the run ends before it starts.
/// - [`ParseError::UnknownState`] for an unrecognized `prfstate` label.
pub fn map_show_document(
    xml: &str,
    geocode: Option<&GeocodeResult>,
    region: &str,
    requested_venue: &str,
) -> Result<NormalizedShow, ParseError> {
    let raw = parse_show_document(xml)?;
    map_raw_show(raw, geocode, region, requested_venue)
}

fn map_raw_show(
    raw: RawShowDocument,
    geocode: Option<&GeocodeResult>,
    region: &str,
    requested_venue: &str,
) -> Result<NormalizedShow, ParseError> {
    let show_id = required(raw.mt20id, "mt20id")?;
    let title = required(raw.prfnm, "prfnm")?;

    let start_text = required(raw.prfpdfrom, "prfpdfrom")?;
    let end_text = required(raw.prfpdto, "prfpdto")?;
    let start_date = parse_dotted_date(&start_text).map_err(|source| ParseError::Date {
        field: "prfpdfrom",
        source,
    })?;
    let end_date = parse_dotted_date(&end_text).map_err(|source| ParseError::Date {
        field: "prfpdto",
        source,
    })?;
    if start_date > end_date {
        return Err(ParseError::DateRange {
            start: start_date,
            end: end_date,
        });
    }

    let state = match optional(raw.prfstate) {
        Some(label) => Some(
            ShowState::from_kopis_label(&label).ok_or(ParseError::UnknownState(label))?,
        ),
        None => None,
    };

    // Price text is kept verbatim; only blank text is treated as absent.
    let price_text = raw.pcseguidance.filter(|s| !s.trim().is_empty());
    let min_price = price_text.as_deref().map_or(0, parse_min_price);

    let venue = optional(raw.fcltynm).unwrap_or_else(|| requested_venue.trim().to_string());

    let detail_images = raw
        .styurls
        .map(|images| images.urls)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|url| optional(Some(url)))
        .collect();

    Ok(NormalizedShow {
        show_id,
        title,
        start_date,
        end_date,
        region: region.to_string(),
        venue,
        latitude: geocode.map(|g| g.latitude),
        longitude: geocode.map(|g| g.longitude),
        seat_capacity: geocode.map(|g| g.seat_capacity),
        cast: optional(raw.prfcast),
        creator: optional(raw.prfcrew),
        runtime: optional(raw.prfruntime),
        age: optional(raw.prfage),
        company: optional(raw.entrpsnm),
        price_text,
        min_price,
        description: optional(raw.sty),
        state,
        schedule: optional(raw.dtguidance),
        poster: optional(raw.poster),
        detail_images,
    })
}

/// Trims a text field and treats blank text as absent.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ParseError> {
    optional(value).ok_or(ParseError::MissingField(field))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

pub mod client;
pub mod error;
pub mod facility;
pub mod geocode;
pub mod ingest;
pub mod normalize;
pub mod parse;
pub mod types;

pub use client::KopisClient;
pub use error::{FetchError, FormatError, GeocodeError, IngestError, ParseError};
pub use geocode::{Geocoder, KopisFacilityGeocoder};
pub use ingest::{IngestWarning, IngestedShow, ShowIngestor};
pub use normalize::map_show_document;
pub use parse::{parse_dotted_date, parse_min_price};

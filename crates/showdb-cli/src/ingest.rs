use std::time::Duration;

use showdb_kopis::{KopisClient, KopisFacilityGeocoder, ShowIngestor};

/// Output and failure policy for `ingest`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct IngestOptions {
    pub strict: bool,
    pub compact: bool,
}

/// Ingest one show and print the normalized record to stdout.
///
/// Warnings (e.g. a failed venue geocode) are logged and, with
/// `options.strict`, turned into an error after the record is printed.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the show cannot be
/// fetched or parsed, or `strict` is set and the record is partial.
pub(crate) async fn run_ingest(
    config: &showdb_core::AppConfig,
    show_id: &str,
    venue: &str,
    region: &str,
    options: IngestOptions,
) -> anyhow::Result<()> {
    let client = KopisClient::with_base_url(
        &config.kopis_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.kopis_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build KOPIS client: {e}"))?;

    let geocoder = KopisFacilityGeocoder::new(client.clone());
    let ingestor = ShowIngestor::new(
        client,
        geocoder,
        Duration::from_secs(config.request_timeout_secs),
    );

    let ingested = ingestor.ingest(show_id, venue, region).await?;

    let rendered = if options.compact {
        serde_json::to_string(&ingested.show)?
    } else {
        serde_json::to_string_pretty(&ingested.show)?
    };
    println!("{rendered}");

    for warning in &ingested.warnings {
        tracing::warn!(show_id, %warning, "show ingested with warning");
    }

    if options.strict && ingested.is_partial() {
        anyhow::bail!(
            "show {show_id} ingested with {} warning(s)",
            ingested.warnings.len()
        );
    }

    Ok(())
}

//! Integration tests for `KopisClient` and `KopisFacilityGeocoder` using
//! wiremock HTTP mocks.

use showdb_kopis::{FetchError, GeocodeError, Geocoder, KopisClient, KopisFacilityGeocoder};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> KopisClient {
    KopisClient::with_base_url("test-key", 30, "showdb-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/xml;charset=UTF-8")
        .set_body_string(body)
}

// ---------------------------------------------------------------------------
// fetch_show_document
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_show_document_returns_body() {
    let server = MockServer::start().await;
    let body = "<dbs><db><mt20id>PF227440</mt20id><prfnm>테스트공연</prfnm></db></dbs>";

    Mock::given(method("GET"))
        .and(path("/pblprfr/PF227440"))
        .and(query_param("service", "test-key"))
        .respond_with(xml(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = client
        .fetch_show_document("PF227440")
        .await
        .expect("should fetch document");

    assert_eq!(fetched, body);
}

#[tokio::test]
async fn fetch_show_document_non_success_status_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pblprfr/PF404"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_show_document("PF404").await.unwrap_err();

    match err {
        FetchError::UnexpectedStatus { status, resource } => {
            assert_eq!(status, 503);
            assert_eq!(resource, "/pblprfr/PF404");
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_show_document_blank_body_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pblprfr/PF1"))
        .respond_with(xml("  \n"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_show_document("PF1").await.unwrap_err();
    assert!(matches!(err, FetchError::EmptyBody { .. }), "got: {err:?}");
}

#[tokio::test]
async fn fetch_show_document_api_error_envelope_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pblprfr/PF1"))
        .respond_with(xml(
            "<dbs><db><returncode>02</returncode>\
             <errmsg>SERVICE KEY IS NOT REGISTERED ERROR.</errmsg></db></dbs>",
        ))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_show_document("PF1").await.unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("SERVICE KEY IS NOT REGISTERED"),
        "expected API error message, got: {msg}"
    );
}

#[tokio::test]
async fn fetch_error_never_exposes_service_key() {
    // Nothing listens on port 1; the connect error must not echo the URL.
    let client = test_client("http://127.0.0.1:1");
    let err = client.fetch_show_document("PF1").await.unwrap_err();
    assert!(matches!(err, FetchError::Http(_)), "got: {err:?}");
    assert!(!err.to_string().contains("test-key"));
}

// ---------------------------------------------------------------------------
// KopisFacilityGeocoder
// ---------------------------------------------------------------------------

async fn mount_facility_search(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/prfplc"))
        .and(query_param("service", "test-key"))
        .and(query_param("shprfnmfct", "세종문화회관"))
        .and(query_param("cpage", "1"))
        .respond_with(xml(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn facility_geocoder_resolves_coordinates_and_seats() {
    let server = MockServer::start().await;

    mount_facility_search(
        &server,
        "<dbs>\
         <db><fcltynm>세종문화회관 체임버홀</fcltynm><mt10id>FC000099</mt10id></db>\
         <db><fcltynm>세종문화회관</fcltynm><mt10id>FC000001</mt10id></db>\
         </dbs>",
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/prfplc/FC000001"))
        .respond_with(xml(
            "<dbs><db>\
             <fcltynm>세종문화회관</fcltynm><mt10id>FC000001</mt10id>\
             <mt13cnt>4</mt13cnt><seatscale>500</seatscale>\
             <la>37.57</la><lo>126.97</lo>\
             </db></dbs>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = KopisFacilityGeocoder::new(test_client(&server.uri()));
    let result = geocoder
        .resolve("세종문화회관")
        .await
        .expect("should resolve venue");

    assert!((result.latitude - 37.57).abs() < 1e-9);
    assert!((result.longitude - 126.97).abs() < 1e-9);
    assert_eq!(result.seat_capacity, 500);
}

#[tokio::test]
async fn facility_geocoder_reports_not_found() {
    let server = MockServer::start().await;
    mount_facility_search(&server, "<dbs></dbs>").await;

    let geocoder = KopisFacilityGeocoder::new(test_client(&server.uri()));
    let err = geocoder.resolve("세종문화회관").await.unwrap_err();

    assert!(
        matches!(err, GeocodeError::NotFound { ref venue } if venue == "세종문화회관"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn facility_geocoder_surfaces_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prfplc"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let geocoder = KopisFacilityGeocoder::new(test_client(&server.uri()));
    let err = geocoder.resolve("세종문화회관").await.unwrap_err();

    assert!(
        matches!(
            err,
            GeocodeError::Lookup(FetchError::UnexpectedStatus { status: 500, .. })
        ),
        "got: {err:?}"
    );
}

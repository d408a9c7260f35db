//! Integration tests for the individual lookups against a mock server.

use ippi::providers::{country, currency, geo, RemoteClient};
use ippi::{Coordinate, LookupError};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> RemoteClient {
  RemoteClient::new(Duration::from_millis(1000)).expect("client should build")
}

#[tokio::test]
async fn test_fetch_json_returns_document() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/doc"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": [1, 2]})))
    .mount(&server)
    .await;

  let doc: Value = client()
    .fetch_json(&format!("{}/doc", server.uri()))
    .await
    .unwrap();
  assert_eq!(doc, json!({"a": [1, 2]}));
}

#[tokio::test]
async fn test_fetch_json_bad_status() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
    .mount(&server)
    .await;

  let err = client()
    .fetch_json::<Value>(&format!("{}/missing", server.uri()))
    .await
    .unwrap_err();
  assert!(matches!(err, LookupError::BadStatus { status: 404, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_fetch_json_bad_body() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
    .mount(&server)
    .await;

  let err = client()
    .fetch_json::<Value>(&server.uri())
    .await
    .unwrap_err();
  assert_eq!(err.kind(), "bad-body");
}

#[tokio::test]
async fn test_fetch_json_unreachable_host() {
  let err = client()
    .fetch_json::<Value>("http://127.0.0.1:1/")
    .await
    .unwrap_err();
  assert!(matches!(err, LookupError::NoConnectivity { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_geo_lookup_reads_country() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/ip"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "countryCode": "NL",
      "countryCode3": "NLD",
      "countryName": "Netherlands"
    })))
    .expect(1)
    .mount(&server)
    .await;

  let info = geo::lookup(&client(), &format!("{}/ip", server.uri()), "77.247.181.163")
    .await
    .unwrap();
  assert_eq!(info.country_code3, "NLD");
  assert_eq!(info.country_name, "Netherlands");
}

#[tokio::test]
async fn test_country_lookup_unknown_code_is_bad_status() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/alpha/asdasd"))
    .respond_with(ResponseTemplate::new(400))
    .mount(&server)
    .await;

  let err = country::lookup(
    &client(),
    &format!("{}/alpha", server.uri()),
    "asdasd",
    Coordinate::new(-34.0, -64.0),
  )
  .await
  .unwrap_err();
  assert!(matches!(err, LookupError::BadStatus { status: 400, .. }));
}

#[tokio::test]
async fn test_country_lookup_summarizes() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/alpha/nl"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "languages": [{"iso639_1": "nl", "iso639_2": "nld", "name": "Dutch"}],
      "timezones": ["UTC-04:00", "UTC+01:00"],
      "latlng": [52.5, 5.75],
      "currencies": [{"code": "EUR"}]
    })))
    .mount(&server)
    .await;

  let info = country::lookup(
    &client(),
    &format!("{}/alpha", server.uri()),
    "nl",
    Coordinate::new(-34.0, -64.0),
  )
  .await
  .unwrap();
  assert_eq!(info.languages[0].name, "Dutch");
  assert_eq!(info.times.len(), 2);
  assert!(info.times[1].ends_with("(UTC+01:00)"));
  assert!((info.distance - 11741.87).abs() < 1e-9);
  assert_eq!(info.currency_code, "EUR");
}

#[tokio::test]
async fn test_currency_lookup_unrecognized_code_is_empty() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/convert"))
    .and(query_param("q", "USD_XXX,XXX_USD"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
    .expect(1)
    .mount(&server)
    .await;

  let rates = currency::lookup(&client(), &format!("{}/convert", server.uri()), "xxx", None)
    .await
    .unwrap();
  assert!(rates.is_none());
}

#[tokio::test]
async fn test_currency_lookup_sends_api_key() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/convert"))
    .and(query_param("q", "USD_EUR,EUR_USD"))
    .and(query_param("apiKey", "s3cret"))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!({"USD_EUR": 0.92, "EUR_USD": 1.087})),
    )
    .expect(1)
    .mount(&server)
    .await;

  let rates = currency::lookup(
    &client(),
    &format!("{}/convert", server.uri()),
    "EUR",
    Some("s3cret"),
  )
  .await
  .unwrap()
  .expect("EUR should be recognized");
  assert_eq!(rates.code, "EUR");
  assert!((rates.from_usd - 0.92).abs() < f64::EPSILON);
  assert!((rates.to_usd - 1.087).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_currency_lookup_non_object_body_is_bad_body() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/convert"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
    .mount(&server)
    .await;

  let err = currency::lookup(&client(), &format!("{}/convert", server.uri()), "ars", None)
    .await
    .unwrap_err();
  assert_eq!(err.kind(), "bad-body");
}

#[tokio::test]
async fn test_currency_failure_does_not_reveal_api_key() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/convert"))
    .and(query_param("apiKey", "s3cret"))
    .respond_with(ResponseTemplate::new(503))
    .expect(1)
    .mount(&server)
    .await;

  let err = currency::lookup(
    &client(),
    &format!("{}/convert", server.uri()),
    "EUR",
    Some("s3cret"),
  )
  .await
  .unwrap_err();
  assert!(matches!(err, LookupError::BadStatus { status: 503, .. }), "got {err:?}");
  let message = err.to_string();
  assert!(message.contains("/convert?q=USD_EUR,EUR_USD"), "{message}");
  assert!(!message.contains("s3cret"), "{message}");
  assert!(!message.contains("apiKey"), "{message}");
}

#[tokio::test]
async fn test_currency_unreachable_does_not_reveal_api_key() {
  let err = currency::lookup(&client(), "http://127.0.0.1:1/convert", "EUR", Some("s3cret"))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), "no-connectivity");
  assert!(!err.to_string().contains("s3cret"));
}

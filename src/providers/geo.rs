//! IP to country lookup.

use crate::error::LookupError;
use crate::providers::RemoteClient;
use serde::{Deserialize, Serialize};

/// Country an IP address is registered in.
///
/// Field names follow the geolocation service's JSON response.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Info {
  /// ISO 3166-1 alpha-3 code, e.g. `USA`
  pub country_code3: String,

  /// Country name
  pub country_name: String,
}

/// Builds the request URL; the service takes the raw IP as the whole query.
#[must_use]
pub fn url(endpoint: &str, ip: &str) -> String {
  format!("{endpoint}?{ip}")
}

/// Fetches the country for an IP address.
///
/// # Arguments
/// * `client` - client used for the request
/// * `endpoint` - geolocation service base URL
/// * `ip` - an already validated IPv4 or IPv6 literal
///
/// # Errors
/// Any [`LookupError`] from the transport. An IP the service does not know
/// shows up as [`LookupError::BadStatus`]; a response without the country
/// fields as [`LookupError::BadBody`].
pub async fn lookup(
  client: &RemoteClient,
  endpoint: &str,
  ip: &str,
) -> Result<Info, LookupError> {
  client.fetch_json::<Info>(&url(endpoint, ip)).await
}

//! Conversion rates between a currency and the US dollar.

use crate::error::LookupError;
use crate::providers::RemoteClient;
use serde::Serialize;
use serde_json::{Map, Value};

/// Both directions of the exchange rate for `code`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Rates {
  pub code: String,
  /// How many `code` one US dollar buys
  pub from_usd: f64,
  /// How many US dollars one `code` buys
  pub to_usd: f64,
}

impl Rates {
  /// `USD_<CODE>`
  #[must_use]
  pub fn from_usd_key(&self) -> String {
    from_usd_key(&self.code)
  }

  /// `<CODE>_USD`
  #[must_use]
  pub fn to_usd_key(&self) -> String {
    to_usd_key(&self.code)
  }
}

fn from_usd_key(code: &str) -> String {
  format!("USD_{code}")
}

fn to_usd_key(code: &str) -> String {
  format!("{code}_USD")
}

#[must_use]
pub fn url(endpoint: &str, code: &str) -> String {
  let code = code.to_uppercase();
  format!(
    "{endpoint}?q={},{}&compact=ultra",
    from_usd_key(&code),
    to_usd_key(&code)
  )
}

/// Reads the two rates for `code` out of a compact conversion response.
///
/// The service answers an unknown currency with a body that simply lacks the
/// requested pairs, so a missing `USD_<CODE>` key means "unrecognized" and
/// yields `Ok(None)`.
///
/// # Errors
///
/// Returns a description when `USD_<CODE>` is present but the reverse pair is
/// missing or either value is not a number.
pub fn extract(body: &Map<String, Value>, code: &str) -> Result<Option<Rates>, String> {
  let code = code.to_uppercase();
  let (from_key, to_key) = (from_usd_key(&code), to_usd_key(&code));

  let Some(from_usd) = body.get(&from_key) else {
    return Ok(None);
  };
  let from_usd = from_usd
    .as_f64()
    .ok_or_else(|| format!("{from_key} is not a number"))?;
  let to_usd = body
    .get(&to_key)
    .and_then(Value::as_f64)
    .ok_or_else(|| format!("{to_key} is missing or not a number"))?;

  Ok(Some(Rates {
    code,
    from_usd,
    to_usd,
  }))
}

/// Fetches USD conversion rates for `code` (any case).
///
/// Returns `Ok(None)` when the service does not recognize the currency.
/// `api_key` goes out as the `apiKey` query parameter but is left out of the
/// URL that gets logged or reported.
///
/// # Errors
///
/// Transport errors as returned by [`RemoteClient::fetch_json`], or
/// [`LookupError::BadBody`] if the body is not a JSON object or holds
/// malformed rates.
pub async fn lookup(
  client: &RemoteClient,
  endpoint: &str,
  code: &str,
  api_key: Option<&str>,
) -> Result<Option<Rates>, LookupError> {
  let url = url(endpoint, code);
  let secrets: Vec<(&str, &str)> =
    api_key.map(|key| ("apiKey", key)).into_iter().collect();
  let body = client
    .fetch_json_with_secrets::<Map<String, Value>>(&url, &secrets)
    .await?;
  extract(&body, code).map_err(|reason| LookupError::BadBody { url, reason })
}

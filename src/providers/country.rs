//! Country metadata: languages, local times, distance and currency.

use crate::distance::{round_hundredths, Coordinate, Unit};
use crate::error::LookupError;
use crate::providers::RemoteClient;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// `UTC`, `UTC+5`, `UTC-03`, `UTC+05:45`, `UTC+0545`
static RE_UTC_OFFSET: LazyLock<regex::Regex> = LazyLock::new(|| {
  regex::Regex::new(r"^UTC(?:([+-])([0-9]{1,2})(?::?([0-9]{2}))?)?$").unwrap()
});

/// Largest offset `chrono` and the tz database agree on.
const MAX_OFFSET_HOURS: i32 = 18;

#[derive(Debug, Deserialize, Clone)]
struct RawLanguage {
  name: String,
  iso639_1: Option<String>,
  iso639_2: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
struct RawCurrency {
  code: Option<String>,
}

/// The parts of the country service response an investigation needs.
#[derive(Debug, Deserialize, Clone)]
pub struct Response {
  languages: Vec<RawLanguage>,
  timezones: Vec<String>,
  latlng: Vec<f64>,
  currencies: Vec<RawCurrency>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Language {
  pub name: String,
  pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryInfo {
  pub languages: Vec<Language>,
  /// Current local time per timezone, `HH:MM:SS(<timezone>)`
  pub times: Vec<String>,
  /// Kilometers from the reference point, two decimals
  pub distance: f64,
  pub currency_code: String,
}

#[must_use]
pub fn url(endpoint: &str, code: &str) -> String {
  format!("{}/{code}", endpoint.trim_end_matches('/'))
}

/// Parses a `UTC±HH:MM` style timezone into a fixed offset.
#[must_use]
pub fn parse_utc_offset(timezone: &str) -> Option<FixedOffset> {
  let caps = RE_UTC_OFFSET.captures(timezone.trim())?;
  let Some(sign) = caps.get(1) else {
    return FixedOffset::east_opt(0);
  };

  let hours: i32 = caps.get(2)?.as_str().parse().ok()?;
  let minutes: i32 = caps.get(3).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
  if hours > MAX_OFFSET_HOURS || minutes > 59 {
    return None;
  }

  let seconds = hours * 3600 + minutes * 60;
  FixedOffset::east_opt(if sign.as_str() == "-" { -seconds } else { seconds })
}

/// Wall-clock time at `timezone` for the instant `now`, tagged with the raw
/// timezone string: `21:04:05(UTC-03:00)`.
#[must_use]
pub fn local_time_at(timezone: &str, now: DateTime<Utc>) -> Option<String> {
  let offset = parse_utc_offset(timezone)?;
  Some(format!(
    "{}({timezone})",
    now.with_timezone(&offset).format("%H:%M:%S")
  ))
}

/// Turns a raw country response into the fields an investigation keeps.
///
/// # Errors
///
/// Returns a description of the first expected field that is missing or
/// malformed.
pub fn summarize(
  raw: Response,
  reference: Coordinate,
  now: DateTime<Utc>,
) -> Result<CountryInfo, String> {
  let languages = raw
    .languages
    .into_iter()
    .map(|lang| -> Result<Language, String> {
      let code = lang
        .iso639_1
        .or(lang.iso639_2)
        .ok_or_else(|| format!("language {} has no ISO 639 code", lang.name))?;
      Ok(Language {
        name: lang.name,
        code,
      })
    })
    .collect::<Result<Vec<_>, String>>()?;

  let times = raw
    .timezones
    .iter()
    .map(|tz| {
      local_time_at(tz, now).ok_or_else(|| format!("unrecognized timezone {tz:?}"))
    })
    .collect::<Result<Vec<_>, String>>()?;

  let centroid = match raw.latlng.as_slice() {
    [lat, lng, ..] => Coordinate::new(*lat, *lng),
    _ => return Err("latlng does not hold a coordinate".to_string()),
  };
  let distance = round_hundredths(reference.distance_to(&centroid, Unit::Kilometers));

  let currency_code = raw
    .currencies
    .into_iter()
    .next()
    .and_then(|c| c.code)
    .ok_or_else(|| "country declares no currency code".to_string())?;

  Ok(CountryInfo {
    languages,
    times,
    distance,
    currency_code,
  })
}

/// Fetches everything an investigation wants to know about a country.
///
/// `code` may be an ISO 3166-1 alpha-2 or alpha-3 code in any case.
///
/// # Errors
///
/// Transport errors as returned by [`RemoteClient::fetch_json`]; an unknown
/// code is a [`LookupError::BadStatus`]; a response missing any of the
/// expected fields is a [`LookupError::BadBody`].
pub async fn lookup(
  client: &RemoteClient,
  endpoint: &str,
  code: &str,
  reference: Coordinate,
) -> Result<CountryInfo, LookupError> {
  let url = url(endpoint, code);
  let raw = client.fetch_json::<Response>(&url).await?;
  summarize(raw, reference, Utc::now())
    .map_err(|reason| LookupError::BadBody { url, reason })
}

//! Runs the three lookups of an investigation in order and decides how much
//! of the result survives a failure.

use crate::config::Config;
use crate::error::LookupError;
use crate::ip;
use crate::providers::country::{CountryInfo, Language};
use crate::providers::currency::Rates;
use crate::providers::{country, currency, geo, RemoteClient};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Everything learned about one IP address.
///
/// Serializes to the flat document `{ip, countryCode, countryName, languages,
/// times, distance, currencyCode, USD_<CODE>, <CODE>_USD}`, omitting whatever
/// was not learned.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investigation {
  pub ip: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub country_code: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub country_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub languages: Option<Vec<Language>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub times: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub distance: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub currency_code: Option<String>,
  #[serde(flatten)]
  pub rates: BTreeMap<String, f64>,
}

impl Investigation {
  fn new(ip: &str) -> Self {
    Self {
      ip: ip.to_string(),
      ..Default::default()
    }
  }

  fn record_geo(&mut self, info: geo::Info) {
    self.country_code = Some(info.country_code3);
    self.country_name = Some(info.country_name);
  }

  fn record_country(&mut self, info: CountryInfo) {
    self.languages = Some(info.languages);
    self.times = Some(info.times);
    self.distance = Some(info.distance);
    self.currency_code = Some(info.currency_code);
  }

  fn record_rates(&mut self, rates: &Rates) {
    self.rates.insert(rates.from_usd_key(), rates.from_usd);
    self.rates.insert(rates.to_usd_key(), rates.to_usd);
  }

  /// `(to_usd, from_usd)` if the currency stage found rates.
  #[must_use]
  pub fn rates_for(&self, code: &str) -> Option<(f64, f64)> {
    let to_usd = self.rates.get(&format!("{code}_USD"))?;
    let from_usd = self.rates.get(&format!("USD_{code}"))?;
    Some((*to_usd, *from_usd))
  }
}

/// How far an investigation got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Init,
  GeoDone,
  CountryDone,
  CurrencyDone,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Init => "init",
      Self::GeoDone => "geolocation",
      Self::CountryDone => "country info",
      Self::CurrencyDone => "currency",
    };
    f.write_str(name)
  }
}

#[derive(Debug)]
pub enum Outcome {
  /// Every stage ran. Rates are absent only if the currency was unrecognized.
  Complete(Investigation),
  /// A stage after geolocation failed; `reached` is the last one that worked.
  Partial {
    investigation: Investigation,
    reached: Stage,
    error: LookupError,
  },
  /// Invalid IP, or not even the country could be found.
  Empty,
}

impl Outcome {
  #[must_use]
  pub const fn investigation(&self) -> Option<&Investigation> {
    match self {
      Self::Complete(investigation) | Self::Partial { investigation, .. } => {
        Some(investigation)
      }
      Self::Empty => None,
    }
  }

  #[must_use]
  pub fn into_investigation(self) -> Option<Investigation> {
    match self {
      Self::Complete(investigation) | Self::Partial { investigation, .. } => {
        Some(investigation)
      }
      Self::Empty => None,
    }
  }

  #[must_use]
  pub const fn is_complete(&self) -> bool {
    matches!(self, Self::Complete(_))
  }
}

pub struct Pipeline {
  client: RemoteClient,
  config: Config,
  progress: ProgressBar,
}

impl Pipeline {
  /// # Errors
  ///
  /// Returns [`LookupError::Client`] if the HTTP client cannot be built.
  pub fn new(config: Config) -> Result<Self, LookupError> {
    let client = RemoteClient::new(config.connect_timeout())?;
    Ok(Self {
      client,
      config,
      progress: ProgressBar::hidden(),
    })
  }

  /// Reports each stage on `progress` while investigating.
  #[must_use]
  pub fn with_progress(mut self, progress: ProgressBar) -> Self {
    self.progress = progress;
    self
  }

  /// Investigates `ip`: geolocation, then country info, then currency rates.
  ///
  /// Never fails outright. A stage failure is logged and the investigation
  /// stops there, keeping what earlier stages found; if geolocation itself
  /// fails nothing is kept.
  pub async fn investigate(&self, ip: &str) -> Outcome {
    if !ip::is_valid_ip(ip) {
      debug!("{ip:?} is not an IP address, nothing to investigate");
      return Outcome::Empty;
    }

    let mut investigation = Investigation::new(ip);
    let endpoints = &self.config.endpoints;

    self.progress.set_message("Fetching geolocation info...");
    match geo::lookup(&self.client, &endpoints.geolocation, ip).await {
      Ok(info) => investigation.record_geo(info),
      Err(error) => {
        self.log_failure(Stage::Init, &error);
        return Outcome::Empty;
      }
    }

    let country_code = investigation.country_code.clone().unwrap_or_default();
    self.progress.set_message("Fetching country info...");
    match country::lookup(
      &self.client,
      &endpoints.country,
      &country_code,
      self.config.reference,
    )
    .await
    {
      Ok(info) => investigation.record_country(info),
      Err(error) => return self.partial(investigation, Stage::GeoDone, error),
    }

    let currency_code = investigation.currency_code.clone().unwrap_or_default();
    self.progress.set_message("Fetching currency rates...");
    match currency::lookup(
      &self.client,
      &endpoints.currency,
      &currency_code,
      self.config.currency_api_key.as_deref(),
    )
    .await
    {
      Ok(Some(rates)) => investigation.record_rates(&rates),
      Ok(None) => self.progress.suspend(|| {
        info!("Currency {currency_code} is not known to the conversion service");
      }),
      Err(error) => {
        return self.partial(investigation, Stage::CountryDone, error)
      }
    }

    debug!("Investigation of {ip} reached stage {}", Stage::CurrencyDone);
    Outcome::Complete(investigation)
  }

  fn partial(
    &self,
    investigation: Investigation,
    reached: Stage,
    error: LookupError,
  ) -> Outcome {
    self.log_failure(reached, &error);
    Outcome::Partial {
      investigation,
      reached,
      error,
    }
  }

  fn log_failure(&self, reached: Stage, error: &LookupError) {
    self.progress.suspend(|| {
      warn!("{error}");
      debug!("Stopped after stage {reached} ({} error)", error.kind());
    });
  }
}

//! The one HTTP primitive every lookup goes through: GET a URL, fail on a bad
//! status, decode the body as JSON.

use crate::error::LookupError;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RemoteClient {
  http: Client,
}

impl RemoteClient {
  /// Builds a client that gives up on connecting after `connect_timeout`.
  ///
  /// There is deliberately no read timeout: once connected, a request waits
  /// for the full response.
  ///
  /// # Errors
  ///
  /// Returns [`LookupError::Client`] if the TLS backend cannot be initialized.
  pub fn new(connect_timeout: Duration) -> Result<Self, LookupError> {
    let http = Client::builder()
      .user_agent(format!("ippi/{}", env!("CARGO_PKG_VERSION")))
      .connect_timeout(connect_timeout)
      .build()
      .map_err(LookupError::Client)?;
    Ok(Self { http })
  }

  /// Sends a single GET to `url` and decodes the JSON body into `T`.
  ///
  /// Use `serde_json::Value` for `T` to get the untyped document.
  ///
  /// # Errors
  ///
  /// - [`LookupError::Timeout`] if connecting took longer than the timeout
  /// - [`LookupError::NoConnectivity`] if the host could not be resolved or reached
  /// - [`LookupError::BadStatus`] if the server answered with a status >= 400
  /// - [`LookupError::BadBody`] if the body is not JSON or does not match `T`
  /// - [`LookupError::Request`] if the request could not be sent at all
  pub async fn fetch_json<T: DeserializeOwned>(
    &self,
    url: &str,
  ) -> Result<T, LookupError> {
    self.fetch_json_with_secrets(url, &[]).await
  }

  /// Like [`fetch_json`](Self::fetch_json), but appends `secrets` to the
  /// query string. They are sent to the server and never appear in logs or
  /// in the returned error.
  ///
  /// # Errors
  ///
  /// Same as [`fetch_json`](Self::fetch_json).
  pub async fn fetch_json_with_secrets<T: DeserializeOwned>(
    &self,
    url: &str,
    secrets: &[(&str, &str)],
  ) -> Result<T, LookupError> {
    debug!("GET {url}");

    let mut request = self.http.get(url);
    if !secrets.is_empty() {
      request = request.query(secrets);
    }
    let response = request
      .send()
      .await
      .map_err(|e| LookupError::from_reqwest(url, e))?;

    let status = response.status();
    if status.as_u16() >= 400 {
      return Err(LookupError::BadStatus {
        status: status.as_u16(),
        url: url.to_string(),
      });
    }

    let body = response
      .text()
      .await
      .map_err(|e| LookupError::from_reqwest(url, e))?;
    debug!("{url} answered {status} with {} bytes", body.len());

    serde_json::from_str(&body).map_err(|e| LookupError::BadBody {
      url: url.to_string(),
      reason: e.to_string(),
    })
  }
}

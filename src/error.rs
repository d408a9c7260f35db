use thiserror::Error;

/// Why a remote lookup failed.
///
/// The `Display` text is what gets logged when a stage is cut short.
#[derive(Debug, Error)]
pub enum LookupError {
  #[error("Request timed out and couldn't get all the required data. URL: {url}")]
  Timeout { url: String },

  #[error("Couldn't make the request to the server. Make sure you have internet access. URL: {url}")]
  NoConnectivity { url: String },

  #[error("Server responded with error {status}. Check if URL is correct. URL: {url}")]
  BadStatus { status: u16, url: String },

  #[error("Unexpected response body from {url}: {reason}")]
  BadBody { url: String, reason: String },

  #[error("Request to {url} failed: {reason}")]
  Request { url: String, reason: String },

  #[error("Failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),
}

impl LookupError {
  /// Categorizes a `reqwest` failure for the request sent to `url`.
  ///
  /// `url` is what gets reported; the URL `reqwest` itself recorded (which
  /// may carry credentials in its query) is stripped from the reason.
  pub(crate) fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
    let url = url.to_string();
    if error.is_timeout() {
      Self::Timeout { url }
    } else if error.is_connect() {
      Self::NoConnectivity { url }
    } else if let Some(status) = error.status() {
      Self::BadStatus {
        status: status.as_u16(),
        url,
      }
    } else if error.is_body() || error.is_decode() {
      Self::BadBody {
        url,
        reason: error.without_url().to_string(),
      }
    } else {
      Self::Request {
        url,
        reason: error.without_url().to_string(),
      }
    }
  }

  /// Short machine-friendly category name.
  #[must_use]
  pub const fn kind(&self) -> &'static str {
    match self {
      Self::Timeout { .. } => "timeout",
      Self::NoConnectivity { .. } => "no-connectivity",
      Self::BadStatus { .. } => "bad-status",
      Self::BadBody { .. } => "bad-body",
      Self::Request { .. } => "request",
      Self::Client(_) => "client",
    }
  }
}

use crate::pipeline::Investigation;
use anyhow::{Context, Result};
use console::style;

/// Helper: coloured keys so the report is easy to scan.
fn key(s: &str) -> console::StyledObject<&str> {
  style(s).bold().cyan()
}

fn line(label: &str, value: impl std::fmt::Display) -> String {
  format!("{} {value}", key(label))
}

/// Renders `value` the way the report has always shown numbers: whole values
/// keep a trailing `.0` (`0.0 km`, not `0 km`).
fn decimal(value: f64) -> String {
  let text = value.to_string();
  if value.is_finite() && !text.contains('.') {
    format!("{text}.0")
  } else {
    text
  }
}

/// Builds the text report for `result`.
///
/// `local_time` is the caller's wall clock (`HH:MM:SS`) and `reference_name`
/// names the point distances were measured from. The country details only
/// appear when the country stage succeeded, and the conversion clause only
/// when rates were found.
#[must_use]
pub fn render_report(
  result: &Investigation,
  local_time: &str,
  reference_name: &str,
) -> String {
  let mut lines = vec![
    line("IP to investigate:", &result.ip),
    line("Current local time:", local_time),
    line("Country:", result.country_name.as_deref().unwrap_or("N/A")),
    line("ISO Code:", result.country_code.as_deref().unwrap_or("N/A")),
  ];

  if let Some(languages) = &result.languages {
    let languages = languages
      .iter()
      .map(|lang| format!("{} ({})", lang.name, lang.code))
      .collect::<Vec<_>>()
      .join(", ");
    lines.push(line("Languages:", languages));

    let times = result.times.as_deref().unwrap_or_default().join(", ");
    lines.push(line("Local times:", times));

    if let Some(distance) = result.distance {
      lines.push(line(
        &format!("Estimated distance from {reference_name}:"),
        format!("{} km", decimal(distance)),
      ));
    }

    if let Some(code) = &result.currency_code {
      let mut currency = code.clone();
      if let Some((to_usd, from_usd)) = result.rates_for(code) {
        currency.push_str(&format!(
          " (1 {code} = {} --- 1 USD = {} {code})",
          decimal(to_usd),
          decimal(from_usd)
        ));
      }
      lines.push(line("Currency:", currency));
    }
  }

  lines.join("\n")
}

pub fn print_human_readable(
  result: &Investigation,
  local_time: &str,
  reference_name: &str,
) {
  println!("{}\n", render_report(result, local_time, reference_name));
}

pub fn print_json(result: &Investigation) -> Result<()> {
  serde_json::to_string_pretty(result)
    .map(|s| println!("{s}"))
    .context("Failed to serialize results to JSON")
}

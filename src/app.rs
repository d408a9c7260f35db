use crate::cli::Cli;
use crate::config::{self, Config};
use crate::ip;
use crate::logger;
use crate::pipeline::{Outcome, Pipeline};
use crate::results;
use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::process::ExitCode;
use std::time::Duration;

pub struct App {
  cli: Cli,
  config: Config,
}

impl App {
  pub fn new() -> Result<Self> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let mut config = config::load();
    cli.apply_overrides(&mut config);

    Ok(Self { cli, config })
  }

  pub async fn run(&mut self) -> Result<ExitCode> {
    if self.cli.save_config {
      config::store(&self.config).context("Failed to save configuration")?;
      info!("Configuration saved");
    }

    if self.cli.config_show {
      return self.print_config();
    }

    let ip = self.cli.ip.clone().unwrap_or_default();
    if !ip::is_valid_ip(&ip) {
      eprintln!(
        "Invalid IP. The IP {ip} is not a valid IP address. Please provide a valid IP address."
      );
      return Ok(ExitCode::FAILURE);
    }

    let progress = self.progress_bar();
    let pipeline = Pipeline::new(self.config.clone())
      .context("Failed to set up the HTTP client")?
      .with_progress(progress.clone());

    let outcome = pipeline.investigate(&ip).await;
    progress.finish_and_clear();

    if let Outcome::Partial { reached, .. } = &outcome {
      info!("Showing partial results, investigation stopped after {reached}");
    }

    match outcome.into_investigation() {
      Some(result) => {
        self.print_results(&result)?;
        Ok(ExitCode::SUCCESS)
      }
      None => Ok(ExitCode::FAILURE),
    }
  }

  fn progress_bar(&self) -> ProgressBar {
    if self.cli.quiet || self.cli.json {
      return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
      bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
  }

  fn print_config(&self) -> Result<ExitCode> {
    if let Some(path) = config::path() {
      eprintln!("Config file: {}", path.display());
    }
    let rendered = serde_json::to_string_pretty(&self.config)
      .context("Failed to serialize configuration")?;
    println!("{rendered}");
    Ok(ExitCode::SUCCESS)
  }

  fn print_results(&self, result: &crate::pipeline::Investigation) -> Result<()> {
    if self.cli.json {
      results::print_json(result)
    } else {
      let now = Local::now().format("%H:%M:%S").to_string();
      results::print_human_readable(result, &now, &self.config.reference_name);
      Ok(())
    }
  }
}

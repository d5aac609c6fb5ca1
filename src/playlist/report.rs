use chrono::{DateTime, Local};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::spotify::Resolution;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub chart_date: String,
    pub playlist_name: String,
    pub playlist_id: Option<String>,
    pub dry_run: bool,
    pub scraped_titles: usize,
    pub added_uris: Vec<String>,
    pub not_found: Vec<String>,
    pub failed_lookups: Vec<FailedLookup>,
    pub add_error: Option<String>,
    pub created_at: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedLookup {
    pub title: String,
    pub reason: String,
}

impl RunReport {
    pub fn new(chart_date: String, playlist_name: String, dry_run: bool) -> Self {
        Self {
            chart_date,
            playlist_name,
            playlist_id: None,
            dry_run,
            scraped_titles: 0,
            added_uris: Vec::new(),
            not_found: Vec::new(),
            failed_lookups: Vec::new(),
            add_error: None,
            created_at: Local::now(),
        }
    }

    pub fn record_resolutions(&mut self, resolutions: &[Resolution]) {
        self.scraped_titles = resolutions.len();
        for resolution in resolutions {
            match resolution {
                Resolution::Found { .. } => {}
                Resolution::NotFound { title } => self.not_found.push(title.clone()),
                Resolution::Failed { title, reason } => self.failed_lookups.push(FailedLookup {
                    title: title.clone(),
                    reason: reason.clone(),
                }),
            }
        }
    }

    pub fn resolved_count(&self) -> usize {
        self.scraped_titles - self.not_found.len() - self.failed_lookups.len()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        info!("Run report saved to: {}", path.display());
        Ok(())
    }

    pub fn print_summary(&self) {
        println!();
        println!("{}", "=".repeat(60));
        println!("{}", self.playlist_name.bold());
        println!("{}", "=".repeat(60));
        println!("Chart titles scraped: {}", self.scraped_titles);
        println!(
            "Found on Spotify: {}",
            self.resolved_count().to_string().green()
        );
        println!("Not found: {}", self.not_found.len().to_string().yellow());
        println!(
            "Lookup errors: {}",
            self.failed_lookups.len().to_string().red()
        );

        if self.dry_run {
            println!("{}", "Dry run - no playlist was created".yellow());
        } else if let Some(err) = &self.add_error {
            println!("{} {}", "Adding tracks failed:".red(), err);
        } else {
            println!(
                "Added to playlist: {}",
                self.added_uris.len().to_string().green()
            );
        }
        println!("{}", "=".repeat(60));

        if !self.not_found.is_empty() {
            println!("\nNot found:");
            for title in &self.not_found {
                println!("  - {}", title);
            }
        }
    }
}

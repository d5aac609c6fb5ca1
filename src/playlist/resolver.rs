use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info};

use crate::spotify::{Catalog, Resolution};

pub fn search_query(title: &str, year: &str) -> String {
    format!("track:{} year:{}", title, year)
}

/// Looks up chart titles one at a time.
///
/// Every occurrence of a title gets its own search; nothing is cached or
/// deduplicated, and a failed lookup never stops the loop.
pub struct TrackResolver<'a> {
    catalog: &'a dyn Catalog,
}

impl<'a> TrackResolver<'a> {
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self { catalog }
    }

    pub async fn resolve(&self, titles: &[String], year: &str) -> Vec<Resolution> {
        let pb = ProgressBar::new(titles.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut resolutions = Vec::with_capacity(titles.len());
        for title in titles {
            pb.set_message(title.clone());
            resolutions.push(self.resolve_one(title, year).await);
            pb.inc(1);
        }
        pb.finish_and_clear();

        resolutions
    }

    async fn resolve_one(&self, title: &str, year: &str) -> Resolution {
        let query = search_query(title, year);

        match self.catalog.search_track(&query).await {
            Ok(Some(uri)) => {
                debug!("Resolved '{}' to {}", title, uri);
                Resolution::Found {
                    title: title.to_string(),
                    uri,
                }
            }
            Ok(None) => {
                info!("Song not found on Spotify: {}", title);
                Resolution::NotFound {
                    title: title.to_string(),
                }
            }
            Err(e) => {
                error!("Error searching for song '{}': {}", title, e);
                Resolution::Failed {
                    title: title.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// URIs of the found tracks, in chart order.
pub fn resolved_uris(resolutions: &[Resolution]) -> Vec<String> {
    resolutions
        .iter()
        .filter_map(|r| r.uri().map(str::to_string))
        .collect()
}

pub mod chart;
pub mod config;
pub mod error;
pub mod playlist;
pub mod spotify;

#[cfg(test)]
mod test_support;

pub use chart::{ChartDate, ChartScraper, ChartSource, DatePrompt, DateSource, FixedDate};
pub use config::Config;
pub use error::{AppError, Result};
pub use playlist::{AbortReason, PlaylistBuilder, RunOutcome, RunReport};
pub use spotify::{Catalog, PlaylistRef, Resolution, SpotifyCatalog};

pub mod date;
pub mod page;
pub mod prompt;

pub use date::ChartDate;
#[cfg(any(test, feature = "mock"))]
pub use page::MockChartSource;
pub use page::{ChartScraper, ChartSource, parse_song_titles};
pub use prompt::{DatePrompt, DateSource, FixedDate};

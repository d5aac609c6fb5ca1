use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, error, warn};
use url::Url;

use crate::chart::date::ChartDate;
use crate::error::Result;

const CHART_BASE_URL: &str = "https://www.billboard.com/charts/hot-100";

/// billboard.com turns away default client user agents.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:131.0) Gecko/20100101 Firefox/131.0";

/// Song title headings inside the nested chart row lists.
const SONG_TITLE_SELECTOR: &str = "li ul li h3";

/// Source of song titles for a chart week.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ChartSource: Send + Sync {
    /// Titles in chart order. Empty when the chart could not be read.
    async fn song_titles(&self, date: &ChartDate) -> Vec<String>;
}

pub struct ChartScraper {
    http_client: Client,
    base_url: String,
}

impl ChartScraper {
    pub fn new() -> Result<Self> {
        Self::with_base_url(CHART_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http_client = Client::builder().user_agent(BROWSER_USER_AGENT).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn chart_url(&self, date: &ChartDate) -> Result<Url> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, date))?)
    }

    async fn fetch_page(&self, date: &ChartDate) -> Result<String> {
        let url = self.chart_url(date)?;
        debug!("Fetching chart page: {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ChartSource for ChartScraper {
    async fn song_titles(&self, date: &ChartDate) -> Vec<String> {
        let body = match self.fetch_page(date).await {
            Ok(body) => body,
            Err(e) => {
                error!("Error fetching Billboard chart: {}", e);
                return Vec::new();
            }
        };

        let titles = parse_song_titles(&body);
        if titles.is_empty() {
            warn!("No songs found. The page structure may have changed.");
        } else {
            debug!("Scraped {} titles for {}", titles.len(), date);
        }

        titles
    }
}

/// Pull song titles out of a chart page, in document order.
///
/// Repeated titles are kept.
pub fn parse_song_titles(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(SONG_TITLE_SELECTOR).unwrap();

    document
        .select(&selector)
        .map(|heading| heading.text().collect::<String>().trim().to_string())
        .collect()
}

use tracing::{error, info, warn};

use crate::chart::{ChartSource, DateSource};
use crate::playlist::report::RunReport;
use crate::playlist::resolver::{TrackResolver, resolved_uris};
use crate::spotify::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    UserLookup,
    DateInput,
    PlaylistCreation,
    EmptyChart,
}

#[derive(Debug)]
pub enum RunOutcome {
    Aborted(AbortReason),
    Finished(RunReport),
}

/// Drives one run: user lookup, date, playlist, scrape, resolve, add.
///
/// Each step runs to completion before the next. Failures are logged and end
/// the run early; none of them are returned as errors. A playlist created
/// before an empty scrape is left in place.
pub struct PlaylistBuilder<'a> {
    catalog: &'a dyn Catalog,
    chart: &'a dyn ChartSource,
    dry_run: bool,
}

impl<'a> PlaylistBuilder<'a> {
    pub fn new(catalog: &'a dyn Catalog, chart: &'a dyn ChartSource) -> Self {
        Self {
            catalog,
            chart,
            dry_run: false,
        }
    }

    /// Scrape and resolve without creating or filling a playlist.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self, dates: &mut dyn DateSource) -> RunOutcome {
        let user_id = match self.catalog.current_user_id().await {
            Ok(id) => id,
            Err(e) => {
                error!("Error retrieving user ID: {}", e);
                return RunOutcome::Aborted(AbortReason::UserLookup);
            }
        };

        let date = match dates.next_date() {
            Ok(date) => date,
            Err(e) => {
                error!("Error reading chart date: {}", e);
                return RunOutcome::Aborted(AbortReason::DateInput);
            }
        };
        let playlist_name = date.playlist_name();
        let mut report = RunReport::new(date.to_string(), playlist_name.clone(), self.dry_run);

        let playlist = if self.dry_run {
            info!("Dry run: skipping creation of playlist '{}'", playlist_name);
            None
        } else {
            match self
                .catalog
                .create_private_playlist(&user_id, &playlist_name)
                .await
            {
                Ok(playlist) => Some(playlist),
                Err(e) => {
                    error!("Error creating playlist: {}", e);
                    return RunOutcome::Aborted(AbortReason::PlaylistCreation);
                }
            }
        };
        report.playlist_id = playlist.as_ref().map(|p| p.id.clone());

        let titles = self.chart.song_titles(&date).await;
        if titles.is_empty() {
            error!("No songs retrieved. Exiting.");
            return RunOutcome::Aborted(AbortReason::EmptyChart);
        }

        let resolutions = TrackResolver::new(self.catalog)
            .resolve(&titles, date.year())
            .await;
        report.record_resolutions(&resolutions);
        let uris = resolved_uris(&resolutions);

        if uris.is_empty() {
            warn!("No valid songs were found on Spotify to add to the playlist.");
            return RunOutcome::Finished(report);
        }

        match playlist {
            None => info!(
                "Dry run: {} songs would be added to playlist '{}'.",
                uris.len(),
                playlist_name
            ),
            Some(playlist) => match self.catalog.add_tracks(&playlist.id, &uris).await {
                Ok(()) => {
                    info!(
                        "Successfully added {} songs to playlist '{}'.",
                        uris.len(),
                        playlist_name
                    );
                    report.added_uris = uris;
                }
                Err(e) => {
                    error!("Error adding songs to playlist: {}", e);
                    report.add_error = Some(e.to_string());
                }
            },
        }

        RunOutcome::Finished(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartDate, DatePrompt, FixedDate, MockChartSource};
    use crate::error::AppError;
    use crate::spotify::{MockCatalog, PlaylistRef};
    use crate::test_support::CapturedLogs;
    use mockall::predicate::eq;
    use std::io::{self, Cursor};
    use tracing::Level;

    fn finished(outcome: RunOutcome) -> RunReport {
        match outcome {
            RunOutcome::Finished(report) => report,
            other => panic!("run did not finish: {:?}", other),
        }
    }

    fn fixed(date: &str) -> FixedDate {
        FixedDate(ChartDate::parse(date).unwrap())
    }

    fn chart_with(titles: &'static [&'static str]) -> MockChartSource {
        let mut chart = MockChartSource::new();
        chart
            .expect_song_titles()
            .times(1)
            .returning(move |_| titles.iter().map(|s| s.to_string()).collect());
        chart
    }

    fn catalog_with_user() -> MockCatalog {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_current_user_id()
            .times(1)
            .returning(|| Ok("user123".to_string()));
        catalog
    }

    fn expect_playlist_created(catalog: &mut MockCatalog, name: &'static str) {
        catalog
            .expect_create_private_playlist()
            .with(eq("user123"), eq(name))
            .times(1)
            .returning(|_, _| Ok(PlaylistRef::mock()));
    }

    #[test_log::test(tokio::test)]
    async fn test_end_to_end_playlist_holds_only_found_tracks() {
        let mut catalog = catalog_with_user();
        expect_playlist_created(&mut catalog, "2023-06-10 Billboard 100");
        catalog
            .expect_search_track()
            .with(eq("track:Song A year:2023"))
            .times(1)
            .returning(|_| Ok(Some("spotify:track:111".to_string())));
        catalog
            .expect_search_track()
            .with(eq("track:Song B year:2023"))
            .times(1)
            .returning(|_| Ok(None));
        catalog
            .expect_add_tracks()
            .withf(|id, uris| id == "mock_playlist_id" && uris == ["spotify:track:111"])
            .times(1)
            .returning(|_, _| Ok(()));
        let chart = chart_with(&["Song A", "Song B"]);

        let mut prompt = DatePrompt::new(Cursor::new("bad\n2023-06-10\n"), io::sink());
        let outcome = PlaylistBuilder::new(&catalog, &chart)
            .run(&mut prompt)
            .await;

        let report = finished(outcome);
        assert_eq!(report.playlist_name, "2023-06-10 Billboard 100");
        assert_eq!(report.playlist_id.as_deref(), Some("mock_playlist_id"));
        assert_eq!(report.added_uris, vec!["spotify:track:111"]);
        assert_eq!(report.not_found, vec!["Song B"]);
        assert!(report.add_error.is_none());
    }

    #[tokio::test]
    async fn test_nothing_resolved_skips_add() {
        let (logs, _guard) = CapturedLogs::install();
        let mut catalog = catalog_with_user();
        expect_playlist_created(&mut catalog, "2001-01-01 Billboard 100");
        catalog.expect_search_track().times(2).returning(|_| Ok(None));
        catalog.expect_add_tracks().never();
        let chart = chart_with(&["Nope", "Also Nope"]);

        let outcome = PlaylistBuilder::new(&catalog, &chart)
            .run(&mut fixed("2001-01-01"))
            .await;

        let report = finished(outcome);
        assert!(report.added_uris.is_empty());
        assert_eq!(report.not_found.len(), 2);
        assert_eq!(logs.count(Level::WARN, "No valid songs were found"), 1);
        assert_eq!(logs.count_level(Level::ERROR), 0);
    }

    #[tokio::test]
    async fn test_add_failure_is_reported_not_raised() {
        let (logs, _guard) = CapturedLogs::install();
        let mut catalog = catalog_with_user();
        expect_playlist_created(&mut catalog, "2010-05-05 Billboard 100");
        catalog
            .expect_search_track()
            .returning(|_| Ok(Some("spotify:track:222".to_string())));
        catalog
            .expect_add_tracks()
            .times(1)
            .returning(|_, _| Err(AppError::Auth("scope missing".into())));
        let chart = chart_with(&["Hit"]);

        let outcome = PlaylistBuilder::new(&catalog, &chart)
            .run(&mut fixed("2010-05-05"))
            .await;

        let report = finished(outcome);
        assert!(report.added_uris.is_empty());
        assert!(report.add_error.unwrap().contains("scope missing"));
        assert_eq!(logs.count(Level::ERROR, "Error adding songs to playlist"), 1);
        assert_eq!(logs.count(Level::INFO, "Successfully added"), 0);
    }

    #[test_log::test(tokio::test)]
    async fn test_user_lookup_failure_aborts_before_prompt() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_current_user_id()
            .times(1)
            .returning(|| Err(AppError::Auth("no token".into())));
        catalog.expect_create_private_playlist().never();
        let mut chart = MockChartSource::new();
        chart.expect_song_titles().never();

        // An exhausted prompt would abort with DateInput if it were consulted.
        let mut prompt = DatePrompt::new(Cursor::new(""), io::sink());
        let outcome = PlaylistBuilder::new(&catalog, &chart)
            .run(&mut prompt)
            .await;

        assert!(matches!(
            outcome,
            RunOutcome::Aborted(AbortReason::UserLookup)
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_closed_input_aborts_before_creating_playlist() {
        let mut catalog = catalog_with_user();
        catalog.expect_create_private_playlist().never();
        let mut chart = MockChartSource::new();
        chart.expect_song_titles().never();

        let mut prompt = DatePrompt::new(Cursor::new("2023-6-1\n"), io::sink());
        let outcome = PlaylistBuilder::new(&catalog, &chart)
            .run(&mut prompt)
            .await;

        assert!(matches!(
            outcome,
            RunOutcome::Aborted(AbortReason::DateInput)
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_create_failure_aborts_before_scrape() {
        let mut catalog = catalog_with_user();
        catalog
            .expect_create_private_playlist()
            .times(1)
            .returning(|_, _| Err(AppError::Auth("forbidden".into())));
        let mut chart = MockChartSource::new();
        chart.expect_song_titles().never();

        let outcome = PlaylistBuilder::new(&catalog, &chart)
            .run(&mut fixed("2023-06-10"))
            .await;

        assert!(matches!(
            outcome,
            RunOutcome::Aborted(AbortReason::PlaylistCreation)
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_empty_chart_leaves_playlist_empty() {
        let mut catalog = catalog_with_user();
        expect_playlist_created(&mut catalog, "2023-06-10 Billboard 100");
        catalog.expect_search_track().never();
        catalog.expect_add_tracks().never();
        let chart = chart_with(&[]);

        let outcome = PlaylistBuilder::new(&catalog, &chart)
            .run(&mut fixed("2023-06-10"))
            .await;

        assert!(matches!(
            outcome,
            RunOutcome::Aborted(AbortReason::EmptyChart)
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_dry_run_touches_no_playlist() {
        let mut catalog = catalog_with_user();
        catalog.expect_create_private_playlist().never();
        catalog.expect_add_tracks().never();
        catalog
            .expect_search_track()
            .with(eq("track:Waterfalls year:1995"))
            .times(1)
            .returning(|_| Ok(Some("spotify:track:tlc".to_string())));
        let chart = chart_with(&["Waterfalls"]);

        let outcome = PlaylistBuilder::new(&catalog, &chart)
            .dry_run(true)
            .run(&mut fixed("1995-08-05"))
            .await;

        let report = finished(outcome);
        assert!(report.dry_run);
        assert!(report.playlist_id.is_none());
        assert_eq!(report.resolved_count(), 1);
        assert!(report.added_uris.is_empty());
    }
}

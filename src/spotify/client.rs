use async_trait::async_trait;
use rspotify::{
    model::{PlayableId, PlaylistId, SearchResult, SearchType, TrackId, UserId},
    prelude::*,
    AuthCodeSpotify, Config as ClientConfig, Credentials, OAuth,
};
use std::collections::HashSet;
use std::io::{self, Write};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config::{Config, PLAYLIST_SCOPE};
use crate::error::{AppError, Result};
use crate::spotify::catalog::Catalog;
use crate::spotify::models::PlaylistRef;

/// Largest number of items the playlist endpoint accepts per request.
const ADD_ITEMS_LIMIT: usize = 100;

/// Catalog backed by a Spotify authorization-code session.
///
/// Construction only wires up credentials and the token cache. The session is
/// authorized on the first API call, reusing `token.txt` when it holds a
/// token and otherwise walking the user through the consent page.
pub struct SpotifyCatalog {
    client: AuthCodeSpotify,
    authorized: OnceCell<()>,
}

impl SpotifyCatalog {
    pub fn new(config: &Config) -> Self {
        let creds = Credentials::new(&config.client_id, &config.client_secret);

        let oauth = OAuth {
            redirect_uri: config.redirect_uri.clone(),
            scopes: HashSet::from([PLAYLIST_SCOPE.to_string()]),
            ..Default::default()
        };

        let client_config = ClientConfig {
            token_cached: true,
            token_refreshing: true,
            cache_path: config.token_cache_path.clone(),
            ..Default::default()
        };

        Self {
            client: AuthCodeSpotify::with_config(creds, oauth, client_config),
            authorized: OnceCell::new(),
        }
    }

    async fn ensure_authorized(&self) -> Result<()> {
        self.authorized
            .get_or_try_init(|| self.authorize())
            .await
            .map(|_| ())
    }

    async fn authorize(&self) -> Result<()> {
        match self.client.read_token_cache(true).await {
            Ok(Some(token)) => {
                *self
                    .client
                    .token
                    .lock()
                    .await
                    .map_err(|_| AppError::Auth("Token lock poisoned".into()))? = Some(token);
                debug!("Using cached Spotify token");
                return Ok(());
            }
            Ok(None) => debug!("No cached Spotify token"),
            Err(e) => warn!("Failed to read token cache: {}", e),
        }

        let auth_url = self.client.get_authorize_url(true)?;
        println!("\nOpen this URL in your browser to authorize Spotify:");
        println!("{}\n", auth_url);

        print!("Enter the URL you were redirected to: ");
        io::stdout().flush()?;

        let mut redirect_url = String::new();
        io::stdin().read_line(&mut redirect_url)?;

        let code = self
            .client
            .parse_response_code(redirect_url.trim())
            .ok_or_else(|| AppError::Auth("Failed to parse authorization code".into()))?;

        self.client.request_token(&code).await?;
        self.client.write_token_cache().await?;

        info!("Authorized with Spotify");
        Ok(())
    }
}

#[async_trait]
impl Catalog for SpotifyCatalog {
    async fn current_user_id(&self) -> Result<String> {
        self.ensure_authorized().await?;

        let user = self.client.current_user().await?;
        debug!(
            "Authenticated as Spotify user: {}",
            user.display_name.as_deref().unwrap_or(user.id.id())
        );

        Ok(user.id.id().to_string())
    }

    async fn search_track(&self, query: &str) -> Result<Option<String>> {
        self.ensure_authorized().await?;

        let result = self
            .client
            .search(query, SearchType::Track, None, None, Some(1), None)
            .await?;

        match result {
            SearchResult::Tracks(page) => Ok(first_hit_uri(
                page.items
                    .into_iter()
                    .map(|track| (track.name, track.id.map(|id| id.uri()))),
                query,
            )),
            _ => Ok(None),
        }
    }

    async fn create_private_playlist(&self, user_id: &str, name: &str) -> Result<PlaylistRef> {
        self.ensure_authorized().await?;

        let user = UserId::from_id(user_id)?;
        let playlist = self
            .client
            .user_playlist_create(user, name, Some(false), None, None)
            .await?;

        info!("Created Spotify playlist: {}", playlist.name);

        Ok(PlaylistRef {
            id: playlist.id.id().to_string(),
        })
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        self.ensure_authorized().await?;

        let playlist = PlaylistId::from_id(playlist_id)?.into_static();

        for chunk in uris.chunks(ADD_ITEMS_LIMIT) {
            let items = chunk
                .iter()
                .map(|uri| Ok(PlayableId::Track(TrackId::from_uri(uri)?.into_static())))
                .collect::<Result<Vec<_>>>()?;

            self.client
                .playlist_add_items(playlist.clone(), items, None)
                .await?;
            debug!("Added {} tracks to playlist {}", chunk.len(), playlist_id);
        }

        Ok(())
    }
}

/// URI of the first search hit.
///
/// A top hit without a track id (a local file) yields `None` plus a debug line.
fn first_hit_uri<I>(hits: I, query: &str) -> Option<String>
where
    I: IntoIterator<Item = (String, Option<String>)>,
{
    let (name, uri) = hits.into_iter().next()?;
    if uri.is_none() {
        debug!("Top hit '{}' for {} has no track id", name, query);
    }
    uri
}

use async_trait::async_trait;

use crate::error::Result;
use crate::spotify::models::PlaylistRef;

/// Catalog operations the playlist run needs.
///
/// `SpotifyCatalog` is the real implementation; tests substitute
/// `MockCatalog` (generated under `cfg(test)` or the `mock` feature).
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Id of the user the session is authorized for.
    async fn current_user_id(&self) -> Result<String>;

    /// Run a track search and return the URI of the first hit, if any.
    async fn search_track(&self, query: &str) -> Result<Option<String>>;

    /// Create an empty private playlist owned by `user_id`.
    async fn create_private_playlist(&self, user_id: &str, name: &str) -> Result<PlaylistRef>;

    /// Append track URIs to a playlist, keeping their order.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;
}

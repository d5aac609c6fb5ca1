pub mod catalog;
pub mod client;
pub mod models;

pub use catalog::Catalog;
#[cfg(any(test, feature = "mock"))]
pub use catalog::MockCatalog;
pub use client::SpotifyCatalog;
pub use models::{PlaylistRef, Resolution};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRef {
    pub id: String,
}

/// Outcome of looking up one chart title in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found { title: String, uri: String },
    NotFound { title: String },
    Failed { title: String, reason: String },
}

impl Resolution {
    pub fn title(&self) -> &str {
        match self {
            Resolution::Found { title, .. }
            | Resolution::NotFound { title }
            | Resolution::Failed { title, .. } => title,
        }
    }

    pub fn uri(&self) -> Option<&str> {
        match self {
            Resolution::Found { uri, .. } => Some(uri),
            _ => None,
        }
    }
}

#[cfg(test)]
impl PlaylistRef {
    pub fn mock() -> Self {
        Self {
            id: "mock_playlist_id".to_string(),
        }
    }
}

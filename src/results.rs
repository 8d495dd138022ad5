use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Playlist links found on one listing page, in page order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistCollection {
    pub playlists: Vec<String>,
}

impl PlaylistCollection {
    pub fn new(playlists: Vec<String>) -> Self {
        Self { playlists }
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// JSON with two-space indentation
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the collection to `path`, replacing any existing file
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        ::log::info!("Wrote {} playlists to {}", self.len(), path.display());
        Ok(())
    }
}

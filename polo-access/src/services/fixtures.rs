//! Fixture file for running the gatekeeper without a backend.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::models::Branch;
use crate::services::directory::StaticBranchDirectory;
use crate::services::session::{InMemorySessionSource, UserPayload};

/// `{"branches": [...], "sessions": {"<token>": {...}}}`
#[derive(Debug, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub sessions: HashMap<String, UserPayload>,
}

impl Fixtures {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixtures from {}", path.display()))?;
        let fixtures: Fixtures = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid fixtures file {}", path.display()))?;

        tracing::info!(
            branches = fixtures.branches.len(),
            sessions = fixtures.sessions.len(),
            "Fixtures loaded"
        );
        Ok(fixtures)
    }

    pub fn into_sources(self) -> (InMemorySessionSource, StaticBranchDirectory) {
        (
            self.sessions.into_iter().collect(),
            StaticBranchDirectory::new(self.branches),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{BranchDirectory, SessionSource};
    use std::io::Write;

    #[tokio::test]
    async fn test_load_fixtures_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "branches": [{{"id": "B1", "nome": "Centro"}}],
                "sessions": {{"tok-1": {{"id": "1", "role": "diretor_geral"}}}}
            }}"#
        )
        .unwrap();

        let (sessions, directory) = Fixtures::load(file.path()).unwrap().into_sources();
        assert_eq!(directory.list().await.unwrap().len(), 1);
        assert!(sessions.resolve("tok-1").await.unwrap().is_some());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Fixtures::load("/nonexistent/fixtures.json").is_err());
    }
}

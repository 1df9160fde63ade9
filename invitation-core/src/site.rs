use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to read site content {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid site content {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Couple {
    pub bride: String,
    pub groom: String,
    pub bride_nickname: String,
    pub groom_nickname: String,
}

impl Couple {
    pub fn hashtag(&self) -> String {
        format!(
            "#{}And{}Wedding",
            strip_whitespace(&self.bride_nickname),
            strip_whitespace(&self.groom_nickname)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    pub couple: Couple,
    #[serde(default)]
    pub story: Vec<String>,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            couple: Couple {
                bride: "Ghem".into(),
                groom: "Renzo".into(),
                bride_nickname: "Ghem".into(),
                groom_nickname: "Renzo".into(),
            },
            story: vec![
                "It started with a friend request in February 2015.".into(),
                "Years of shared ventures, a season apart, and a way back to each other followed.".into(),
                "Today they stand hand in hand, choosing each other for good.".into(),
            ],
        }
    }
}

impl SiteContent {
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| SiteError::Read {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SiteError::Parse {
            path: display,
            source,
        })
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SiteError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashtag_drops_whitespace_from_nicknames() {
        let couple = Couple {
            bride: "Catherine".into(),
            groom: "Mark".into(),
            bride_nickname: "Cath Rose".into(),
            groom_nickname: " Mark ".into(),
        };
        assert_eq!(couple.hashtag(), "#CathRoseAndMarkWedding");
        assert_eq!(SiteContent::default().couple.hashtag(), "#GhemAndRenzoWedding");
    }

    #[test]
    fn loads_from_json_with_optional_story() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("site.json");
        std::fs::write(
            &path,
            r#"{"couple":{"bride":"A","groom":"B","bride_nickname":"Ay","groom_nickname":"Bee"}}"#,
        )
        .expect("write");

        let content = SiteContent::load(&path).expect("load");
        assert_eq!(content.couple.groom_nickname, "Bee");
        assert!(content.story.is_empty());
    }

    #[test]
    fn reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent.json");
        assert!(matches!(SiteContent::load(&missing), Err(SiteError::Read { .. })));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{").expect("write");
        assert!(matches!(
            SiteContent::load_or_default(Some(&bad)),
            Err(SiteError::Parse { .. })
        ));
        assert_eq!(
            SiteContent::load_or_default(None).expect("default"),
            SiteContent::default()
        );
    }
}

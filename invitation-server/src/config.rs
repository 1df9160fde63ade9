use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::info;

use crate::error::ConfigError;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub public_dir: PathBuf,
    pub ui_dir: PathBuf,
    pub messages_upstream: Option<String>,
    pub site_content: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let messages_upstream = optional(&lookup, "MESSAGES_UPSTREAM");
        if let Some(url) = &messages_upstream {
            reqwest::Url::parse(url).map_err(|e| ConfigError::Invalid {
                key: "MESSAGES_UPSTREAM",
                value: url.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(Self {
            host: try_load(&lookup, "BIND_HOST", "0.0.0.0")?,
            port: try_load(&lookup, "PORT", "8080")?,
            public_dir: try_load(&lookup, "PUBLIC_DIR", "public")?,
            ui_dir: try_load(&lookup, "UI_DIST_DIR", "invitation-ui/dist")?,
            messages_upstream,
            site_content: optional(&lookup, "SITE_CONTENT").map(PathBuf::from),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    let value = lookup(key).filter(|v| !v.trim().is_empty());
    if value.is_none() {
        info!("{key} not set");
    }
    value
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert!(config.messages_upstream.is_none());
        assert!(config.site_content.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("PUBLIC_DIR", "/srv/site/public"),
            ("MESSAGES_UPSTREAM", "https://example.com/messages"),
            ("SITE_CONTENT", "site.json"),
        ]))
        .expect("config");
        assert_eq!(config.port, 3000);
        assert_eq!(config.public_dir, PathBuf::from("/srv/site/public"));
        assert_eq!(
            config.messages_upstream.as_deref(),
            Some("https://example.com/messages")
        );
        assert_eq!(config.site_content, Some(PathBuf::from("site.json")));
    }

    #[test]
    fn rejects_bad_port_and_upstream() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).err().expect("bad port");
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = Config::from_lookup(lookup(&[("MESSAGES_UPSTREAM", "not a url")]))
            .err()
            .expect("bad url");
        assert!(matches!(err, ConfigError::Invalid { key: "MESSAGES_UPSTREAM", .. }));
    }

    #[test]
    fn blank_optional_values_count_as_unset() {
        let config = Config::from_lookup(lookup(&[("MESSAGES_UPSTREAM", "  ")])).expect("config");
        assert!(config.messages_upstream.is_none());
    }
}

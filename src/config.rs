use crate::emotion::{Accumulation, SurprisePolicy};

pub const TOKEN_ENV_VAR: &str = "HUGGINGFACE_TOKEN";

fn model_default() -> String {
    crate::huggingface::EKMAN_DISTILROBERTA.to_owned()
}

fn endpoint_default() -> String {
    crate::huggingface::DEFAULT_ENDPOINT.to_owned()
}

const fn timeout_secs_default() -> u64 {
    30
}

fn backend_default() -> String {
    "huggingface".to_owned()
}

#[derive(serde::Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "model_default")]
    pub model: String,
    #[serde(default = "endpoint_default")]
    pub endpoint: String,
    #[serde(default = "timeout_secs_default")]
    pub timeout_secs: u64,
    #[serde(default = "backend_default")]
    pub backend: String,
    /// Send requests without credentials instead of refusing to start.
    #[serde(default)]
    pub allow_anonymous: bool,
    #[serde(default)]
    pub surprise: SurprisePolicy,
    #[serde(default)]
    pub accumulation: Accumulation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            model: model_default(),
            endpoint: endpoint_default(),
            timeout_secs: timeout_secs_default(),
            backend: backend_default(),
            allow_anonymous: false,
            surprise: SurprisePolicy::default(),
            accumulation: Accumulation::default(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("no api token: set api_token in the config file or {}", TOKEN_ENV_VAR)]
    MissingToken,
}

impl Config {
    /// Reads `path` (a missing file means all defaults) and fills in the token from `env_token` if the file has none.
    pub fn load(path: &std::path::Path, env_token: Option<String>) -> Result<Self, Error> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(s) => toml::from_str::<Config>(&s)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("{} not found, using defaults", path.display());
                Config::default()
            }
            Err(e) => return Err(e.into()),
        };

        if config.api_token.as_deref().map_or(true, str::is_empty) {
            config.api_token = env_token.filter(|t| !t.is_empty());
        }

        if config.api_token.is_none() {
            if !config.allow_anonymous {
                return Err(Error::MissingToken);
            }
            log::warn!("no api token, requests will be sent unauthenticated");
        }

        Ok(config)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut f, contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "j-hartmann/emotion-english-distilroberta-base");
        assert_eq!(config.endpoint, "https://api-inference.huggingface.co");
        assert_eq!(config.timeout(), std::time::Duration::from_secs(30));
        assert_eq!(config.backend, "huggingface");
        assert_eq!(config.surprise, SurprisePolicy::MapTo(Emotion::Joy));
        assert_eq!(config.accumulation, Accumulation::Sum);
    }

    #[test]
    fn test_load_file() {
        let f = write_config(
            r#"
api_token = "hf_file"
model = "SamLowe/roberta-base-go_emotions"
timeout_secs = 10
surprise = "none"
accumulation = "max"
"#,
        );
        let config = Config::load(f.path(), Some("hf_env".to_owned())).unwrap();
        assert_eq!(config.api_token.as_deref(), Some("hf_file"));
        assert_eq!(config.model, "SamLowe/roberta-base-go_emotions");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.surprise, SurprisePolicy::Ignore);
        assert_eq!(config.accumulation, Accumulation::Max);
    }

    #[test]
    fn test_load_token_from_env() {
        let f = write_config("model = \"m\"\n");
        let config = Config::load(f.path(), Some("hf_env".to_owned())).unwrap();
        assert_eq!(config.api_token.as_deref(), Some("hf_env"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml"), Some("hf_env".to_owned())).unwrap();
        assert_eq!(config.model, crate::huggingface::EKMAN_DISTILROBERTA);
    }

    #[test]
    fn test_load_missing_token() {
        let f = write_config("api_token = \"\"\n");
        assert!(matches!(Config::load(f.path(), None), Err(Error::MissingToken)));
        assert!(matches!(Config::load(f.path(), Some(String::new())), Err(Error::MissingToken)));
    }

    #[test]
    fn test_load_allow_anonymous() {
        let f = write_config("allow_anonymous = true\n");
        let config = Config::load(f.path(), None).unwrap();
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let f = write_config("surprise = \"bewilderment\"\n");
        assert!(matches!(Config::load(f.path(), Some("t".to_owned())), Err(Error::Toml(_))));

        let f = write_config("unknown_key = 1\n");
        assert!(matches!(Config::load(f.path(), Some("t".to_owned())), Err(Error::Toml(_))));
    }
}

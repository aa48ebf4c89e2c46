use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid value '{value}' for {key}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub verbose: bool,
    pub allow_resume_finished: bool,
    pub words_file: Option<PathBuf>,
}

impl Config {
    /// Reads the configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            verbose: parse_var(&lookup, "VERBOSE", defaults.verbose)?,
            allow_resume_finished: parse_var(
                &lookup,
                "RESUME_FINISHED_GAMES",
                defaults.allow_resume_finished,
            )?,
            words_file: lookup("WORDS_FILE")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9090,
            verbose: false,
            allow_resume_finished: true,
            words_file: None,
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(ConfigError { key, value }),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.address(), "127.0.0.1:9090");
        assert!(!config.verbose);
        assert!(config.allow_resume_finished);
        assert!(config.words_file.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "7000"),
            ("VERBOSE", "true"),
            ("RESUME_FINISHED_GAMES", "false"),
            ("WORDS_FILE", "/tmp/heroes.txt"),
        ]))
        .unwrap();

        assert_eq!(config.address(), "0.0.0.0:7000");
        assert!(config.verbose);
        assert!(!config.allow_resume_finished);
        assert_eq!(config.words_file, Some(PathBuf::from("/tmp/heroes.txt")));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "ninety")])).unwrap_err();
        assert_eq!(err.key, "PORT");
        assert_eq!(err.to_string(), "invalid value 'ninety' for PORT");
    }
}

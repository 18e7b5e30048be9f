use crate::error::{ErrorKind, Result};
use crate::{APPLICATION, Config};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Prefix of the environment variables that override configuration values.
pub const ENV_PREFIX: &str = "LIBRARIAN_";
const CONFIG_FILENAME: &str = "librarian.toml";

/// Location of the per-user configuration file, whether or not it exists.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APPLICATION).map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load and validate the configuration.
///
/// `explicit` must exist if given; the per-user file is optional.
#[instrument(level = "debug")]
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let figment = layers(user_config_path().as_deref(), explicit)?.merge(Env::prefixed(ENV_PREFIX).split("__"));
    extract(figment)
}

/// Defaults, then the per-user file, then the explicit file.
fn layers(user: Option<&Path>, explicit: Option<&Path>) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(path) = user {
        debug!(path = %path.display(), "merging user configuration");
        // Missing files are skipped by figment's file providers.
        figment = figment.merge(Toml::file(path));
    }
    if let Some(path) = explicit {
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => figment.merge(Toml::file(path)),
        };
    }
    Ok(figment)
}

fn extract(figment: Figment) -> Result<Config> {
    let config: Config = figment.extract().or_raise(|| ErrorKind::Load)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[test]
    fn test_defaults_only() {
        assert_eq!(extract(layers(None, None).unwrap()).unwrap(), Config::default());
    }

    #[rstest]
    #[case::toml("config.toml", "log = \"debug\"\n[database]\npath = \"/tmp/books.db\"\n")]
    #[case::yaml("config.yaml", "log: debug\ndatabase:\n  path: /tmp/books.db\n")]
    #[case::json("config.json", r#"{"log": "debug", "database": {"path": "/tmp/books.db"}}"#)]
    fn test_explicit_file(#[case] name: &str, #[case] content: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        let config = extract(layers(None, Some(&path)).unwrap()).unwrap();
        assert_eq!(config.log, "debug");
        assert_eq!(config.database.path, PathBuf::from("/tmp/books.db"));
        // Unset keys keep their defaults.
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_explicit_file_overrides_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("librarian.toml");
        let explicit = dir.path().join("override.toml");
        fs::write(&user, "log = \"info\"\n[collect]\nworkers = 2\n").unwrap();
        fs::write(&explicit, "log = \"trace\"\n").unwrap();
        let config = extract(layers(Some(&user), Some(&explicit)).unwrap()).unwrap();
        assert_eq!(config.log, "trace");
        assert_eq!(config.collect.workers, Some(2));
    }

    #[test]
    fn test_missing_user_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = extract(layers(Some(&dir.path().join("missing.toml")), None).unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = layers(None, Some(&path)).unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(path));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[database\npath =").unwrap();
        let err = extract(layers(None, Some(&path)).unwrap()).unwrap_err();
        assert_eq!(*err, ErrorKind::Load);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[database]\nmax_connections = 0\n").unwrap();
        let err = extract(layers(None, Some(&path)).unwrap()).unwrap_err();
        assert!(matches!(*err, ErrorKind::Invalid(_)));
    }
}

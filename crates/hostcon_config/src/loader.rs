use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use derive_setters::Setters;
use tracing::debug;

use crate::{ConfigError, HostconConfig, Result};

const ENV_PREFIX: &str = "HOSTCON";

/// Builds a [`HostconConfig`] from, lowest precedence first: defaults, the
/// user file, an explicit file, then `HOSTCON_*` environment variables.
#[derive(Debug, Clone, Setters)]
#[setters(strip_option, into)]
pub struct ConfigLoader {
    /// Optional per-user file, usually `<config dir>/hostcon/hostcon.toml`.
    user_file: Option<PathBuf>,
    /// Explicit file. Unlike the user file it must exist.
    file: Option<PathBuf>,
    /// Directory from which `.env` files are discovered.
    cwd: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            user_file: dirs::config_dir().map(|dir| dir.join("hostcon").join("hostcon.toml")),
            file: None,
            cwd: std::env::current_dir().ok(),
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self) -> Result<HostconConfig> {
        if let Some(cwd) = &self.cwd {
            dot_env(cwd);
        }

        let mut builder = Config::builder();

        if let Some(path) = &self.user_file {
            debug!(path = %path.display(), "Loading user configuration");
            builder = builder.add_source(toml_file(path).required(false));
        }

        if let Some(path) = &self.file {
            if !path.is_file() {
                return Err(ConfigError::NotFound { path: path.clone() });
            }
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(toml_file(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}

/// Load all `.env` files from the filesystem root down to `cwd`. Files closer
/// to `cwd` win over farther ones and the real environment wins over all of
/// them.
fn dot_env(cwd: &Path) {
    let mut paths = vec![];
    let mut current = PathBuf::new();

    for component in cwd.components() {
        current.push(component);
        paths.push(current.clone());
    }

    paths.reverse();

    for path in paths {
        let env_file = path.join(".env");
        if env_file.is_file() {
            dotenvy::from_path(&env_file).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use tempfile::{TempDir, tempdir};

    use super::*;
    use crate::{HostKind, LogConfig};

    const ENV_VARS: [&str; 4] = [
        "HOSTCON_HOST",
        "HOSTCON_AUTOFLUSH",
        "HOSTCON_LOG__FILTER",
        "HOSTCON_LOG__DIR",
    ];

    fn clean_env_vars() {
        for var in ENV_VARS {
            unsafe {
                env::remove_var(var);
            }
        }
    }

    /// Loader that sees nothing but what the test puts in `root`.
    fn fixture_loader(root: &TempDir) -> ConfigLoader {
        ConfigLoader::new()
            .user_file(root.path().join("missing.toml"))
            .cwd(root.path())
    }

    fn write_file(root: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = root.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    #[serial]
    fn test_defaults_when_nothing_is_configured() {
        clean_env_vars();
        let root = tempdir().unwrap();

        let actual = fixture_loader(&root).load().unwrap();
        let expected = HostconConfig::default();
        assert_eq!(actual, expected);
        assert_eq!(actual.log.filter, "info");
    }

    #[test]
    #[serial]
    fn test_file_overrides_defaults_partially() {
        clean_env_vars();
        let root = tempdir().unwrap();
        let path = write_file(
            &root,
            "hostcon.conf",
            "host = \"capture\"\n[log]\nfilter = \"debug\"\n",
        );

        let actual = fixture_loader(&root).file(path).load().unwrap();
        let expected = HostconConfig::default()
            .host(HostKind::Capture)
            .log(LogConfig::default().filter("debug"));
        assert_eq!(actual, expected);
    }

    #[test]
    #[serial]
    fn test_explicit_file_wins_over_user_file() {
        clean_env_vars();
        let root = tempdir().unwrap();
        let user = write_file(&root, "user.toml", "autoflush = true\nhost = \"capture\"\n");
        let explicit = write_file(&root, "explicit.toml", "host = \"stdio\"\n");

        let actual = fixture_loader(&root)
            .user_file(user)
            .file(explicit)
            .load()
            .unwrap();
        let expected = HostconConfig::default().autoflush(true).host(HostKind::Stdio);
        assert_eq!(actual, expected);
    }

    #[test]
    #[serial]
    fn test_env_wins_over_file() {
        clean_env_vars();
        let root = tempdir().unwrap();
        let path = write_file(
            &root,
            "hostcon.toml",
            "autoflush = false\n[log]\nfilter = \"warn\"\n",
        );
        unsafe {
            env::set_var("HOSTCON_AUTOFLUSH", "true");
            env::set_var("HOSTCON_LOG__FILTER", "trace");
            env::set_var("HOSTCON_LOG__DIR", "/tmp/hostcon-logs");
        }

        let actual = fixture_loader(&root).file(path).load().unwrap();
        clean_env_vars();

        let expected = HostconConfig::default()
            .autoflush(true)
            .log(LogConfig::default().filter("trace").dir("/tmp/hostcon-logs"));
        assert_eq!(actual, expected);
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_an_error() {
        clean_env_vars();
        let root = tempdir().unwrap();
        let path = root.path().join("nope.toml");

        let error = fixture_loader(&root).file(path.clone()).load().unwrap_err();

        assert!(matches!(error, ConfigError::NotFound { path: p } if p == path));
    }

    #[test]
    #[serial]
    fn test_invalid_value_is_a_load_error() {
        clean_env_vars();
        let root = tempdir().unwrap();
        let path = write_file(&root, "hostcon.toml", "host = \"browser\"\n");

        let error = fixture_loader(&root).file(path).load().unwrap_err();

        assert!(matches!(error, ConfigError::Load(_)));
    }

    #[test]
    #[serial]
    fn test_dot_env_files_feed_the_environment() {
        clean_env_vars();
        let root = tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.path().join("a").join(".env"),
            "HOSTCON_HOST=stdio\nHOSTCON_AUTOFLUSH=true\n",
        )
        .unwrap();
        fs::write(nested.join(".env"), "HOSTCON_HOST=capture\n").unwrap();

        let actual = ConfigLoader::new()
            .user_file(root.path().join("missing.toml"))
            .cwd(nested)
            .load()
            .unwrap();
        clean_env_vars();

        let expected = HostconConfig::default().host(HostKind::Capture).autoflush(true);
        assert_eq!(actual, expected);
    }
}

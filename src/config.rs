//! Service configuration, read once from the environment at start-up.
//!
//! | Variable   | Default          | Meaning                                   |
//! |------------|------------------|-------------------------------------------|
//! | `CSV_PATH` | `spiderplot.csv` | data file; relative paths resolve against the crate directory |
//! | `HOST`     | `localhost`      | bind host (name or address)               |
//! | `PORT`     | `5000`           | bind port                                 |
//! | `DEBUG`    | `true`           | `true` (any case) lowers the default log level to `debug` |

use std::path::{Path, PathBuf};

use crate::error::Error;

pub const DEFAULT_CSV_PATH: &str = "spiderplot.csv";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5000;

/// Immutable service configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub csv_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from any key lookup, resolving relative data
    /// paths against this crate's directory.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        Self::from_lookup_in(lookup, Path::new(env!("CARGO_MANIFEST_DIR")))
    }

    /// Like [`from_lookup`](Config::from_lookup) with an explicit base
    /// directory for relative `CSV_PATH` values.
    pub fn from_lookup_in(
        lookup: impl Fn(&str) -> Option<String>,
        base_dir: &Path,
    ) -> Result<Self, Error> {
        let raw_path = lookup("CSV_PATH").unwrap_or_else(|| DEFAULT_CSV_PATH.to_owned());
        let csv_path = resolve(&raw_path, base_dir);

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| Error::Config { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let debug = lookup("DEBUG")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        Ok(Self { csv_path, host, port, debug })
    }

    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

fn resolve(raw: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
        let vars: HashMap<String, String> = vars.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Config::from_lookup_in(|k| vars.get(k).cloned(), Path::new("/srv/app"))
    }

    #[test]
    fn defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c.csv_path, PathBuf::from("/srv/app/spiderplot.csv"));
        assert_eq!(c.host, "localhost");
        assert_eq!(c.port, 5000);
        assert!(c.debug);
        assert_eq!(c.log_level(), "debug");
    }

    #[test]
    fn absolute_path_is_kept() {
        let c = config(&[("CSV_PATH", "/data/trial.csv")]).unwrap();
        assert_eq!(c.csv_path, PathBuf::from("/data/trial.csv"));
    }

    #[test]
    fn relative_path_joins_base() {
        let c = config(&[("CSV_PATH", "data/trial.csv")]).unwrap();
        assert_eq!(c.csv_path, PathBuf::from("/srv/app/data/trial.csv"));
    }

    #[test]
    fn debug_flag_only_true_enables() {
        assert!(config(&[("DEBUG", "TRUE")]).unwrap().debug);
        assert!(!config(&[("DEBUG", "false")]).unwrap().debug);
        assert!(!config(&[("DEBUG", "1")]).unwrap().debug);
        assert_eq!(config(&[("DEBUG", "no")]).unwrap().log_level(), "info");
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = config(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, Error::Config { key: "PORT", .. }));
        assert_eq!(config(&[("PORT", "8080")]).unwrap().port, 8080);
    }
}

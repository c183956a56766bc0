//! Runtime configuration.
//!
//! Every setting can come from a flag or from its environment variable; a
//! `.env` file in the working directory is loaded before parsing.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use titlebox_import::IngestOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen address {address:?}: {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },
}

pub const DEFAULT_REMOTE_LIMIT: u32 = 100;

/// Accept any positive integer; anything else is logged and replaced by
/// [`DEFAULT_REMOTE_LIMIT`].
fn lenient_limit(raw: &str) -> Result<u32, Infallible> {
    match raw.trim().parse::<u32>() {
        Ok(limit) if limit >= 1 => Ok(limit),
        _ => {
            log::warn!(
                "Invalid LIMIT {:?}, using default {}",
                raw,
                DEFAULT_REMOTE_LIMIT
            );
            Ok(DEFAULT_REMOTE_LIMIT)
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "titlebox")]
#[command(about = "Browse and search the title catalog and its pictures", long_about = None)]
pub struct Config {
    /// Remote catalog endpoint
    #[arg(long, env = "BASE_URL", default_value = "https://dbox.tools/api/title_ids/")]
    pub base_url: String,

    /// Titles requested per remote page. Invalid values fall back to the default.
    #[arg(long, env = "LIMIT", default_value_t = DEFAULT_REMOTE_LIMIT, value_parser = lenient_limit)]
    pub limit: u32,

    /// System filter sent to the remote catalog
    #[arg(long, env = "SYSTEM", default_value = "XBOX360")]
    pub system: String,

    /// Directory holding the database file
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Root of the per-title picture folders
    #[arg(long, env = "PICTURES_FOLDER", default_value = "titles")]
    pub pictures_folder: PathBuf,

    /// File name suffix of picture files
    #[arg(long, env = "PICTURES_SUFFIX", default_value = ".png")]
    pub pictures_suffix: String,

    /// Listen address: `host:port`, `:port`, or a bare port
    #[arg(long, env = "ADDRESS", default_value = "0.0.0.0:8081")]
    pub address: String,

    /// Database file name inside the data directory
    #[arg(long, env = "DB_FILE", default_value = "titles.db")]
    pub db_file: String,

    /// Directory of frontend assets served under /static
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// OpenAPI document served at /api/openapi.json
    #[arg(long, env = "OPENAPI_FILE", default_value = "docs/openapi.json")]
    pub openapi_file: PathBuf,
}

impl Config {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    /// Address to bind. A bare port or `:port` binds on all interfaces.
    pub fn listen_addr(&self) -> String {
        let address = self.address.trim();
        if let Some(port) = address.strip_prefix(':') {
            format!("0.0.0.0:{}", port)
        } else if !address.is_empty() && address.chars().all(|c| c.is_ascii_digit()) {
            format!("0.0.0.0:{}", address)
        } else {
            address.to_string()
        }
    }

    /// [`Config::listen_addr`] parsed as `ip:port`.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let address = self.listen_addr();
        address
            .parse()
            .map_err(|source| ConfigError::Address { address, source })
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            pictures_root: self.pictures_folder.clone(),
            suffix: self.pictures_suffix.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["titlebox"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn listen_addr_forms() {
        assert_eq!(parse(&["--address", "8081"]).listen_addr(), "0.0.0.0:8081");
        assert_eq!(parse(&["--address", ":9000"]).listen_addr(), "0.0.0.0:9000");
        assert_eq!(
            parse(&["--address", "127.0.0.1:3000"]).listen_addr(),
            "127.0.0.1:3000"
        );
    }

    #[test]
    fn socket_addr_rejects_hostnames() {
        let config = parse(&["--address", ":8081"]);
        assert_eq!(config.socket_addr().unwrap().port(), 8081);
        assert!(parse(&["--address", "nowhere"]).socket_addr().is_err());
    }

    #[test]
    fn db_path_joins_data_dir() {
        let config = parse(&["--data-dir", "/var/lib/titlebox", "--db-file", "t.db"]);
        assert_eq!(config.db_path(), PathBuf::from("/var/lib/titlebox/t.db"));
    }

    #[test]
    fn invalid_limit_falls_back_to_default() {
        for arg in ["--limit=0", "--limit=-5", "--limit=abc"] {
            assert_eq!(parse(&[arg]).limit, DEFAULT_REMOTE_LIMIT, "{arg}");
        }
        assert_eq!(parse(&["--limit", "25"]).limit, 25);
    }

    #[test]
    fn ingest_options_carry_picture_settings() {
        let config = parse(&["--pictures-folder", "pics", "--pictures-suffix", ".jpg"]);
        let options = config.ingest_options();
        assert_eq!(options.pictures_root, PathBuf::from("pics"));
        assert_eq!(options.suffix, ".jpg");
    }
}

//! Station settings loaded via OrthoConfig.
//!
//! Values come from the TOML file named on the command line, then from
//! `STATION_*` environment variables. [`StationSettings::validate`] turns the
//! raw layer into a [`StationConfig`] before anything touches the network.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::YearBounds;

const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_DB_DRIVER: &str = "postgres";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_SSLMODE: &str = "disable";
const DEFAULT_PROFILE_IMAGE_DIR: &str = "./profileImages";

const PORT_RANGE: std::ops::RangeInclusive<u16> = 1024..=65534;
const DB_NAME_FORBIDDEN: &[char] = &['/', '\\', '.', '"', '*', '<', '>', ':', '|', '?', '$', ',', '\''];
const SSL_MODES: &[&str] = &["disable", "prefer", "require"];

/// Raw configuration layer as read from file and environment.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STATION")]
pub struct StationSettings {
    /// Interface the HTTP server binds to.
    pub http_host: Option<String>,
    /// HTTP listening port.
    pub http_port: Option<u16>,
    /// Database driver; only `postgres` is supported.
    pub db_driver: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
    /// libpq `sslmode` value.
    pub db_sslmode: Option<String>,
    /// Directory holding one image file per user.
    pub profile_image_dir: Option<PathBuf>,
    pub order_year_min: Option<i32>,
    pub order_year_max: Option<i32>,
    /// `memory` or `database`.
    pub session_store: Option<String>,
    /// Session lifetime; absent means sessions never expire.
    pub session_ttl_secs: Option<u64>,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = false)]
    pub cookie_secure: bool,
}

/// Where sessions live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    Database,
}

/// Rejected configuration, reported before startup continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {message}")]
    Load { message: String },
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} must be within 1024..=65534, got {value}")]
    PortOutOfRange { field: &'static str, value: u16 },
    #[error("unsupported database driver `{driver}`")]
    UnsupportedDriver { driver: String },
    #[error("db_name contains the forbidden character `{found}`")]
    ForbiddenDbNameChar { found: char },
    #[error("unsupported db_sslmode `{mode}`")]
    UnsupportedSslMode { mode: String },
    #[error("unknown session_store `{value}`, expected memory or database")]
    UnknownSessionStore { value: String },
    #[error("order_year_min {min} is greater than order_year_max {max}")]
    YearBoundsReversed { min: i32, max: i32 },
    #[error("invalid http_host `{host}`")]
    InvalidHost { host: String },
}

/// Database connection parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    host: String,
    port: u16,
    user: String,
    password: String,
    name: String,
    sslmode: String,
}

impl DatabaseConfig {
    /// libpq key/value connection string understood by both Diesel and
    /// `tokio-postgres`.
    ///
    /// # Examples
    /// ```
    /// use service_station::settings::StationSettings;
    ///
    /// let settings = StationSettings {
    ///     db_user: Some("station".into()),
    ///     db_password: Some("it's".into()),
    ///     db_name: Some("station".into()),
    ///     ..StationSettings::default()
    /// };
    /// let config = settings.validate().expect("valid settings");
    /// assert_eq!(
    ///     config.database.connection_string(),
    ///     "host='localhost' port=5432 user='station' password='it\\'s' dbname='station' sslmode='disable'"
    /// );
    /// ```
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode={}",
            quote(&self.host),
            self.port,
            quote(&self.user),
            quote(&self.password),
            quote(&self.name),
            quote(&self.sslmode),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("sslmode", &self.sslmode)
            .finish()
    }
}

fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Validated settings used to assemble the server.
#[derive(Debug, Clone)]
pub struct StationConfig {
    pub http_host: String,
    pub http_port: u16,
    pub database: DatabaseConfig,
    pub profile_image_dir: PathBuf,
    pub year_bounds: YearBounds,
    pub session_backend: SessionBackend,
    pub session_ttl: Option<Duration>,
    pub cookie_secure: bool,
}

impl StationConfig {
    /// Host and port for `HttpServer::bind`; host names resolve at bind time.
    pub fn bind_addr(&self) -> (&str, u16) {
        (&self.http_host, self.http_port)
    }
}

impl StationSettings {
    /// Load settings from `config_source` (when it exists) and the
    /// environment.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Load`] when the file or an environment value cannot
    /// be parsed.
    pub fn load(config_source: &Path) -> Result<Self, SettingsError> {
        let mut args = vec![OsString::from("service-station")];
        if config_source.is_file() {
            args.push(OsString::from("--config-path"));
            args.push(config_source.as_os_str().to_owned());
        } else {
            tracing::warn!(
                path = %config_source.display(),
                "configuration file not found; using environment only"
            );
        }
        Self::load_from_iter(args).map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    pub fn http_host(&self) -> &str {
        self.http_host.as_deref().unwrap_or(DEFAULT_HTTP_HOST)
    }

    pub fn http_port(&self) -> u16 {
        self.http_port.unwrap_or(DEFAULT_HTTP_PORT)
    }

    pub fn db_driver(&self) -> &str {
        self.db_driver.as_deref().unwrap_or(DEFAULT_DB_DRIVER)
    }

    pub fn profile_image_dir(&self) -> PathBuf {
        self.profile_image_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_IMAGE_DIR))
    }

    /// Check every field and fill in defaults.
    ///
    /// # Errors
    ///
    /// The first [`SettingsError`] found, checked in declaration order.
    pub fn validate(&self) -> Result<StationConfig, SettingsError> {
        let http_port = port_in_range("http_port", self.http_port())?;
        let http_host = self.http_host().trim();
        if http_host.is_empty() || http_host.contains(char::is_whitespace) {
            return Err(SettingsError::InvalidHost {
                host: http_host.to_owned(),
            });
        }

        let driver = self.db_driver();
        if driver != DEFAULT_DB_DRIVER {
            return Err(SettingsError::UnsupportedDriver {
                driver: driver.to_owned(),
            });
        }
        let db_port = port_in_range("db_port", self.db_port.unwrap_or(DEFAULT_DB_PORT))?;
        let user = required("db_user", self.db_user.as_deref())?;
        let password = required("db_password", self.db_password.as_deref())?;
        let name = required("db_name", self.db_name.as_deref())?;
        if let Some(found) = name.chars().find(|c| DB_NAME_FORBIDDEN.contains(c)) {
            return Err(SettingsError::ForbiddenDbNameChar { found });
        }
        let sslmode = self.db_sslmode.as_deref().unwrap_or(DEFAULT_DB_SSLMODE);
        if !SSL_MODES.contains(&sslmode) {
            return Err(SettingsError::UnsupportedSslMode {
                mode: sslmode.to_owned(),
            });
        }

        let defaults = YearBounds::default();
        let min = self.order_year_min.unwrap_or(defaults.min());
        let max = self.order_year_max.unwrap_or(defaults.max());
        let year_bounds =
            YearBounds::new(min, max).ok_or(SettingsError::YearBoundsReversed { min, max })?;

        let session_backend = match self.session_store.as_deref().map(str::trim) {
            None | Some("memory") => SessionBackend::Memory,
            Some("database") => SessionBackend::Database,
            Some(other) => {
                return Err(SettingsError::UnknownSessionStore {
                    value: other.to_owned(),
                });
            }
        };

        Ok(StationConfig {
            http_host: http_host.to_owned(),
            http_port,
            database: DatabaseConfig {
                host: self.db_host.as_deref().unwrap_or(DEFAULT_DB_HOST).to_owned(),
                port: db_port,
                user: user.to_owned(),
                password: password.to_owned(),
                name: name.to_owned(),
                sslmode: sslmode.to_owned(),
            },
            profile_image_dir: self.profile_image_dir(),
            year_bounds,
            session_backend,
            session_ttl: self.session_ttl_secs.map(Duration::from_secs),
            cookie_secure: self.cookie_secure,
        })
    }
}

fn port_in_range(field: &'static str, value: u16) -> Result<u16, SettingsError> {
    if PORT_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(SettingsError::PortOutOfRange { field, value })
    }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, SettingsError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SettingsError::Missing { field }),
    }
}

#[cfg(test)]
mod tests {
    //! Loading and validation of station settings.

    use super::*;
    use std::io::Write;

    use env_lock::lock_env;
    use rstest::{fixture, rstest};

    const VARS: [&str; 15] = [
        "STATION_HTTP_HOST",
        "STATION_HTTP_PORT",
        "STATION_DB_DRIVER",
        "STATION_DB_HOST",
        "STATION_DB_PORT",
        "STATION_DB_USER",
        "STATION_DB_PASSWORD",
        "STATION_DB_NAME",
        "STATION_DB_SSLMODE",
        "STATION_PROFILE_IMAGE_DIR",
        "STATION_ORDER_YEAR_MIN",
        "STATION_ORDER_YEAR_MAX",
        "STATION_SESSION_STORE",
        "STATION_SESSION_TTL_SECS",
        "STATION_COOKIE_SECURE",
    ];

    fn env_with(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|var| {
                let value = overrides
                    .iter()
                    .find(|(name, _)| name == var)
                    .map(|(_, value)| (*value).to_owned());
                (*var, value)
            })
            .collect()
    }

    fn base() -> StationSettings {
        StationSettings {
            db_user: Some("station".into()),
            db_password: Some("secret".into()),
            db_name: Some("station".into()),
            ..StationSettings::default()
        }
    }

    #[fixture]
    fn minimal() -> StationSettings {
        base()
    }

    #[rstest]
    fn defaults_fill_optional_fields(minimal: StationSettings) {
        let config = minimal.validate().expect("valid");
        assert_eq!(config.bind_addr(), ("127.0.0.1", 8080));
        assert_eq!(config.database.host(), "localhost");
        assert_eq!(config.database.port(), 5432);
        assert_eq!(config.profile_image_dir, PathBuf::from("./profileImages"));
        assert_eq!(config.year_bounds, YearBounds::default());
        assert_eq!(config.session_backend, SessionBackend::Memory);
        assert_eq!(config.session_ttl, None);
        assert!(!config.cookie_secure);
    }

    #[rstest]
    #[case::http_low(StationSettings { http_port: Some(80), ..base() }, SettingsError::PortOutOfRange { field: "http_port", value: 80 })]
    #[case::http_high(StationSettings { http_port: Some(65535), ..base() }, SettingsError::PortOutOfRange { field: "http_port", value: 65535 })]
    #[case::db_low(StationSettings { db_port: Some(1023), ..base() }, SettingsError::PortOutOfRange { field: "db_port", value: 1023 })]
    #[case::driver(StationSettings { db_driver: Some("mysql".into()), ..base() }, SettingsError::UnsupportedDriver { driver: "mysql".into() })]
    #[case::user(StationSettings { db_user: None, ..base() }, SettingsError::Missing { field: "db_user" })]
    #[case::password(StationSettings { db_password: Some(" ".into()), ..base() }, SettingsError::Missing { field: "db_password" })]
    #[case::name(StationSettings { db_name: Some(String::new()), ..base() }, SettingsError::Missing { field: "db_name" })]
    #[case::name_char(StationSettings { db_name: Some("a.b".into()), ..base() }, SettingsError::ForbiddenDbNameChar { found: '.' })]
    #[case::name_quote(StationSettings { db_name: Some("o'neil".into()), ..base() }, SettingsError::ForbiddenDbNameChar { found: '\'' })]
    #[case::years(StationSettings { order_year_min: Some(2030), order_year_max: Some(2020), ..base() }, SettingsError::YearBoundsReversed { min: 2030, max: 2020 })]
    #[case::store(StationSettings { session_store: Some("redis".into()), ..base() }, SettingsError::UnknownSessionStore { value: "redis".into() })]
    #[case::host(StationSettings { http_host: Some("  ".into()), ..base() }, SettingsError::InvalidHost { host: String::new() })]
    fn invalid_settings_are_rejected(#[case] settings: StationSettings, #[case] expected: SettingsError) {
        assert_eq!(settings.validate().expect_err("invalid"), expected);
    }

    #[rstest]
    #[case(1024)]
    #[case(65534)]
    fn port_bounds_are_inclusive(minimal: StationSettings, #[case] port: u16) {
        let settings = StationSettings {
            http_port: Some(port),
            db_port: Some(port),
            ..minimal
        };
        let config = settings.validate().expect("valid");
        assert_eq!(config.http_port, port);
        assert_eq!(config.database.port(), port);
    }

    #[rstest]
    fn debug_output_hides_the_password(minimal: StationSettings) {
        let config = minimal.validate().expect("valid");
        let rendered = format!("{:?}", config.database);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("STATION_HTTP_PORT", "9090"),
            ("STATION_DB_USER", "env_user"),
            ("STATION_DB_PASSWORD", "env_pass"),
            ("STATION_DB_NAME", "env_db"),
            ("STATION_SESSION_STORE", "database"),
            ("STATION_SESSION_TTL_SECS", "3600"),
            ("STATION_COOKIE_SECURE", "true"),
        ]));

        let settings =
            StationSettings::load(Path::new("/nonexistent/station.toml")).expect("load");
        let config = settings.validate().expect("valid");
        assert_eq!(config.http_port, 9090);
        assert_eq!(config.database.name(), "env_db");
        assert_eq!(config.session_backend, SessionBackend::Database);
        assert_eq!(config.session_ttl, Some(Duration::from_secs(3600)));
        assert!(config.cookie_secure);
    }

    #[rstest]
    fn missing_credentials_fail_validation_after_load() {
        let _guard = lock_env(env_with(&[]));
        let settings =
            StationSettings::load(Path::new("/nonexistent/station.toml")).expect("load");
        assert_eq!(
            settings.validate().expect_err("missing user"),
            SettingsError::Missing { field: "db_user" }
        );
    }

    #[rstest]
    fn file_values_are_read_and_environment_wins() {
        let _guard = lock_env(env_with(&[("STATION_DB_NAME", "from_env")]));
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "db_user = \"file_user\"\ndb_password = \"file_pass\"\ndb_name = \"from_file\"\nhttp_port = 8181"
        )
        .expect("write config");

        let settings = StationSettings::load(file.path()).expect("load");
        assert_eq!(settings.db_user.as_deref(), Some("file_user"));
        assert_eq!(settings.http_port(), 8181);
        assert_eq!(settings.db_name.as_deref(), Some("from_env"));
    }
}

//! [`Config`]-related definitions.

use std::time;

use common::{date::Offset, Percent};
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::SecretString;
use serde::Deserialize;
use smart_default::SmartDefault;
use url::Url;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Booking backend configuration.
    pub backend: Backend,

    /// Booking flow configuration.
    pub booking: Booking,

    /// Service tasks configuration.
    pub tasks: Tasks,

    /// Resort contact configuration.
    pub contact: Contact,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }

    /// Splits this [`Config`] into the [`service::Config`].
    #[must_use]
    pub fn service(&self) -> service::Config {
        let Booking {
            minimum_advance,
            utc_offset,
            draft_ttl,
            max_drafts: _,
        } = self.booking;
        service::Config {
            minimum_advance,
            utc_offset,
            draft_ttl,
            clean_expired_drafts:
                service::task::clean_expired_drafts::Config {
                    interval: self.tasks.clean_expired_drafts.interval,
                },
        }
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Booking backend configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Backend {
    /// Base [`Url`] of the backend REST API.
    #[default(Url::parse("http://127.0.0.1:3000/api/").expect("valid URL"))]
    pub base_url: Url,

    /// Bearer token to authorize backend requests with, if any.
    pub api_token: Option<SecretString>,

    /// Timeout of a single backend request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Backend> for service::infra::rest::Config {
    fn from(value: Backend) -> Self {
        let Backend {
            base_url,
            api_token,
            timeout,
        } = value;
        Self {
            base_url,
            api_token,
            timeout,
        }
    }
}

/// Booking flow configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Booking {
    /// Share of the total to be paid in advance at minimum, in percents.
    #[default(Percent::new(30.into()).expect("valid percent"))]
    pub minimum_advance: Percent,

    /// Offset of the resort's local time from UTC, like `+05:30`.
    #[default(Offset::from_hms(5, 30).expect("valid offset"))]
    pub utc_offset: Offset,

    /// Time a booking draft lives without being updated.
    #[default(time::Duration::from_secs(60 * 60))]
    #[serde(with = "humantime_serde")]
    pub draft_ttl: time::Duration,

    /// Maximum number of booking drafts kept at once.
    #[default(10_000)]
    pub max_drafts: usize,
}

/// Service tasks configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Tasks {
    /// `CleanExpiredDrafts` task configuration.
    pub clean_expired_drafts: Task,
}

/// Service task configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Task {
    /// Task execution interval.
    #[default(time::Duration::from_secs(5 * 60))]
    #[serde(with = "humantime_serde")]
    pub interval: time::Duration,
}

/// Resort contact configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Contact {
    /// Phone number, also used for WhatsApp.
    #[default("+91 98220 00000".to_owned())]
    pub phone: String,

    /// Email address.
    #[default("stay@plumeriaretreat.com".to_owned())]
    pub email: String,

    /// Greeting pre-filled into a WhatsApp chat.
    #[default("Hi! I'd like to know more about staying at Plumeria Retreat.".to_owned())]
    pub whatsapp_message: String,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

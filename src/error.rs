use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid event name fragment: '{0}'")]
    InvalidEventName(String),

    #[error("Duplicate sensor identifier: '{0}'")]
    DuplicateSensorId(String),

    #[error("Duplicate event name '{0}' in configuration")]
    DuplicateEventName(String),

    #[error("Configured sensor not found: '{sensor}' ({eventname})")]
    SensorNotFound { sensor: String, eventname: String },

    #[error("Sensor identifier mismatch: configured '{configured}', bound to '{resolved}'")]
    SensorMismatch { configured: String, resolved: String },

    #[error("{0} has been disposed")]
    Disposed(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn invalid_event_name(name: impl Into<String>) -> Self {
        Error::InvalidEventName(name.into())
    }

    pub(crate) fn duplicate_sensor_id(id: impl Into<String>) -> Self {
        Error::DuplicateSensorId(id.into())
    }

    pub(crate) fn duplicate_event_name(name: impl Into<String>) -> Self {
        Error::DuplicateEventName(name.into())
    }

    pub(crate) fn sensor_not_found(sensor: impl Into<String>, eventname: impl Into<String>) -> Self {
        Error::SensorNotFound { sensor: sensor.into(), eventname: eventname.into() }
    }

    pub(crate) fn sensor_mismatch(configured: impl Into<String>, resolved: impl Into<String>) -> Self {
        Error::SensorMismatch { configured: configured.into(), resolved: resolved.into() }
    }

    pub(crate) fn disposed(what: &'static str) -> Self {
        Error::Disposed(what)
    }
}

/// Result type for sensor-limit operations
pub type Result<T> = std::result::Result<T, Error>;

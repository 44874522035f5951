//! Configuration entries pairing a sensor with a limit and an event name.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Prefix prepended to every event name fragment, placing the events in the
/// cross-session namespace shared by all processes on the machine.
pub const EVENT_NAME_PREFIX: &str = "Global\\SensorLimit.";

static EVENT_NAME_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*([-_][A-Za-z0-9]+)*$").expect("valid pattern"));

/// One sensor-to-event mapping: when the sensor's value drops below `limit`,
/// the named event is signaled.
///
/// The event name fragment is validated on construction (and therefore also
/// when deserializing), so a `LimitConfig` in hand always carries a usable
/// event name. ASCII letters and digits only, starting with a letter, with
/// single `-` or `_` separators between runs.
///
/// # Examples
///
/// ```rust
/// use sensor_limit::LimitConfig;
///
/// let config = LimitConfig::new("/gpu/0/temperature/0", "GpuHot", Some(85.0))?;
/// assert_eq!(config.event_name(), "Global\\SensorLimit.GpuHot");
/// # Ok::<(), sensor_limit::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawLimitConfig")]
pub struct LimitConfig {
    sensor: String,
    eventname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<f64>,
}

/// Shape of a configuration entry as it appears in JSON, before the event
/// name fragment has been checked.
#[derive(Deserialize)]
struct RawLimitConfig {
    sensor: String,
    eventname: String,
    #[serde(default)]
    limit: Option<f64>,
}

impl TryFrom<RawLimitConfig> for LimitConfig {
    type Error = Error;

    fn try_from(raw: RawLimitConfig) -> Result<Self> {
        LimitConfig::new(raw.sensor, raw.eventname, raw.limit)
    }
}

impl LimitConfig {
    /// Create a configuration entry, validating the event name fragment.
    ///
    /// A `limit` of `None` describes a signal that is tracked but never
    /// asserted, matching a JSON entry whose `limit` is `null` or absent.
    pub fn new(
        sensor: impl Into<String>,
        eventname: impl Into<String>,
        limit: Option<f64>,
    ) -> Result<Self> {
        let sensor = sensor.into();
        let eventname = eventname.into();
        if !Self::is_valid_event_name_part(&eventname) {
            return Err(Error::invalid_event_name(eventname));
        }
        Ok(Self { sensor, eventname, limit })
    }

    /// Identifier of the sensor this entry applies to.
    pub fn sensor(&self) -> &str {
        &self.sensor
    }

    /// The event name fragment (the part after [`EVENT_NAME_PREFIX`]).
    pub fn eventname(&self) -> &str {
        &self.eventname
    }

    /// The threshold below which the event is asserted, if any.
    pub fn limit(&self) -> Option<f64> {
        self.limit
    }

    /// The full name of the underlying OS event.
    pub fn event_name(&self) -> String {
        Self::full_event_name(&self.eventname)
    }

    /// Build a full event name from a fragment without validating it.
    pub fn full_event_name(part: &str) -> String {
        format!("{}{}", EVENT_NAME_PREFIX, part)
    }

    /// Check whether `part` is usable as an event name fragment.
    pub fn is_valid_event_name_part(part: &str) -> bool {
        EVENT_NAME_PART.is_match(part)
    }

    /// Load a list of configuration entries from a JSON file.
    ///
    /// The file holds an array of `{"sensor", "eventname", "limit"}` objects;
    /// an empty array is valid and yields an empty list.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<LimitConfig>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

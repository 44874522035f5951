//! Named manual-reset events shared across processes.
//!
//! A [`ManualResetEvent`] is a boolean flag other processes on the machine
//! can look up by name: once set it stays set until explicitly reset. On
//! Windows this is a native named event object; on unix it is a one-byte
//! state file under `/dev/shm`.
//!
//! The process maintaining a flag calls [`ManualResetEvent::create`] and
//! owns the name until the event is closed. Any other process calls
//! [`ManualResetEvent::open`] and either samples the state or blocks on
//! [`ManualResetEvent::wait_timeout`].
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use sensor_limit::event::ManualResetEvent;
//!
//! let trigger = ManualResetEvent::open("Global\\SensorLimit.CpuHot")?;
//! if trigger.wait_timeout(Duration::from_secs(5))? {
//!     println!("CPU temperature dropped below its limit");
//! }
//! # Ok::<(), sensor_limit::Error>(())
//! ```

use std::time::Duration;

use tracing::debug;

use crate::{Error, Result};

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
use unix::RawEvent;
#[cfg(windows)]
use windows::RawEvent;

/// A named, cross-process, manual-reset event.
///
/// Dropping the value closes it; [`close`](Self::close) does the same
/// earlier and is safe to call more than once. Operations on a closed event
/// fail with [`Error::Disposed`].
#[derive(Debug)]
pub struct ManualResetEvent {
    name: String,
    raw: Option<RawEvent>,
}

impl ManualResetEvent {
    /// Create the named event, or take ownership of an existing name.
    ///
    /// The event always starts unasserted, even when the name was left
    /// behind by a crashed owner. Closing an owned event releases the name.
    pub fn create(name: &str) -> Result<Self> {
        let raw = RawEvent::create(name)?;
        debug!("Created event '{}'", name);
        Ok(Self { name: name.to_string(), raw: Some(raw) })
    }

    /// Open an existing named event without taking ownership.
    ///
    /// Fails with [`Error::Io`] when no event of that name exists.
    pub fn open(name: &str) -> Result<Self> {
        let raw = RawEvent::open(name)?;
        Ok(Self { name: name.to_string(), raw: Some(raw) })
    }

    /// Whether an event of that name currently exists on this machine.
    pub fn exists(name: &str) -> bool {
        RawEvent::exists(name)
    }

    /// The full name this event was created or opened with.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn raw(&self) -> Result<&RawEvent> {
        self.raw.as_ref().ok_or_else(|| Error::disposed("manual reset event"))
    }

    /// Assert the event. Stays asserted until [`reset`](Self::reset).
    pub fn set(&self) -> Result<()> {
        self.raw()?.set()
    }

    /// De-assert the event.
    pub fn reset(&self) -> Result<()> {
        self.raw()?.reset()
    }

    /// Sample the current state.
    pub fn is_set(&self) -> Result<bool> {
        self.raw()?.is_set()
    }

    /// Block until the event is asserted or `timeout` elapses. Returns
    /// whether the event was asserted.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<bool> {
        self.raw()?.wait_timeout(timeout)
    }

    /// Whether [`close`](Self::close) has already run.
    pub fn is_closed(&self) -> bool {
        self.raw.is_none()
    }

    /// Close the event. The first call releases the underlying OS resource
    /// (owners also release the name); later calls do nothing.
    pub fn close(&mut self) {
        if let Some(raw) = self.raw.take() {
            drop(raw);
            debug!("Closed event '{}'", self.name);
        }
    }
}

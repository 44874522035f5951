//! Periodic driving of a [`LimitRegistry`].
//!
//! The registry itself is synchronous; this module supplies the typical
//! outer loop for services that keep the events current in the background.

use std::time::Duration;

use crate::registry::LimitRegistry;
use crate::Result;

/// Run [`LimitRegistry::update_all`] on a fixed period until it fails.
///
/// The first cycle runs immediately. The first error ends the loop and is
/// returned; a disposed registry ends it with [`crate::Error::Disposed`].
/// Dropping the future stops the polling and nothing else.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use sensor_limit::poll;
/// # async fn demo(registry: sensor_limit::LimitRegistry) -> sensor_limit::Result<()> {
/// poll::run(&registry, Duration::from_secs(2)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run(registry: &LimitRegistry, period: Duration) -> Result<()> {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        registry.update_all()?;
    }
}

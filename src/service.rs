//! Lifecycle shared by the long-lived components of the profiler.
//!
//! The profiler host starts every service once when the runtime attaches and stops them when it
//! shuts down. Components without any setup or teardown rely on the default implementations.

use crate::Result;

/// A component with a name and a start/stop lifecycle.
pub trait Service: Send + Sync {
    /// Returns the name used to identify the service in logs
    fn name(&self) -> &str;

    /// Starts the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the service can not be started.
    fn start(&self) -> Result<()> {
        Ok(())
    }

    /// Stops the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the service can not be stopped cleanly.
    fn stop(&self) -> Result<()> {
        Ok(())
    }
}

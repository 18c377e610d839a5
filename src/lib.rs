pub mod consts;
mod error;
mod logging;
pub mod math;
pub mod physics;
pub mod sim;

pub use error::ConfigError;
pub use sim::*;

/// Installs the crate's `env_logger` formatter.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    if logging::try_init().is_ok() {
        log::debug!("racesim v{} logging ready", env!("CARGO_PKG_VERSION"));
    }
}

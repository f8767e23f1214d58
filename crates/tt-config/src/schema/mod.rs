//! Configuration schema types for the native host.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod daemon;
mod engine;
mod startup;
mod system;
mod window;

pub use daemon::*;
pub use engine::*;
pub use startup::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct HostConfig {
    pub daemon: DaemonConfig,
    pub window: WindowConfig,
    pub engine: EngineConfig,
    pub startup: StartupConfig,
    pub logging: LoggingConfig,
}

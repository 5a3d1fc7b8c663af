//! agentform-stack — the concrete agentform platform topology.
//!
//! Composes [`agentform_model`] into the platform blueprint: the artifact
//! bucket, the four tables, the six compute units, the fixed access
//! matrix, the planner-guarded model invocation, and the agent-core HTTP
//! front door. Also owns stack configuration (`agentform.toml`) and
//! handler bundle staging.

pub mod bundle;
pub mod config;
pub mod topology;

pub use bundle::stage;
pub use config::{CodeConfig, StackConfig};
pub use topology::{ACCESS_MATRIX, blueprint};

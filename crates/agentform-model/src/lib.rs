//! agentform-model — the provisioning model for agentform deployments.
//!
//! A [`Blueprint`] declares storage resources, compute units, capability
//! grants, flag-guarded permissions, and HTTP routing as plain data. One
//! call to [`evaluate`] walks the fixed [`BUILD_PLAN`] and produces an
//! immutable [`Manifest`] for the external provisioning engine, or fails
//! atomically with a [`ModelError`].
//!
//! # Components
//!
//! - **`resource`** — Storage declarations (bucket, tables, key schemas)
//! - **`compute`** — Compute unit declarations and environment binding
//! - **`grant`** — Capability edges and guarded permissions
//! - **`route`** — The HTTP front door over externally invocable units
//! - **`eval`** — The build plan and the evaluation pass
//! - **`output`** — The flat projection of resolved identities

pub mod blueprint;
pub mod compute;
pub mod error;
pub mod eval;
pub mod flags;
pub mod grant;
pub mod output;
pub mod resource;
pub mod route;

pub use blueprint::Blueprint;
pub use compute::{CodeRef, EnvValue, ResolvedUnit, UnitDecl};
pub use error::{ModelError, ModelResult};
pub use eval::{BUILD_PLAN, Manifest, Phase, evaluate};
pub use flags::{FlagContext, FlagValue};
pub use grant::{
    Capability, ConditionalPermission, FlagGuard, GrantDecl, ResolvedGrant, ResolvedPermission,
};
pub use resource::{
    AttributeType, BillingMode, BucketEncryption, BucketSpec, KeyAttribute, RemovalPolicy,
    ResolvedResource, ResourceDecl, StorageSpec, TableSpec,
};
pub use route::{HttpApiDecl, HttpMethod, ResolvedApi, ResolvedRoute, RouteDecl};

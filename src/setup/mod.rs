//! Project setup features
//!
//! Each submodule assembles one concrete pipeline on top of the engine in
//! `core` and `execution`. Docker deployment scaffolding is the only
//! feature today.

pub mod docker;
pub mod project;
pub mod yarn;

pub use docker::{build_pipeline, SetupOptions};
pub use project::ProjectPaths;
pub use yarn::{PluginEntry, YarnClient};

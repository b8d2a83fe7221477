// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! An in-process extensibility engine: declared capability contracts, a
//! plugin registry validating implementations against them, and chain
//! engines that wrap a terminal function in an ordered sequence of pluggable
//! behaviors - optionally ending in one terminal dispatcher stage.

pub mod backends;   // built-in plugins + in-memory collaborators
pub mod config;     // declarative chain definitions
pub mod engine;     // Task and Pipeline chain engines
pub mod errors;     // error handling
pub mod observability;
pub mod registry;   // capability registry
pub mod traits;     // unified abstractions

pub use backends::install_defaults;
pub use config::{ChainConfig, PipelineBuilder, StageRole};
pub use engine::{Context, Continuation, Next, Pipeline, Task};
pub use errors::{ChainError, PipelineConfigError, RegistryError, StageResult};
pub use registry::{CapabilityRegistry, PluginConfig};
pub use traits::{declare_core_contracts, Behavior, Contract, Dispatch, Filter};

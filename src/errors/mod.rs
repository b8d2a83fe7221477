// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod chain;
mod config;
mod pipeline;
mod registry;
mod service;

pub use chain::{ChainError, StageResult};
pub use config::ChainConfigError;
pub use pipeline::PipelineConfigError;
pub use registry::RegistryError;
pub use service::ServiceError;

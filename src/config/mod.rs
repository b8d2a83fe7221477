// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod runtime;
mod validation;


pub use loader::{
    load_and_validate_chain_config, load_chain_config, parse_chain_config, ChainConfig,
    StageConfig, StageRole,
};
pub use runtime::PipelineBuilder;
pub use validation::validate_chain_config;

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;

use the_hoagie::backends::install_defaults;
use the_hoagie::config::{load_and_validate_chain_config, parse_chain_config, ChainConfig};
use the_hoagie::registry::CapabilityRegistry;
use the_hoagie::PipelineBuilder;

const DEFAULT_CHAIN: &str = r#"
context:
  filename: report.txt
  content: quarterly numbers
stages:
  - role: filter
    plugin: logging
    options:
      label: ingest
  - role: filter
    plugin: require_keys
    options:
      keys: [filename, content]
  - role: filter
    plugin: archive
    options:
      bucket: inbox
  - role: dispatch
    plugin: background
    options:
      runner: inline
"#;

/// Demo showing a YAML-defined chain built against the default plugin
/// catalogue.
/// Usage: cargo run --example yaml_chain_demo [chain.yaml]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== YAML-Configured Chain Demo ===\n");

    let cfg: ChainConfig = match env::args().nth(1) {
        Some(path) => {
            println!("Loading chain from {}...", path);
            load_and_validate_chain_config(&path)?
        }
        None => {
            println!("No chain file given; using the built-in demo chain.");
            parse_chain_config(DEFAULT_CHAIN)?
        }
    };

    println!("- Context keys: {}", cfg.context.len());
    println!("- Stages: {}", cfg.stages.len());
    for stage in &cfg.stages {
        println!("    {:?}: {}", stage.role, stage.plugin);
    }
    println!();

    let registry = CapabilityRegistry::new();
    install_defaults(&registry)?;

    let mut pipeline = PipelineBuilder::from_config(&cfg, &registry, |ctx| {
        ctx.set("processed", true);
        Ok(ctx.to_value())
    })?;

    let result = pipeline.run()?;
    println!("Chain result: {}", result);
    println!("Final context: {}", pipeline.context().to_value());

    Ok(())
}

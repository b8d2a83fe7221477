// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use serde_json::json;
use the_hoagie::backends::install_defaults;
use the_hoagie::registry::{CapabilityRegistry, PluginConfig};
use the_hoagie::traits::{JobStore, Storage};
use the_hoagie::{Context, Pipeline};

/// Demo showing a programmatically composed pipeline:
/// require_keys -> archive -> background dispatch.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== Hoagie Pipeline Demo ===\n");

    // One registry for the process, populated explicitly at startup.
    let registry = CapabilityRegistry::new();
    install_defaults(&registry)?;
    println!("Contracts declared: {:?}", registry.declared());

    // The payload the chain operates on.
    let mut context = Context::new();
    context.set("filename", "report.txt");
    context.set("content", "quarterly numbers");

    let mut pipeline = Pipeline::new(context);
    pipeline.set_core(|ctx| {
        ctx.set("processed", true);
        Ok(ctx.to_value())
    });

    pipeline
        .chain_filter(
            &registry,
            "require_keys",
            &PluginConfig::new().with(
                "keys",
                serde_yaml::Value::Sequence(vec!["filename".into(), "content".into()]),
            ),
        )?
        .chain_filter(&registry, "timing", &PluginConfig::new())?
        .chain_filter(
            &registry,
            "archive",
            &PluginConfig::new().with("bucket", "inbox"),
        )?
        .chain_dispatcher(
            &registry,
            "background",
            &PluginConfig::new().with("runner", "inline"),
        )?;

    println!("Pipeline: {:?}\n", pipeline);

    let receipt = pipeline.run()?;
    println!("Receipt: {}", receipt);

    // The inline runner has already finished the job; read its record back
    // through the shared in-memory collaborators.
    let job_id = receipt["job_id"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("receipt missing job_id"))?;

    let jobs = registry.resolve::<dyn JobStore>("in-memory", &PluginConfig::new())?;
    if let Some(record) = jobs.get(job_id)? {
        println!("Job {}: {}", job_id, json!(record));
    }

    let storage = registry.resolve::<dyn Storage>("in-memory", &PluginConfig::new())?;
    let archived = storage.download("inbox", "report.txt")?;
    println!("Archived object: {}", String::from_utf8_lossy(&archived));

    Ok(())
}

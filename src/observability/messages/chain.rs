// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for chain composition and execution events.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A task or pipeline chain started executing.
pub struct ChainStarted {
    /// "task" or "pipeline".
    pub kind: &'static str,
    pub stage_count: usize,
}

impl Display for ChainStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting {} chain with {} stages",
            self.kind, self.stage_count
        )
    }
}

impl StructuredLog for ChainStarted {
    fn log(&self) {
        tracing::debug!(kind = self.kind, stage_count = self.stage_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "chain_execution",
            span_name = name,
            kind = self.kind,
            stage_count = self.stage_count,
        )
    }
}

/// A stage returned without running its continuation.
pub struct StageShortCircuited<'a> {
    pub stage: &'a str,
}

impl Display for StageShortCircuited<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stage '{}' short-circuited the chain", self.stage)
    }
}

impl StructuredLog for StageShortCircuited<'_> {
    fn log(&self) {
        tracing::info!(stage = self.stage, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("stage_short_circuit", span_name = name, stage = self.stage)
    }
}

/// The chain reached its terminal dispatcher.
pub struct DispatchHandoff<'a> {
    pub dispatcher: &'a str,
}

impl Display for DispatchHandoff<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Handing chain off to dispatcher '{}'", self.dispatcher)
    }
}

impl StructuredLog for DispatchHandoff<'_> {
    fn log(&self) {
        tracing::debug!(dispatcher = self.dispatcher, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "dispatch_handoff",
            span_name = name,
            dispatcher = self.dispatcher,
        )
    }
}

/// A timed stage finished.
pub struct StageTimed<'a> {
    pub stage: &'a str,
    pub duration: Duration,
}

impl Display for StageTimed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stage '{}' completed in {:?}", self.stage, self.duration)
    }
}

impl StructuredLog for StageTimed<'_> {
    fn log(&self) {
        tracing::info!(
            stage = self.stage,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "stage_timed",
            span_name = name,
            stage = self.stage,
            duration = ?self.duration,
        )
    }
}

/// A background job spawned by a dispatcher finished.
pub struct BackgroundJobFinished<'a> {
    pub job_id: &'a str,
    pub succeeded: bool,
}

impl Display for BackgroundJobFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Background job '{}' finished: {}",
            self.job_id,
            if self.succeeded { "succeeded" } else { "failed" }
        )
    }
}

impl StructuredLog for BackgroundJobFinished<'_> {
    fn log(&self) {
        if self.succeeded {
            tracing::info!(job_id = self.job_id, "{}", self);
        } else {
            tracing::warn!(job_id = self.job_id, "{}", self);
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "background_job",
            span_name = name,
            job_id = self.job_id,
        )
    }
}

//! Run configuration loaded from the environment
//!
//! # Environment Variables
//!
//! - `FANOUT_WORKERS`: number of workers (default: 3)
//! - `FANOUT_QUEUE_CAPACITY`: bounded queue capacity (default: 5)
//! - `FANOUT_LATENCY_MS`: simulated processing latency per message (default: 100)
//! - `FANOUT_MESSAGES`: JSON array of strings to broadcast
//!   (default: `["alpha","beta","gamma","delta","epsilon"]`)

use anyhow::{Context, Result};
use fanout_core::domain::{DispatchConfig, Message};

pub const DEFAULT_MESSAGES: [&str; 5] = ["alpha", "beta", "gamma", "delta", "epsilon"];

/// Everything one run of the binary needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub dispatch: DispatchConfig,
    pub messages: Vec<Message>,
}

impl RunConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process env in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut dispatch = DispatchConfig::default();

        if let Some(raw) = lookup("FANOUT_WORKERS") {
            dispatch.worker_count = raw
                .trim()
                .parse()
                .with_context(|| format!("FANOUT_WORKERS is not a number: {:?}", raw))?;
        }
        if let Some(raw) = lookup("FANOUT_QUEUE_CAPACITY") {
            dispatch.queue_capacity = raw
                .trim()
                .parse()
                .with_context(|| format!("FANOUT_QUEUE_CAPACITY is not a number: {:?}", raw))?;
        }
        if let Some(raw) = lookup("FANOUT_LATENCY_MS") {
            dispatch.processing_latency_ms = raw
                .trim()
                .parse()
                .with_context(|| format!("FANOUT_LATENCY_MS is not a number: {:?}", raw))?;
        }

        dispatch
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid dispatch configuration: {}", e))?;

        let messages = match lookup("FANOUT_MESSAGES") {
            Some(raw) => serde_json::from_str::<Vec<Message>>(&raw)
                .context("FANOUT_MESSAGES must be a JSON array of strings")?,
            None => DEFAULT_MESSAGES.iter().map(|m| Message::from(*m)).collect(),
        };

        Ok(Self { dispatch, messages })
    }
}

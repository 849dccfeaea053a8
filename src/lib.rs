//! # Fit Bridge
//!
//! Scores how well a resume fits a job by delegating to an agent-mesh gateway.
//!
//! This library provides:
//! - An HTTP API accepting scoring requests
//! - A submitter that wraps each request in a JSON-RPC envelope
//! - A poller that watches the task's event history for the final answer
//!
//! ## Architecture
//!
//! Every request follows the same cycle:
//! 1. Render the request into a prompt for the orchestrator agent
//! 2. Submit it to the gateway and receive a task id
//! 3. Poll the task's events, extracting the newest consolidated payload
//! 4. Return it, or fail on a terminal status, gateway error, or timeout
//!
//! ## Example
//!
//! ```rust,ignore
//! use fit_bridge::{config::Config, gateway::HttpGateway, scoring::ScoreService};
//!
//! let config = Config::from_env()?;
//! let gateway = HttpGateway::new(&config.gateway_url, config.request_timeout)?;
//! let service = ScoreService::from_config(Arc::new(gateway), &config);
//! let result = service.score(&request).await?;
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod scoring;

pub use config::Config;
pub use error::BridgeError;

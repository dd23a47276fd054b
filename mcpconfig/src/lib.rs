//! MCP host configuration for the ctxsearch server.
//!
//! Builds the `mcp` entry a host tool needs to start the server with
//! `npx`, surfacing the recognized environment variables either as real
//! values or as `{env:NAME}` placeholders.

pub mod config;
pub mod env;
pub mod error;
pub mod policy;

pub use config::{
    ConfigOptions, GeneratedConfig, McpServer, build_config, build_config_with_env, render_config,
    render_config_with_env,
};
pub use env::{EnvSource, ProcessEnv};
pub use error::ConfigError;
pub use policy::{EnvVarSpec, Inclusion};

//! Host configuration for running the ctxsearch MCP server as a local
//! subprocess.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::env::{EnvSource, ProcessEnv};
use crate::error::ConfigError;
use crate::policy::{self, Inclusion};

pub const CONFIG_SCHEMA_URL: &str = "https://opencode.ai/config.json";
pub const DEFAULT_PROVIDER_ID: &str = "claude-context";
pub const DEFAULT_PACKAGE: &str = "@zilliz/claude-context-mcp";
/// Startup timeout for the server process, in milliseconds.
pub const SERVER_TIMEOUT_MS: u64 = 20000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOptions {
    /// Emit real values for set variables instead of `{env:NAME}` placeholders.
    pub include_env_values: bool,
    /// Key of the server entry under `mcp`.
    pub provider_id: String,
    /// Also emit a `tools` entry enabling `<provider_id>*`.
    pub include_tools_section: bool,
    /// npm package started through `npx`.
    pub package: String,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            include_env_values: false,
            provider_id: DEFAULT_PROVIDER_ID.to_string(),
            include_tools_section: true,
            package: DEFAULT_PACKAGE.to_string(),
        }
    }
}

impl ConfigOptions {
    pub fn with_env_values(mut self, include: bool) -> Self {
        self.include_env_values = include;
        self
    }

    pub fn with_provider_id(mut self, id: &str) -> Self {
        self.provider_id = id.to_string();
        self
    }

    pub fn with_tools_section(mut self, include: bool) -> Self {
        self.include_tools_section = include;
        self
    }

    pub fn with_package(mut self, package: &str) -> Self {
        self.package = package.to_string();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedConfig {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub mcp: IndexMap<String, McpServer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<IndexMap<String, bool>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpServer {
    #[serde(rename = "type")]
    pub kind: String,
    pub command: Vec<String>,
    pub timeout: u64,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<IndexMap<String, String>>,
}

/// Build the configuration from the current process environment.
pub fn build_config(opts: &ConfigOptions) -> GeneratedConfig {
    build_config_with_env(opts, &ProcessEnv)
}

/// Build the configuration from an environment snapshot.
pub fn build_config_with_env(opts: &ConfigOptions, env: &impl EnvSource) -> GeneratedConfig {
    let environment = environment(opts.include_env_values, env);
    debug!(
        "mcp config for {}: {} environment variables",
        opts.provider_id,
        environment.len()
    );

    let server = McpServer {
        kind: "local".to_string(),
        command: vec![
            "npx".to_string(),
            "-y".to_string(),
            format!("{}@latest", opts.package),
        ],
        timeout: SERVER_TIMEOUT_MS,
        enabled: true,
        environment: (!environment.is_empty()).then_some(environment),
    };

    let mut mcp = IndexMap::new();
    mcp.insert(opts.provider_id.clone(), server);

    let tools = opts.include_tools_section.then(|| {
        let mut tools = IndexMap::new();
        tools.insert(format!("{}*", opts.provider_id), true);
        tools
    });

    GeneratedConfig {
        schema: CONFIG_SCHEMA_URL.to_string(),
        mcp,
        tools,
    }
}

/// Render the configuration from the current process environment as
/// pretty-printed JSON.
pub fn render_config(opts: &ConfigOptions) -> Result<String, ConfigError> {
    render_config_with_env(opts, &ProcessEnv)
}

pub fn render_config_with_env(opts: &ConfigOptions, env: &impl EnvSource) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(&build_config_with_env(opts, env))?)
}

fn environment(include_values: bool, env: &impl EnvSource) -> IndexMap<String, String> {
    let mut out = IndexMap::new();
    for spec in policy::recognized_env_vars() {
        let value = env.var(spec.name);
        if spec.inclusion == Inclusion::IfSet && value.is_none() {
            continue;
        }
        let rendered = match value {
            Some(v) if include_values => v,
            _ => policy::placeholder(spec.name),
        };
        out.insert(spec.name.to_string(), rendered);
    }
    out
}

//! ---
//! plt_section: "02-endpoint-resolution"
//! plt_subsection: "module"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Deployment modes, gateway protocol and per-mode topologies."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
use std::fmt;

use plt_common::{ConfigResult, ConfigurationError};
use serde::{Deserialize, Serialize};

pub const GATEWAY_HOST: &str = "api-gateway";
pub const LOCALHOST: &str = "localhost";
pub const GATEWAY_PORT: u16 = 8080;
pub const PIPELINE_PRIVATE_PORT: u16 = 3081;

pub const PIPELINE_BACKEND_HOST: &str = "pipeline-backend";
pub const CONNECTOR_BACKEND_HOST: &str = "connector-backend";
pub const MODEL_BACKEND_HOST: &str = "model-backend";
pub const PIPELINE_PUBLIC_PORT: u16 = 8081;
pub const CONNECTOR_PUBLIC_PORT: u16 = 8082;
pub const MODEL_PUBLIC_PORT: u16 = 8083;

/// How test traffic reaches the backends.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentMode {
    /// Everything goes through the `api-gateway` container.
    ApiGateway,
    /// Gateway ports mapped onto the runner's loopback interface.
    Localhost,
    /// Each backend is addressed on its own host and port.
    #[default]
    Direct,
}

impl DeploymentMode {
    /// Interpret an optional `MODE` value. Unset selects [`DeploymentMode::Direct`];
    /// anything unrecognised is rejected.
    pub fn from_setting(value: Option<&str>) -> ConfigResult<Self> {
        match value {
            None => Ok(Self::Direct),
            Some(raw) => raw.parse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentMode::ApiGateway => "api-gateway",
            DeploymentMode::Localhost => "localhost",
            DeploymentMode::Direct => "direct",
        }
    }

    /// The host/port record this mode resolves to.
    pub fn topology(&self) -> Topology {
        match self {
            DeploymentMode::ApiGateway => Topology::shared(GATEWAY_HOST),
            DeploymentMode::Localhost => Topology::shared(LOCALHOST),
            DeploymentMode::Direct => Topology {
                pipeline: ServiceAddress::new(PIPELINE_BACKEND_HOST, PIPELINE_PUBLIC_PORT),
                connector: ServiceAddress::new(CONNECTOR_BACKEND_HOST, CONNECTOR_PUBLIC_PORT),
                model: ServiceAddress::new(MODEL_BACKEND_HOST, MODEL_PUBLIC_PORT),
                pipeline_private_port: PIPELINE_PRIVATE_PORT,
            },
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeploymentMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api-gateway" => Ok(DeploymentMode::ApiGateway),
            "localhost" => Ok(DeploymentMode::Localhost),
            "direct" => Ok(DeploymentMode::Direct),
            other => Err(ConfigurationError::UnknownMode(other.to_owned())),
        }
    }
}

/// Scheme used for public HTTP endpoints.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayProtocol {
    #[default]
    Http,
    Https,
}

impl GatewayProtocol {
    /// Interpret an optional `API_GATEWAY_PROTOCOL` value, defaulting to `http`.
    pub fn from_setting(value: Option<&str>) -> ConfigResult<Self> {
        match value {
            None => Ok(Self::Http),
            Some(raw) => raw.parse(),
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            GatewayProtocol::Http => "http",
            GatewayProtocol::Https => "https",
        }
    }
}

impl fmt::Display for GatewayProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

impl std::str::FromStr for GatewayProtocol {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(GatewayProtocol::Http),
            "https" => Ok(GatewayProtocol::Https),
            other => Err(ConfigurationError::InvalidProtocol(other.to_owned())),
        }
    }
}

/// Public host and port of one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceAddress {
    pub host: &'static str,
    pub public_port: u16,
}

impl ServiceAddress {
    pub const fn new(host: &'static str, public_port: u16) -> Self {
        Self { host, public_port }
    }
}

/// Resolved host/port record for a deployment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    pub pipeline: ServiceAddress,
    pub connector: ServiceAddress,
    pub model: ServiceAddress,
    /// Only the pipeline backend exposes a private listener.
    pub pipeline_private_port: u16,
}

impl Topology {
    fn shared(host: &'static str) -> Self {
        let address = ServiceAddress::new(host, GATEWAY_PORT);
        Self {
            pipeline: address,
            connector: address,
            model: address,
            pipeline_private_port: PIPELINE_PRIVATE_PORT,
        }
    }
}

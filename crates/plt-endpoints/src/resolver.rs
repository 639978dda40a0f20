//! ---
//! plt_section: "02-endpoint-resolution"
//! plt_subsection: "module"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Topology and gateway-override endpoint resolvers."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
//! Both resolvers are pure functions of [`TargetSettings`]. The protocol
//! override is validated first; an invalid value aborts before any endpoint
//! string is built.

use std::fmt;

use indexmap::IndexMap;
use plt_common::{ConfigResult, ConfigurationError, TargetSettings};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::endpoint::{
    grpc_target, http_base, EndpointKey, EndpointSet, ProtocolFamily, Service, Visibility,
};
use crate::mode::{
    DeploymentMode, GatewayProtocol, GATEWAY_HOST, GATEWAY_PORT, PIPELINE_BACKEND_HOST,
    PIPELINE_PRIVATE_PORT,
};

/// Internal listeners are only reachable over plain HTTP.
const PRIVATE_SCHEME: &str = "http";
/// The in-cluster gateway container listens on plain HTTP; the protocol
/// override only applies to an explicit `API_GATEWAY_URL`.
const GATEWAY_CONTAINER_SCHEME: &str = "http";

/// Which endpoint layout to produce.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResolverVariant {
    /// Mode-driven layout for pipeline, connector and model backends.
    #[default]
    Topology,
    /// Gateway-routed layout for pipeline and management backends.
    Gateway,
}

impl ResolverVariant {
    pub fn resolve(&self, target: &TargetSettings) -> ConfigResult<EndpointSet> {
        match self {
            ResolverVariant::Topology => resolve_topology(target),
            ResolverVariant::Gateway => resolve_gateway(target),
        }
    }
}

impl fmt::Display for ResolverVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverVariant::Topology => f.write_str("topology"),
            ResolverVariant::Gateway => f.write_str("gateway"),
        }
    }
}

struct EntryBuilder {
    entries: IndexMap<EndpointKey, String>,
}

impl EntryBuilder {
    fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    fn insert(
        &mut self,
        service: Service,
        family: ProtocolFamily,
        visibility: Visibility,
        value: String,
    ) -> &mut Self {
        self.entries
            .insert(EndpointKey::new(service, family, visibility), value);
        self
    }

    fn finish(self) -> EndpointSet {
        EndpointSet::from_entries(self.entries)
    }
}

/// Resolve pipeline, connector and model endpoints from `MODE`.
pub fn resolve_topology(target: &TargetSettings) -> ConfigResult<EndpointSet> {
    let protocol = GatewayProtocol::from_setting(target.gateway_protocol.as_deref())?;
    let mode = DeploymentMode::from_setting(target.mode.as_deref())?;
    let topology = mode.topology();
    let scheme = protocol.scheme();

    let pipeline = topology.pipeline;
    let mut builder = EntryBuilder::new();
    builder
        .insert(
            Service::Pipeline,
            ProtocolFamily::Http,
            Visibility::Private,
            http_base(PRIVATE_SCHEME, pipeline.host, topology.pipeline_private_port),
        )
        .insert(
            Service::Pipeline,
            ProtocolFamily::Http,
            Visibility::Public,
            http_base(scheme, pipeline.host, pipeline.public_port),
        )
        .insert(
            Service::Pipeline,
            ProtocolFamily::Grpc,
            Visibility::Private,
            grpc_target(pipeline.host, topology.pipeline_private_port),
        )
        .insert(
            Service::Pipeline,
            ProtocolFamily::Grpc,
            Visibility::Public,
            grpc_target(pipeline.host, pipeline.public_port),
        );

    for (service, address) in [
        (Service::Connector, topology.connector),
        (Service::Model, topology.model),
    ] {
        builder
            .insert(
                service,
                ProtocolFamily::Http,
                Visibility::Public,
                http_base(scheme, address.host, address.public_port),
            )
            .insert(
                service,
                ProtocolFamily::Grpc,
                Visibility::Public,
                grpc_target(address.host, address.public_port),
            );
    }

    let endpoints = builder.finish();
    debug!(mode = %mode, scheme, endpoints = endpoints.len(), "resolved topology endpoints");
    Ok(endpoints)
}

/// Resolve pipeline and management endpoints, routing every public endpoint
/// through `API_GATEWAY_URL` when it is set. `MODE` is not consulted.
pub fn resolve_gateway(target: &TargetSettings) -> ConfigResult<EndpointSet> {
    let protocol = GatewayProtocol::from_setting(target.gateway_protocol.as_deref())?;
    let scheme = protocol.scheme();

    let (public_http, public_grpc) = match target.gateway_url.as_deref() {
        Some(url) if url.trim().is_empty() => return Err(ConfigurationError::EmptyGatewayUrl),
        Some(url) => (format!("{scheme}://{url}"), url.to_owned()),
        None => (
            http_base(GATEWAY_CONTAINER_SCHEME, GATEWAY_HOST, GATEWAY_PORT),
            grpc_target(GATEWAY_HOST, GATEWAY_PORT),
        ),
    };

    let mut builder = EntryBuilder::new();
    builder
        .insert(
            Service::Pipeline,
            ProtocolFamily::Http,
            Visibility::Private,
            http_base(PRIVATE_SCHEME, PIPELINE_BACKEND_HOST, PIPELINE_PRIVATE_PORT),
        )
        .insert(
            Service::Pipeline,
            ProtocolFamily::Grpc,
            Visibility::Private,
            grpc_target(PIPELINE_BACKEND_HOST, PIPELINE_PRIVATE_PORT),
        );
    for service in [Service::Pipeline, Service::Management] {
        builder
            .insert(
                service,
                ProtocolFamily::Http,
                Visibility::Public,
                public_http.clone(),
            )
            .insert(
                service,
                ProtocolFamily::Grpc,
                Visibility::Public,
                public_grpc.clone(),
            );
    }

    let endpoints = builder.finish();
    debug!(
        gateway_override = target.gateway_override(),
        scheme,
        endpoints = endpoints.len(),
        "resolved gateway endpoints"
    );
    Ok(endpoints)
}

//! ---
//! plt_section: "02-endpoint-resolution"
//! plt_subsection: "module"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Endpoint resolution crate exports."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
//! Turns the harness target settings into the base URLs and gRPC targets the
//! load-test runner dials. Resolution happens once; the resulting
//! [`EndpointSet`] is immutable and can be shared freely between threads.

pub mod endpoint;
pub mod mode;
pub mod resolver;

pub use endpoint::{EndpointKey, EndpointSet, ProtocolFamily, Service, Visibility};
pub use mode::{DeploymentMode, GatewayProtocol, ServiceAddress, Topology};
pub use resolver::{resolve_gateway, resolve_topology, ResolverVariant};

//! ---
//! plt_section: "02-endpoint-resolution"
//! plt_subsection: "module"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Endpoint keys and the immutable endpoint set."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Backend services addressed by the load tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Service {
    Pipeline,
    Connector,
    Model,
    Management,
}

impl Service {
    /// Prefix used in exported endpoint names.
    pub fn export_prefix(&self) -> &'static str {
        match self {
            Service::Pipeline => "pipeline",
            Service::Connector => "connector",
            Service::Model => "model",
            Service::Management => "mgmt",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProtocolFamily {
    /// `scheme://host:port` base URL.
    Http,
    /// `host:port` target for gRPC dialing.
    Grpc,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Visibility {
    Private,
    Public,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointKey {
    pub service: Service,
    pub family: ProtocolFamily,
    pub visibility: Visibility,
}

impl EndpointKey {
    pub const fn new(service: Service, family: ProtocolFamily, visibility: Visibility) -> Self {
        Self {
            service,
            family,
            visibility,
        }
    }

    /// Name under which the runner consumes this endpoint, e.g.
    /// `pipelineGRPCPublicHost`.
    pub fn export_name(&self) -> String {
        let family = match self.family {
            ProtocolFamily::Http => "",
            ProtocolFamily::Grpc => "GRPC",
        };
        let visibility = match self.visibility {
            Visibility::Private => "Private",
            Visibility::Public => "Public",
        };
        format!(
            "{}{}{}Host",
            self.service.export_prefix(),
            family,
            visibility
        )
    }
}

/// `scheme://host:port`
pub fn http_base(scheme: &str, host: &str, port: u16) -> String {
    format!("{scheme}://{host}:{port}")
}

/// `host:port`
pub fn grpc_target(host: &str, port: u16) -> String {
    format!("{host}:{port}")
}

/// Immutable mapping from endpoint key to connection string. Entries keep the
/// order in which the resolver produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    entries: IndexMap<EndpointKey, String>,
}

impl EndpointSet {
    pub(crate) fn from_entries(entries: IndexMap<EndpointKey, String>) -> Self {
        Self { entries }
    }

    pub fn get(
        &self,
        service: Service,
        family: ProtocolFamily,
        visibility: Visibility,
    ) -> Option<&str> {
        self.entries
            .get(&EndpointKey::new(service, family, visibility))
            .map(String::as_str)
    }

    pub fn public_http(&self, service: Service) -> Option<&str> {
        self.get(service, ProtocolFamily::Http, Visibility::Public)
    }

    pub fn private_http(&self, service: Service) -> Option<&str> {
        self.get(service, ProtocolFamily::Http, Visibility::Private)
    }

    pub fn public_grpc(&self, service: Service) -> Option<&str> {
        self.get(service, ProtocolFamily::Grpc, Visibility::Public)
    }

    pub fn private_grpc(&self, service: Service) -> Option<&str> {
        self.get(service, ProtocolFamily::Grpc, Visibility::Private)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EndpointKey, &str)> {
        self.entries.iter().map(|(key, value)| (key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export name to connection string, in resolution order.
    pub fn exports(&self) -> IndexMap<String, String> {
        self.iter()
            .map(|(key, value)| (key.export_name(), value.to_owned()))
            .collect()
    }

    /// Look up an endpoint by its export name.
    pub fn by_export_name(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.export_name() == name)
            .map(|(_, value)| value)
    }
}

impl Serialize for EndpointSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.export_name(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_names_follow_runner_convention() {
        let cases = [
            (
                EndpointKey::new(Service::Pipeline, ProtocolFamily::Http, Visibility::Private),
                "pipelinePrivateHost",
            ),
            (
                EndpointKey::new(Service::Connector, ProtocolFamily::Grpc, Visibility::Public),
                "connectorGRPCPublicHost",
            ),
            (
                EndpointKey::new(Service::Management, ProtocolFamily::Http, Visibility::Public),
                "mgmtPublicHost",
            ),
        ];
        for (key, expected) in cases {
            assert_eq!(key.export_name(), expected);
        }
    }

    #[test]
    fn composes_strings_per_family() {
        assert_eq!(http_base("https", "example.com", 443), "https://example.com:443");
        assert_eq!(grpc_target("pipeline-backend", 3081), "pipeline-backend:3081");
    }
}

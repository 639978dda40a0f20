//! ---
//! plt_section: "04-harness"
//! plt_subsection: "01-bootstrap"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Harness bootstrap producing the shared load-test context."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
//! The harness bootstrap turns a [`HarnessConfig`] into a [`HarnessContext`]
//! exactly once. Everything in the context is read-only afterwards, so runner
//! workers can share it behind an `Arc` without locking.

use anyhow::{Context, Result};
use plt_common::HarnessConfig;
use plt_endpoints::{resolve_gateway, resolve_topology, EndpointSet, GatewayProtocol};
use plt_fixtures::{FixtureRoot, FixtureSet, RequestParams};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Builder for [`HarnessContext`].
#[derive(Debug, Clone)]
pub struct HarnessBootstrap {
    config: HarnessConfig,
    load_fixtures: bool,
    user_uid: Option<Uuid>,
}

impl HarnessBootstrap {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            load_fixtures: false,
            user_uid: None,
        }
    }

    /// Read the binary fixtures from `TEST_FOLDER_ABS_PATH` during `build`.
    pub fn with_fixtures(mut self, load: bool) -> Self {
        self.load_fixtures = load;
        self
    }

    /// Pin the user id placed in the JWT stub headers instead of a random one.
    pub fn with_user_uid(mut self, uid: Uuid) -> Self {
        self.user_uid = Some(uid);
        self
    }

    pub fn build(self) -> Result<HarnessContext> {
        let target = &self.config.target;
        // Validated before anything else so a bad value never yields partial output.
        let protocol = GatewayProtocol::from_setting(target.gateway_protocol.as_deref())?;
        let topology = resolve_topology(target)?;
        let gateway = resolve_gateway(target)?;

        let fixtures = if self.load_fixtures {
            let root = FixtureRoot::from_settings(&self.config.fixtures)?;
            let set = FixtureSet::load(&root).context("failed to load binary fixtures")?;
            Some(set)
        } else {
            None
        };

        let user_uid = self.user_uid.unwrap_or_else(Uuid::new_v4);
        let timeout = self.config.requests.timeout;
        let params = ParamsSet {
            http: RequestParams::http().with_timeout(timeout),
            grpc: RequestParams::grpc().with_timeout(timeout),
            http_with_jwt: RequestParams::http().with_user_uid(user_uid),
            grpc_with_jwt: RequestParams::grpc().with_user_uid(user_uid),
            http_with_jwt_sub: RequestParams::http().with_jwt_sub(user_uid),
        };

        info!(
            mode = target.mode.as_deref().unwrap_or("direct"),
            protocol = %protocol,
            gateway_override = target.gateway_override(),
            fixtures = fixtures.is_some(),
            "harness context ready"
        );

        Ok(HarnessContext {
            config: self.config,
            topology,
            gateway,
            fixtures,
            params,
            user_uid,
        })
    }
}

/// Request parameter variants handed to the runner.
#[derive(Debug, Clone, Serialize)]
pub struct ParamsSet {
    pub http: RequestParams,
    pub grpc: RequestParams,
    pub http_with_jwt: RequestParams,
    pub grpc_with_jwt: RequestParams,
    /// Older backends read the caller from `Jwt-Sub` instead.
    pub http_with_jwt_sub: RequestParams,
}

/// Immutable inputs for one load-test process.
#[derive(Debug, Clone)]
pub struct HarnessContext {
    config: HarnessConfig,
    topology: EndpointSet,
    gateway: EndpointSet,
    fixtures: Option<FixtureSet>,
    params: ParamsSet,
    user_uid: Uuid,
}

impl HarnessContext {
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Pipeline, connector and model endpoints derived from `MODE`.
    pub fn topology(&self) -> &EndpointSet {
        &self.topology
    }

    /// Pipeline and management endpoints routed through the gateway.
    pub fn gateway(&self) -> &EndpointSet {
        &self.gateway
    }

    pub fn fixtures(&self) -> Option<&FixtureSet> {
        self.fixtures.as_ref()
    }

    pub fn params(&self) -> &ParamsSet {
        &self.params
    }

    pub fn user_uid(&self) -> Uuid {
        self.user_uid
    }
}

//! ---
//! plt_section: "01-core-functionality"
//! plt_subsection: "module"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Configuration error taxonomy shared by the resolver and loaders."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
use thiserror::Error;

pub type ConfigResult<T> = std::result::Result<T, ConfigurationError>;

/// Fatal configuration problems detected before any endpoint is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("only allow `http` or `https` for API_GATEWAY_PROTOCOL, got `{0}`")]
    InvalidProtocol(String),
    #[error("unknown MODE `{0}`; expected `api-gateway`, `localhost` or `direct`")]
    UnknownMode(String),
    #[error("API_GATEWAY_URL must not be blank")]
    EmptyGatewayUrl,
    #[error("TEST_FOLDER_ABS_PATH is not set; fixtures cannot be located")]
    MissingFixtureRoot,
}

//! ---
//! plt_section: "03-fixtures-payloads"
//! plt_subsection: "module"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Fixture crate exports and shared resource names."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
//! Static inputs for the load-test runner: binary assets, request
//! parameter stubs and recipe templates. None of these are interpreted here.

pub mod assets;
pub mod params;
pub mod recipe;

pub use assets::{FixtureError, FixtureResult, FixtureRoot, FixtureSet, ImageFixture};
pub use params::{RequestParams, Transport};
pub use recipe::{
    ComponentRecipe, ConnectorRecipe, RecipeBody, RecipeTemplate, TriggerInput, TriggerPayload,
};

/// Id of the sample detection model deployed from the archive fixture.
pub const MODEL_ID: &str = "dummy-det";
pub const MODEL_DEFINITION: &str = "model-definitions/local";

pub const NAMESPACE: &str = "users/admin";
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "password";

/// `models/<id>` resource name.
pub fn model_resource(model_id: &str) -> String {
    format!("models/{model_id}")
}

//! ---
//! plt_section: "03-fixtures-payloads"
//! plt_subsection: "module"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Pipeline recipe templates and trigger payloads."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
//! Recipes are request bodies only; nothing here interprets them. Field
//! names follow the backend's JSON casing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{model_resource, MODEL_ID};

pub const SOURCE_HTTP: &str = "source-connectors/source-http";
pub const SOURCE_GRPC: &str = "source-connectors/source-grpc";
pub const DESTINATION_HTTP: &str = "destination-connectors/destination-http";
pub const DESTINATION_GRPC: &str = "destination-connectors/destination-grpc";
/// Connector id of the CSV destination created by the async tests.
pub const DST_CSV_CONNECTOR_ID: &str = "some-cool-name-for-dst-csv-connector";

pub const COMPONENT_RECIPE_VERSION: &str = "v1beta";

/// `{ "recipe": ... }` wrapper sent on create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeBody<R> {
    pub recipe: R,
}

/// Source → models → destination chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorRecipe {
    pub source: String,
    pub models: Vec<String>,
    pub destination: String,
}

impl ConnectorRecipe {
    fn detection(source: &str, model_count: usize, destination: impl Into<String>) -> Self {
        Self {
            source: source.to_owned(),
            models: vec![model_resource(MODEL_ID); model_count],
            destination: destination.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableSpec {
    pub title: String,
    pub instill_format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub task: String,
    pub input: IndexMap<String, String>,
}

/// Versioned recipe made of named variables, outputs and components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecipe {
    pub version: String,
    pub variable: IndexMap<String, VariableSpec>,
    pub output: IndexMap<String, OutputSpec>,
    pub component: IndexMap<String, ComponentSpec>,
}

/// Body for trigger calls: one entry per input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerPayload {
    pub data: Vec<TriggerInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerInput {
    pub variable: IndexMap<String, String>,
}

pub fn det_sync_http_single_model() -> RecipeBody<ConnectorRecipe> {
    RecipeBody {
        recipe: ConnectorRecipe::detection(SOURCE_HTTP, 1, DESTINATION_HTTP),
    }
}

pub fn det_sync_grpc_single_model() -> RecipeBody<ConnectorRecipe> {
    RecipeBody {
        recipe: ConnectorRecipe::detection(SOURCE_GRPC, 1, DESTINATION_GRPC),
    }
}

pub fn det_sync_http_multi_model() -> RecipeBody<ConnectorRecipe> {
    RecipeBody {
        recipe: ConnectorRecipe::detection(SOURCE_HTTP, 2, DESTINATION_HTTP),
    }
}

pub fn det_sync_grpc_multi_model() -> RecipeBody<ConnectorRecipe> {
    RecipeBody {
        recipe: ConnectorRecipe::detection(SOURCE_GRPC, 2, DESTINATION_GRPC),
    }
}

fn csv_destination() -> String {
    format!("destination-connectors/{DST_CSV_CONNECTOR_ID}")
}

pub fn det_async_single_model() -> RecipeBody<ConnectorRecipe> {
    RecipeBody {
        recipe: ConnectorRecipe::detection(SOURCE_HTTP, 1, csv_destination()),
    }
}

pub fn det_async_multi_model() -> RecipeBody<ConnectorRecipe> {
    RecipeBody {
        recipe: ConnectorRecipe::detection(SOURCE_HTTP, 2, csv_destination()),
    }
}

/// Single base64-encode component wired from `variable.input` to `output.answer`.
pub fn simple_recipe() -> RecipeBody<ComponentRecipe> {
    let mut variable = IndexMap::new();
    variable.insert(
        "input".to_owned(),
        VariableSpec {
            title: "Input".to_owned(),
            instill_format: "string".to_owned(),
        },
    );

    let mut output = IndexMap::new();
    output.insert(
        "answer".to_owned(),
        OutputSpec {
            title: "Answer".to_owned(),
            value: "${b01.output.data}".to_owned(),
        },
    );

    let mut input = IndexMap::new();
    input.insert("data".to_owned(), "${variable.input}".to_owned());
    let mut component = IndexMap::new();
    component.insert(
        "b01".to_owned(),
        ComponentSpec {
            kind: "base64".to_owned(),
            task: "TASK_ENCODE".to_owned(),
            input,
        },
    );

    RecipeBody {
        recipe: ComponentRecipe {
            version: COMPONENT_RECIPE_VERSION.to_owned(),
            variable,
            output,
            component,
        },
    }
}

pub fn simple_payload() -> TriggerPayload {
    let mut variable = IndexMap::new();
    variable.insert("input".to_owned(), "a".to_owned());
    TriggerPayload {
        data: vec![TriggerInput { variable }],
    }
}

/// Every template addressable by a stable name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RecipeTemplate {
    DetSyncHttpSingleModel,
    DetSyncGrpcSingleModel,
    DetSyncHttpMultiModel,
    DetSyncGrpcMultiModel,
    DetAsyncSingleModel,
    DetAsyncMultiModel,
    SimpleRecipe,
    SimplePayload,
}

impl RecipeTemplate {
    pub const ALL: [RecipeTemplate; 8] = [
        RecipeTemplate::DetSyncHttpSingleModel,
        RecipeTemplate::DetSyncGrpcSingleModel,
        RecipeTemplate::DetSyncHttpMultiModel,
        RecipeTemplate::DetSyncGrpcMultiModel,
        RecipeTemplate::DetAsyncSingleModel,
        RecipeTemplate::DetAsyncMultiModel,
        RecipeTemplate::SimpleRecipe,
        RecipeTemplate::SimplePayload,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RecipeTemplate::DetSyncHttpSingleModel => "det-sync-http-single-model",
            RecipeTemplate::DetSyncGrpcSingleModel => "det-sync-grpc-single-model",
            RecipeTemplate::DetSyncHttpMultiModel => "det-sync-http-multi-model",
            RecipeTemplate::DetSyncGrpcMultiModel => "det-sync-grpc-multi-model",
            RecipeTemplate::DetAsyncSingleModel => "det-async-single-model",
            RecipeTemplate::DetAsyncMultiModel => "det-async-multi-model",
            RecipeTemplate::SimpleRecipe => "simple-recipe",
            RecipeTemplate::SimplePayload => "simple-payload",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|template| template.name() == name)
    }

    /// Render the template as a JSON request body.
    pub fn render(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            RecipeTemplate::DetSyncHttpSingleModel => {
                serde_json::to_value(det_sync_http_single_model())
            }
            RecipeTemplate::DetSyncGrpcSingleModel => {
                serde_json::to_value(det_sync_grpc_single_model())
            }
            RecipeTemplate::DetSyncHttpMultiModel => {
                serde_json::to_value(det_sync_http_multi_model())
            }
            RecipeTemplate::DetSyncGrpcMultiModel => {
                serde_json::to_value(det_sync_grpc_multi_model())
            }
            RecipeTemplate::DetAsyncSingleModel => serde_json::to_value(det_async_single_model()),
            RecipeTemplate::DetAsyncMultiModel => serde_json::to_value(det_async_multi_model()),
            RecipeTemplate::SimpleRecipe => serde_json::to_value(simple_recipe()),
            RecipeTemplate::SimplePayload => serde_json::to_value(simple_payload()),
        }
    }
}

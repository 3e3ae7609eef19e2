use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

/// JSON-schema style declaration of a callable tool, in the shape that LLM
/// function-calling APIs expect.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: FunctionParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionParameters {
    #[serde(rename = "type")]
    pub param_type: String,
    pub properties: HashMap<String, PropertyDef>,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyDef {
    #[serde(rename = "type")]
    pub prop_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

/// Dispatch seam the host agent runtime calls into. Implementations answer
/// by value; a `String` error here means "tell the model what went wrong",
/// not a crashed call.
#[async_trait]
pub trait FunctionCallHandler: Send + Sync {
    async fn handle_function_call(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, String>;

    fn supported_functions(&self) -> Vec<String>;
}

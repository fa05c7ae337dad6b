use jsonschema::{Draft, JSONSchema};
use schemars::{schema::RootSchema, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{
    any::{type_name, TypeId},
    fmt,
    sync::{Arc, OnceLock},
};

use crate::types::{intent::TravelIntent, plan::TripPlan};

/// Cached JSON schema handle associated with a response type.
#[derive(Clone)]
pub struct SchemaHandle {
    schema_name: &'static str,
    type_name: &'static str,
    type_id: TypeId,
    schema_json: Arc<Value>,
    /// Draft 7 validator, compiled on first use and shared by clones.
    validator: Arc<OnceLock<Result<JSONSchema, String>>>,
}

impl fmt::Debug for SchemaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaHandle")
            .field("schema_name", &self.schema_name)
            .field("type_name", &self.type_name)
            .field("compiled", &self.validator.get().is_some())
            .finish()
    }
}

impl SchemaHandle {
    pub fn from_root_schema<T: 'static>(schema_name: &'static str, root: RootSchema) -> Self {
        let type_name = type_name::<T>();
        let schema_json = serde_json::to_value(root)
            .unwrap_or_else(|err| panic!("failed to serialize schema for {}: {}", type_name, err));

        Self {
            schema_name,
            type_name,
            type_id: TypeId::of::<T>(),
            schema_json: Arc::new(schema_json),
            validator: Arc::new(OnceLock::new()),
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }

    /// The compiled validator. A schema that fails to compile keeps failing
    /// with the same message.
    pub fn validator(&self) -> Result<&JSONSchema, &str> {
        self.validator
            .get_or_init(|| {
                JSONSchema::options()
                    .with_draft(Draft::Draft7)
                    .compile(self.schema_json())
                    .map_err(|err| err.to_string())
            })
            .as_ref()
            .map_err(String::as_str)
    }
}

/// A type the model is asked to produce, with its JSON schema.
pub trait CompletionSchema: DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;
}

fn build_handle<T: JsonSchema + 'static>(name: &'static str) -> SchemaHandle {
    SchemaHandle::from_root_schema::<T>(name, schemars::schema_for!(T))
}

impl CompletionSchema for TravelIntent {
    fn schema() -> &'static SchemaHandle {
        static HANDLE: OnceLock<SchemaHandle> = OnceLock::new();
        HANDLE.get_or_init(|| build_handle::<Self>("travel_intent"))
    }
}

impl CompletionSchema for TripPlan {
    fn schema() -> &'static SchemaHandle {
        static HANDLE: OnceLock<SchemaHandle> = OnceLock::new();
        HANDLE.get_or_init(|| build_handle::<Self>("trip_plan"))
    }
}

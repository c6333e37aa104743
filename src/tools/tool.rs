//! The `Tool` trait every callable operation implements

use std::future::Future;

use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{HiveError, Result};

/// One operation exposed to a transport
///
/// Behaviour hints follow the usual tool-annotation vocabulary so a transport
/// can surface them without knowing the tool.
pub trait Tool: Send + Sync {
    /// Arguments accepted by [`Tool::execute`]
    type Args: DeserializeOwned + JsonSchema + Send;

    /// Stable tool name
    fn name() -> &'static str;

    /// Human description shown to callers
    fn description() -> &'static str;

    /// Does not change any state
    fn read_only() -> bool {
        false
    }

    /// May remove state that cannot be recovered
    fn destructive() -> bool {
        false
    }

    /// Repeating the call with the same arguments has no extra effect
    fn idempotent() -> bool {
        false
    }

    /// Talks to processes or files outside the crate's control
    fn open_world() -> bool {
        true
    }

    /// JSON schema of [`Tool::Args`]
    fn input_schema() -> Value {
        let schema = schemars::schema_for!(Self::Args);
        serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Run the operation
    fn execute(&self, args: Self::Args) -> impl Future<Output = Result<Value>> + Send;
}

/// Name, description, hints and schema of a tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Stable tool name
    pub name: &'static str,
    /// Human description
    pub description: &'static str,
    /// Arguments schema
    pub input_schema: Value,
    /// See [`Tool::read_only`]
    pub read_only: bool,
    /// See [`Tool::destructive`]
    pub destructive: bool,
    /// See [`Tool::idempotent`]
    pub idempotent: bool,
    /// See [`Tool::open_world`]
    pub open_world: bool,
}

impl ToolDefinition {
    /// Definition of `T`
    #[must_use]
    pub fn of<T: Tool>() -> Self {
        Self {
            name: T::name(),
            description: T::description(),
            input_schema: T::input_schema(),
            read_only: T::read_only(),
            destructive: T::destructive(),
            idempotent: T::idempotent(),
            open_world: T::open_world(),
        }
    }
}

/// Decode `args` and run `tool`
///
/// A missing or `null` argument object is treated as `{}` so tools whose
/// arguments all have defaults can be called bare.
pub(crate) async fn invoke<T: Tool>(tool: &T, args: Value) -> Result<Value> {
    let args = if args.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        args
    };
    let args: T::Args = serde_json::from_value(args)
        .map_err(|e| HiveError::invalid_arguments(format!("{}: {e}", T::name())))?;
    tool.execute(args).await
}

/// Serialize a response into a tool result
pub(crate) fn to_json<T: Serialize>(response: &T) -> Result<Value> {
    Ok(serde_json::to_value(response)?)
}

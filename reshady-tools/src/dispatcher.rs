use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::MethodError;
use crate::methods::Method;
use crate::registry::MethodRegistry;

/// Routes host calls by method name to the registered handlers.
pub struct MethodDispatcher {
    registry: Arc<MethodRegistry>,
}

impl MethodDispatcher {
    pub fn new(registry: Arc<MethodRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    pub async fn dispatch(&self, method_name: &str, input: Value) -> Result<Value, MethodError> {
        let request_id = uuid::Uuid::new_v4();
        info!("Dispatching method: {} (request {})", method_name, request_id);

        let method = self
            .registry
            .get(method_name)
            .ok_or_else(|| MethodError::UnknownMethod(method_name.to_string()))
            .inspect_err(|e| warn!("{}", e))?;

        if let Err(e) = validate_input(&input, &method.schema()) {
            warn!("Rejected {} (request {}): {}", method_name, request_id, e);
            return Err(e);
        }

        let result = execute_isolated(method, input).await;
        match &result {
            Ok(_) => info!("Completed method: {} (request {})", method_name, request_id),
            Err(e) => error!("Method {} failed (request {}): {}", method_name, request_id, e),
        }
        result
    }
}

/// Checks the argument object against the method schema: an object whose
/// required properties are present and strings.
fn validate_input(input: &Value, schema: &Value) -> Result<(), MethodError> {
    let Some(args) = input.as_object() else {
        return Err(MethodError::InvalidParams("arguments must be an object".into()));
    };

    let required = schema["required"].as_array().map(Vec::as_slice).unwrap_or_default();
    for name in required.iter().filter_map(Value::as_str) {
        match args.get(name) {
            None => {
                return Err(MethodError::InvalidParams(format!("missing parameter: {name}")));
            }
            Some(value) if !value.is_string() => {
                return Err(MethodError::InvalidParams(format!(
                    "parameter {name} must be a string"
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

async fn execute_isolated(method: Arc<dyn Method>, input: Value) -> Result<Value, MethodError> {
    // A panicking handler surfaces as a JoinError here.
    let handle = tokio::spawn(async move { method.execute(input).await });
    match handle.await {
        Ok(result) => result,
        Err(join_err) => {
            if join_err.is_panic() {
                error!("Method execution panicked");
            } else {
                error!("Method execution cancelled");
            }
            Err(MethodError::Internal)
        }
    }
}

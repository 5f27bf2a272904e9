//! Transport-independent tool dispatch.
//!
//! The dispatcher owns the registry and the handler table. Transports hold
//! it behind an `Arc` and never see handlers directly: a call is validated,
//! routed, bounded in time and normalized into either a [`ResultEnvelope`]
//! or a [`ToolError`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::envelope::ResultEnvelope;
use super::error::{RegistryError, ToolError};
use super::handlers::HandlerTable;
use super::registry::ToolRegistry;
use super::schema::ToolDescriptor;
use super::validator::validate;

/// An incoming call, as decoded by a transport.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Routes validated calls to handlers.
#[derive(Debug)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    handlers: HandlerTable,
    handler_timeout: Duration,
}

impl Dispatcher {
    /// Pair a registry with a handler table.
    ///
    /// Every descriptor needs a handler and every handler a descriptor.
    pub fn new(
        registry: Arc<ToolRegistry>,
        handlers: HandlerTable,
        handler_timeout: Duration,
    ) -> Result<Self, RegistryError> {
        for name in registry.tool_names() {
            if !handlers.contains(name) {
                return Err(RegistryError::MissingHandler(name.to_string()));
            }
        }
        for name in handlers.names() {
            if !registry.contains(name) {
                return Err(RegistryError::OrphanHandler(name.to_string()));
            }
        }

        info!(
            "Dispatcher ready with {} tools (handler timeout {}ms)",
            registry.len(),
            handler_timeout.as_millis()
        );

        Ok(Self {
            registry,
            handlers,
            handler_timeout,
        })
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Descriptors for a "list tools" response.
    pub fn list_tools(&self) -> &[ToolDescriptor] {
        self.registry.list_tools()
    }

    pub fn handler_timeout(&self) -> Duration {
        self.handler_timeout
    }

    /// Validate, invoke and normalize one call.
    #[instrument(skip_all, fields(tool = %call.name))]
    pub async fn dispatch(&self, call: ToolCall) -> Result<ResultEnvelope, ToolError> {
        let arguments = validate(&self.registry, &call.name, &call.arguments).map_err(|e| {
            warn!("Rejected call: {}", e);
            ToolError::from(e)
        })?;

        let handler = self.handlers.lookup(&call.name).ok_or_else(|| {
            error!("No handler registered for '{}'", call.name);
            ToolError::internal(format!("no handler registered for tool '{}'", call.name))
        })?;

        let invocation = AssertUnwindSafe(handler.call(arguments)).catch_unwind();
        match tokio::time::timeout(self.handler_timeout, invocation).await {
            Ok(Ok(Ok(envelope))) => {
                info!("Tool '{}' completed", call.name);
                Ok(envelope)
            }
            Ok(Ok(Err(e))) => {
                warn!("Tool '{}' failed: {:#}", call.name, e);
                Err(ToolError::handler_fault(&call.name, format!("{e:#}")))
            }
            Ok(Err(panic)) => {
                let message = panic_message(&*panic);
                error!("Tool '{}' panicked: {}", call.name, message);
                Err(ToolError::handler_fault(&call.name, message))
            }
            Err(_) => {
                warn!(
                    "Tool '{}' timed out after {}ms",
                    call.name,
                    self.handler_timeout.as_millis()
                );
                Err(ToolError::Timeout {
                    tool: call.name,
                    after: self.handler_timeout,
                })
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::error::ValidationError;
    use crate::domains::tools::handlers::ToolHandler;
    use crate::domains::tools::router::build_handler_table;
    use crate::domains::tools::schema::{ArgumentSchema, FieldKind, FieldSpec};
    use crate::domains::tools::validator::ValidatedArguments;
    use serde_json::{Map, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::{assert_err, assert_ok};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn builtin() -> Dispatcher {
        Dispatcher::new(
            Arc::new(ToolRegistry::builtin().unwrap()),
            build_handler_table().unwrap(),
            TIMEOUT,
        )
        .unwrap()
    }

    /// Handler with configurable behaviour that counts its invocations.
    struct Probe {
        calls: Arc<AtomicUsize>,
        behaviour: Behaviour,
    }

    enum Behaviour {
        Echo,
        Fail,
        Panic,
        Hang,
    }

    #[async_trait::async_trait]
    impl ToolHandler for Probe {
        fn name(&self) -> &str {
            "probe"
        }

        async fn call(&self, arguments: ValidatedArguments) -> anyhow::Result<ResultEnvelope> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behaviour {
                Behaviour::Echo => Ok(ResultEnvelope::text(
                    Value::Object(arguments.into_inner()).to_string(),
                )),
                Behaviour::Fail => anyhow::bail!("disk on fire"),
                Behaviour::Panic => panic!("probe exploded"),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(ResultEnvelope::default())
                }
            }
        }
    }

    fn probe_dispatcher(behaviour: Behaviour, timeout: Duration) -> (Dispatcher, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let schema = ArgumentSchema::new()
            .field(FieldSpec::string("platform").one_of(&["nes", "gb"]).required())
            .field(FieldSpec::array_of("files", FieldKind::String));
        let registry =
            ToolRegistry::new(vec![ToolDescriptor::new("probe", "Test probe", schema)]).unwrap();
        let handlers = HandlerTable::new()
            .register(Probe {
                calls: calls.clone(),
                behaviour,
            })
            .unwrap();
        let dispatcher = Dispatcher::new(Arc::new(registry), handlers, timeout).unwrap();
        (dispatcher, calls)
    }

    /// Smallest argument object that satisfies every required field.
    fn minimal_arguments(descriptor: &ToolDescriptor) -> Value {
        let mut arguments = Map::new();
        for field in descriptor.schema.required_fields() {
            let value = match field.kind {
                FieldKind::String => match &field.allowed {
                    Some(allowed) => json!(allowed[0]),
                    None => json!("CircuitQuest"),
                },
                FieldKind::Number => json!(field.minimum.unwrap_or(8.0)),
                FieldKind::Boolean => json!(true),
                FieldKind::Object => json!({}),
                FieldKind::Array => json!(["main.asm"]),
            };
            arguments.insert(field.name.clone(), value);
        }
        Value::Object(arguments)
    }

    #[tokio::test]
    async fn test_every_tool_accepts_minimal_arguments() {
        let dispatcher = builtin();
        for descriptor in dispatcher.list_tools() {
            let call = ToolCall::new(descriptor.name.clone(), minimal_arguments(descriptor));
            let envelope = dispatcher.dispatch(call).await.unwrap_or_else(|e| {
                panic!("{} failed with minimal arguments: {}", descriptor.name, e)
            });
            assert!(!envelope.content.is_empty(), "{} returned no content", descriptor.name);
        }
    }

    #[tokio::test]
    async fn test_create_retro_project_acknowledgment() {
        let envelope = builtin()
            .dispatch(ToolCall::new(
                "create_retro_project",
                json!({ "platform": "nes", "projectName": "CircuitQuest" }),
            ))
            .await
            .unwrap();

        assert_eq!(envelope.content.len(), 1);
        let text = envelope.texts().next().unwrap();
        assert!(text.contains("CircuitQuest"));
        assert!(text.contains("nes"));
    }

    #[tokio::test]
    async fn test_generate_sprite_acknowledgment() {
        let envelope = builtin()
            .dispatch(ToolCall::new(
                "generate_sprite",
                json!({ "width": 16, "height": 16, "colors": 4 }),
            ))
            .await
            .unwrap();

        let text = envelope.texts().next().unwrap();
        assert!(text.contains("16x16"));
        assert!(text.contains('4'));
    }

    #[tokio::test]
    async fn test_bad_platform_rejected_for_every_tool() {
        let dispatcher = builtin();
        for descriptor in dispatcher.list_tools() {
            if descriptor.schema.get("platform").is_none() {
                continue;
            }
            let mut arguments = minimal_arguments(descriptor);
            arguments["platform"] = json!("atari2600");

            let err = dispatcher
                .dispatch(ToolCall::new(descriptor.name.clone(), arguments))
                .await
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    ToolError::Validation(ValidationError::EnumViolation { ref field, .. })
                        if field == "platform"
                ),
                "{}: unexpected {:?}",
                descriptor.name,
                err
            );
        }
    }

    #[tokio::test]
    async fn test_missing_required_field_named_for_every_tool() {
        let dispatcher = builtin();
        for descriptor in dispatcher.list_tools() {
            for field in descriptor.schema.required_fields() {
                let mut arguments = minimal_arguments(descriptor);
                arguments.as_object_mut().unwrap().remove(&field.name);

                let err = dispatcher
                    .dispatch(ToolCall::new(descriptor.name.clone(), arguments))
                    .await
                    .unwrap_err();
                match err {
                    ToolError::Validation(ValidationError::MissingRequiredField(missing)) => {
                        assert_eq!(missing, field.name)
                    }
                    other => panic!("{}: unexpected {:?}", descriptor.name, other),
                }
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let err = builtin()
            .dispatch(ToolCall::new("nonexistent_tool", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ToolError::Validation(ValidationError::UnknownTool(ref name)) if name == "nonexistent_tool"
        ));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_validation_failure_never_reaches_handler() {
        let (dispatcher, calls) = probe_dispatcher(Behaviour::Echo, TIMEOUT);

        assert_err!(dispatcher.dispatch(ToolCall::new("probe", json!({}))).await);
        assert_err!(
            dispatcher
                .dispatch(ToolCall::new("probe", json!({ "platform": "snes" })))
                .await
        );
        assert_err!(
            dispatcher
                .dispatch(ToolCall::new(
                    "probe",
                    json!({ "platform": "nes", "files": [1] })
                ))
                .await
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_ok!(
            dispatcher
                .dispatch(ToolCall::new("probe", json!({ "platform": "nes" })))
                .await
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handler_error_becomes_fault() {
        let (dispatcher, _) = probe_dispatcher(Behaviour::Fail, TIMEOUT);
        let err = dispatcher
            .dispatch(ToolCall::new("probe", json!({ "platform": "nes" })))
            .await
            .unwrap_err();

        assert!(!err.is_client_error());
        match err {
            ToolError::HandlerFault { tool, message } => {
                assert_eq!(tool, "probe");
                assert_eq!(message, "disk on fire");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_fault() {
        let (dispatcher, _) = probe_dispatcher(Behaviour::Panic, TIMEOUT);
        let err = dispatcher
            .dispatch(ToolCall::new("probe", json!({ "platform": "gb" })))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::HandlerFault { ref message, .. } if message == "probe exploded"));
    }

    #[tokio::test]
    async fn test_slow_handler_times_out() {
        let (dispatcher, _) = probe_dispatcher(Behaviour::Hang, Duration::from_millis(50));
        let err = dispatcher
            .dispatch(ToolCall::new("probe", json!({ "platform": "gb" })))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::Timeout { ref tool, .. } if tool == "probe"));
    }

    #[tokio::test]
    async fn test_repeated_dispatch_is_independent() {
        let dispatcher = Arc::new(builtin());
        let call = ToolCall::new(
            "set_code_opacity",
            json!({ "filename": "main.asm", "opacity": 25 }),
        );

        let (first, second) = tokio::join!(
            dispatcher.dispatch(call.clone()),
            dispatcher.dispatch(call.clone())
        );
        let first = first.unwrap();
        assert_eq!(first, second.unwrap());
        assert_eq!(dispatcher.dispatch(call).await.unwrap(), first);
        assert_eq!(dispatcher.registry().as_ref(), &ToolRegistry::builtin().unwrap());
    }

    #[test]
    fn test_missing_handler_rejected() {
        let handlers = HandlerTable::new();
        let err = Dispatcher::new(Arc::new(ToolRegistry::builtin().unwrap()), handlers, TIMEOUT)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::MissingHandler("create_retro_project".into())
        );
    }

    #[test]
    fn test_orphan_handler_rejected() {
        let handlers = build_handler_table()
            .unwrap()
            .register(Probe {
                calls: Arc::new(AtomicUsize::new(0)),
                behaviour: Behaviour::Echo,
            })
            .unwrap();
        let err = Dispatcher::new(Arc::new(ToolRegistry::builtin().unwrap()), handlers, TIMEOUT)
            .unwrap_err();
        assert_eq!(err, RegistryError::OrphanHandler("probe".into()));
    }
}

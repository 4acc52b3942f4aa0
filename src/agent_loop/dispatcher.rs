//! Executes one model-requested tool call and records its result.

use serde_json::Value;
use tracing::{debug, warn};

use crate::conversation::ConversationStore;
use crate::tools::{ToolArguments, ToolExecutor};
use crate::types::ToolCall;

use super::events::{ToolCallEvent, ToolEventSink};

/// Prefix of every tool result that reports a failure.
pub const ERROR_PREFIX: &str = "Error: ";

/// Dispatches tool calls against an executor.
///
/// Every call appends exactly one tool-result message to the store. Argument
/// parse failures and executor failures become `Error: `-prefixed results
/// instead of errors, so the conversation can continue.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolCallDispatcher;

impl ToolCallDispatcher {
    pub async fn dispatch(
        call: &ToolCall,
        executor: &dyn ToolExecutor,
        sink: Option<&ToolEventSink>,
        store: &mut ConversationStore,
    ) {
        let emit = |event: ToolCallEvent| {
            if let Some(sink) = sink {
                sink(event);
            }
        };

        let args = match ToolArguments::parse(&call.arguments_raw) {
            Ok(args) => args,
            Err(err) => {
                warn!(tool = %call.name, error = %err, "tool arguments failed to parse");
                let message = err.to_string();
                emit(ToolCallEvent::failed(
                    &call.id,
                    &call.name,
                    Value::Object(Default::default()),
                    message.clone(),
                ));
                store.append_tool_result(&call.id, &call.name, format!("{ERROR_PREFIX}{message}"));
                return;
            }
        };

        let args_value = args.to_value();
        emit(ToolCallEvent::started(&call.id, &call.name, args_value.clone()));
        debug!(tool = %call.name, call_id = %call.id, "executing tool");

        match executor.execute_tool(&call.name, &args).await {
            Ok(result) => {
                emit(ToolCallEvent::succeeded(&call.id, &call.name, args_value, &result));
                store.append_tool_result(&call.id, &call.name, result);
            }
            Err(err) => {
                warn!(tool = %call.name, error = %err, "tool execution failed");
                let message = err.to_string();
                emit(ToolCallEvent::failed(&call.id, &call.name, args_value, message.clone()));
                store.append_tool_result(&call.id, &call.name, format!("{ERROR_PREFIX}{message}"));
            }
        }
    }
}

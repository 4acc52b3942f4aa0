//! Name-indexed tool collection.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::arguments::ToolArguments;
use super::executor::ToolExecutor;
use super::tool::Tool;
use super::types::ToolDefinition;
use super::validation::validate_arguments;
use crate::error::BridgeError;

/// Tools in registration order. Registering a name twice replaces the
/// earlier tool in place.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tools(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool);
        }
        registry
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(idx) => self.tools[idx] = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Schemas offered to the model.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn execute_tool(&self, name: &str, args: &ToolArguments) -> Result<String, BridgeError> {
        let tool = self
            .get(name)
            .ok_or_else(|| BridgeError::tool(name, format!("Tool '{name}' not found in registry")))?;
        validate_arguments(args.as_map(), &tool.parameters().schema)
            .map_err(|e| BridgeError::tool(name, format!("Argument validation failed: {e}")))?;
        debug!(tool = name, "executing tool");
        tool.execute(args).await
    }
}

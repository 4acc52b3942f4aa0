//! Tool system for function calling.

pub mod arguments;
pub mod builtin;
pub mod executor;
pub mod registry;
pub mod tool;
pub mod types;
pub mod validation;

pub use arguments::{ArgumentParseError, ToolArguments};
pub use executor::{FnExecutor, ToolExecutor};
pub use registry::ToolRegistry;
pub use tool::{FnTool, Tool};
pub use types::{ParameterBuilder, ToolDefinition, ToolParameters};

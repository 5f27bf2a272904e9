//! MCP protocol handler for the STDIO transport.
//!
//! `McpServer` implements rmcp's `ServerHandler` by translating
//! `tools/list` and `tools/call` into calls on the shared [`Dispatcher`].
//! It owns no tool metadata of its own: listings are rendered from the
//! dispatcher's registry on every request.

use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::tools::{
    ContentBlock, Dispatcher, ResultEnvelope, ToolCall, ToolDescriptor, ToolError,
};

/// Name reported to clients unless configured otherwise.
pub const DEFAULT_SERVER_NAME: &str = "retroide";

/// The MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    dispatcher: Arc<Dispatcher>,
    name: String,
    version: String,
}

impl McpServer {
    /// Create a handler over the shared dispatcher.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            name: DEFAULT_SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the name and version reported in `initialize`.
    pub fn with_identity(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Descriptors as rmcp `Tool` models.
    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher.list_tools().iter().map(to_tool).collect()
    }

    /// Run one call through the dispatcher and translate the outcome.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = arguments.map(Value::Object).unwrap_or(Value::Null);
        self.dispatcher
            .dispatch(ToolCall::new(name, arguments))
            .await
            .map(to_call_result)
            .map_err(to_mcp_error)
    }
}

/// Convert a descriptor into the rmcp listing model.
pub fn to_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name.clone(),
        descriptor.description.clone(),
        Arc::new(descriptor.schema.to_json_schema()),
    )
}

/// Convert a dispatcher envelope into an MCP call result.
pub fn to_call_result(envelope: ResultEnvelope) -> CallToolResult {
    let content = envelope
        .content
        .into_iter()
        .map(|block| match block {
            ContentBlock::Text { text } => Content::text(text),
        })
        .collect();
    CallToolResult::success(content)
}

/// Client-input faults are invalid params; everything else is internal.
pub fn to_mcp_error(err: ToolError) -> McpError {
    if err.is_client_error() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "RetroIDE tools for retro game development: projects, sprites, assets, ROM builds and code opacity."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: self.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _request, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        self.call(&request.name, request.arguments).await
    }
}

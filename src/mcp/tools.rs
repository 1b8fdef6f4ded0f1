// MCP tools implementation using the official rmcp SDK

use rmcp::{
    ErrorData as McpError,
    model::*,
    tool, tool_router,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::engine::{self, TodoEdit};
use crate::error::TodoError;
use crate::models::{StatusFilter, TodoState};
use crate::storage::SharedTodoStore;

/// Todo MCP Server - batch operations over a single shared store
#[derive(Clone)]
pub struct TodoServer {
    store: SharedTodoStore,
    tool_router: ToolRouter<Self>,
}

impl TodoServer {
    /// Every clone of the server shares the same store handle, so
    /// load-modify-save cycles never interleave within the process.
    pub fn new(store: SharedTodoStore) -> Self {
        Self {
            store,
            tool_router: Self::tool_router(),
        }
    }
}

// Implement ServerHandler - delegates tool calls to the tool_router
impl rmcp::handler::server::ServerHandler for TodoServer {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        let mut info = rmcp::model::ServerInfo::default();
        info.instructions = Some("Todo MCP Server - manage a plain-text todo list".into());
        info
    }

    fn initialize(
        &self,
        _request: rmcp::model::InitializeRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<rmcp::model::InitializeResult, McpError>> + Send + '_ {
        async move {
            tracing::debug!("initialize called");
            let mut result = rmcp::model::InitializeResult::default();
            result.capabilities.tools = Some(rmcp::model::ToolsCapability {
                list_changed: Some(false),
            });
            result.server_info.name = "todo-mcp".into();
            result.server_info.version = env!("CARGO_PKG_VERSION").into();
            result.instructions = Some("Todo MCP Server - manage a plain-text todo list".into());
            Ok(result)
        }
    }

    fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<rmcp::model::ListToolsResult, McpError>> + Send + '_ {
        async move {
            let tools = self.tool_router.list_all();
            tracing::debug!("list_tools called, {} tools", tools.len());
            Ok(rmcp::model::ListToolsResult {
                tools,
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        request: rmcp::model::CallToolRequestParam,
        context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let tool_context = rmcp::handler::server::tool::ToolCallContext::new(self, request, context);
            self.tool_router.call(tool_context).await
        }
    }
}

// ============================================
// Tool Input Types
// ============================================

#[derive(Deserialize, JsonSchema)]
pub struct AddTodoInput {
    /// Todo texts to add, in order; each becomes one new todo
    pub todos: Vec<String>,
}

#[derive(Deserialize, JsonSchema)]
pub struct EditTodoInput {
    /// Edits to apply; each names a todo by its hash and gives the replacement text
    pub edits: Vec<TodoEdit>,
}

#[derive(Deserialize, JsonSchema)]
pub struct ListTodosInput {
    /// Which todos to show: "todo" (default), "done" or "all"
    pub status: Option<StatusFilter>,
    /// Keep only todos whose text contains this substring
    pub search: Option<String>,
    /// Maximum number of todos to return
    pub limit: Option<usize>,
    /// Number of matching todos to skip before the first returned one
    pub offset: Option<usize>,
}

#[derive(Deserialize, JsonSchema)]
pub struct SetTodoStatusInput {
    /// Content hash of the todo to update
    pub hash: String,
    /// Target status, "done" or "pending"
    pub status: TodoState,
}

fn to_mcp_error(err: TodoError) -> McpError {
    match err {
        TodoError::InvalidRecurrence(_) | TodoError::InvalidInput(_) => {
            McpError::invalid_params(err.to_string(), None)
        }
        TodoError::StoreIo { .. } => McpError::internal_error(err.to_string(), None),
    }
}

// ============================================
// Tool Implementations
// ============================================

#[tool_router]
impl TodoServer {
    #[tool(description = "Add one or more todos to the list")]
    async fn add_todo(&self, input: Parameters<AddTodoInput>) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;
        let text = engine::add_todos(store.as_ref(), &input.0.todos)
            .await
            .map_err(to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Edit existing todos, addressed by their content hash")]
    async fn edit_todo(&self, input: Parameters<EditTodoInput>) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;
        let text = engine::edit_todos(store.as_ref(), &input.0.edits)
            .await
            .map_err(to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "List todos, with optional status filter, substring search and pagination")]
    async fn list_todos(&self, input: Parameters<ListTodosInput>) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;
        let text = engine::list_todos(
            store.as_ref(),
            input.0.status.unwrap_or_default(),
            input.0.search.as_deref(),
            input.0.limit,
            input.0.offset.unwrap_or(0),
        )
        .await
        .map_err(to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Mark a todo as done or pending; completing a recurring todo creates its next occurrence")]
    async fn set_todo_status(&self, input: Parameters<SetTodoStatusInput>) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;
        let text = engine::set_todo_status(store.as_ref(), &input.0.hash, input.0.status)
            .await
            .map_err(to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

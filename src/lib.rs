// Plain-text todo list engine with an MCP tool surface
//
// The domain core (models, storage, engine) is transport-agnostic; the mcp
// module and the binary wire it to a streamable-HTTP MCP server. A terminal
// UI can consume the same engine through the TodoStore contract.

pub mod engine;
pub mod error;
pub mod mcp;
pub mod models;
pub mod storage;

pub use error::TodoError;

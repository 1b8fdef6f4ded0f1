// MCP surface for the todo engine

pub mod tools;

pub use tools::TodoServer;

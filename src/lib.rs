//! MCP server for AFFiNE.
//!
//! Exposes workspace, document, comment, history and blob operations of an
//! AFFiNE instance as MCP tools and `affine://` resources over JSON-RPC 2.0
//! stdio transport. Every call maps to a fixed GraphQL query or mutation
//! against the configured AFFiNE endpoint.

pub mod bridge;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod protocol;
pub mod registry;
pub mod resources;
pub mod server;
pub mod upstream;

pub mod schema;

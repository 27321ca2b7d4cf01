//! The `Execute` trait for section commands.
//!
//! Commands are structs where the fields ARE the parameters. Each
//! command implements `Execute` against the context it operates on and
//! returns its result as a JSON value for the rendering boundary.

pub use async_trait::async_trait;
use serde_json::Value;

/// An executable command against a context `C`, failing with `E`.
#[async_trait]
pub trait Execute<C, E> {
    async fn execute(&self, ctx: &C) -> std::result::Result<Value, E>;
}

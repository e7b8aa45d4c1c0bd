pub mod client;
pub mod ws;

#[cfg(test)]
pub(crate) mod mock;

// Re-export commonly used types
pub use client::{JsonRpcClient, JsonRpcRequest, JsonRpcResponse, RpcError, USER_REJECTED_CODE};
pub use ws::WsTransport;

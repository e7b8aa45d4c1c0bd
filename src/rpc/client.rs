//! JSON-RPC 2.0 message types and the client seam shared by every transport

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// EIP-1193 "user rejected request".
pub const USER_REJECTED_CODE: i64 = 4001;

#[async_trait]
pub trait JsonRpcClient: Send + Sync {
    /// Send one request and wait for its result.
    async fn request(&self, method: &str, params: Value) -> Result<Value>;

    /// False once the underlying connection is gone and a new one is needed.
    fn is_alive(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn into_result(self) -> std::result::Result<Value, RpcError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == USER_REJECTED_CODE
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_user_rejection() {
            write!(f, "Request rejected in wallet: {}", self.message)
        } else {
            write!(f, "RPC error {}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for RpcError {}

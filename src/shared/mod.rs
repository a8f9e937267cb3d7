//! Shared utilities for rmcp-sensors

use rmcp::model::ErrorCode;
use rmcp::ErrorData as McpError;

/// Create an internal error
pub fn internal_error(msg: impl Into<String>) -> McpError {
    McpError::internal_error(msg.into(), None)
}

/// Reject a method the server does not serve.
///
/// Uses JSON-RPC "method not found" so callers can tell it apart from a `false` answer.
pub fn not_implemented(method: &str) -> McpError {
    McpError::new(
        ErrorCode::METHOD_NOT_FOUND,
        format!("not implemented: {}", method),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented_code() {
        let err = not_implemented("unknownOp");
        assert_eq!(err.code, ErrorCode::METHOD_NOT_FOUND);
        assert_eq!(err.message, "not implemented: unknownOp");
    }
}

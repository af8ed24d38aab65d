//! Error handling utilities for MCP server

use portcall_core::PlannerError;
use rmcp::ErrorData;

/// Convert a planner error to an MCP error.
///
/// Validation and not-found failures are reported as invalid parameters so
/// clients can correct the call; everything else is an internal error.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    if error.is_validation() || error.is_not_found() {
        ErrorData::invalid_params(text, None)
    } else {
        ErrorData::internal_error(text, None)
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_validation_errors_are_invalid_params() {
        let error = PlannerError::invalid_input("days").with_reason("negative");
        let mcp = to_mcp_error("Failed to set stay", &error);
        assert_eq!(mcp.code, ErrorCode::INVALID_PARAMS);
        assert!(mcp.message.contains("Failed to set stay"));
    }

    #[test]
    fn test_missing_plan_is_invalid_params() {
        let mcp = to_mcp_error("Failed to get plan", &PlannerError::PlanNotFound { id: 9 });
        assert_eq!(mcp.code, ErrorCode::INVALID_PARAMS);
        assert!(mcp.message.contains("Plan with ID 9 not found"));
    }
}

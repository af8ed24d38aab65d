//! One-line status messages for operations without a resource to show.

use std::fmt;

/// A success or failure line such as "Success: Registered port Nevelsk".
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{label} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Registered port Nevelsk");
        assert_eq!(success.to_string(), "Success: Registered port Nevelsk\n");

        let failure = OperationStatus::failure(format!("Plan {} not found", 9));
        assert!(failure.to_string().starts_with("Error:"));
    }
}

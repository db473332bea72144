use serde::{Deserialize, Serialize};

/// Username of the distinguished validation identity. Callers authenticated
/// under this name may patch allocation totals onto estimates the server has
/// not seen yet.
pub const VALIDATION_USERNAME: &str = "validator";

/// The authenticated caller of the current request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub username: String,
}

impl CallerIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Fallback identity when the request carries no user header.
    pub fn default_user() -> Self {
        Self::new("anonymous")
    }

    pub fn is_validation_user(&self) -> bool {
        self.username == VALIDATION_USERNAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_user_detection() {
        assert!(CallerIdentity::new(VALIDATION_USERNAME).is_validation_user());
        assert!(!CallerIdentity::new("operator").is_validation_user());
        assert!(!CallerIdentity::default_user().is_validation_user());
    }
}

use crate::model::{Id, Party};
use serde::{Deserialize, Serialize};

/// Maximum length of a release number (e.g. "RHAMG000000").
pub const RELEASE_NUMBER_MAX_LEN: usize = 16;

/// A record authorizing equipment to leave a depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub release_number: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depot: Option<Party>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Party>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ReleaseDetail>,
}

/// One line of a release, optionally billed to a customer party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Party>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
    /// ISO equipment code of the unit covered by this line (e.g. "22G1").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
}

impl Release {
    pub fn validate(&self) -> Result<(), String> {
        if self.release_number.is_empty() {
            return Err("release number is required".to_string());
        }
        if self.release_number.len() > RELEASE_NUMBER_MAX_LEN {
            return Err(format!(
                "release number must be {} characters or fewer",
                RELEASE_NUMBER_MAX_LEN
            ));
        }
        if let Some(depot) = &self.depot {
            depot.validate()?;
        }
        if let Some(recipient) = &self.recipient {
            recipient.validate()?;
        }
        for detail in &self.details {
            if let Some(customer) = &detail.customer {
                customer.validate()?;
            }
        }
        Ok(())
    }
}

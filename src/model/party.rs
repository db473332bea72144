use crate::model::Id;
use serde::{Deserialize, Serialize};

/// Maximum length of a party code (e.g. "DEHAMCMRA").
pub const PARTY_CODE_MAX_LEN: usize = 9;

/// A reusable counterparty entity (customer, depot, owner, requester,
/// recipient) identified by its code. Parties embedded in business records are
/// normalized through the party store's save-or-update so that repeated
/// references converge on one canonical stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub code: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Party {
    pub fn new(code: impl Into<Id>) -> Self {
        Self {
            code: code.into(),
            name: None,
            city: None,
            country: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.code.is_empty() {
            return Err("party code is required".to_string());
        }
        if self.code.len() > PARTY_CODE_MAX_LEN {
            return Err(format!(
                "party code must be {} characters or fewer",
                PARTY_CODE_MAX_LEN
            ));
        }
        Ok(())
    }

    /// Overlay the fields of an incoming party reference onto this stored
    /// record, keeping stored values where the incoming reference is silent.
    pub fn merge_from(&mut self, incoming: Party) {
        if incoming.name.is_some() {
            self.name = incoming.name;
        }
        if incoming.city.is_some() {
            self.city = incoming.city;
        }
        if incoming.country.is_some() {
            self.country = incoming.country;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_code_length_validation() {
        assert!(Party::new("DEHAMCMRA").validate().is_ok());
        assert!(Party::new("").validate().is_err());
        assert!(Party::new("DEHAMCMRAX").validate().is_err());
    }

    #[test]
    fn test_merge_keeps_stored_fields() {
        let mut stored = Party {
            code: "DEHAMCMRA".to_string(),
            name: Some("Hamburg Depot".to_string()),
            city: Some("Hamburg".to_string()),
            country: Some("DE".to_string()),
        };

        stored.merge_from(Party {
            code: "DEHAMCMRA".to_string(),
            name: Some("Hamburg Container Repair".to_string()),
            city: None,
            country: None,
        });

        assert_eq!(stored.name, Some("Hamburg Container Repair".to_string()));
        assert_eq!(stored.city, Some("Hamburg".to_string()));
        assert_eq!(stored.country, Some("DE".to_string()));
    }

    #[test]
    fn test_party_omits_empty_fields_on_the_wire() {
        let json = serde_json::to_string(&Party::new("DEHAMCMRA")).unwrap();
        assert_eq!(json, r#"{"code":"DEHAMCMRA"}"#);
    }
}

use crate::model::{Id, Party};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of an estimate number (e.g. "DEHAMCE1856373").
pub const ESTIMATE_NUMBER_MAX_LEN: usize = 16;

/// Party role codes used to break an estimate's cost down by responsibility.
pub const ROLE_OWNER: &str = "O";
pub const ROLE_INSURANCE: &str = "I";
pub const ROLE_CUSTOMER: &str = "U";

/// Preliminary recommendation code for a repairable unit.
pub const RECOMMENDATION_REPAIR: &str = "FIX";

/// A damage/repair cost assessment for a shipping container. An estimate's
/// identity is the (estimateNumber, revision) pair, not the number alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub estimate_number: Id,
    #[serde(default)]
    pub revision: i32,
    /// Unit number of the shipping container at estimate creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<String>,
    /// ISO equipment code of the shipping container (e.g. "22G1").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depot: Option<Party>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<Party>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Party>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Party>,
    #[serde(default)]
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<EstimateLineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation: Option<EstimateAllocation>,
}

/// One repair line of an estimate, billed to a party role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateLineItem {
    /// Role code of the party responsible for this line ("O" owner,
    /// "I" insurance, "U" customer/user).
    pub party: String,
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Estimate {
    /// Sum of line-item totals billed to the given party role code.
    pub fn party_total(&self, role: &str) -> f64 {
        self.line_items
            .iter()
            .filter(|item| item.party == role)
            .map(|item| item.total)
            .sum()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.estimate_number.is_empty() {
            return Err("estimate number is required".to_string());
        }
        if self.estimate_number.len() > ESTIMATE_NUMBER_MAX_LEN {
            return Err(format!(
                "estimate number must be {} characters or fewer",
                ESTIMATE_NUMBER_MAX_LEN
            ));
        }
        if self.revision < 0 {
            return Err("estimate revision must not be negative".to_string());
        }
        for party in [&self.depot, &self.requester, &self.owner, &self.customer]
            .into_iter()
            .flatten()
        {
            party.validate()?;
        }
        if let Some(allocation) = &self.allocation {
            allocation.validate()?;
        }
        Ok(())
    }
}

/// The cost breakdown and preliminary repair/scrap decision for one estimate
/// revision. Persisted as its own record; the id is assigned on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateAllocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub estimate_number: Id,
    #[serde(default)]
    pub revision: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depot: Option<Party>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub owner_total: f64,
    #[serde(default)]
    pub insurance_total: f64,
    #[serde(default)]
    pub customer_total: f64,
    /// Constructive total loss flag.
    #[serde(default)]
    pub ctl: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preliminary_decision: Option<PreliminaryDecision>,
}

impl EstimateAllocation {
    pub fn validate(&self) -> Result<(), String> {
        if self.estimate_number.is_empty() {
            return Err("estimate number is required".to_string());
        }
        if self.estimate_number.len() > ESTIMATE_NUMBER_MAX_LEN {
            return Err(format!(
                "estimate number must be {} characters or fewer",
                ESTIMATE_NUMBER_MAX_LEN
            ));
        }
        if let Some(depot) = &self.depot {
            depot.validate()?;
        }
        Ok(())
    }
}

/// Preliminary repair/scrap recommendation embedded in an allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreliminaryDecision {
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Customer approval of an estimate revision without revising it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateCustomerApproval {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

//! Data Model: evidence items, versions, and buyer requests
//!
//! Wire JSON is camelCase to match the API contract; calendar fields are
//! plain dates (`YYYY-MM-DD`), there are no timestamps in this domain.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AccessError;

/// Fixed enumeration of compliance document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    Insurance,
    License,
    Audit,
    Certification,
}

/// Review status of an evidence item. Appending a version resets the
/// item to `Pending` until it is re-reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceStatus {
    Valid,
    Pending,
    Rejected,
    Expired,
}

/// One immutable uploaded revision of an evidence item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceVersion {
    /// Derived from the parent item id and the label (`ev_001_v2`).
    pub id: String,
    /// Monotonic label: `v1`, `v2`, ...
    pub version_label: String,
    pub uploaded_at: NaiveDate,
    pub uploader: String,
    pub notes: String,
    pub file_size_bytes: u64,
    /// May differ from the item's expiry at upload time; becomes the
    /// item's current expiry once added.
    pub expiry_date: NaiveDate,
}

/// A compliance document tracked by a factory, with its version history
/// newest first. `versions` is never empty once the item exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceItem {
    pub id: String,
    pub doc_name: String,
    pub doc_type: DocType,
    pub status: EvidenceStatus,
    /// Mirrors the most recently added version.
    pub expiry_date: NaiveDate,
    /// Mirrors the most recently added version's upload date.
    pub last_updated: NaiveDate,
    pub versions: Vec<EvidenceVersion>,
}

impl EvidenceItem {
    /// Looks up a version by id within this item.
    pub fn version(&self, version_id: &str) -> Option<&EvidenceVersion> {
        self.versions.iter().find(|v| v.id == version_id)
    }
}

/// One requested document line on a buyer request.
///
/// The three fulfillment fields are set together by a successful
/// fulfillment and are never cleared afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerRequestItem {
    pub id: String,
    pub doc_type: DocType,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfilled_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfilled_evidence_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfilled_version_id: Option<String>,
}

impl BuyerRequestItem {
    /// Derived status of this line relative to `today`; never stored.
    pub fn status(&self, today: NaiveDate) -> RequestStatus {
        compute_request_status(self.due_date, self.fulfilled_at, today)
    }
}

/// A buyer's request for documents from one factory. The two org ids are
/// fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerRequest {
    pub id: String,
    pub buyer_org_id: String,
    pub factory_org_id: String,
    pub created_at: NaiveDate,
    pub items: Vec<BuyerRequestItem>,
}

impl BuyerRequest {
    /// Looks up a line item by id within this request.
    pub fn item(&self, item_id: &str) -> Option<&BuyerRequestItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}

/// Derived status of a request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Open,
    Fulfilled,
    Overdue,
}

/// `fulfilled` once a fulfillment date exists, else `overdue` when the
/// due date has passed, else `open`.
pub fn compute_request_status(
    due_date: NaiveDate,
    fulfilled_at: Option<NaiveDate>,
    today: NaiveDate,
) -> RequestStatus {
    if fulfilled_at.is_some() {
        return RequestStatus::Fulfilled;
    }
    if due_date < today {
        RequestStatus::Overdue
    } else {
        RequestStatus::Open
    }
}

/// Acting party type carried in the trusted auth headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Factory,
    Buyer,
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "factory" => Ok(Role::Factory),
            "buyer" => Ok(Role::Buyer),
            _ => Err(AccessError::InvalidRole),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Factory => write!(f, "factory"),
            Role::Buyer => write!(f, "buyer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_status_fulfilled_wins_over_due_date() {
        let status = compute_request_status(d(2026, 1, 1), Some(d(2026, 1, 2)), d(2026, 1, 10));
        assert_eq!(status, RequestStatus::Fulfilled);
    }

    #[test]
    fn test_status_overdue_when_due_date_passed() {
        let status = compute_request_status(d(2026, 1, 1), None, d(2026, 1, 10));
        assert_eq!(status, RequestStatus::Overdue);
    }

    #[test]
    fn test_status_open_before_due_date() {
        let status = compute_request_status(d(2026, 2, 1), None, d(2026, 1, 10));
        assert_eq!(status, RequestStatus::Open);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("factory".parse::<Role>(), Ok(Role::Factory));
        assert_eq!("buyer".parse::<Role>(), Ok(Role::Buyer));
        assert!("admin".parse::<Role>().is_err());
        assert!("Factory".parse::<Role>().is_err());
    }

    #[test]
    fn test_version_serializes_camel_case() {
        let version = EvidenceVersion {
            id: "ev_001_v1".to_string(),
            version_label: "v1".to_string(),
            uploaded_at: d(2026, 1, 1),
            uploader: "Factory User".to_string(),
            notes: "Initial upload".to_string(),
            file_size_bytes: 250_000,
            expiry_date: d(2026, 12, 1),
        };

        let json = serde_json::to_value(&version).unwrap();
        assert_eq!(json["versionLabel"], "v1");
        assert_eq!(json["fileSizeBytes"], 250_000);
        assert_eq!(json["expiryDate"], "2026-12-01");
    }

    #[test]
    fn test_unfulfilled_item_omits_fulfillment_fields() {
        let item = BuyerRequestItem {
            id: "item_1".to_string(),
            doc_type: DocType::Insurance,
            due_date: d(2026, 2, 1),
            fulfilled_at: None,
            fulfilled_evidence_id: None,
            fulfilled_version_id: None,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("fulfilledAt").is_none());
        assert_eq!(json["docType"], "Insurance");
    }
}

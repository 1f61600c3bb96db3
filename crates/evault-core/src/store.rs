//! In-memory evidence/request store and the fulfillment workflow.
//!
//! One store instance is created per process and handed to collaborators
//! by reference; there is no module-level singleton. All mutations are
//! short synchronous operations with no suspension points, so a single
//! lock around the store is enough to serialize fulfillment.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::data_model::{
    BuyerRequest, BuyerRequestItem, DocType, EvidenceItem, EvidenceStatus, EvidenceVersion,
};
use crate::error::{FulfillError, StoreError};
use crate::ids::{Clock, IdSource, SystemClock, UuidIdSource};
use crate::versioning::next_version_label;

/// One document ask on a request being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestItemInput {
    pub doc_type: DocType,
    pub due_date: NaiveDate,
}

/// Validated fulfillment command: which line of which request the acting
/// factory is answering, and with what evidence version.
#[derive(Debug, Clone)]
pub struct FulfillCommand {
    pub request_id: String,
    pub item_id: String,
    pub factory_org_id: String,
    pub evidence_id: String,
    pub version_id: String,
}

/// Snapshot returned by a successful fulfillment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillOutcome {
    pub request: BuyerRequest,
    pub item: BuyerRequestItem,
}

/// Payload for appending a version to an existing item. The store
/// assigns the label, id, and upload date.
#[derive(Debug, Clone)]
pub struct NewVersion {
    pub uploader: String,
    pub notes: String,
    pub file_size_bytes: u64,
    pub expiry_date: NaiveDate,
}

/// Payload for creating an evidence item with its initial `v1` version.
#[derive(Debug, Clone)]
pub struct NewEvidence {
    pub doc_name: String,
    pub doc_type: DocType,
    pub expiry_date: NaiveDate,
    pub uploader: String,
    pub notes: String,
    pub file_size_bytes: u64,
}

/// The process-lifetime state store: evidence items, buyer requests, and
/// the disclosure ledger mapping buyer orgs to the version ids they may
/// see. The ledger holds ids only, never copies of version data.
pub struct EvidenceStore {
    evidence: Vec<EvidenceItem>,
    requests: Vec<BuyerRequest>,
    disclosed: HashMap<String, HashSet<String>>,
    ids: Box<dyn IdSource>,
    clock: Box<dyn Clock>,
}

impl EvidenceStore {
    /// Store seeded with the canonical evidence fixtures.
    pub fn new() -> Self {
        Self::with_evidence(seed_evidence())
    }

    /// Store with caller-supplied initial evidence and production id and
    /// clock sources.
    pub fn with_evidence(evidence: Vec<EvidenceItem>) -> Self {
        Self::with_sources(evidence, Box::new(UuidIdSource), Box::new(SystemClock))
    }

    /// Full injection point; tests pass deterministic sources here.
    pub fn with_sources(
        evidence: Vec<EvidenceItem>,
        ids: Box<dyn IdSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            evidence,
            requests: Vec::new(),
            disclosed: HashMap::new(),
            ids,
            clock,
        }
    }

    /// All evidence items, unfiltered; visibility is the access
    /// gateway's concern.
    pub fn evidence(&self) -> &[EvidenceItem] {
        &self.evidence
    }

    pub fn evidence_by_id(&self, evidence_id: &str) -> Option<&EvidenceItem> {
        self.evidence.iter().find(|e| e.id == evidence_id)
    }

    pub fn request_by_id(&self, request_id: &str) -> Option<&BuyerRequest> {
        self.requests.iter().find(|r| r.id == request_id)
    }

    /// Creates a buyer request with fresh ids for the request and every
    /// line, items kept in input order, newest request first.
    pub fn create_request(
        &mut self,
        buyer_org_id: &str,
        factory_org_id: &str,
        items: Vec<RequestItemInput>,
    ) -> Result<BuyerRequest, StoreError> {
        if items.is_empty() {
            return Err(StoreError::InvalidInput(
                "items must be a non-empty array".to_string(),
            ));
        }

        let request = BuyerRequest {
            id: self.ids.next("req"),
            buyer_org_id: buyer_org_id.to_string(),
            factory_org_id: factory_org_id.to_string(),
            created_at: self.clock.today(),
            items: items
                .into_iter()
                .map(|it| BuyerRequestItem {
                    id: self.ids.next("item"),
                    doc_type: it.doc_type,
                    due_date: it.due_date,
                    fulfilled_at: None,
                    fulfilled_evidence_id: None,
                    fulfilled_version_id: None,
                })
                .collect(),
        };
        self.requests.insert(0, request.clone());
        Ok(request)
    }

    /// The fulfillment workflow. Checks run in a fixed order and the
    /// first failure wins: request, acting factory, item, evidence,
    /// version. On success the item's fulfillment fields are set and the
    /// version id is added to the buyer org's disclosure set.
    ///
    /// Re-fulfilling an already-fulfilled line is allowed: the fields
    /// are overwritten and the ledger accumulates both grants.
    pub fn fulfill_request_item(
        &mut self,
        cmd: &FulfillCommand,
    ) -> Result<FulfillOutcome, FulfillError> {
        let request_idx = self
            .requests
            .iter()
            .position(|r| r.id == cmd.request_id)
            .ok_or(FulfillError::RequestNotFound)?;

        if self.requests[request_idx].factory_org_id != cmd.factory_org_id {
            return Err(FulfillError::ForbiddenFactory);
        }

        let item_idx = self.requests[request_idx]
            .items
            .iter()
            .position(|i| i.id == cmd.item_id)
            .ok_or(FulfillError::ItemNotFound)?;

        let evidence = self
            .evidence_by_id(&cmd.evidence_id)
            .ok_or(FulfillError::EvidenceNotFound)?;
        let version = evidence
            .version(&cmd.version_id)
            .ok_or(FulfillError::VersionNotFound)?;

        let evidence_id = evidence.id.clone();
        let version_id = version.id.clone();
        let today = self.clock.today();

        let request = &mut self.requests[request_idx];
        let item = &mut request.items[item_idx];
        item.fulfilled_at = Some(today);
        item.fulfilled_evidence_id = Some(evidence_id);
        item.fulfilled_version_id = Some(version_id.clone());

        self.disclosed
            .entry(request.buyer_org_id.clone())
            .or_default()
            .insert(version_id);

        Ok(FulfillOutcome {
            item: request.items[item_idx].clone(),
            request: request.clone(),
        })
    }

    /// Version ids disclosed to a buyer org; empty for orgs that never
    /// had a request fulfilled.
    pub fn buyer_allowed_version_ids(&self, buyer_org_id: &str) -> HashSet<String> {
        self.disclosed.get(buyer_org_id).cloned().unwrap_or_default()
    }

    /// Appends a version to an existing item. The label continues the
    /// `v1`, `v2`, ... sequence, the new version lands first in the
    /// history, and the item's expiry and last-updated dates follow it.
    /// The item goes back to `pending` review.
    pub fn add_version(
        &mut self,
        evidence_id: &str,
        input: NewVersion,
    ) -> Result<EvidenceVersion, StoreError> {
        let today = self.clock.today();
        let item = self
            .evidence
            .iter_mut()
            .find(|e| e.id == evidence_id)
            .ok_or(StoreError::EvidenceNotFound)?;

        let label = next_version_label(&item.versions);
        let version = EvidenceVersion {
            id: format!("{}_{}", evidence_id, label),
            version_label: label,
            uploaded_at: today,
            uploader: input.uploader,
            notes: input.notes,
            file_size_bytes: input.file_size_bytes,
            expiry_date: input.expiry_date,
        };

        item.versions.insert(0, version.clone());
        item.expiry_date = version.expiry_date;
        item.last_updated = version.uploaded_at;
        item.status = EvidenceStatus::Pending;
        Ok(version)
    }

    /// Creates an evidence item with its initial `v1` version, pending
    /// review, newest item first.
    pub fn create_evidence(&mut self, input: NewEvidence) -> EvidenceItem {
        let id = self.ids.next("ev");
        let today = self.clock.today();

        let v1 = EvidenceVersion {
            id: format!("{}_v1", id),
            version_label: "v1".to_string(),
            uploaded_at: today,
            uploader: input.uploader,
            notes: input.notes,
            file_size_bytes: input.file_size_bytes,
            expiry_date: input.expiry_date,
        };
        let item = EvidenceItem {
            id,
            doc_name: input.doc_name,
            doc_type: input.doc_type,
            status: EvidenceStatus::Pending,
            expiry_date: input.expiry_date,
            last_updated: today,
            versions: vec![v1],
        };
        self.evidence.insert(0, item.clone());
        item
    }
}

impl Default for EvidenceStore {
    fn default() -> Self {
        Self::new()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("seed dates are valid")
}

/// The two canonical evidence items a fresh store starts with.
pub fn seed_evidence() -> Vec<EvidenceItem> {
    vec![
        EvidenceItem {
            id: "ev_001".to_string(),
            doc_name: "Factory Insurance Certificate".to_string(),
            doc_type: DocType::Insurance,
            status: EvidenceStatus::Valid,
            expiry_date: date(2026, 12, 1),
            last_updated: date(2026, 1, 1),
            versions: vec![EvidenceVersion {
                id: "ev_001_v1".to_string(),
                version_label: "v1".to_string(),
                uploaded_at: date(2026, 1, 1),
                uploader: "Factory User".to_string(),
                notes: "Initial upload".to_string(),
                file_size_bytes: 250_000,
                expiry_date: date(2026, 12, 1),
            }],
        },
        EvidenceItem {
            id: "ev_002".to_string(),
            doc_name: "Business License".to_string(),
            doc_type: DocType::License,
            status: EvidenceStatus::Pending,
            expiry_date: date(2026, 6, 15),
            last_updated: date(2026, 1, 2),
            versions: vec![EvidenceVersion {
                id: "ev_002_v1".to_string(),
                version_label: "v1".to_string(),
                uploaded_at: date(2026, 1, 2),
                uploader: "Factory User".to_string(),
                notes: "Submitted for review".to_string(),
                file_size_bytes: 180_000,
                expiry_date: date(2026, 6, 15),
            }],
        },
    ]
}

//! Evault Core: evidence store, request workflow, and access gateway
//!
//! A factory uploads versioned compliance evidence; a buyer requests
//! documents and the factory fulfills each request line by linking one
//! evidence version. Fulfillment is the only path that discloses a
//! version to the requesting buyer.

pub mod access;
pub mod data_model;
pub mod error;
pub mod ids;
pub mod store;
pub mod versioning;

pub use access::{evidence_for, request_for};
pub use data_model::{
    compute_request_status, BuyerRequest, BuyerRequestItem, DocType, EvidenceItem,
    EvidenceStatus, EvidenceVersion, RequestStatus, Role,
};
pub use error::{AccessError, FulfillError, StoreError};
pub use ids::{Clock, FixedClock, IdSource, SequentialIdSource, SystemClock, UuidIdSource};
pub use store::{
    seed_evidence, EvidenceStore, FulfillCommand, FulfillOutcome, NewEvidence, NewVersion,
    RequestItemInput,
};
pub use versioning::next_version_label;

/// Version of the evault engine
pub const EVAULT_VERSION: &str = "0.1.0";

//! Error kinds for store mutations, fulfillment, and access decisions.
//!
//! Every expected failure is a typed variant; the HTTP boundary maps
//! kinds to status codes, the core never panics for expected conditions.

use thiserror::Error;

/// Failures from store mutations outside the fulfillment workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The caller supplied a structurally invalid command.
    #[error("{0}")]
    InvalidInput(String),

    /// The targeted evidence item does not exist.
    #[error("evidence_not_found")]
    EvidenceNotFound,
}

/// Failures from the fulfillment workflow, listed in validation order.
///
/// The first failing check wins: request existence, then the acting
/// factory, then item, evidence, and version existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FulfillError {
    #[error("not_found")]
    RequestNotFound,

    /// The request is addressed to a different factory organization.
    #[error("forbidden_factory")]
    ForbiddenFactory,

    #[error("item_not_found")]
    ItemNotFound,

    #[error("evidence_not_found")]
    EvidenceNotFound,

    #[error("version_not_found")]
    VersionNotFound,
}

/// Access gateway decisions for role-scoped reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The id does not resolve to anything.
    #[error("not found")]
    NotFound,

    /// The entity exists but nothing is visible to the caller.
    #[error("forbidden")]
    Forbidden,

    /// The claimed role is neither `factory` nor `buyer`.
    #[error("invalid role")]
    InvalidRole,
}

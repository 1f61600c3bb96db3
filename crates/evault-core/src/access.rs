//! Access gateway: role-scoped visibility over the store.
//!
//! Pure reads over current store state plus the caller's claimed
//! identity. Factories see their own data in full; buyers see only the
//! evidence versions disclosed to their org through fulfillment.
//!
//! Existence is checked before the role, so an unknown id reports
//! `NotFound` even when the claimed role is garbage.

use crate::data_model::{BuyerRequest, EvidenceItem, Role};
use crate::error::AccessError;
use crate::store::EvidenceStore;

/// Role-scoped view of one evidence item.
///
/// A factory gets the full item. A buyer gets a copy whose `versions`
/// are narrowed to the disclosed subset; when that subset is empty the
/// whole item is `Forbidden` — it exists, but nothing is shared.
pub fn evidence_for(
    store: &EvidenceStore,
    role: &str,
    org_id: &str,
    evidence_id: &str,
) -> Result<EvidenceItem, AccessError> {
    let item = store.evidence_by_id(evidence_id).ok_or(AccessError::NotFound)?;

    match role.parse::<Role>()? {
        Role::Factory => Ok(item.clone()),
        Role::Buyer => {
            let allowed = store.buyer_allowed_version_ids(org_id);
            let versions: Vec<_> = item
                .versions
                .iter()
                .filter(|v| allowed.contains(&v.id))
                .cloned()
                .collect();
            if versions.is_empty() {
                return Err(AccessError::Forbidden);
            }
            Ok(EvidenceItem {
                versions,
                ..item.clone()
            })
        }
    }
}

/// Role-scoped view of one request: all-or-nothing, the acting org must
/// be the request's buyer or factory side depending on the claimed role.
pub fn request_for<'a>(
    store: &'a EvidenceStore,
    role: &str,
    org_id: &str,
    request_id: &str,
) -> Result<&'a BuyerRequest, AccessError> {
    let request = store.request_by_id(request_id).ok_or(AccessError::NotFound)?;

    let owning_org = match role.parse::<Role>()? {
        Role::Buyer => &request.buyer_org_id,
        Role::Factory => &request.factory_org_id,
    };
    if owning_org != org_id {
        return Err(AccessError::Forbidden);
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_model::DocType;
    use crate::ids::{FixedClock, SequentialIdSource};
    use crate::store::{seed_evidence, FulfillCommand, NewVersion, RequestItemInput};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn test_store() -> EvidenceStore {
        EvidenceStore::with_sources(
            seed_evidence(),
            Box::new(SequentialIdSource::default()),
            Box::new(FixedClock(d(2026, 1, 10))),
        )
    }

    /// Creates a request for buyer_1 against factory_1 and fulfills it
    /// with ev_001 v1.
    fn store_with_disclosure() -> EvidenceStore {
        let mut store = test_store();
        let request = store
            .create_request(
                "buyer_1",
                "factory_1",
                vec![RequestItemInput {
                    doc_type: DocType::Insurance,
                    due_date: d(2026, 2, 1),
                }],
            )
            .unwrap();
        store
            .fulfill_request_item(&FulfillCommand {
                request_id: request.id.clone(),
                item_id: request.items[0].id.clone(),
                factory_org_id: "factory_1".to_string(),
                evidence_id: "ev_001".to_string(),
                version_id: "ev_001_v1".to_string(),
            })
            .unwrap();
        store
    }

    #[test]
    fn test_factory_sees_full_history() {
        let mut store = test_store();
        store
            .add_version(
                "ev_001",
                NewVersion {
                    uploader: "Imran".to_string(),
                    notes: "Endorsement page".to_string(),
                    file_size_bytes: 310_044,
                    expiry_date: d(2026, 12, 1),
                },
            )
            .unwrap();

        let item = evidence_for(&store, "factory", "factory_1", "ev_001").unwrap();
        assert_eq!(item.versions.len(), 2);
    }

    #[test]
    fn test_buyer_without_disclosure_is_forbidden() {
        let store = test_store();
        assert_eq!(
            evidence_for(&store, "buyer", "buyer_1", "ev_001"),
            Err(AccessError::Forbidden)
        );
    }

    #[test]
    fn test_buyer_sees_only_disclosed_versions() {
        let mut store = store_with_disclosure();
        // A second version the buyer was never granted.
        store
            .add_version(
                "ev_001",
                NewVersion {
                    uploader: "Ayesha".to_string(),
                    notes: "Renewal".to_string(),
                    file_size_bytes: 342_120,
                    expiry_date: d(2027, 6, 30),
                },
            )
            .unwrap();

        let item = evidence_for(&store, "buyer", "buyer_1", "ev_001").unwrap();
        assert_eq!(item.versions.len(), 1);
        assert_eq!(item.versions[0].id, "ev_001_v1");

        // The store itself keeps the full history.
        assert_eq!(store.evidence_by_id("ev_001").unwrap().versions.len(), 2);
    }

    #[test]
    fn test_unknown_evidence_wins_over_bad_role() {
        let store = test_store();
        assert_eq!(
            evidence_for(&store, "admin", "org_1", "ev_missing"),
            Err(AccessError::NotFound)
        );
        assert_eq!(
            evidence_for(&store, "admin", "org_1", "ev_001"),
            Err(AccessError::InvalidRole)
        );
    }

    #[test]
    fn test_request_visibility_requires_org_match() {
        let store = store_with_disclosure();
        let request_id = store.request_by_id("req_1").map(|r| r.id.clone()).unwrap();

        assert!(request_for(&store, "buyer", "buyer_1", &request_id).is_ok());
        assert!(request_for(&store, "factory", "factory_1", &request_id).is_ok());
        assert_eq!(
            request_for(&store, "buyer", "buyer_2", &request_id),
            Err(AccessError::Forbidden)
        );
        assert_eq!(
            request_for(&store, "factory", "factory_2", &request_id),
            Err(AccessError::Forbidden)
        );
        assert_eq!(
            request_for(&store, "auditor", "buyer_1", &request_id),
            Err(AccessError::InvalidRole)
        );
        assert_eq!(
            request_for(&store, "buyer", "buyer_1", "req_missing"),
            Err(AccessError::NotFound)
        );
    }
}

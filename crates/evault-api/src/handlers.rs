//! API Handlers
//!
//! Thin boundary over the core: extract the auth context, validate the
//! body into a typed command, call the store or access gateway, and map
//! failure kinds to status codes. No domain rules live here.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use evault_core::access;
use evault_core::data_model::DocType;
use evault_core::error::{AccessError, FulfillError, StoreError};
use evault_core::store::{FulfillCommand, RequestItemInput};
use evault_core::EVAULT_VERSION;

use crate::auth::{self, ORG_HEADER, ROLE_HEADER};
use crate::AppState;

fn fail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn bad(message: impl Into<String>) -> Response {
    fail(StatusCode::BAD_REQUEST, message)
}

pub async fn health() -> Response {
    Json(json!({ "status": "ok", "version": EVAULT_VERSION })).into_response()
}

/// GET /api/evidence/:evidence_id — role-scoped read of one item.
pub async fn get_evidence(
    State(state): State<AppState>,
    Path(evidence_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let ctx = match auth::auth_context(&headers) {
        Ok(ctx) => ctx,
        Err(message) => return bad(message),
    };

    let store = state.store();
    match access::evidence_for(&store, &ctx.role, &ctx.org_id, &evidence_id) {
        Ok(evidence) => Json(json!({ "evidence": evidence })).into_response(),
        Err(AccessError::NotFound) => fail(StatusCode::NOT_FOUND, "Evidence not found"),
        Err(AccessError::Forbidden) => fail(
            StatusCode::FORBIDDEN,
            "Forbidden: no shared versions for this buyer",
        ),
        Err(AccessError::InvalidRole) => bad("Invalid role"),
    }
}

/// GET /api/requests/:request_id — visible only to the request's own
/// buyer or factory org.
pub async fn get_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let ctx = match auth::auth_context(&headers) {
        Ok(ctx) => ctx,
        Err(message) => return bad(message),
    };

    let store = state.store();
    match access::request_for(&store, &ctx.role, &ctx.org_id, &request_id) {
        Ok(request) => Json(json!({ "request": request })).into_response(),
        Err(AccessError::NotFound) => fail(StatusCode::NOT_FOUND, "Request not found"),
        Err(AccessError::Forbidden) => fail(StatusCode::FORBIDDEN, "Forbidden"),
        Err(AccessError::InvalidRole) => bad("Invalid role"),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequestBody {
    factory_org_id: Option<String>,
    items: Option<Vec<CreateRequestItemBody>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequestItemBody {
    doc_type: Option<DocType>,
    due_date: Option<NaiveDate>,
}

/// POST /api/requests — buyer-only creation of a document request.
pub async fn create_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if auth::header_str(&headers, ROLE_HEADER) != Some("buyer") {
        return fail(StatusCode::FORBIDDEN, "Only buyer can create requests");
    }
    let Some(buyer_org_id) = auth::header_str(&headers, ORG_HEADER) else {
        return bad("Missing x-org-id header");
    };

    let Ok(body) = serde_json::from_str::<CreateRequestBody>(&body) else {
        return bad("Invalid JSON");
    };

    let factory_org_id = body.factory_org_id.unwrap_or_default();
    if factory_org_id.is_empty() {
        return bad("factoryOrgId is required");
    }
    let items = body.items.unwrap_or_default();
    if items.is_empty() {
        return bad("items must be a non-empty array");
    }

    let mut normalized = Vec::with_capacity(items.len());
    for item in items {
        let Some(doc_type) = item.doc_type else {
            return bad("Each item.docType is required");
        };
        let Some(due_date) = item.due_date else {
            return bad("Each item.dueDate is required");
        };
        normalized.push(RequestItemInput { doc_type, due_date });
    }

    let created = match state
        .store()
        .create_request(buyer_org_id, &factory_org_id, normalized)
    {
        Ok(request) => request,
        Err(StoreError::InvalidInput(message)) => return bad(message),
        Err(err) => return bad(err.to_string()),
    };

    tracing::info!(request_id = %created.id, buyer_org = %buyer_org_id, "request created");
    (StatusCode::CREATED, Json(json!({ "request": created }))).into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FulfillBody {
    evidence_id: Option<String>,
    version_id: Option<String>,
}

/// POST /api/requests/:request_id/items/:item_id/fulfill — factory-only
/// link of one evidence version to a request line.
pub async fn fulfill_item(
    State(state): State<AppState>,
    Path((request_id, item_id)): Path<(String, String)>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if auth::header_str(&headers, ROLE_HEADER) != Some("factory") {
        return fail(StatusCode::FORBIDDEN, "Only factory can fulfill");
    }
    let Some(factory_org_id) = auth::header_str(&headers, ORG_HEADER) else {
        return bad("Missing x-org-id header");
    };

    let Ok(body) = serde_json::from_str::<FulfillBody>(&body) else {
        return bad("Invalid JSON");
    };
    let evidence_id = body.evidence_id.unwrap_or_default();
    if evidence_id.is_empty() {
        return bad("evidenceId is required");
    }
    let version_id = body.version_id.unwrap_or_default();
    if version_id.is_empty() {
        return bad("versionId is required");
    }

    let cmd = FulfillCommand {
        request_id,
        item_id,
        factory_org_id: factory_org_id.to_string(),
        evidence_id,
        version_id,
    };

    let outcome = match state.store().fulfill_request_item(&cmd) {
        Ok(outcome) => outcome,
        Err(err) => {
            let status = match err {
                FulfillError::ForbiddenFactory => StatusCode::FORBIDDEN,
                _ => StatusCode::NOT_FOUND,
            };
            return fail(status, err.to_string());
        }
    };

    tracing::info!(
        request_id = %outcome.request.id,
        version_id = ?outcome.item.fulfilled_version_id,
        "request item fulfilled"
    );
    Json(json!({
        "request": outcome.request,
        "item": outcome.item,
        "sharedVersionId": outcome.item.fulfilled_version_id,
    }))
    .into_response()
}

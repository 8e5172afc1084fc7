//! Axum route handlers for the Document API.

use axum::{extract::State, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::clauses::DocumentType;
use crate::document::format::format_currency;
use crate::document::installment::derive_installment;
use crate::document::viewport::{MAX_ZOOM, MIN_ZOOM};
use crate::document::{render_bundle, render_document, RenderEnv, RenderedDocument};
use crate::errors::AppError;
use crate::models::record::{ClientRecord, PaymentMethod, RecordKind};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DocumentTypeInfo {
    pub document_type: DocumentType,
    pub title: &'static str,
    pub label: &'static str,
    pub record_kind: RecordKind,
    pub has_financial_table: bool,
}

#[derive(Debug, Serialize)]
pub struct DocumentTypesResponse {
    pub document_types: Vec<DocumentTypeInfo>,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub document_type: DocumentType,
    pub record: ClientRecord,
    pub viewport_width: f32,
    pub zoom: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct BundleRequest {
    pub record: ClientRecord,
    pub viewport_width: f32,
    pub zoom: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct BundleResponse {
    pub documents: Vec<RenderedDocument>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub total_value: String,
    #[serde(default)]
    pub down_payment: String,
    #[serde(default)]
    pub installment_count: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub base: Option<f64>,
    /// pt-BR display form, `null` when the derivation guard fails.
    pub installment_amount: Option<String>,
    /// `R$`-prefixed form, or the placeholder.
    pub installment_display: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/documents/types
pub async fn handle_list_types() -> Json<DocumentTypesResponse> {
    let document_types = DocumentType::ALL
        .iter()
        .map(|&doc_type| DocumentTypeInfo {
            document_type: doc_type,
            title: doc_type.title(),
            label: doc_type.label(),
            record_kind: doc_type.record_kind(),
            has_financial_table: doc_type.has_financial_table(),
        })
        .collect();

    Json(DocumentTypesResponse { document_types })
}

/// POST /api/v1/documents/render
///
/// Derives the installment, builds the blocks and paginates one document.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderedDocument>, AppError> {
    let zoom = validate_viewport(request.viewport_width, request.zoom)?;

    let kind = request.record.kind();
    if !request.document_type.accepts(kind) {
        return Err(AppError::UnprocessableEntity(format!(
            "{:?} requires a {:?} record, got {:?}",
            request.document_type,
            request.document_type.record_kind(),
            kind
        )));
    }

    let env = RenderEnv {
        profile: &state.profile,
        office: &state.office,
        today: Local::now().date_naive(),
        viewport_width: request.viewport_width,
        zoom,
    };

    Ok(Json(render_document(
        Uuid::new_v4(),
        request.document_type,
        &request.record,
        &env,
    )))
}

/// POST /api/v1/documents/bundle
///
/// Renders every document belonging to the record's kind, in print order.
pub async fn handle_render_bundle(
    State(state): State<AppState>,
    Json(request): Json<BundleRequest>,
) -> Result<Json<BundleResponse>, AppError> {
    let zoom = validate_viewport(request.viewport_width, request.zoom)?;

    let env = RenderEnv {
        profile: &state.profile,
        office: &state.office,
        today: Local::now().date_naive(),
        viewport_width: request.viewport_width,
        zoom,
    };

    let documents = render_bundle(&request.record, &env, Uuid::new_v4);
    Ok(Json(BundleResponse { documents }))
}

/// POST /api/v1/installments/quote
pub async fn handle_quote(Json(request): Json<QuoteRequest>) -> Json<QuoteResponse> {
    let quote = derive_installment(
        &request.total_value,
        &request.down_payment,
        &request.installment_count,
        request.payment_method,
    );

    let installment_display = format_currency(
        quote
            .as_ref()
            .map(|q| q.formatted_amount.as_str())
            .unwrap_or_default(),
    );

    Json(QuoteResponse {
        base: quote.as_ref().map(|q| q.base),
        installment_amount: quote.map(|q| q.formatted_amount),
        installment_display,
    })
}

/// Checks the viewport snapshot and returns the effective zoom (default 100%).
fn validate_viewport(viewport_width: f32, zoom: Option<f32>) -> Result<f32, AppError> {
    if !viewport_width.is_finite() || viewport_width <= 0.0 {
        return Err(AppError::Validation(
            "viewport_width must be a positive number".to_string(),
        ));
    }

    let zoom = zoom.unwrap_or(100.0);
    if !zoom.is_finite() || !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(AppError::Validation(format!(
            "zoom must be between {MIN_ZOOM} and {MAX_ZOOM}"
        )));
    }

    Ok(zoom)
}

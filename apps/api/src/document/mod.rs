// Document pipeline: record → installment derivation → content blocks → pages.
// Synchronous and free of I/O; the HTTP layer snapshots the viewport and today's date.

pub mod blocks;
pub mod clauses;
pub mod format;
pub mod handlers;
pub mod installment;
pub mod pagination;
pub mod profile;
pub mod tokens;
pub mod viewport;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::blocks::BlockBuilder;
use crate::document::clauses::DocumentType;
use crate::document::installment::apply_installment;
use crate::document::pagination::{paginate, Page};
use crate::document::profile::CapacityProfile;
use crate::document::viewport::{display_metrics, DisplayMetrics};
use crate::models::office::{Office, OfficeLetterhead};
use crate::models::record::ClientRecord;

/// Per-request inputs the pipeline reads besides the record.
#[derive(Debug, Clone)]
pub struct RenderEnv<'a> {
    pub profile: &'a CapacityProfile,
    pub office: &'a Office,
    pub today: NaiveDate,
    pub viewport_width: f32,
    pub zoom: f32,
}

/// A paginated document ready for the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub render_id: Uuid,
    pub document_type: DocumentType,
    pub title: &'static str,
    pub pages: Vec<Page>,
    pub page_count: usize,
    pub display: DisplayMetrics,
    pub office: OfficeLetterhead,
}

/// Renders one document. The caller is responsible for `doc_type.accepts(record.kind())`;
/// a mismatched record still renders, with placeholders where its fields are missing.
pub fn render_document(
    render_id: Uuid,
    doc_type: DocumentType,
    record: &ClientRecord,
    env: &RenderEnv<'_>,
) -> RenderedDocument {
    let mut record = record.clone();
    if let Some(terms) = record.financial_mut() {
        apply_installment(terms);
    }

    let blocks = BlockBuilder::new(env.profile, env.office, env.today).build(doc_type, &record);
    let pages = paginate(&blocks, env.profile);

    for page in pages.iter().filter(|p| p.overflow.is_some()) {
        warn!(
            %render_id,
            page = page.number,
            used_cost = page.used_cost,
            capacity = env.profile.capacity_pt,
            overflow = ?page.overflow,
            "Page exceeds capacity"
        );
    }

    info!(
        %render_id,
        document_type = ?doc_type,
        blocks = blocks.len(),
        pages = pages.len(),
        "Document rendered"
    );

    RenderedDocument {
        render_id,
        document_type: doc_type,
        title: doc_type.title(),
        page_count: pages.len(),
        pages,
        display: display_metrics(env.viewport_width, env.zoom),
        office: env.office.letterhead(),
    }
}

/// Renders every document of the record's bundle, in print order, each with a fresh id.
pub fn render_bundle(
    record: &ClientRecord,
    env: &RenderEnv<'_>,
    mut next_id: impl FnMut() -> Uuid,
) -> Vec<RenderedDocument> {
    DocumentType::bundle_for(record.kind())
        .iter()
        .map(|doc_type| render_document(next_id(), *doc_type, record, env))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

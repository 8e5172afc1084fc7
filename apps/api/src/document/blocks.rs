//! Typed, costed content blocks: the units pagination packs into pages.
//!
//! `BlockBuilder::build` walks a document's clause catalog, substitutes tokens against the
//! record and attaches an estimated vertical cost (points) to every block. The same record,
//! document type, profile and date always produce the same block sequence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::document::clauses::{DocumentType, Segment, SignatureLine, Signer};
use crate::document::format::{format_currency, format_date, PLACEHOLDER};
use crate::document::profile::{visible_len, CapacityProfile};
use crate::document::tokens::{escape_markup, SubstitutionContext, TokenTable};
use crate::models::office::Office;
use crate::models::record::{present, ClientRecord, FinancialTerms};

// ────────────────────────────────────────────────────────────────────────────
// Block types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleLevel {
    Document,
    Section,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphStyle {
    Body,
    /// Boxed paragraph used for the office's own qualification.
    Highlighted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signatory {
    pub name: String,
    pub role: String,
}

/// One semantic unit of document content. `cost` is its estimated height in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Title {
        text: String,
        level: TitleLevel,
        cost: f32,
    },
    Paragraph {
        markup: String,
        style: ParagraphStyle,
        cost: f32,
    },
    FinancialTable {
        rows: Vec<TableRow>,
        cost: f32,
    },
    SignatureBlock {
        place_and_date: String,
        signatories: Vec<Signatory>,
        cost: f32,
    },
    Spacer {
        cost: f32,
    },
}

impl ContentBlock {
    pub fn cost(&self) -> f32 {
        match self {
            ContentBlock::Title { cost, .. }
            | ContentBlock::Paragraph { cost, .. }
            | ContentBlock::FinancialTable { cost, .. }
            | ContentBlock::SignatureBlock { cost, .. }
            | ContentBlock::Spacer { cost } => *cost,
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, ContentBlock::Title { .. })
    }

    pub fn is_signature(&self) -> bool {
        matches!(self, ContentBlock::SignatureBlock { .. })
    }

    pub fn is_financial_table(&self) -> bool {
        matches!(self, ContentBlock::FinancialTable { .. })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

/// Everything block construction reads besides the record itself.
pub struct BlockBuilder<'a> {
    pub profile: &'a CapacityProfile,
    pub office: &'a Office,
    pub tokens: &'a TokenTable,
    pub today: NaiveDate,
}

impl<'a> BlockBuilder<'a> {
    pub fn new(profile: &'a CapacityProfile, office: &'a Office, today: NaiveDate) -> Self {
        Self {
            profile,
            office,
            tokens: TokenTable::standard(),
            today,
        }
    }

    /// Builds the full, ordered block sequence of `doc_type` for `record`.
    pub fn build(&self, doc_type: DocumentType, record: &ClientRecord) -> Vec<ContentBlock> {
        let ctx = SubstitutionContext {
            record,
            today: self.today,
        };

        doc_type
            .segments()
            .into_iter()
            .map(|segment| self.block_for(doc_type, &segment, &ctx))
            .collect()
    }

    fn block_for(
        &self,
        doc_type: DocumentType,
        segment: &Segment,
        ctx: &SubstitutionContext<'_>,
    ) -> ContentBlock {
        match segment {
            Segment::Title => self.title(doc_type.title(), TitleLevel::Document),
            Segment::Heading(text) => self.title(text, TitleLevel::Section),
            Segment::Clause(template) => {
                self.paragraph(self.tokens.substitute(template, ctx), ParagraphStyle::Body)
            }
            Segment::Grantee => self.paragraph(self.grantee_markup(), ParagraphStyle::Highlighted),
            Segment::PaymentSchedule => ContentBlock::FinancialTable {
                rows: payment_rows(ctx.record.financial()),
                cost: self.profile.financial_table_pt,
            },
            Segment::Spacer => ContentBlock::Spacer {
                cost: self.profile.spacer_pt,
            },
            Segment::Signatures {
                place_and_date,
                lines,
            } => ContentBlock::SignatureBlock {
                place_and_date: self.tokens.substitute(place_and_date, ctx),
                signatories: self.signatories(lines, ctx),
                cost: self.profile.signature_block_pt,
            },
        }
    }

    fn title(&self, text: &str, level: TitleLevel) -> ContentBlock {
        ContentBlock::Title {
            text: text.to_string(),
            level,
            cost: self.profile.title_cost(text.chars().count()),
        }
    }

    fn paragraph(&self, markup: String, style: ParagraphStyle) -> ContentBlock {
        let cost = self.profile.paragraph_cost(visible_len(&markup));
        ContentBlock::Paragraph {
            markup,
            style,
            cost,
        }
    }

    fn grantee_markup(&self) -> String {
        format!(
            "<b><u>OUTORGADO: {}</u></b>, {}, e-mail: {}, com escritório profissional situado em {}.",
            escape_markup(&self.office.attorney_name),
            escape_markup(&self.office.attorney_oab),
            escape_markup(&self.office.email),
            escape_markup(&self.office.address),
        )
    }

    fn signatories(
        &self,
        lines: &[SignatureLine],
        ctx: &SubstitutionContext<'_>,
    ) -> Vec<Signatory> {
        lines
            .iter()
            .map(|line| {
                let name = match line.signer {
                    Signer::Token(token) => self
                        .tokens
                        .resolve(token, ctx)
                        .unwrap_or_else(|| PLACEHOLDER.to_string()),
                    Signer::Office => self.office.attorney_name.clone(),
                };
                Signatory {
                    name,
                    role: line.role.to_string(),
                }
            })
            .collect()
    }
}

/// Rows of the payment schedule. Missing terms print the placeholder.
fn payment_rows(terms: Option<&FinancialTerms>) -> Vec<TableRow> {
    let empty = FinancialTerms::default();
    let terms = terms.unwrap_or(&empty);

    let plan = present(&terms.installment_count)
        .and_then(|n| n.parse::<u32>().ok())
        .filter(|n| *n > 0)
        .map(|n| {
            format!(
                "{n}x de {}",
                format_currency(terms.installment_amount.as_deref().unwrap_or_default())
            )
        })
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let due = present(&terms.installment_due_day)
        .map(|d| format!("todo dia {d}"))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let down_date = present(&terms.down_payment_date)
        .map(format_date)
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    vec![
        row(
            "Valor total",
            format_currency(terms.total_value.as_deref().unwrap_or_default()),
        ),
        row(
            "Entrada",
            format_currency(terms.down_payment.as_deref().unwrap_or_default()),
        ),
        row("Data da entrada", down_date),
        row("Parcelamento", plan),
        row("Vencimento", due),
        row("Forma de pagamento", terms.payment_method.label().to_string()),
    ]
}

fn row(label: &str, value: String) -> TableRow {
    TableRow {
        label: label.to_string(),
        value,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

//! Client records as they arrive from the form layer.
//!
//! All identity and financial fields are optional strings: the form sends whatever the user
//! has typed so far, and every consumer downstream falls back to the placeholder on absence.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Record variants
// ────────────────────────────────────────────────────────────────────────────

/// The contracting party, tagged by kind. Exactly one variant is active per render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClientRecord {
    Individual(IndividualRecord),
    Organization(OrganizationRecord),
    Partnership(PartnershipRecord),
}

/// Which variant a record is, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Individual,
    Organization,
    Partnership,
}

impl ClientRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            ClientRecord::Individual(_) => RecordKind::Individual,
            ClientRecord::Organization(_) => RecordKind::Organization,
            ClientRecord::Partnership(_) => RecordKind::Partnership,
        }
    }

    /// Financial terms, for the variants that carry them.
    pub fn financial(&self) -> Option<&FinancialTerms> {
        match self {
            ClientRecord::Individual(r) => Some(&r.financial),
            ClientRecord::Organization(r) => Some(&r.financial),
            ClientRecord::Partnership(_) => None,
        }
    }

    pub fn financial_mut(&mut self) -> Option<&mut FinancialTerms> {
        match self {
            ClientRecord::Individual(r) => Some(&mut r.financial),
            ClientRecord::Organization(r) => Some(&mut r.financial),
            ClientRecord::Partnership(_) => None,
        }
    }

    /// Contract date as typed (`YYYY-MM-DD`). Partnerships use their signing date.
    pub fn contract_date(&self) -> Option<&str> {
        match self {
            ClientRecord::Individual(r) => r.contract_date.as_deref(),
            ClientRecord::Organization(r) => r.contract_date.as_deref(),
            ClientRecord::Partnership(r) => r.signing_date.as_deref(),
        }
    }
}

/// Pessoa física.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndividualRecord {
    pub name: Option<String>,
    pub marital_status: Option<String>,
    pub profession: Option<String>,
    pub nationality: Option<String>,
    pub cpf: Option<String>,
    pub street: Option<String>,
    pub complement: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub process_number: Option<String>,
    pub contract_date: Option<String>,
    pub financial: FinancialTerms,
}

/// Pessoa jurídica, signed by its legal representative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationRecord {
    pub corporate_name: Option<String>,
    pub cnpj: Option<String>,
    pub hq_address: Option<String>,
    pub hq_district: Option<String>,
    pub hq_city: Option<String>,
    pub hq_state: Option<String>,
    pub hq_postal_code: Option<String>,
    pub representative: Representative,
    pub process_number: Option<String>,
    pub contract_date: Option<String>,
    pub financial: FinancialTerms,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Representative {
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub profession: Option<String>,
    pub marital_status: Option<String>,
    pub cpf: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

/// Fee-sharing agreement between the managing attorney and a partner attorney.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartnershipRecord {
    pub manager: Option<String>,
    pub partner: Option<String>,
    pub partner_oab: Option<String>,
    pub clients: Vec<PartnershipClient>,
    pub action_type: Option<String>,
    pub percentage: Option<String>,
    pub signing_state: Option<String>,
    pub signing_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartnershipClient {
    pub name: Option<String>,
    pub cpf: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Financial terms
// ────────────────────────────────────────────────────────────────────────────

/// Fee terms. Money fields hold the pt-BR display form (`"1.000,00"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialTerms {
    pub total_value: Option<String>,
    pub down_payment: Option<String>,
    pub down_payment_date: Option<String>,
    pub installment_count: Option<String>,
    pub installment_amount: Option<String>,
    pub installment_due_day: Option<String>,
    pub payment_method: PaymentMethod,
}

/// How the fees are paid. Serialized with the labels printed in the contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "BOLETO BANCÁRIO")]
    BankSlip,
    #[serde(rename = "TRANSFERÊNCIA BANCÁRIA")]
    BankTransfer,
    #[serde(rename = "PIX")]
    Pix,
    #[serde(rename = "CARTÃO DE CRÉDITO")]
    CreditCard,
    #[serde(rename = "À VISTA")]
    Cash,
}

impl PaymentMethod {
    /// Label as printed in clause text and the payment table.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::BankSlip => "BOLETO BANCÁRIO",
            PaymentMethod::BankTransfer => "TRANSFERÊNCIA BANCÁRIA",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::CreditCard => "CARTÃO DE CRÉDITO",
            PaymentMethod::Cash => "À VISTA",
        }
    }

    /// One-time methods settle the whole amount at once: the down payment does not
    /// reduce the installment base.
    pub fn is_one_time(self) -> bool {
        matches!(
            self,
            PaymentMethod::Pix | PaymentMethod::CreditCard | PaymentMethod::Cash
        )
    }
}

/// Treats `None`, empty and whitespace-only input alike.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

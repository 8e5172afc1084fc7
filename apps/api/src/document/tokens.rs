//! Turns clause templates into rendered markup for one record.
//!
//! Templates mark fields with slash-delimited tokens (`/NOME/`, `/VALOR TOTAL/`). The table
//! below maps each token to a pure resolver with an explicit fallback chain; anything that
//! resolves to nothing prints as the placeholder.
//!
//! Substitution is a single left-to-right scan. A resolved value is never rescanned, so no
//! token can expand into another one and the order of the table has no effect on output.

#![allow(dead_code)]

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use tracing::debug;

use crate::document::format::{format_currency, format_date, PLACEHOLDER};
use crate::models::record::{present, ClientRecord, FinancialTerms};

const EMPHASIS_OPEN: &str = "<b><u>";
const EMPHASIS_CLOSE: &str = "</u></b>";

// ────────────────────────────────────────────────────────────────────────────
// Context and table
// ────────────────────────────────────────────────────────────────────────────

/// Inputs a resolver may read. `today` is snapshotted by the caller so output stays
/// deterministic for identical inputs.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionContext<'a> {
    pub record: &'a ClientRecord,
    pub today: NaiveDate,
}

pub type Resolver = fn(&SubstitutionContext<'_>) -> Option<String>;

#[derive(Clone, Copy)]
pub struct TokenRule {
    pub token: &'static str,
    pub resolve: Resolver,
}

impl TokenRule {
    fn new(token: &'static str, resolve: Resolver) -> Self {
        Self { token, resolve }
    }
}

/// Ordered token rules plus a lookup index, built once.
pub struct TokenTable {
    rules: Vec<TokenRule>,
    index: HashMap<&'static str, Resolver>,
}

impl TokenTable {
    pub fn from_rules(rules: Vec<TokenRule>) -> Self {
        let index = rules.iter().map(|r| (r.token, r.resolve)).collect();
        Self { rules, index }
    }

    /// The full contract vocabulary.
    pub fn standard() -> &'static TokenTable {
        &STANDARD_TABLE
    }

    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.token)
    }

    /// Resolves one token to its display value, placeholder included. `None` if unknown.
    pub fn resolve(&self, token: &str, ctx: &SubstitutionContext<'_>) -> Option<String> {
        self.index
            .get(token)
            .map(|resolve| resolve(ctx).unwrap_or_else(|| PLACEHOLDER.to_string()))
    }

    /// Replaces every occurrence of every known token in `template` with its emphasized,
    /// HTML-escaped value. Unknown tokens and literal text pass through (escaped).
    pub fn substitute(&self, template: &str, ctx: &SubstitutionContext<'_>) -> String {
        let mut out = String::with_capacity(template.len() * 2);
        let mut rest = template;

        while let Some(start) = rest.find('/') {
            push_escaped(&mut out, &rest[..start]);
            let after = &rest[start + 1..];

            if let Some(len) = after.find('/') {
                let candidate = &rest[start..start + len + 2];
                if let Some(value) = self.resolve(candidate, ctx) {
                    out.push_str(EMPHASIS_OPEN);
                    push_escaped(&mut out, &value);
                    out.push_str(EMPHASIS_CLOSE);
                    rest = &rest[start + len + 2..];
                    continue;
                }
                if looks_like_token(&after[..len]) {
                    debug!(token = candidate, "Unknown token left verbatim");
                }
            }

            out.push('/');
            rest = after;
        }
        push_escaped(&mut out, rest);
        out
    }
}

/// Shorthand for substitution against the standard vocabulary.
pub fn substitute(template: &str, ctx: &SubstitutionContext<'_>) -> String {
    TokenTable::standard().substitute(template, ctx)
}

fn looks_like_token(inner: &str) -> bool {
    !inner.is_empty()
        && inner.len() <= 48
        && inner
            .chars()
            .all(|c| c.is_uppercase() || c == ' ' || c == 'ª' || c == 'º')
}

/// HTML-escapes literal text that is placed into block markup without substitution.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resolvers
// ────────────────────────────────────────────────────────────────────────────

static STANDARD_TABLE: Lazy<TokenTable> = Lazy::new(|| TokenTable::from_rules(standard_rules()));

fn standard_rules() -> Vec<TokenRule> {
    use ClientRecord::{Individual, Organization, Partnership};

    vec![
        // Identity: own field first, then the legal representative's.
        TokenRule::new("/NOME/", |ctx| match ctx.record {
            Individual(r) => owned(&r.name),
            Organization(r) => owned(&r.corporate_name),
            Partnership(r) => owned(&r.manager),
        }),
        TokenRule::new("/ESTADO CIVIL/", |ctx| match ctx.record {
            Individual(r) => owned(&r.marital_status),
            Organization(r) => owned(&r.representative.marital_status),
            Partnership(_) => None,
        }),
        TokenRule::new("/PROFISSÃO/", |ctx| match ctx.record {
            Individual(r) => owned(&r.profession),
            Organization(r) => owned(&r.representative.profession),
            Partnership(_) => None,
        }),
        TokenRule::new("/NACIONALIDADE/", |ctx| match ctx.record {
            Individual(r) => owned(&r.nationality),
            Organization(r) => owned(&r.representative.nationality),
            Partnership(_) => None,
        }),
        TokenRule::new("/CPF/", |ctx| match ctx.record {
            Individual(r) => owned(&r.cpf),
            Organization(r) => owned(&r.representative.cpf),
            Partnership(_) => None,
        }),
        TokenRule::new("/Rua/", |ctx| match ctx.record {
            Individual(r) => present(&r.street).map(|street| match present(&r.complement) {
                Some(complement) => format!("{street}, {complement}"),
                None => street.to_string(),
            }),
            Organization(r) => owned(&r.representative.address),
            Partnership(_) => None,
        }),
        TokenRule::new("/CEP/", |ctx| match ctx.record {
            Individual(r) => owned(&r.postal_code),
            Organization(r) => owned(&r.representative.postal_code),
            Partnership(_) => None,
        }),
        TokenRule::new("/NUMERO DE PROCESSO/", |ctx| match ctx.record {
            Individual(r) => owned(&r.process_number),
            Organization(r) => owned(&r.process_number),
            Partnership(_) => None,
        }),
        // Financial terms.
        TokenRule::new("/VALOR TOTAL/", |ctx| {
            money(financial(ctx)?.total_value.as_deref())
        }),
        TokenRule::new("/ENTRADA/", |ctx| {
            money(financial(ctx)?.down_payment.as_deref())
        }),
        TokenRule::new("/DATA DE ENTRADA/", |ctx| {
            let raw = present(&financial(ctx)?.down_payment_date)?;
            Some(format_date(raw))
        }),
        TokenRule::new("/VEZES DE PARCELAS/", |ctx| {
            owned(&financial(ctx)?.installment_count)
        }),
        TokenRule::new("/VALOR DA PARCELA/", |ctx| {
            money(financial(ctx)?.installment_amount.as_deref())
        }),
        TokenRule::new("/DATA DE PAGAMENTO DAS PARCELAS/", |ctx| {
            owned(&financial(ctx)?.installment_due_day)
        }),
        TokenRule::new("/FORMA DE PAGAMENTO/", |ctx| {
            Some(financial(ctx)?.payment_method.label().to_string())
        }),
        // Place and date of signature.
        TokenRule::new("/CIDADE/", |ctx| match ctx.record {
            Individual(r) => owned(&r.city),
            Organization(r) => owned(&r.hq_city).or_else(|| owned(&r.representative.city)),
            Partnership(_) => None,
        }),
        TokenRule::new("/ESTADO/", |ctx| match ctx.record {
            Individual(r) => owned(&r.state),
            Organization(r) => owned(&r.hq_state).or_else(|| owned(&r.representative.state)),
            Partnership(r) => owned(&r.signing_state),
        }),
        TokenRule::new("/DIA/", |ctx| {
            Some(format!("{:02}", signing_date(ctx).day()))
        }),
        TokenRule::new("/MÊS/", |ctx| {
            Some(format!("{:02}", signing_date(ctx).month()))
        }),
        TokenRule::new("/ANO/", |ctx| Some(signing_date(ctx).year().to_string())),
        // Organization.
        TokenRule::new("/RAZÃO SOCIAL/", |ctx| match ctx.record {
            Organization(r) => owned(&r.corporate_name),
            _ => None,
        }),
        TokenRule::new("/CNPJ/", |ctx| match ctx.record {
            Organization(r) => owned(&r.cnpj),
            _ => None,
        }),
        TokenRule::new("/ENDEREÇO SEDE/", |ctx| match ctx.record {
            Organization(r) => owned(&r.hq_address),
            _ => None,
        }),
        TokenRule::new("/BAIRRO SEDE/", |ctx| match ctx.record {
            Organization(r) => owned(&r.hq_district),
            _ => None,
        }),
        TokenRule::new("/CIDADE SEDE/", |ctx| match ctx.record {
            Organization(r) => owned(&r.hq_city),
            _ => None,
        }),
        TokenRule::new("/ESTADO SEDE/", |ctx| match ctx.record {
            Organization(r) => owned(&r.hq_state),
            _ => None,
        }),
        TokenRule::new("/CEP SEDE/", |ctx| match ctx.record {
            Organization(r) => owned(&r.hq_postal_code),
            _ => None,
        }),
        TokenRule::new("/REPRESENTANTE/", |ctx| match ctx.record {
            Organization(r) => owned(&r.representative.name),
            _ => None,
        }),
        // Partnership.
        TokenRule::new("/GESTOR/", |ctx| match ctx.record {
            Partnership(r) => owned(&r.manager),
            _ => None,
        }),
        TokenRule::new("/PARCEIRO/", |ctx| match ctx.record {
            Partnership(r) => owned(&r.partner),
            _ => None,
        }),
        TokenRule::new("/OAB PARCEIRO/", |ctx| match ctx.record {
            Partnership(r) => owned(&r.partner_oab),
            _ => None,
        }),
        TokenRule::new("/CLIENTES/", |ctx| match ctx.record {
            Partnership(r) => client_list(r),
            _ => None,
        }),
        TokenRule::new("/TIPO DE AÇÃO/", |ctx| match ctx.record {
            Partnership(r) => owned(&r.action_type),
            _ => None,
        }),
        TokenRule::new("/PERCENTUAL/", |ctx| match ctx.record {
            Partnership(r) => present(&r.percentage).map(|p| {
                if p.ends_with('%') {
                    p.to_string()
                } else {
                    format!("{p}%")
                }
            }),
            _ => None,
        }),
    ]
}

fn owned(field: &Option<String>) -> Option<String> {
    present(field).map(str::to_string)
}

fn financial<'a>(ctx: &SubstitutionContext<'a>) -> Option<&'a FinancialTerms> {
    ctx.record.financial()
}

/// `format_currency` already prints the placeholder for empty and zero values.
fn money(raw: Option<&str>) -> Option<String> {
    Some(format_currency(raw.unwrap_or_default()))
}

/// Contract date if it is a real `YYYY-MM-DD` date, otherwise today.
fn signing_date(ctx: &SubstitutionContext<'_>) -> NaiveDate {
    ctx.record
        .contract_date()
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        .unwrap_or(ctx.today)
}

/// `"ANA, CPF nº 1; e BRUNO, CPF nº 2"`. Entries with neither name nor CPF are skipped.
fn client_list(record: &crate::models::record::PartnershipRecord) -> Option<String> {
    let entries: Vec<String> = record
        .clients
        .iter()
        .filter(|c| present(&c.name).is_some() || present(&c.cpf).is_some())
        .map(|c| {
            format!(
                "{}, CPF nº {}",
                present(&c.name).unwrap_or(PLACEHOLDER),
                present(&c.cpf).unwrap_or(PLACEHOLDER)
            )
        })
        .collect();

    match entries.as_slice() {
        [] => None,
        [only] => Some(only.clone()),
        [init @ .., last] => Some(format!("{}; e {last}", init.join("; "))),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{
        FinancialTerms, IndividualRecord, OrganizationRecord, PartnershipClient,
        PartnershipRecord, PaymentMethod, Representative,
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn individual() -> ClientRecord {
        ClientRecord::Individual(IndividualRecord {
            name: Some("Ana Souza".to_string()),
            cpf: Some("123.456.789-00".to_string()),
            street: Some("Rua das Flores, 10".to_string()),
            contract_date: Some("2025-03-05".to_string()),
            financial: FinancialTerms {
                total_value: Some("1.000,00".to_string()),
                down_payment: Some("200,00".to_string()),
                installment_count: Some("4".to_string()),
                installment_amount: Some("200,00".to_string()),
                payment_method: PaymentMethod::BankSlip,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    fn ctx(record: &ClientRecord) -> SubstitutionContext<'_> {
        SubstitutionContext {
            record,
            today: today(),
        }
    }

    fn em(value: &str) -> String {
        format!("{EMPHASIS_OPEN}{value}{EMPHASIS_CLOSE}")
    }

    // ── substitution ────────────────────────────────────────────────────────

    #[test]
    fn test_replaces_all_occurrences() {
        let record = individual();
        let out = substitute("/NOME/ e /NOME/", &ctx(&record));
        assert_eq!(out, format!("{} e {}", em("Ana Souza"), em("Ana Souza")));
    }

    #[test]
    fn test_missing_field_uses_placeholder() {
        let record = individual();
        let out = substitute("Profissão: /PROFISSÃO/.", &ctx(&record));
        assert_eq!(out, format!("Profissão: {}.", em(PLACEHOLDER)));
    }

    #[test]
    fn test_unknown_token_left_verbatim() {
        let record = individual();
        let out = substitute("Campo /INEXISTENTE/ e /NOME/", &ctx(&record));
        assert_eq!(out, format!("Campo /INEXISTENTE/ e {}", em("Ana Souza")));
    }

    #[test]
    fn test_stray_slashes_do_not_swallow_tokens() {
        let record = individual();
        let out = substitute("a/b /NOME/", &ctx(&record));
        assert_eq!(out, format!("a/b {}", em("Ana Souza")));
    }

    #[test]
    fn test_adjacent_tokens() {
        let record = individual();
        let out = substitute("/DIA//MÊS/", &ctx(&record));
        assert_eq!(out, format!("{}{}", em("05"), em("03")));
    }

    #[test]
    fn test_values_are_escaped_and_never_rescanned() {
        let record = ClientRecord::Individual(IndividualRecord {
            name: Some("<i>/CPF/</i>".to_string()),
            cpf: Some("999".to_string()),
            ..Default::default()
        });
        let out = substitute("/NOME/", &ctx(&record));
        assert_eq!(out, em("&lt;i&gt;/CPF/&lt;/i&gt;"));
    }

    #[test]
    fn test_table_order_does_not_matter() {
        let record = individual();
        let template = "/NOME/, CPF /CPF/, /VALOR TOTAL/ em /VEZES DE PARCELAS/x de \
                        /VALOR DA PARCELA/, /DIA/ de /MÊS/ de /ANO/ /DESCONHECIDO/";
        let mut reversed = standard_rules();
        reversed.reverse();
        let reversed = TokenTable::from_rules(reversed);
        assert_eq!(
            TokenTable::standard().substitute(template, &ctx(&record)),
            reversed.substitute(template, &ctx(&record))
        );
    }

    #[test]
    fn test_substitute_is_idempotent() {
        let record = individual();
        let template = "OUTORGANTE: /NOME/, CPF nº /CPF/, residente em /Rua/, CEP: /CEP/.";
        let first = substitute(template, &ctx(&record));
        let second = substitute(template, &ctx(&record));
        assert_eq!(first, second);
    }

    // ── resolvers ───────────────────────────────────────────────────────────

    #[test]
    fn test_financial_tokens() {
        let record = individual();
        let c = ctx(&record);
        let table = TokenTable::standard();
        assert_eq!(table.resolve("/VALOR TOTAL/", &c).unwrap(), "R$ 1.000,00");
        assert_eq!(table.resolve("/ENTRADA/", &c).unwrap(), "R$ 200,00");
        assert_eq!(table.resolve("/VALOR DA PARCELA/", &c).unwrap(), "R$ 200,00");
        assert_eq!(table.resolve("/DATA DE ENTRADA/", &c).unwrap(), PLACEHOLDER);
        assert_eq!(
            table.resolve("/FORMA DE PAGAMENTO/", &c).unwrap(),
            "BOLETO BANCÁRIO"
        );
    }

    #[test]
    fn test_organization_falls_back_to_representative() {
        let record = ClientRecord::Organization(OrganizationRecord {
            corporate_name: Some("ACME LTDA".to_string()),
            hq_city: None,
            representative: Representative {
                cpf: Some("111.222.333-44".to_string()),
                city: Some("Niterói".to_string()),
                marital_status: Some("casado".to_string()),
                ..Default::default()
            },
            ..Default::default()
        });
        let c = ctx(&record);
        let table = TokenTable::standard();
        assert_eq!(table.resolve("/NOME/", &c).unwrap(), "ACME LTDA");
        assert_eq!(table.resolve("/CPF/", &c).unwrap(), "111.222.333-44");
        assert_eq!(table.resolve("/ESTADO CIVIL/", &c).unwrap(), "casado");
        assert_eq!(table.resolve("/CIDADE/", &c).unwrap(), "Niterói");
    }

    #[test]
    fn test_date_tokens_fall_back_to_today() {
        let record = ClientRecord::Individual(IndividualRecord {
            contract_date: Some("not-a-date".to_string()),
            ..Default::default()
        });
        let c = ctx(&record);
        let table = TokenTable::standard();
        assert_eq!(table.resolve("/DIA/", &c).unwrap(), "15");
        assert_eq!(table.resolve("/MÊS/", &c).unwrap(), "01");
        assert_eq!(table.resolve("/ANO/", &c).unwrap(), "2025");
    }

    #[test]
    fn test_partnership_client_list() {
        let record = ClientRecord::Partnership(PartnershipRecord {
            manager: Some("Dr. Gestor".to_string()),
            percentage: Some("30".to_string()),
            clients: vec![
                PartnershipClient {
                    name: Some("Ana".to_string()),
                    cpf: Some("1".to_string()),
                },
                PartnershipClient::default(),
                PartnershipClient {
                    name: Some("Bruno".to_string()),
                    cpf: None,
                },
            ],
            ..Default::default()
        });
        let c = ctx(&record);
        let table = TokenTable::standard();
        assert_eq!(
            table.resolve("/CLIENTES/", &c).unwrap(),
            format!("Ana, CPF nº 1; e Bruno, CPF nº {PLACEHOLDER}")
        );
        assert_eq!(table.resolve("/PERCENTUAL/", &c).unwrap(), "30%");
        assert_eq!(table.resolve("/VALOR TOTAL/", &c).unwrap(), PLACEHOLDER);
    }

    #[test]
    fn test_vocabulary_tokens_are_unique() {
        let tokens: Vec<&str> = TokenTable::standard().tokens().collect();
        let unique: std::collections::HashSet<&str> = tokens.iter().copied().collect();
        assert_eq!(tokens.len(), unique.len());
    }
}

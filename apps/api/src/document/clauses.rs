//! Fixed template text of every document, in reading order.
//!
//! Templates carry slash tokens resolved by `tokens.rs`. The catalog only lists segments; cost
//! estimation and rendering happen in `blocks.rs`.

use serde::{Deserialize, Serialize};

use crate::models::record::RecordKind;

// ────────────────────────────────────────────────────────────────────────────
// Document types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    IndividualFeeAgreement,
    OrganizationFeeAgreement,
    IndividualPowerOfAttorney,
    OrganizationPowerOfAttorney,
    IndigencyDeclaration,
    PartnershipAgreement,
}

impl DocumentType {
    pub const ALL: [DocumentType; 6] = [
        DocumentType::IndividualFeeAgreement,
        DocumentType::OrganizationFeeAgreement,
        DocumentType::IndividualPowerOfAttorney,
        DocumentType::OrganizationPowerOfAttorney,
        DocumentType::IndigencyDeclaration,
        DocumentType::PartnershipAgreement,
    ];

    /// Printed document title.
    pub fn title(self) -> &'static str {
        match self {
            DocumentType::IndividualFeeAgreement | DocumentType::OrganizationFeeAgreement => {
                "CONTRATO DE HONORÁRIOS ADVOCATÍCIOS"
            }
            DocumentType::IndividualPowerOfAttorney
            | DocumentType::OrganizationPowerOfAttorney => "PROCURAÇÃO AD JUDICIA ET EXTRA",
            DocumentType::IndigencyDeclaration => "DECLARAÇÃO DE HIPOSSUFICIÊNCIA",
            DocumentType::PartnershipAgreement => {
                "CONTRATO DE PARCERIA DE HONORÁRIOS ADVOCATÍCIOS"
            }
        }
    }

    /// Short label for tabs and listings.
    pub fn label(self) -> &'static str {
        match self {
            DocumentType::IndividualFeeAgreement => "Honorários (PF)",
            DocumentType::OrganizationFeeAgreement => "Honorários (PJ)",
            DocumentType::IndividualPowerOfAttorney => "Procuração (PF)",
            DocumentType::OrganizationPowerOfAttorney => "Procuração (PJ)",
            DocumentType::IndigencyDeclaration => "Hipossuficiência",
            DocumentType::PartnershipAgreement => "Parceria",
        }
    }

    /// The record kind whose fields this document's tokens draw from.
    pub fn record_kind(self) -> RecordKind {
        match self {
            DocumentType::IndividualFeeAgreement
            | DocumentType::IndividualPowerOfAttorney
            | DocumentType::IndigencyDeclaration => RecordKind::Individual,
            DocumentType::OrganizationFeeAgreement
            | DocumentType::OrganizationPowerOfAttorney => RecordKind::Organization,
            DocumentType::PartnershipAgreement => RecordKind::Partnership,
        }
    }

    pub fn accepts(self, kind: RecordKind) -> bool {
        self.record_kind() == kind
    }

    pub fn has_financial_table(self) -> bool {
        matches!(
            self,
            DocumentType::IndividualFeeAgreement | DocumentType::OrganizationFeeAgreement
        )
    }

    /// Documents generated together for one client, in print order.
    pub fn bundle_for(kind: RecordKind) -> &'static [DocumentType] {
        match kind {
            RecordKind::Individual => &[
                DocumentType::IndividualFeeAgreement,
                DocumentType::IndividualPowerOfAttorney,
                DocumentType::IndigencyDeclaration,
            ],
            RecordKind::Organization => &[
                DocumentType::OrganizationFeeAgreement,
                DocumentType::OrganizationPowerOfAttorney,
            ],
            RecordKind::Partnership => &[DocumentType::PartnershipAgreement],
        }
    }

    /// The ordered segments of this document.
    pub fn segments(self) -> Vec<Segment> {
        match self {
            DocumentType::IndividualFeeAgreement => fee_agreement(INDIVIDUAL_GRANTOR),
            DocumentType::OrganizationFeeAgreement => fee_agreement(ORGANIZATION_GRANTOR),
            DocumentType::IndividualPowerOfAttorney => power_of_attorney(INDIVIDUAL_GRANTOR),
            DocumentType::OrganizationPowerOfAttorney => {
                power_of_attorney(ORGANIZATION_GRANTOR)
            }
            DocumentType::IndigencyDeclaration => indigency_declaration(),
            DocumentType::PartnershipAgreement => partnership_agreement(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Segments
// ────────────────────────────────────────────────────────────────────────────

/// One unit of the catalog, before substitution.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// The document title, always first.
    Title,
    /// Section heading.
    Heading(&'static str),
    /// Body paragraph template.
    Clause(&'static str),
    /// The office's own qualification paragraph (OUTORGADO).
    Grantee,
    /// The payment schedule table.
    PaymentSchedule,
    Spacer,
    /// Terminal signature block: place/date template plus signature lines.
    Signatures {
        place_and_date: &'static str,
        lines: &'static [SignatureLine],
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signer {
    /// Name resolved from the record through a token.
    Token(&'static str),
    /// The configured attorney.
    Office,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignatureLine {
    pub signer: Signer,
    pub role: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Clause text
// ────────────────────────────────────────────────────────────────────────────

const INDIVIDUAL_GRANTOR: &str = "OUTORGANTE: /NOME/, /NACIONALIDADE/, /ESTADO CIVIL/, \
/PROFISSÃO/, inscrito(a) no CPF sob o nº /CPF/, residente e domiciliado(a) em /Rua/, \
CEP: /CEP/, /CIDADE/ - /ESTADO/.";

const ORGANIZATION_GRANTOR: &str = "OUTORGANTE: /RAZÃO SOCIAL/, pessoa jurídica de direito \
privado, inscrita no CNPJ sob o nº /CNPJ/, com sede em /ENDEREÇO SEDE/, /BAIRRO SEDE/, \
/CIDADE SEDE/ - /ESTADO SEDE/, CEP: /CEP SEDE/, neste ato representada por /REPRESENTANTE/, \
/NACIONALIDADE/, /ESTADO CIVIL/, /PROFISSÃO/, inscrito(a) no CPF sob o nº /CPF/, residente \
em /Rua/, CEP: /CEP/.";

const PLACE_AND_DATE: &str = "/CIDADE/, /DIA/ de /MÊS/ de /ANO/.";

const GRANTOR_AND_OFFICE: &[SignatureLine] = &[
    SignatureLine {
        signer: Signer::Token("/NOME/"),
        role: "OUTORGANTE",
    },
    SignatureLine {
        signer: Signer::Office,
        role: "OUTORGADO",
    },
];

const GRANTOR_ONLY: &[SignatureLine] = &[SignatureLine {
    signer: Signer::Token("/NOME/"),
    role: "OUTORGANTE",
}];

const DECLARANT_ONLY: &[SignatureLine] = &[SignatureLine {
    signer: Signer::Token("/NOME/"),
    role: "DECLARANTE",
}];

const PARTNERS: &[SignatureLine] = &[
    SignatureLine {
        signer: Signer::Token("/GESTOR/"),
        role: "ADVOGADO GESTOR",
    },
    SignatureLine {
        signer: Signer::Token("/PARCEIRO/"),
        role: "ADVOGADO PARCEIRO",
    },
];

fn fee_agreement(grantor: &'static str) -> Vec<Segment> {
    vec![
        Segment::Title,
        Segment::Spacer,
        Segment::Clause(grantor),
        Segment::Grantee,
        Segment::Clause(
            "As partes acima identificadas têm, entre si, justo e acertado o presente Contrato \
             de Honorários Advocatícios, que se regerá pelas cláusulas seguintes e pelas \
             condições descritas no presente.",
        ),
        Segment::Heading("DO OBJETO"),
        Segment::Clause(
            "Cláusula 1ª. O presente instrumento tem como objeto a prestação de serviços \
             advocatícios pelo OUTORGADO ao OUTORGANTE na ação de nº /NUMERO DE PROCESSO/, em \
             todas as suas fases e instâncias, até o trânsito em julgado da decisão final.",
        ),
        Segment::Clause(
            "Cláusula 2ª. Os serviços compreendem o acompanhamento processual, a elaboração de \
             petições, a participação em audiências e a interposição dos recursos cabíveis, bem \
             como a orientação jurídica relativa à demanda.",
        ),
        Segment::Heading("DAS OBRIGAÇÕES"),
        Segment::Clause(
            "Cláusula 3ª. O OUTORGANTE obriga-se a fornecer ao OUTORGADO todos os documentos e \
             informações necessários ao bom andamento da causa, respondendo pela veracidade das \
             informações prestadas e comunicando qualquer alteração de endereço ou contato.",
        ),
        Segment::Clause(
            "Cláusula 4ª. As despesas processuais, custas, emolumentos, perícias e deslocamentos \
             para fora da comarca correrão por conta do OUTORGANTE, não estando incluídas nos \
             honorários ora pactuados.",
        ),
        Segment::Heading("DOS HONORÁRIOS"),
        Segment::Clause(
            "Cláusula 5ª. Pelos serviços prestados, o OUTORGANTE pagará ao OUTORGADO o valor \
             total de /VALOR TOTAL/, sendo /ENTRADA/ a título de entrada, com vencimento em \
             /DATA DE ENTRADA/, e o saldo em /VEZES DE PARCELAS/ parcelas de /VALOR DA PARCELA/, \
             com vencimento todo dia /DATA DE PAGAMENTO DAS PARCELAS/ de cada mês, mediante \
             /FORMA DE PAGAMENTO/.",
        ),
        Segment::PaymentSchedule,
        Segment::Clause(
            "Cláusula 6ª. O atraso no pagamento de qualquer parcela implicará multa de 2% (dois \
             por cento) sobre o valor devido, acrescida de juros de mora de 1% (um por cento) ao \
             mês e correção monetária, podendo o OUTORGADO considerar antecipadamente vencidas \
             as parcelas vincendas.",
        ),
        Segment::Clause(
            "Cláusula 7ª. Os honorários de sucumbência, se houver, pertencem exclusivamente ao \
             OUTORGADO, nos termos do art. 23 da Lei nº 8.906/94, sem prejuízo dos honorários \
             contratuais aqui ajustados.",
        ),
        Segment::Heading("DA RESCISÃO"),
        Segment::Clause(
            "Cláusula 8ª. O presente contrato poderá ser rescindido por qualquer das partes \
             mediante notificação por escrito com antecedência mínima de 30 (trinta) dias, \
             sendo devidos os honorários proporcionais aos serviços já prestados.",
        ),
        Segment::Heading("DO FORO"),
        Segment::Clause(
            "Cláusula 9ª. Fica eleito o foro da comarca de /CIDADE/ - /ESTADO/ para dirimir \
             quaisquer dúvidas oriundas do presente contrato, com renúncia expressa a qualquer \
             outro, por mais privilegiado que seja.",
        ),
        Segment::Clause(
            "E, por estarem assim justos e contratados, firmam o presente instrumento em duas \
             vias de igual teor e forma.",
        ),
        Segment::Signatures {
            place_and_date: PLACE_AND_DATE,
            lines: GRANTOR_AND_OFFICE,
        },
    ]
}

fn power_of_attorney(grantor: &'static str) -> Vec<Segment> {
    vec![
        Segment::Title,
        Segment::Spacer,
        Segment::Clause(grantor),
        Segment::Grantee,
        Segment::Heading("PODERES"),
        Segment::Clause(
            "Pelo presente instrumento, o OUTORGANTE nomeia e constitui seu bastante procurador \
             o OUTORGADO, a quem confere amplos poderes para o foro em geral, com a cláusula ad \
             judicia et extra, para propor contra quem de direito as ações competentes e \
             defendê-lo nas contrárias, seguindo umas e outras até final decisão, usando os \
             recursos legais e acompanhando-os.",
        ),
        Segment::Clause(
            "Confere-lhe, ainda, poderes especiais para confessar, desistir, transigir, firmar \
             compromissos ou acordos, receber e dar quitação, podendo substabelecer esta a \
             outrem, com ou sem reserva de iguais poderes, especialmente para atuar na ação de \
             nº /NUMERO DE PROCESSO/.",
        ),
        Segment::Signatures {
            place_and_date: PLACE_AND_DATE,
            lines: GRANTOR_ONLY,
        },
    ]
}

fn indigency_declaration() -> Vec<Segment> {
    vec![
        Segment::Title,
        Segment::Spacer,
        Segment::Clause(
            "Eu, /NOME/, /NACIONALIDADE/, /ESTADO CIVIL/, /PROFISSÃO/, inscrito(a) no CPF sob o \
             nº /CPF/, residente e domiciliado(a) em /Rua/, CEP: /CEP/, DECLARO, para os devidos \
             fins e sob as penas da lei, que não possuo condições de arcar com as custas e \
             despesas do processo /NUMERO DE PROCESSO/ sem prejuízo do meu próprio sustento e \
             de minha família, razão pela qual requeiro os benefícios da gratuidade de justiça, \
             nos termos do art. 98 e seguintes do Código de Processo Civil.",
        ),
        Segment::Clause(
            "Declaro, ainda, estar ciente de que a falsidade da presente declaração pode \
             implicar sanções civis, administrativas e criminais.",
        ),
        Segment::Signatures {
            place_and_date: PLACE_AND_DATE,
            lines: DECLARANT_ONLY,
        },
    ]
}

fn partnership_agreement() -> Vec<Segment> {
    vec![
        Segment::Title,
        Segment::Spacer,
        Segment::Clause("ADVOGADO GESTOR: /GESTOR/."),
        Segment::Clause("ADVOGADO PARCEIRO: /PARCEIRO/, inscrito na OAB sob o nº /OAB PARCEIRO/."),
        Segment::Heading("DO OBJETO"),
        Segment::Clause(
            "Cláusula 1ª. O presente contrato tem por objeto a atuação conjunta das partes na \
             ação de /TIPO DE AÇÃO/ patrocinada em favor de /CLIENTES/.",
        ),
        Segment::Heading("DOS HONORÁRIOS"),
        Segment::Clause(
            "Cláusula 2ª. Os honorários contratuais e de sucumbência efetivamente recebidos \
             serão partilhados entre as partes, cabendo ao ADVOGADO PARCEIRO o percentual de \
             /PERCENTUAL/ sobre os valores recebidos.",
        ),
        Segment::Clause(
            "Cláusula 3ª. O ADVOGADO GESTOR repassará a cota-parte do ADVOGADO PARCEIRO em até \
             5 (cinco) dias úteis após o efetivo recebimento, mediante recibo.",
        ),
        Segment::Heading("DAS RESPONSABILIDADES"),
        Segment::Clause(
            "Cláusula 4ª. Cada parte responde pelos atos que praticar na condução da causa, \
             comprometendo-se ambas a manter sigilo sobre as informações dos clientes e a \
             observar o Código de Ética e Disciplina da OAB.",
        ),
        Segment::Heading("DO FORO"),
        Segment::Clause(
            "Cláusula 5ª. Fica eleito o foro da capital do estado de /ESTADO/ para dirimir \
             quaisquer dúvidas oriundas do presente contrato.",
        ),
        Segment::Signatures {
            place_and_date: "/ESTADO/, /DIA/ de /MÊS/ de /ANO/.",
            lines: PARTNERS,
        },
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_document_starts_with_title_and_ends_with_signatures() {
        for doc in DocumentType::ALL {
            let segments = doc.segments();
            assert_eq!(segments.first(), Some(&Segment::Title), "{doc:?}");
            assert!(
                matches!(segments.last(), Some(Segment::Signatures { .. })),
                "{doc:?}"
            );
            let signature_count = segments
                .iter()
                .filter(|s| matches!(s, Segment::Signatures { .. }))
                .count();
            assert_eq!(signature_count, 1, "{doc:?}");
        }
    }

    #[test]
    fn test_payment_schedule_only_in_fee_agreements() {
        for doc in DocumentType::ALL {
            let tables = doc
                .segments()
                .iter()
                .filter(|s| **s == Segment::PaymentSchedule)
                .count();
            let expected = usize::from(doc.has_financial_table());
            assert_eq!(tables, expected, "{doc:?}");
        }
    }

    #[test]
    fn test_bundles_match_record_kind() {
        for kind in [
            RecordKind::Individual,
            RecordKind::Organization,
            RecordKind::Partnership,
        ] {
            let bundle = DocumentType::bundle_for(kind);
            assert!(!bundle.is_empty());
            assert!(bundle.iter().all(|doc| doc.accepts(kind)));
        }
        assert_eq!(DocumentType::bundle_for(RecordKind::Individual).len(), 3);
    }

    #[test]
    fn test_document_type_serializes_snake_case() {
        let json = serde_json::to_string(&DocumentType::IndigencyDeclaration).unwrap();
        assert_eq!(json, "\"indigency_declaration\"");
    }
}

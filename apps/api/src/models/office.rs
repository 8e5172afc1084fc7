use serde::{Deserialize, Serialize};

/// The law office issuing the documents: grantee paragraph, office signature and the
/// letterhead the renderer repeats on every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    pub firm_name: String,
    pub attorney_name: String,
    /// Bar registration as printed, e.g. `OAB/RJ 213.777`.
    pub attorney_oab: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Default for Office {
    fn default() -> Self {
        Self {
            firm_name: "FB Advocacia & Consultoria".to_string(),
            attorney_name: "Flafson Barbosa Borges".to_string(),
            attorney_oab: "OAB/RJ 213.777".to_string(),
            email: "suporte@flafsonadvocacia.com".to_string(),
            phone: "(21) 99173-5421".to_string(),
            address: "Av. Maria Teresa, nº 75, sala 328 - Business Completo - Campo Grande - RJ"
                .to_string(),
        }
    }
}

/// Header and footer lines repeated on every printed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeLetterhead {
    pub header: Vec<String>,
    pub footer: Vec<String>,
}

impl Office {
    pub fn letterhead(&self) -> OfficeLetterhead {
        OfficeLetterhead {
            header: vec![
                self.firm_name.clone(),
                format!("{} | {}", self.attorney_name, self.attorney_oab),
            ],
            footer: vec![
                self.address.clone(),
                format!("{} | {}", self.phone, self.email),
            ],
        }
    }
}

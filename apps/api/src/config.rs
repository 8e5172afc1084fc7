use anyhow::{ensure, Context, Result};

use crate::models::office::Office;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub office: Office,
    /// Orphan-avoidance high-water mark, as a fraction of page capacity.
    pub layout_high_water: f32,
    pub signature_tolerance_pt: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Office::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let layout_high_water = parse_f32(&lookup, "LAYOUT_HIGH_WATER", 0.85)?;
        ensure!(
            layout_high_water > 0.0 && layout_high_water <= 1.0,
            "LAYOUT_HIGH_WATER must be in (0, 1], got {layout_high_water}"
        );

        let signature_tolerance_pt = parse_f32(&lookup, "LAYOUT_SIGNATURE_TOLERANCE_PT", 24.0)?;
        ensure!(
            signature_tolerance_pt >= 0.0,
            "LAYOUT_SIGNATURE_TOLERANCE_PT must be >= 0, got {signature_tolerance_pt}"
        );

        Ok(Config {
            port,
            rust_log: text("RUST_LOG", "info".to_string()),
            office: Office {
                firm_name: text("OFFICE_FIRM_NAME", defaults.firm_name),
                attorney_name: text("OFFICE_ATTORNEY_NAME", defaults.attorney_name),
                attorney_oab: text("OFFICE_ATTORNEY_OAB", defaults.attorney_oab),
                email: text("OFFICE_EMAIL", defaults.email),
                phone: text("OFFICE_PHONE", defaults.phone),
                address: text("OFFICE_ADDRESS", defaults.address),
            },
            layout_high_water,
            signature_tolerance_pt,
        })
    }
}

fn parse_f32(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f32) -> Result<f32> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<f32>()
        .with_context(|| format!("{key} must be a number, got '{raw}'"))?;
    ensure!(value.is_finite(), "{key} must be finite");
    Ok(value)
}

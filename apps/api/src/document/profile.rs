//! Page geometry and the capacity profile used to cost content blocks.
//!
//! All heights are in PostScript points on the physical page. Text cost is an approximation:
//! the printed preview uses a proportional serif, but a fixed average glyph width is close
//! enough to decide page breaks and keeps the cost monotonic in text length.
//!
//! A4 at 48pt margins, 10pt body text:
//! text width = 595 − 2×48 = 499pt, average glyph = 0.5em × 10pt = 5pt → 99 chars/line.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Physical page
// ────────────────────────────────────────────────────────────────────────────

/// Physical page and type parameters the profile is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
    /// Space reserved for the repeated letterhead.
    pub header_band_pt: f32,
    /// Space reserved for the repeated office footer.
    pub footer_band_pt: f32,
    pub body_font_pt: f32,
    pub title_font_pt: f32,
    /// Average glyph advance in em units.
    pub average_glyph_em: f32,
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
}

impl PageGeometry {
    pub fn a4() -> Self {
        Self {
            width_pt: 595.0,
            height_pt: 842.0,
            margin_pt: 48.0,
            header_band_pt: 64.0,
            footer_band_pt: 48.0,
            body_font_pt: 10.0,
            title_font_pt: 11.0,
            average_glyph_em: 0.5,
            line_spacing: 1.5,
        }
    }

    pub fn text_width_pt(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }

    pub fn content_height_pt(&self) -> f32 {
        self.height_pt - 2.0 * self.margin_pt - self.header_band_pt - self.footer_band_pt
    }

    fn chars_per_line(&self, font_pt: f32) -> u32 {
        let glyph = font_pt * self.average_glyph_em;
        ((self.text_width_pt() / glyph).floor() as u32).max(1)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Capacity profile
// ────────────────────────────────────────────────────────────────────────────

/// Everything pagination needs to know about the page, injected rather than hard-coded so
/// synthetic profiles can drive the same algorithm in tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityProfile {
    /// Content-area height per page.
    pub capacity_pt: f32,
    pub body_chars_per_line: u32,
    pub body_line_height_pt: f32,
    /// Bottom margin after each paragraph.
    pub paragraph_overhead_pt: f32,
    pub title_chars_per_line: u32,
    pub title_line_height_pt: f32,
    pub title_overhead_pt: f32,
    pub financial_table_pt: f32,
    pub signature_block_pt: f32,
    pub spacer_pt: f32,
    /// Fraction of capacity past which a title is pushed to the next page.
    pub high_water_fraction: f32,
    /// Overflow tolerated for a trailing signature block.
    pub signature_tolerance_pt: f32,
}

impl CapacityProfile {
    pub fn from_geometry(geometry: &PageGeometry) -> Self {
        Self {
            capacity_pt: geometry.content_height_pt(),
            body_chars_per_line: geometry.chars_per_line(geometry.body_font_pt),
            body_line_height_pt: geometry.body_font_pt * geometry.line_spacing,
            paragraph_overhead_pt: 12.0,
            title_chars_per_line: geometry.chars_per_line(geometry.title_font_pt),
            title_line_height_pt: geometry.title_font_pt * geometry.line_spacing,
            title_overhead_pt: 18.0,
            financial_table_pt: 170.0,
            signature_block_pt: 150.0,
            spacer_pt: 12.0,
            high_water_fraction: 0.85,
            signature_tolerance_pt: 24.0,
        }
    }

    /// Applies the operator overrides from configuration.
    pub fn with_overrides(mut self, high_water_fraction: f32, signature_tolerance_pt: f32) -> Self {
        self.high_water_fraction = high_water_fraction;
        self.signature_tolerance_pt = signature_tolerance_pt;
        self
    }

    pub fn high_water_mark_pt(&self) -> f32 {
        self.capacity_pt * self.high_water_fraction
    }

    /// Cost of a body paragraph with `visible_chars` printed characters.
    pub fn paragraph_cost(&self, visible_chars: usize) -> f32 {
        self.paragraph_overhead_pt
            + wrapped_lines(visible_chars, self.body_chars_per_line) as f32
                * self.body_line_height_pt
    }

    /// Cost of a heading with `visible_chars` printed characters.
    pub fn title_cost(&self, visible_chars: usize) -> f32 {
        self.title_overhead_pt
            + wrapped_lines(visible_chars, self.title_chars_per_line) as f32
                * self.title_line_height_pt
    }
}

/// The A4 contract profile used by the service.
pub fn default_capacity_profile() -> CapacityProfile {
    CapacityProfile::from_geometry(&PageGeometry::a4())
}

/// Lines a run of `chars` occupies at `per_line` characters. Empty text still takes a line.
fn wrapped_lines(chars: usize, per_line: u32) -> usize {
    let per_line = per_line.max(1) as usize;
    chars.div_ceil(per_line).max(1)
}

/// Counts printed characters in markup: tags are skipped and each `&…;` entity counts once.
pub fn visible_len(markup: &str) -> usize {
    let mut count = 0;
    let mut in_tag = false;
    let mut in_entity = false;
    for c in markup.chars() {
        match c {
            '<' if !in_entity => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            '&' => {
                in_entity = true;
                count += 1;
            }
            ';' if in_entity => in_entity = false,
            _ if in_entity => {}
            _ => count += 1,
        }
    }
    count
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

//! Greedy single-pass packing of content blocks into fixed-capacity pages.
//!
//! # Rules
//! - Default: a block joins the current page if `used + cost <= capacity`, otherwise the
//!   page is closed and the block opens the next one.
//! - Orphan avoidance: a title arriving after the page passed the high-water mark opens a
//!   new page even when it would fit.
//! - Bounded overflow: the trailing signature block may exceed capacity by at most the
//!   profile's tolerance instead of opening a near-empty last page.
//! - A block larger than a whole page sits alone on its page.
//!
//! Blocks are atomic, so a financial table is never split. Both tolerated capacity violations
//! are recorded on the page (`overflow`) rather than hidden.

use serde::{Deserialize, Serialize};

use crate::document::blocks::ContentBlock;
use crate::document::profile::CapacityProfile;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// Why a page's accumulated cost exceeds capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageOverflow {
    /// A single block larger than the page, placed alone.
    OversizedBlock,
    /// The trailing signature block kept within the tolerance.
    SignatureTolerance,
}

/// One printed sheet. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub blocks: Vec<ContentBlock>,
    pub used_cost: f32,
    pub overflow: Option<PageOverflow>,
}

/// What the packer does with the next block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Append,
    /// Append past capacity, within the signature tolerance.
    AppendOverflowing,
    BreakBefore,
}

// ────────────────────────────────────────────────────────────────────────────
// Packing
// ────────────────────────────────────────────────────────────────────────────

/// Partitions `blocks` into pages under `profile`. Order is preserved and no block is
/// dropped or duplicated; an empty input yields no pages.
pub fn paginate(blocks: &[ContentBlock], profile: &CapacityProfile) -> Vec<Page> {
    let mut pages: Vec<Page> = Vec::new();
    let mut current: Option<Page> = None;
    let last_index = blocks.len().saturating_sub(1);

    for (index, block) in blocks.iter().enumerate() {
        let is_trailing = index == last_index;

        let page = match current.as_mut() {
            Some(page) => page,
            None => {
                current = Some(open_page(pages.len() + 1, block, profile));
                continue;
            }
        };

        match place(page, block, is_trailing, profile) {
            Placement::Append => push_block(page, block),
            Placement::AppendOverflowing => {
                push_block(page, block);
                page.overflow = Some(PageOverflow::SignatureTolerance);
            }
            Placement::BreakBefore => {
                if let Some(done) = current.take() {
                    pages.push(done);
                }
                current = Some(open_page(pages.len() + 1, block, profile));
            }
        }
    }

    if let Some(done) = current {
        pages.push(done);
    }
    pages
}

fn place(
    page: &Page,
    block: &ContentBlock,
    is_trailing: bool,
    profile: &CapacityProfile,
) -> Placement {
    let after = page.used_cost + block.cost();
    let fits = after <= profile.capacity_pt;

    if block.is_title() && page.used_cost > profile.high_water_mark_pt() {
        return Placement::BreakBefore;
    }
    if fits {
        return Placement::Append;
    }
    if block.is_signature()
        && is_trailing
        && page.overflow.is_none()
        && after <= profile.capacity_pt + profile.signature_tolerance_pt
    {
        return Placement::AppendOverflowing;
    }
    Placement::BreakBefore
}

fn open_page(number: usize, first: &ContentBlock, profile: &CapacityProfile) -> Page {
    let used_cost = first.cost();
    Page {
        number,
        blocks: vec![first.clone()],
        used_cost,
        overflow: (used_cost > profile.capacity_pt).then_some(PageOverflow::OversizedBlock),
    }
}

fn push_block(page: &mut Page, block: &ContentBlock) {
    page.used_cost += block.cost();
    page.blocks.push(block.clone());
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::blocks::{ParagraphStyle, TitleLevel};
    use crate::document::profile::default_capacity_profile;

    /// 100pt pages, high-water at 80pt, 10pt signature tolerance.
    fn profile() -> CapacityProfile {
        CapacityProfile {
            capacity_pt: 100.0,
            high_water_fraction: 0.8,
            signature_tolerance_pt: 10.0,
            ..default_capacity_profile()
        }
    }

    fn para(cost: f32) -> ContentBlock {
        ContentBlock::Paragraph {
            markup: format!("p{cost}"),
            style: ParagraphStyle::Body,
            cost,
        }
    }

    fn title(cost: f32) -> ContentBlock {
        ContentBlock::Title {
            text: "DO OBJETO".to_string(),
            level: TitleLevel::Section,
            cost,
        }
    }

    fn table(cost: f32) -> ContentBlock {
        ContentBlock::FinancialTable { rows: vec![], cost }
    }

    fn signature(cost: f32) -> ContentBlock {
        ContentBlock::SignatureBlock {
            place_and_date: String::new(),
            signatories: vec![],
            cost,
        }
    }

    fn costs(pages: &[Page]) -> Vec<Vec<f32>> {
        pages
            .iter()
            .map(|p| p.blocks.iter().map(ContentBlock::cost).collect())
            .collect()
    }

    /// Deterministic pseudo-random block sequences (LCG), ending in a signature.
    fn synthetic_sequences() -> Vec<Vec<ContentBlock>> {
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (seed >> 33) as u32
        };
        (0..200)
            .map(|_| {
                let len = 1 + next() % 30;
                let mut blocks: Vec<ContentBlock> = (0..len)
                    .map(|_| {
                        let cost = (1 + next() % 60) as f32;
                        match next() % 10 {
                            0..=2 => title(cost / 3.0),
                            3 => table(30.0 + cost),
                            4 => ContentBlock::Spacer { cost: 4.0 },
                            5 => para(cost * 2.5),
                            _ => para(cost),
                        }
                    })
                    .collect();
                blocks.push(signature(20.0 + (next() % 40) as f32));
                blocks
            })
            .collect()
    }

    // ── basic transitions ───────────────────────────────────────────────────

    #[test]
    fn test_empty_input_yields_no_pages() {
        assert!(paginate(&[], &profile()).is_empty());
    }

    #[test]
    fn test_default_rule_breaks_when_full() {
        let blocks = vec![para(40.0), para(40.0), para(40.0)];
        let pages = paginate(&blocks, &profile());
        assert_eq!(costs(&pages), vec![vec![40.0, 40.0], vec![40.0]]);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[1].number, 2);
        assert!(pages.iter().all(|p| p.overflow.is_none()));
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        let blocks = vec![para(60.0), para(40.0)];
        let pages = paginate(&blocks, &profile());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].used_cost, 100.0);
    }

    // ── orphan avoidance ────────────────────────────────────────────────────

    #[test]
    fn test_title_past_high_water_starts_new_page() {
        // 85 used > 80 high-water; the 10pt title would fit (95 <= 100) but must move.
        let blocks = vec![para(85.0), title(10.0), para(20.0)];
        let pages = paginate(&blocks, &profile());
        assert_eq!(costs(&pages), vec![vec![85.0], vec![10.0, 20.0]]);
        assert!(pages[1].blocks[0].is_title());
    }

    #[test]
    fn test_title_below_high_water_stays() {
        let blocks = vec![para(70.0), title(10.0)];
        let pages = paginate(&blocks, &profile());
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_paragraph_past_high_water_still_fills() {
        let blocks = vec![para(85.0), para(10.0)];
        let pages = paginate(&blocks, &profile());
        assert_eq!(pages.len(), 1);
    }

    // ── bounded overflow ────────────────────────────────────────────────────

    #[test]
    fn test_trailing_signature_within_tolerance_stays() {
        let blocks = vec![para(70.0), signature(35.0)];
        let pages = paginate(&blocks, &profile());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].overflow, Some(PageOverflow::SignatureTolerance));
        assert_eq!(pages[0].used_cost, 105.0);
    }

    #[test]
    fn test_trailing_signature_beyond_tolerance_moves() {
        let blocks = vec![para(70.0), signature(45.0)];
        let pages = paginate(&blocks, &profile());
        assert_eq!(costs(&pages), vec![vec![70.0], vec![45.0]]);
        assert!(pages.iter().all(|p| p.overflow.is_none()));
    }

    #[test]
    fn test_non_trailing_signature_gets_no_tolerance() {
        let blocks = vec![para(70.0), signature(35.0), para(5.0)];
        let pages = paginate(&blocks, &profile());
        assert_eq!(costs(&pages), vec![vec![70.0], vec![35.0, 5.0]]);
    }

    #[test]
    fn test_zero_tolerance_disables_overflow() {
        let strict = CapacityProfile {
            signature_tolerance_pt: 0.0,
            ..profile()
        };
        let blocks = vec![para(70.0), signature(35.0)];
        assert_eq!(paginate(&blocks, &strict).len(), 2);
    }

    // ── oversized blocks and tables ─────────────────────────────────────────

    #[test]
    fn test_oversized_block_sits_alone() {
        let blocks = vec![para(30.0), para(250.0), para(30.0)];
        let pages = paginate(&blocks, &profile());
        assert_eq!(costs(&pages), vec![vec![30.0], vec![250.0], vec![30.0]]);
        assert_eq!(pages[1].overflow, Some(PageOverflow::OversizedBlock));
        assert_eq!(pages[0].overflow, None);
    }

    #[test]
    fn test_signature_after_oversized_block_gets_no_tolerance() {
        // 101 + 5 = 106 is within 100 + 10, but the page is already over capacity.
        let blocks = vec![para(101.0), signature(5.0)];
        let pages = paginate(&blocks, &profile());
        assert_eq!(costs(&pages), vec![vec![101.0], vec![5.0]]);
        assert_eq!(pages[0].overflow, Some(PageOverflow::OversizedBlock));
        assert_eq!(pages[1].overflow, None);
    }

    #[test]
    fn test_table_that_does_not_fit_moves_whole() {
        let blocks = vec![para(60.0), table(50.0), para(10.0)];
        let pages = paginate(&blocks, &profile());
        assert_eq!(costs(&pages), vec![vec![60.0], vec![50.0, 10.0]]);
    }

    // ── properties over synthetic sequences ─────────────────────────────────

    #[test]
    fn test_conservation() {
        let profile = profile();
        for blocks in synthetic_sequences() {
            let pages = paginate(&blocks, &profile);
            let flattened: Vec<ContentBlock> =
                pages.iter().flat_map(|p| p.blocks.iter().cloned()).collect();
            assert_eq!(flattened, blocks);
            assert!(pages.iter().all(|p| !p.blocks.is_empty()));
        }
    }

    #[test]
    fn test_capacity_bound_outside_documented_overflow() {
        let profile = profile();
        for blocks in synthetic_sequences() {
            for page in paginate(&blocks, &profile) {
                let sum: f32 = page.blocks.iter().map(ContentBlock::cost).sum();
                assert!((sum - page.used_cost).abs() < 1e-3);
                match page.overflow {
                    None => assert!(sum <= profile.capacity_pt + 1e-3),
                    Some(PageOverflow::SignatureTolerance) => {
                        assert!(page.blocks.last().unwrap().is_signature());
                        assert!(sum <= profile.capacity_pt + profile.signature_tolerance_pt + 1e-3);
                    }
                    Some(PageOverflow::OversizedBlock) => assert_eq!(page.blocks.len(), 1),
                }
            }
        }
    }

    #[test]
    fn test_table_atomicity() {
        let profile = profile();
        for blocks in synthetic_sequences() {
            let input_tables = blocks.iter().filter(|b| b.is_financial_table()).count();
            let pages = paginate(&blocks, &profile);
            let placed_tables: usize = pages
                .iter()
                .map(|p| p.blocks.iter().filter(|b| b.is_financial_table()).count())
                .sum();
            assert_eq!(placed_tables, input_tables);
        }
    }

    #[test]
    fn test_no_title_opens_past_high_water() {
        let profile = profile();
        for blocks in synthetic_sequences() {
            for page in paginate(&blocks, &profile) {
                let mut used = 0.0;
                for (i, block) in page.blocks.iter().enumerate() {
                    if i > 0 && block.is_title() {
                        assert!(used <= profile.high_water_mark_pt());
                    }
                    used += block.cost();
                }
            }
        }
    }

    #[test]
    fn test_paginate_is_idempotent() {
        let profile = profile();
        for blocks in synthetic_sequences().into_iter().take(20) {
            assert_eq!(paginate(&blocks, &profile), paginate(&blocks, &profile));
        }
    }
}

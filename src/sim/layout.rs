//! Block layout generation
//!
//! A layout is a band of fully populated base rows plus a handful of
//! randomly placed extra blocks snapped to the same column grid. Candidates
//! that land on an existing block are dropped, never retried, so the number
//! of RNG draws per layout is fixed and a seed always yields the same field.

use rand::Rng;

use super::rect::Rect;
use super::state::Block;
use crate::settings::{GameConfig, LayoutConfig};

/// Column/row grid the blocks snap to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGrid {
    pub columns: u32,
    /// Margin left of the first column (and right of the last)
    pub edge: f32,
    pub block_width: f32,
    pub block_height: f32,
    pub gap: f32,
}

impl BlockGrid {
    pub fn new(field_width: f32, layout: &LayoutConfig) -> Self {
        let pitch = layout.block_width + layout.block_gap;
        let columns = if pitch > 0.0 {
            (field_width / pitch).floor() as u32
        } else {
            0
        };
        let edge = (field_width - pitch * columns as f32 + layout.block_gap) / 2.0;
        Self {
            columns,
            edge,
            block_width: layout.block_width,
            block_height: layout.block_height,
            gap: layout.block_gap,
        }
    }

    /// Rectangle of the cell at (column, row)
    pub fn cell(&self, column: u32, row: u32) -> Rect {
        let x = self.edge + column as f32 * (self.block_width + self.gap);
        let y = row as f32 * (self.block_height + self.gap);
        Rect::from_origin(x, y, self.block_width, self.block_height)
    }
}

/// Build the block field for a new episode
///
/// Expects a config that passed [`GameConfig::validate`]. An inverted
/// durability range is clamped to its minimum.
pub fn generate_layout<R: Rng>(config: &GameConfig, rng: &mut R) -> Vec<Block> {
    let layout = &config.layout;
    let grid = BlockGrid::new(config.field_width, layout);
    let min = layout.durability_min.max(1);
    let durability = min..=layout.durability_max.max(min);

    let mut blocks = Vec::new();

    // Base rows: fill left to right while a whole block (plus gap) still fits
    let last_start = config.field_width - layout.block_width - layout.block_gap;
    for row in layout.base_row_start..layout.base_row_start + layout.base_row_count {
        for column in 0..grid.columns {
            let rect = grid.cell(column, row);
            if rect.x0 >= last_start {
                break;
            }
            blocks.push(Block::new(rect, rng.random_range(durability.clone())));
        }
    }
    let base_count = blocks.len();

    // Extras: one draw per candidate, duplicates dropped
    if grid.columns > 0 && layout.extra_row_span > 0 {
        for _ in 0..layout.extra_blocks {
            let column = rng.random_range(0..grid.columns);
            let row = rng.random_range(0..layout.extra_row_span);
            let item = Block::new(grid.cell(column, row), rng.random_range(durability.clone()));
            if !blocks.iter().any(|b| b.rect == item.rect) {
                blocks.push(item);
            }
        }
    }

    log::debug!(
        "Layout: {} columns, edge {}, {} base + {} extra blocks",
        grid.columns,
        grid.edge,
        base_count,
        blocks.len() - base_count
    );

    blocks
}

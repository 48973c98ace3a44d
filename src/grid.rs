//! Grid State - Ordered Slots and Reconciliation
//!
//! Slots are addressed by linear index (`row * cols + col`). Resizing keeps
//! every index below the new capacity and drops the rest. Shrinking the
//! column count therefore moves surviving items to other visual cells.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::ProductId;
use crate::pricing::PriceOverride;
use crate::styles::StyleVariant;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Slot index {index} out of range (grid has {len} slots)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Which of the product's two images to prefer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Isolated,
    Lifestyle,
}

/// Content of one slot. Refers to the product by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub product_id: ProductId,
    pub style: StyleVariant,
    pub display_mode: DisplayMode,
    #[serde(default)]
    pub price_override: Option<PriceOverride>,
}

impl Placement {
    pub fn new(product_id: ProductId, style: StyleVariant, display_mode: DisplayMode) -> Self {
        Self { product_id, style, display_mode, price_override: None }
    }

    pub fn with_override(mut self, price_override: PriceOverride) -> Self {
        self.price_override = Some(price_override);
        self
    }
}

pub type Slot = Option<Placement>;

/// Reconcile a slot sequence against new grid dimensions.
pub fn resize(current: &[Slot], cols: u32, rows: u32) -> Vec<Slot> {
    let total = cols as usize * rows as usize;
    let mut next: Vec<Slot> = vec![None; total];
    let kept = current.len().min(total);
    next[..kept].clone_from_slice(&current[..kept]);

    let dropped = current[kept..].iter().filter(|s| s.is_some()).count();
    if dropped > 0 {
        warn!(dropped, cols, rows, "grid shrink discarded placed items");
    }
    debug!(from = current.len(), to = total, "grid resized");
    next
}

fn check_index(seq: &[Slot], index: usize) -> Result<(), GridError> {
    if index >= seq.len() {
        return Err(GridError::IndexOutOfRange { index, len: seq.len() });
    }
    Ok(())
}

pub fn place(seq: &[Slot], index: usize, placement: Placement) -> Result<Vec<Slot>, GridError> {
    check_index(seq, index)?;
    let mut next = seq.to_vec();
    next[index] = Some(placement);
    Ok(next)
}

pub fn clear(seq: &[Slot], index: usize) -> Result<Vec<Slot>, GridError> {
    check_index(seq, index)?;
    let mut next = seq.to_vec();
    next[index] = None;
    Ok(next)
}

/// Owned slot sequence for one editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementGrid {
    cols: u32,
    rows: u32,
    slots: Vec<Slot>,
}

impl PlacementGrid {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows, slots: resize(&[], cols, rows) }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Result<Option<&Placement>, GridError> {
        check_index(&self.slots, index)?;
        Ok(self.slots[index].as_ref())
    }

    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Placement)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i, p)))
    }

    /// `(row, col)` of a slot under the current column count
    pub fn cell_of(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        let cols = self.cols.max(1);
        (index / cols, index % cols)
    }

    pub fn resize(&mut self, cols: u32, rows: u32) {
        self.slots = resize(&self.slots, cols, rows);
        self.cols = cols;
        self.rows = rows;
    }

    pub fn place(&mut self, index: usize, placement: Placement) -> Result<(), GridError> {
        check_index(&self.slots, index)?;
        debug!(index, product_id = placement.product_id, style = %placement.style, "slot placed");
        self.slots[index] = Some(placement);
        Ok(())
    }

    pub fn clear(&mut self, index: usize) -> Result<(), GridError> {
        check_index(&self.slots, index)?;
        if self.slots[index].take().is_some() {
            debug!(index, "slot cleared");
        }
        Ok(())
    }

    /// Build a grid from an existing slot list, reconciled to the dimensions
    pub fn from_slots(cols: u32, rows: u32, slots: &[Slot]) -> Self {
        Self { cols, rows, slots: resize(slots, cols, rows) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: ProductId) -> Placement {
        Placement::new(id, StyleVariant::CardClassic, DisplayMode::Isolated)
    }

    #[test]
    fn test_resize_grows_with_empty_tail() {
        let seq = place(&resize(&[], 2, 2), 3, item(7)).unwrap();
        let grown = resize(&seq, 3, 2);
        assert_eq!(grown.len(), 6);
        assert_eq!(grown[3], Some(item(7)));
        assert!(grown[4].is_none() && grown[5].is_none());
    }

    #[test]
    fn test_resize_truncates_destructively() {
        let mut seq = resize(&[], 3, 4);
        seq = place(&seq, 0, item(1)).unwrap();
        seq = place(&seq, 11, item(2)).unwrap();

        let shrunk = resize(&seq, 2, 2);
        assert_eq!(shrunk.len(), 4);
        assert_eq!(shrunk[0], Some(item(1)));

        // Growing back does not restore the dropped item
        let regrown = resize(&shrunk, 3, 4);
        assert!(regrown[11].is_none());
    }

    #[test]
    fn test_place_out_of_range() {
        let seq = resize(&[], 1, 1);
        assert_eq!(
            place(&seq, 1, item(1)),
            Err(GridError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(clear(&seq, 5).is_err());
    }

    #[test]
    fn test_clear_empty_slot_is_noop() {
        let seq = resize(&[], 2, 1);
        assert_eq!(clear(&seq, 0).unwrap(), seq);
    }

    #[test]
    fn test_shrinking_columns_moves_cells() {
        let mut grid = PlacementGrid::new(3, 2);
        grid.place(4, item(9)).unwrap();
        assert_eq!(grid.cell_of(4), (1, 1));

        grid.resize(2, 3);
        assert_eq!(grid.get(4).unwrap(), Some(&item(9)));
        assert_eq!(grid.cell_of(4), (2, 0));
    }

    #[test]
    fn test_occupied_iterates_in_index_order() {
        let mut grid = PlacementGrid::new(2, 2);
        grid.place(3, item(2)).unwrap();
        grid.place(1, item(1)).unwrap();
        let ids: Vec<_> = grid.occupied().map(|(i, p)| (i, p.product_id)).collect();
        assert_eq!(ids, vec![(1, 1), (3, 2)]);
    }
}

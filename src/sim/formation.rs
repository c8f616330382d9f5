//! Invader formation factory

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How invader indices map to grid rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvaderLayout {
    /// Row is `i % 3`. Rows cycle every three indices instead of forming
    /// blocks; since gcd(8, 3) = 1 every cell is still filled once, only the
    /// list order differs from `Rows`.
    #[default]
    Cycling,
    /// Row is `i / 8`: three full rows of eight
    Rows,
}

impl InvaderLayout {
    /// Grid (column, row) for formation index `i`
    pub fn cell(self, i: usize) -> (usize, usize) {
        let col = i % INVADER_COLUMNS;
        let row = match self {
            InvaderLayout::Cycling => i % INVADER_ROWS,
            InvaderLayout::Rows => i / INVADER_COLUMNS,
        };
        (col, row)
    }
}

/// Spawn centers for the whole formation, in index order
pub fn create_invaders(layout: InvaderLayout) -> Vec<Vec2> {
    (0..INVADER_COUNT)
        .map(|i| {
            let (col, row) = layout.cell(i);
            Vec2::new(
                FORMATION_ORIGIN + col as f32 * FORMATION_SPACING,
                FORMATION_ORIGIN + row as f32 * FORMATION_SPACING,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formation_count() {
        assert_eq!(create_invaders(InvaderLayout::Cycling).len(), 24);
        assert_eq!(create_invaders(InvaderLayout::Rows).len(), 24);
    }

    #[test]
    fn test_cycling_layout_matches_modulo_formula() {
        let centers = create_invaders(InvaderLayout::Cycling);
        for (i, center) in centers.iter().enumerate() {
            let x = 30.0 + (i % 8) as f32 * 30.0;
            let y = 30.0 + (i % 3) as f32 * 30.0;
            assert_eq!(*center, Vec2::new(x, y), "index {i}");
        }
        // Index 8 lands back in column 0 but on row 2
        assert_eq!(centers[8], Vec2::new(30.0, 90.0));
    }

    #[test]
    fn test_row_layout_forms_blocks() {
        let centers = create_invaders(InvaderLayout::Rows);
        assert!(centers[..8].iter().all(|c| c.y == 30.0));
        assert!(centers[8..16].iter().all(|c| c.y == 60.0));
        assert!(centers[16..].iter().all(|c| c.y == 90.0));
    }

    #[test]
    fn test_cycling_layout_has_no_duplicate_cells() {
        // gcd(8, 3) == 1, so all 24 (col, row) pairs are distinct
        let mut cells: Vec<_> = (0..24).map(|i| InvaderLayout::Cycling.cell(i)).collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 24);
    }
}

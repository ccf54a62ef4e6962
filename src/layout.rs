//! Per-region breakdown of a [`Packing`].
//!
//! A `Packing` only carries the aggregate count and the split point. This
//! module rebuilds which orientation each region used and the grid each
//! region holds. Piece positions are produced lazily by
//! [`Region::placements`].

use serde::{Deserialize, Serialize};

use crate::grid::best_orientation;
use crate::types::{Dimensions, Orientation, Packing};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub rect: Dimensions,
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
}

/// One tiled region. Placements are generated on demand from the grid size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub area: Dimensions,
    pub orientation: Orientation,
    /// Piece as laid in this region.
    pub laid: Dimensions,
    pub columns: u64,
    pub rows: u64,
}

impl Region {
    fn tile(x: f64, y: f64, area: Dimensions, piece: Dimensions, orientation: Orientation) -> Self {
        let laid = orientation.apply(piece);
        let (columns, rows) = if laid.fits_in(&area) {
            (
                (area.length / laid.length).floor() as u64,
                (area.width / laid.width).floor() as u64,
            )
        } else {
            (0, 0)
        };

        Self {
            x,
            y,
            area,
            orientation,
            laid,
            columns,
            rows,
        }
    }

    pub fn count(&self) -> u64 {
        self.columns.saturating_mul(self.rows)
    }

    /// Row by row from the region's offset.
    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        let rotated = self.orientation == Orientation::Rotated;
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |col| Placement {
                rect: self.laid,
                x: self.x + col as f64 * self.laid.length,
                y: self.y + row as f64 * self.laid.width,
                rotated,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub sheet: Dimensions,
    pub piece: Dimensions,
    pub regions: Vec<Region>,
}

impl Layout {
    /// One region for a simple packing, otherwise top-left, top-right,
    /// bottom-left and bottom-right in that order.
    pub fn from_packing(sheet: Dimensions, piece: Dimensions, packing: &Packing) -> Self {
        let regions = if packing.simple_mode {
            let (orientation, _) = best_orientation(sheet, piece);
            vec![Region::tile(0.0, 0.0, sheet, piece, orientation)]
        } else {
            let sl = packing.best_split.length as f64;
            let sw = packing.best_split.width as f64;
            let offsets = [(0.0, 0.0), (sl, 0.0), (0.0, sw), (sl, sw)];
            packing
                .best_split
                .regions(sheet)
                .into_iter()
                .zip(offsets)
                .map(|(area, (x, y))| {
                    let (orientation, _) = best_orientation(area, piece);
                    Region::tile(x, y, area, piece, orientation)
                })
                .collect()
        };

        Self {
            sheet,
            piece,
            regions,
        }
    }

    /// Whole sheet tiled in a single fixed orientation.
    pub fn uniform(sheet: Dimensions, piece: Dimensions, orientation: Orientation) -> Self {
        Self {
            sheet,
            piece,
            regions: vec![Region::tile(0.0, 0.0, sheet, piece, orientation)],
        }
    }

    pub fn total(&self) -> u64 {
        self.regions
            .iter()
            .fold(0u64, |total, region| total.saturating_add(region.count()))
    }

    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        self.regions.iter().flat_map(|region| region.placements())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::solve;
    use crate::types::SplitPoint;

    /// Every placement inside the sheet and no two overlapping.
    fn assert_layout_valid(layout: &Layout) {
        let placements: Vec<Placement> = layout.placements().collect();
        for (i, p) in placements.iter().enumerate() {
            assert!(
                p.x + p.rect.length <= layout.sheet.length && p.y + p.rect.width <= layout.sheet.width,
                "piece {i} ({} @ ({}, {})) exceeds sheet {}",
                p.rect,
                p.x,
                p.y,
                layout.sheet
            );
        }
        for i in 0..placements.len() {
            for j in (i + 1)..placements.len() {
                let a = &placements[i];
                let b = &placements[j];
                let overlaps = a.x < b.x + b.rect.length
                    && b.x < a.x + a.rect.length
                    && a.y < b.y + b.rect.width
                    && b.y < a.y + a.rect.width;
                assert!(
                    !overlaps,
                    "piece {i} ({} @ ({},{})) overlaps piece {j} ({} @ ({},{}))",
                    a.rect, a.x, a.y, b.rect, b.x, b.y
                );
            }
        }
    }

    #[test]
    fn test_split_layout_regions() {
        let sheet = Dimensions::new(100.0, 100.0);
        let piece = Dimensions::new(30.0, 20.0);
        let packing = solve(sheet, piece);
        assert_eq!(packing.best_split, SplitPoint::new(0, 40));

        let layout = Layout::from_packing(sheet, piece, &packing);
        assert_eq!(layout.regions.len(), 4);
        assert_eq!(layout.total(), packing.max_fit);

        let top_right = &layout.regions[1];
        assert_eq!(top_right.area, Dimensions::new(100.0, 40.0));
        assert_eq!(top_right.orientation, Orientation::Original);
        assert_eq!((top_right.columns, top_right.rows), (3, 2));

        let bottom_right = &layout.regions[3];
        assert_eq!((bottom_right.x, bottom_right.y), (0.0, 40.0));
        assert_eq!(bottom_right.orientation, Orientation::Rotated);
        assert_eq!((bottom_right.columns, bottom_right.rows), (5, 2));
        assert!(bottom_right.placements().all(|p| p.rotated));

        assert_eq!(layout.regions[0].count(), 0);
        assert_eq!(layout.regions[2].count(), 0);
        assert_layout_valid(&layout);
    }

    #[test]
    fn test_simple_layout_single_region() {
        let sheet = Dimensions::new(12.0, 10.0);
        let piece = Dimensions::new(5.0, 3.0);
        let packing = solve(sheet, piece);
        assert!(packing.simple_mode);

        let layout = Layout::from_packing(sheet, piece, &packing);
        assert_eq!(layout.regions.len(), 1);
        assert_eq!(layout.total(), 8);
        assert_eq!(layout.regions[0].orientation, Orientation::Rotated);
        assert_layout_valid(&layout);
    }

    #[test]
    fn test_vertical_cut_layout() {
        let sheet = Dimensions::new(5.0, 4.0);
        let piece = Dimensions::new(3.0, 2.0);
        let packing = solve(sheet, piece);
        let layout = Layout::from_packing(sheet, piece, &packing);
        assert_eq!(layout.total(), 3);

        let bottom_left = &layout.regions[2];
        assert_eq!(bottom_left.area, Dimensions::new(2.0, 4.0));
        assert_eq!(bottom_left.orientation, Orientation::Rotated);
        let bottom_right = &layout.regions[3];
        assert_eq!((bottom_right.x, bottom_right.y), (2.0, 0.0));
        assert_eq!(bottom_right.count(), 2);
        assert_layout_valid(&layout);
    }

    #[test]
    fn test_uniform_stacking() {
        let sheet = Dimensions::new(100.0, 100.0);
        let piece = Dimensions::new(30.0, 20.0);
        let horizontal = Layout::uniform(sheet, piece, Orientation::Original);
        let vertical = Layout::uniform(sheet, piece, Orientation::Rotated);
        assert_eq!(horizontal.total(), 15);
        assert_eq!(vertical.total(), 15);
        assert_eq!(horizontal.regions[0].columns, 3);
        assert_eq!(vertical.regions[0].columns, 5);
        assert_layout_valid(&horizontal);
        assert_layout_valid(&vertical);
    }

    #[test]
    fn test_huge_count_is_not_materialized() {
        let sheet = Dimensions::new(100.0, 100.0);
        // 2^-10 divides 100 exactly: 102400 columns and rows
        let piece = Dimensions::new(0.0009765625, 0.0009765625);
        let layout = Layout::uniform(sheet, piece, Orientation::Original);
        let region = &layout.regions[0];
        assert_eq!((region.columns, region.rows), (102_400, 102_400));
        assert_eq!(layout.total(), 10_485_760_000);
        let first: Vec<Placement> = layout.placements().take(3).collect();
        assert_eq!(first.len(), 3);
        assert_eq!((first[2].x, first[2].y), (0.001953125, 0.0));
    }

    #[test]
    fn test_saturated_total() {
        let sheet = Dimensions::new(100.0, 100.0);
        let piece = Dimensions::new(1e-9, 1e-9);
        let layout = Layout::from_packing(sheet, piece, &solve(sheet, piece));
        assert_eq!(layout.total(), u64::MAX);
    }

    #[test]
    fn test_nothing_fits() {
        let sheet = Dimensions::new(10.0, 10.0);
        let piece = Dimensions::new(20.0, 20.0);
        let layout = Layout::from_packing(sheet, piece, &solve(sheet, piece));
        assert_eq!(layout.total(), 0);
        assert_eq!(layout.placements().count(), 0);
    }
}

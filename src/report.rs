use serde::Serialize;

use crate::grid::fit_dims;
use crate::input::Job;
use crate::layout::Layout;
use crate::solver::{residue, waste_percent};
use crate::types::{Dimensions, Packing, SplitPoint};

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub sheet: Dimensions,
    pub piece: Dimensions,
    pub max_fit: u64,
    pub best_split: SplitPoint,
    pub simple_mode: bool,
    pub residue: f64,
    pub waste_percent: f64,
    /// Whole sheet in `(l, w)`.
    pub horizontal_stacking: u64,
    /// Whole sheet in `(w, l)`.
    pub vertical_stacking: u64,
    pub layout: Layout,
}

impl Report {
    pub fn new(job: &Job, packing: &Packing) -> Self {
        let residue = residue(job.sheet, job.piece, packing.max_fit);
        Self {
            sheet: job.sheet,
            piece: job.piece,
            max_fit: packing.max_fit,
            best_split: packing.best_split,
            simple_mode: packing.simple_mode,
            residue,
            waste_percent: waste_percent(job.sheet, residue),
            horizontal_stacking: fit_dims(job.piece, job.sheet),
            vertical_stacking: fit_dims(job.piece.rotated(), job.sheet),
            layout: Layout::from_packing(job.sheet, job.piece, packing),
        }
    }
}

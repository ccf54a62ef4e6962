use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::best_fit;
use crate::types::{Dimensions, Packing, SplitPoint};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Scan split rows on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub time_limit: Option<Duration>,
}

/// Shared flag a caller can trip to stop a running search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct Solver {
    sheet: Dimensions,
    piece: Dimensions,
    config: SolverConfig,
    cancel: CancelToken,
}

impl Solver {
    pub fn new(sheet: Dimensions, piece: Dimensions, config: SolverConfig) -> Result<Self> {
        if !sheet.is_valid() {
            return Err(Error::InvalidDimensions(format!(
                "sheet {} must be finite and positive",
                sheet
            )));
        }
        if !piece.is_valid() {
            return Err(Error::InvalidDimensions(format!(
                "piece {} must be finite and positive",
                piece
            )));
        }
        Ok(Self {
            sheet,
            piece,
            config,
            cancel: CancelToken::new(),
        })
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn solve(&self) -> Result<Packing> {
        let started = Instant::now();
        let guard = Guard {
            cancel: &self.cancel,
            deadline: self.config.time_limit.map(|limit| (started + limit, limit)),
        };

        tracing::debug!(
            sheet = %self.sheet,
            piece = %self.piece,
            parallel = self.config.parallel,
            "starting split search"
        );

        let packing = if self.config.parallel {
            search_parallel(self.sheet, self.piece, &guard)?
        } else {
            search(self.sheet, self.piece, || guard.check())?
        };

        tracing::debug!(
            max_fit = packing.max_fit,
            split = %packing.best_split,
            simple_mode = packing.simple_mode,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "split search finished"
        );
        Ok(packing)
    }

    pub fn residue(&self, packing: &Packing) -> f64 {
        residue(self.sheet, self.piece, packing.max_fit)
    }
}

struct Guard<'a> {
    cancel: &'a CancelToken,
    deadline: Option<(Instant, Duration)>,
}

impl Guard<'_> {
    fn check(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if let Some((deadline, limit)) = self.deadline
            && Instant::now() >= deadline
        {
            return Err(Error::Timeout(limit.as_millis() as u64));
        }
        Ok(())
    }
}

/// Exhaustive search over whole-unit split points, serial and uninterruptible.
pub fn solve(sheet: Dimensions, piece: Dimensions) -> Packing {
    match search::<Infallible>(sheet, piece, || Ok(())) {
        Ok(packing) => packing,
        Err(never) => match never {},
    }
}

/// Sheet area left over once `max_fit` pieces are cut.
pub fn residue(sheet: Dimensions, piece: Dimensions, max_fit: u64) -> f64 {
    sheet.area() - max_fit as f64 * piece.area()
}

pub fn waste_percent(sheet: Dimensions, residue: f64) -> f64 {
    let area = sheet.area();
    if area <= 0.0 {
        return 0.0;
    }
    residue / area * 100.0
}

#[derive(Debug, Clone, Copy)]
struct RowBest {
    total: u64,
    split: SplitPoint,
}

impl RowBest {
    const EMPTY: RowBest = RowBest {
        total: 0,
        split: SplitPoint::NONE,
    };

    /// Higher total wins; equal totals keep the earlier row.
    fn better(self, other: RowBest) -> RowBest {
        if other.total > self.total
            || (other.total == self.total && other.split.length < self.split.length)
        {
            other
        } else {
            self
        }
    }
}

fn split_total(sheet: Dimensions, piece: Dimensions, split: SplitPoint) -> u64 {
    split
        .regions(sheet)
        .iter()
        .fold(0u64, |total, &region| total.saturating_add(best_fit(region, piece)))
}

/// First split with the highest total along one row of `split_length`.
fn scan_row(sheet: Dimensions, piece: Dimensions, split_length: u64, max_width: u64) -> RowBest {
    let mut best = RowBest {
        total: 0,
        split: SplitPoint::new(split_length, 0),
    };
    for split_width in 0..=max_width {
        let split = SplitPoint::new(split_length, split_width);
        let total = split_total(sheet, piece, split);
        if total > best.total {
            best = RowBest { total, split };
        }
    }
    best
}

fn search_bounds(sheet: Dimensions) -> (u64, u64) {
    (
        sheet.length.max(0.0).floor() as u64,
        sheet.width.max(0.0).floor() as u64,
    )
}

fn search<E>(
    sheet: Dimensions,
    piece: Dimensions,
    mut check: impl FnMut() -> std::result::Result<(), E>,
) -> std::result::Result<Packing, E> {
    let mut packing = Packing::baseline(best_fit(sheet, piece));
    let (max_length, max_width) = search_bounds(sheet);

    for split_length in 0..=max_length {
        check()?;
        let row = scan_row(sheet, piece, split_length, max_width);
        if row.total > packing.max_fit {
            tracing::trace!(total = row.total, split = %row.split, "improved");
            packing = Packing {
                max_fit: row.total,
                best_split: row.split,
                simple_mode: false,
            };
        }
    }
    Ok(packing)
}

fn search_parallel(sheet: Dimensions, piece: Dimensions, guard: &Guard<'_>) -> Result<Packing> {
    let baseline = Packing::baseline(best_fit(sheet, piece));
    let (max_length, max_width) = search_bounds(sheet);

    let best = (0..=max_length)
        .into_par_iter()
        .map(|split_length| -> Result<RowBest> {
            guard.check()?;
            Ok(scan_row(sheet, piece, split_length, max_width))
        })
        .try_reduce(|| RowBest::EMPTY, |a, b| Ok(a.better(b)))?;

    if best.total > baseline.max_fit {
        Ok(Packing {
            max_fit: best.total,
            best_split: best.split,
            simple_mode: false,
        })
    } else {
        Ok(baseline)
    }
}

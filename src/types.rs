use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
}

impl Dimensions {
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    pub fn rotated(&self) -> Self {
        Self {
            length: self.width,
            width: self.length,
        }
    }

    pub fn fits_in(&self, other: &Dimensions) -> bool {
        self.length <= other.length && self.width <= other.width
    }

    /// Larger side first.
    pub fn canonical(&self) -> Self {
        if self.length >= self.width {
            *self
        } else {
            self.rotated()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.length.is_finite() && self.width.is_finite() && self.length > 0.0 && self.width > 0.0
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.length, self.width)
    }
}

/// Which way round a piece is laid into a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// `(l, w)` along the region's `(length, width)`.
    Original,
    /// `(w, l)` along the region's `(length, width)`.
    Rotated,
}

impl Orientation {
    pub fn apply(self, piece: Dimensions) -> Dimensions {
        match self {
            Orientation::Original => piece,
            Orientation::Rotated => piece.rotated(),
        }
    }
}

/// Position of the one lengthwise and one widthwise cut.
///
/// Coordinates are whole units measured from the sheet's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitPoint {
    pub length: u64,
    pub width: u64,
}

impl SplitPoint {
    pub const NONE: SplitPoint = SplitPoint {
        length: 0,
        width: 0,
    };

    pub fn new(length: u64, width: u64) -> Self {
        Self { length, width }
    }

    /// The four regions in top-left, top-right, bottom-left, bottom-right order.
    ///
    /// Areas past the sheet edge come out as zero or negative sizes, which
    /// never fit a piece.
    pub fn regions(&self, sheet: Dimensions) -> [Dimensions; 4] {
        let sl = self.length as f64;
        let sw = self.width as f64;
        [
            Dimensions::new(sl, sw),
            Dimensions::new(sheet.length - sl, sw),
            Dimensions::new(sl, sheet.width - sw),
            Dimensions::new(sheet.length - sl, sheet.width - sw),
        ]
    }
}

impl std::fmt::Display for SplitPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.length, self.width)
    }
}

/// Outcome of one split search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packing {
    pub max_fit: u64,
    pub best_split: SplitPoint,
    /// No split beat tiling the whole sheet in one orientation.
    pub simple_mode: bool,
}

impl Packing {
    pub fn baseline(max_fit: u64) -> Self {
        Self {
            max_fit,
            best_split: SplitPoint::NONE,
            simple_mode: true,
        }
    }
}

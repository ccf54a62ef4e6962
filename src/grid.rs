use crate::types::{Dimensions, Orientation};

/// Number of pieces in a plain axis-aligned grid over the area.
///
/// Zero whenever the piece does not fit even once, including areas with
/// negative sides. Counts past `u64::MAX` saturate.
pub fn fit(piece_length: f64, piece_width: f64, area_length: f64, area_width: f64) -> u64 {
    if area_length < piece_length || area_width < piece_width {
        return 0;
    }
    let cols = (area_length / piece_length).floor() as u64;
    let rows = (area_width / piece_width).floor() as u64;
    cols.saturating_mul(rows)
}

pub fn fit_dims(piece: Dimensions, area: Dimensions) -> u64 {
    fit(piece.length, piece.width, area.length, area.width)
}

/// Better of the two orientations. `Original` wins ties.
pub fn best_orientation(region: Dimensions, piece: Dimensions) -> (Orientation, u64) {
    let original = fit_dims(piece, region);
    let rotated = fit_dims(piece.rotated(), region);
    if rotated > original {
        (Orientation::Rotated, rotated)
    } else {
        (Orientation::Original, original)
    }
}

pub fn best_fit(region: Dimensions, piece: Dimensions) -> u64 {
    best_orientation(region, piece).1
}

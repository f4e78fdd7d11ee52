//! Size hint handling for tiled and floating clients.

use tagwm_ipc::SizeHints;

/// Hints that contradict themselves are ignored entirely.
pub fn is_valid(hints: &SizeHints) -> bool {
    if hints.max_width != 0 && hints.max_width < hints.min_width {
        return false;
    }
    if hints.max_height != 0 && hints.max_height < hints.min_height {
        return false;
    }
    if !hints.min_aspect.is_finite() || !hints.max_aspect.is_finite() {
        return false;
    }
    hints.min_aspect >= 0.0 && hints.max_aspect >= 0.0
}

pub fn is_fixed(hints: &SizeHints) -> bool {
    is_valid(hints)
        && hints.max_width != 0
        && hints.max_height != 0
        && hints.max_width == hints.min_width
        && hints.max_height == hints.min_height
}

/// Snap a client size to its base size, increments, aspect limits and bounds.
pub fn apply(hints: &SizeHints, width: u32, height: u32) -> (u32, u32) {
    if !is_valid(hints) {
        tracing::debug!("Ignoring malformed size hints: {:?}", hints);
        return (width.max(1), height.max(1));
    }

    let base_w = hints.base_width as i64;
    let base_h = hints.base_height as i64;
    let mut w = width as i64;
    let mut h = height as i64;

    // ICCCM 4.1.2.3: base size only stands in for min size when both are equal
    let base_is_min = hints.base_width == hints.min_width && hints.base_height == hints.min_height;
    if !base_is_min {
        w -= base_w;
        h -= base_h;
    }

    if hints.min_aspect > 0.0 && hints.max_aspect > 0.0 && w > 0 && h > 0 {
        if hints.max_aspect < w as f32 / h as f32 {
            w = (h as f32 * hints.max_aspect + 0.5) as i64;
        } else if hints.min_aspect < h as f32 / w as f32 {
            h = (w as f32 * hints.min_aspect + 0.5) as i64;
        }
    }

    if base_is_min {
        w -= base_w;
        h -= base_h;
    }

    if hints.inc_width > 0 {
        w -= w.rem_euclid(hints.inc_width as i64);
    }
    if hints.inc_height > 0 {
        h -= h.rem_euclid(hints.inc_height as i64);
    }

    w = (w + base_w).max(hints.min_width as i64);
    h = (h + base_h).max(hints.min_height as i64);

    if hints.max_width > 0 {
        w = w.min(hints.max_width as i64);
    }
    if hints.max_height > 0 {
        h = h.min(hints.max_height as i64);
    }

    (w.max(1) as u32, h.max(1) as u32)
}

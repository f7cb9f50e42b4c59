// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

/// Size of the floor-plan canvas and the smallest allowed rack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasBounds {
    /// Canvas width in canvas units.
    pub width: f64,
    /// Canvas height in canvas units.
    pub height: f64,
    /// Minimum rack width and height.
    pub min_size: f64,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            min_size: 40.0,
        }
    }
}

impl CanvasBounds {
    /// Canvas size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Largest origin a rack may have.
    #[must_use]
    pub fn max_origin(&self) -> Point {
        Point::new(
            (self.width - self.min_size).max(0.0),
            (self.height - self.min_size).max(0.0),
        )
    }

    /// Clamps a candidate rack origin into `[0, W − min] × [0, H − min]`.
    ///
    /// Non-finite components are treated as `0`.
    #[must_use]
    pub fn clamp_origin(&self, candidate: Point) -> Point {
        let max = self.max_origin();
        let clamp = |v: f64, hi: f64| if v.is_finite() { v.clamp(0.0, hi) } else { 0.0 };
        Point::new(clamp(candidate.x, max.x), clamp(candidate.y, max.y))
    }

    /// Returns `true` if `origin` already satisfies [`CanvasBounds::clamp_origin`].
    #[must_use]
    pub fn origin_in_bounds(&self, origin: Point) -> bool {
        self.clamp_origin(origin) == origin
    }

    /// Returns `true` if a rack occupying `rect` has at least the minimum size.
    #[must_use]
    pub fn meets_min_size(&self, rect: Rect) -> bool {
        rect.width() >= self.min_size && rect.height() >= self.min_size
    }
}

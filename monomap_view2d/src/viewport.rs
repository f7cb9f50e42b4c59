// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::surface::CanvasSurface;

/// How [`CanvasViewport::fit_into`] positions the canvas inside the host rect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Center the canvas within the host rect.
    #[default]
    Center,
    /// Align the canvas's top-left corner with the host rect's origin.
    AlignMin,
}

/// Placement of the floor-plan canvas on screen.
///
/// `CanvasViewport` tracks where the canvas element currently sits on screen
/// (its layout origin after scrolling), an extra pan in screen units and a
/// uniform zoom. Together they give the canvas → screen transform reported
/// through [`CanvasSurface`].
///
/// Until [`CanvasViewport::set_screen_origin`] is called with `Some`, the
/// viewport counts as unmounted and reports no transform.
#[derive(Clone, Debug)]
pub struct CanvasViewport {
    canvas_size: Size,
    screen_origin: Option<Point>,
    zoom: f64,
    pan: Vec2,
    min_zoom: f64,
    max_zoom: f64,
    fit_mode: FitMode,
    canvas_to_screen: Affine,
}

impl CanvasViewport {
    /// Creates an unmounted viewport for a canvas of `canvas_size` units.
    ///
    /// - Initial zoom is `1.0`, clamped to `[0.1, 10.0]`.
    /// - Initial pan is zero.
    #[must_use]
    pub fn new(canvas_size: Size) -> Self {
        let mut vp = Self {
            canvas_size,
            screen_origin: None,
            zoom: 1.0,
            pan: Vec2::ZERO,
            min_zoom: 0.1,
            max_zoom: 10.0,
            fit_mode: FitMode::default(),
            canvas_to_screen: Affine::IDENTITY,
        };
        vp.rebuild_transform();
        vp
    }

    /// Size of the canvas in canvas units.
    #[must_use]
    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Records where the canvas element's top-left corner is on screen.
    ///
    /// Hosts call this after layout and whenever the surrounding container
    /// scrolls. `None` marks the canvas as unmounted.
    pub fn set_screen_origin(&mut self, origin: Option<Point>) {
        if self.screen_origin == origin {
            return;
        }
        self.screen_origin = origin;
        self.rebuild_transform();
    }

    /// Returns `true` once the canvas has an on-screen position.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.screen_origin.is_some()
    }

    /// Current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset in screen units.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The range is normalized so that `min_zoom <= max_zoom` and the current
    /// zoom is clamped into it.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Sets the zoom factor, clamped into the configured range.
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.rebuild_transform();
    }

    /// Pans the canvas by `delta` screen units.
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.pan += delta;
        self.rebuild_transform();
    }

    /// Zooms by `factor` keeping the canvas point under `anchor` (screen
    /// coordinates) fixed on screen.
    pub fn zoom_about_screen_point(&mut self, anchor: Point, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let before = self.canvas_to_screen.inverse() * anchor;
        self.zoom = new_zoom;
        self.rebuild_transform();
        let after = self.canvas_to_screen * before;
        self.pan_by(anchor - after);
    }

    /// Sets how [`CanvasViewport::fit_into`] positions the canvas.
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        self.fit_mode = mode;
    }

    /// Zooms and pans so the whole canvas fits inside `host` (screen
    /// coordinates), preserving aspect ratio.
    ///
    /// The viewport must be mounted; otherwise this is a no-op.
    pub fn fit_into(&mut self, host: Rect) {
        let Some(origin) = self.screen_origin else {
            return;
        };
        if host.width() <= 0.0 || host.height() <= 0.0 {
            return;
        }
        if self.canvas_size.width <= 0.0 || self.canvas_size.height <= 0.0 {
            return;
        }
        let sx = host.width() / self.canvas_size.width;
        let sy = host.height() / self.canvas_size.height;
        self.zoom = sx.min(sy).clamp(self.min_zoom, self.max_zoom);

        let scaled = Size::new(
            self.canvas_size.width * self.zoom,
            self.canvas_size.height * self.zoom,
        );
        let target = match self.fit_mode {
            FitMode::Center => Point::new(
                host.x0 + (host.width() - scaled.width) / 2.0,
                host.y0 + (host.height() - scaled.height) / 2.0,
            ),
            FitMode::AlignMin => host.origin(),
        };
        self.pan = target - origin;
        self.rebuild_transform();
    }

    /// The canvas rectangle in screen coordinates, if mounted.
    #[must_use]
    pub fn canvas_screen_rect(&self) -> Option<Rect> {
        self.screen_origin?;
        let rect = Rect::from_origin_size(Point::ORIGIN, self.canvas_size);
        Some(self.canvas_to_screen.transform_rect_bbox(rect))
    }

    fn rebuild_transform(&mut self) {
        let origin = self.screen_origin.unwrap_or(Point::ORIGIN).to_vec2();
        // Canvas → screen: scale, then move to the element origin plus pan.
        self.canvas_to_screen = Affine::translate(origin + self.pan) * Affine::scale(self.zoom);
    }
}

impl CanvasSurface for CanvasViewport {
    fn screen_transform(&self) -> Option<Affine> {
        self.screen_origin.map(|_| self.canvas_to_screen)
    }
}

// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point};

/// The drawing surface the floor plan is rendered into.
pub trait CanvasSurface {
    /// Current canvas → screen transform, or `None` while the surface is not
    /// mounted and has no geometry.
    fn screen_transform(&self) -> Option<Affine>;
}

impl<S: CanvasSurface + ?Sized> CanvasSurface for &S {
    fn screen_transform(&self) -> Option<Affine> {
        (**self).screen_transform()
    }
}

/// A surface whose transform is fixed, e.g. one reported by the host each frame.
impl CanvasSurface for Affine {
    fn screen_transform(&self) -> Option<Affine> {
        Some(*self)
    }
}

/// Maps a screen-space position into canvas space.
///
/// Returns `None` if the surface is not mounted or its transform cannot be
/// inverted (zero scale); callers must not act on the pointer in that case.
#[must_use]
pub fn to_canvas(surface: &impl CanvasSurface, screen: Point) -> Option<Point> {
    let transform = surface.screen_transform()?;
    let det = transform.determinant();
    if !det.is_finite() || det == 0.0 {
        return None;
    }
    Some(transform.inverse() * screen)
}

/// The button whose state changed in a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Main button, usually the left mouse button or a touch contact.
    Primary,
    /// Usually the right mouse button.
    Secondary,
    /// Usually the wheel/middle button.
    Auxiliary,
    /// Any other button, by DOM-style index.
    Other(u16),
}

impl PointerButton {
    /// Maps a DOM-style button index (`0` primary, `1` auxiliary, `2` secondary).
    #[must_use]
    pub fn from_index(index: u16) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            n => Self::Other(n),
        }
    }
}

bitflags::bitflags! {
    /// Buttons held down while a pointer event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Main button.
        const PRIMARY = 1;
        /// Right button.
        const SECONDARY = 1 << 1;
        /// Middle button.
        const AUXILIARY = 1 << 2;
    }
}

/// A pointer event in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Position in screen (client) coordinates.
    pub position: Point,
    /// Button that was pressed or released; for moves, the primary button.
    pub button: PointerButton,
    /// Buttons held during the event.
    pub buttons: PointerButtons,
}

impl PointerEvent {
    /// A primary-button press at `position`.
    #[must_use]
    pub fn primary_down(position: Point) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
            buttons: PointerButtons::PRIMARY,
        }
    }

    /// A move at `position` with `buttons` held.
    #[must_use]
    pub fn moved(position: Point, buttons: PointerButtons) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
            buttons,
        }
    }

    /// A primary-button release at `position`.
    #[must_use]
    pub fn primary_up(position: Point) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
            buttons: PointerButtons::empty(),
        }
    }

    /// Returns `true` if the event is a press of the primary button.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Vec2};

    use super::{CanvasSurface, PointerButton, to_canvas};

    struct Unmounted;

    impl CanvasSurface for Unmounted {
        fn screen_transform(&self) -> Option<Affine> {
            None
        }
    }

    #[test]
    fn unmounted_surface_yields_none() {
        assert_eq!(to_canvas(&Unmounted, Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn degenerate_transform_yields_none() {
        assert_eq!(to_canvas(&Affine::scale(0.0), Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn offset_and_scaled_surface_inverts_exactly() {
        // Canvas laid out at (30, 40) on screen and drawn at 1.5x.
        let surface = Affine::translate(Vec2::new(30.0, 40.0)) * Affine::scale(1.5);
        let canvas = to_canvas(&surface, Point::new(60.0, 55.0)).unwrap();
        assert!((canvas.x - 20.0).abs() < 1e-9);
        assert!((canvas.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rotated_surface_is_supported() {
        let surface = Affine::rotate(core::f64::consts::FRAC_PI_2);
        let screen = surface * Point::new(5.0, 7.0);
        let canvas = to_canvas(&surface, screen).unwrap();
        assert!((canvas.x - 5.0).abs() < 1e-9);
        assert!((canvas.y - 7.0).abs() < 1e-9);
    }

    #[test]
    fn dom_button_indices_map_to_buttons() {
        assert_eq!(PointerButton::from_index(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_index(1), PointerButton::Auxiliary);
        assert_eq!(PointerButton::from_index(2), PointerButton::Secondary);
        assert_eq!(PointerButton::from_index(4), PointerButton::Other(4));
    }
}

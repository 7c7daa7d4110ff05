//! Interactive color picker input mapping
//!
//! Maps pointer positions on the picker's controls to HSV updates:
//!
//! - [`PickerControl::SatValPlane`]: x to saturation, y to value (top is
//!   brightest)
//! - [`PickerControl::HueStrip`]: x to hue
//! - [`PickerControl::SaturationStrip`] / [`PickerControl::ValueStrip`]:
//!   x to saturation / value
//!
//! A drag session begins on pointer-down over a control and keeps
//! tracking the pointer even after it leaves the control, until
//! pointer-up or cancel. Positions outside the control clamp to its
//! edges. Only one session can be active, enforced by [`DragState`].

use crate::colorspace::{
    FALLBACK_HSV, Hsv, Rgb, contrast_for, hex_to_rgb, hsv_to_rgb, rgb_to_hsv, wrap_hue,
};
use crate::palette::{Palette, generate_all_from_rgb};

/// Picker control a drag session is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerControl {
    SatValPlane,
    HueStrip,
    SaturationStrip,
    ValueStrip,
}

/// Pointer position in host coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen bounds of a control, in the same coordinates as [`Point`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ControlBounds {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Horizontal position as a fraction of the width, clamped to `[0, 1]`.
    pub fn fraction_x(&self, x: f64) -> f64 {
        fraction(x - self.left, self.width)
    }

    /// Vertical position as a fraction of the height, clamped to `[0, 1]`.
    pub fn fraction_y(&self, y: f64) -> f64 {
        fraction(y - self.top, self.height)
    }
}

fn fraction(offset: f64, extent: f64) -> f64 {
    if extent.is_nan() || extent <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / extent).clamp(0.0, 1.0)
}

/// Drag session state; the active variant carries the captured bounds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingSatVal(ControlBounds),
    DraggingHue(ControlBounds),
    DraggingSaturation(ControlBounds),
    DraggingValue(ControlBounds),
}

impl DragState {
    fn begin(control: PickerControl, bounds: ControlBounds) -> Self {
        match control {
            PickerControl::SatValPlane => DragState::DraggingSatVal(bounds),
            PickerControl::HueStrip => DragState::DraggingHue(bounds),
            PickerControl::SaturationStrip => DragState::DraggingSaturation(bounds),
            PickerControl::ValueStrip => DragState::DraggingValue(bounds),
        }
    }

    /// Control being dragged, if any
    pub fn control(&self) -> Option<PickerControl> {
        match self {
            DragState::Idle => None,
            DragState::DraggingSatVal(_) => Some(PickerControl::SatValPlane),
            DragState::DraggingHue(_) => Some(PickerControl::HueStrip),
            DragState::DraggingSaturation(_) => Some(PickerControl::SaturationStrip),
            DragState::DraggingValue(_) => Some(PickerControl::ValueStrip),
        }
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self, DragState::Idle)
    }
}

/// A committed color change
#[derive(Debug, Clone, PartialEq)]
pub struct PickerChange {
    pub hsv: Hsv,
    /// Lowercase `#rrggbb`
    pub hex: String,
}

/// Color picker state: the committed color, the hex text field and the
/// active drag session.
///
/// HSV is the source of truth while dragging, so the hue survives passing
/// through fully desaturated colors.
#[derive(Debug, Clone)]
pub struct ColorPicker {
    hsv: Hsv,
    rgb: Rgb,
    hex_input: String,
    drag: DragState,
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::from_hsv(FALLBACK_HSV)
    }
}

impl ColorPicker {
    /// Create a picker showing `hex`; invalid text starts at the fallback
    /// color.
    pub fn new(hex: &str) -> Self {
        match hex_to_rgb(hex) {
            Some(rgb) => Self::from_hsv(rgb_to_hsv(rgb)),
            None => Self::default(),
        }
    }

    pub fn from_hsv(hsv: Hsv) -> Self {
        let rgb = hsv_to_rgb(hsv);
        Self {
            hsv,
            rgb,
            hex_input: rgb.to_hex(),
            drag: DragState::Idle,
        }
    }

    pub fn hsv(&self) -> Hsv {
        self.hsv
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Committed color as lowercase `#rrggbb`
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }

    /// Text currently in the hex field, which may be a partial edit
    pub fn hex_input(&self) -> &str {
        &self.hex_input
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Black or white text color for labels drawn on the committed color
    pub fn contrast(&self) -> &'static str {
        contrast_for(self.rgb)
    }

    /// Recompute all harmony palettes for the committed color.
    pub fn palettes(&self) -> Vec<Palette> {
        generate_all_from_rgb(self.rgb)
    }

    /// Replace the color programmatically.
    pub fn set_hsv(&mut self, hsv: Hsv) -> PickerChange {
        let hsv = Hsv::new(
            wrap_hue(hsv.h),
            hsv.s.clamp(0.0, 100.0),
            hsv.v.clamp(0.0, 100.0),
        );
        self.commit(hsv)
    }

    fn commit(&mut self, hsv: Hsv) -> PickerChange {
        self.hsv = hsv;
        self.rgb = hsv_to_rgb(hsv);
        self.hex_input = self.rgb.to_hex();
        PickerChange {
            hsv,
            hex: self.hex_input.clone(),
        }
    }

    /// Apply the sample at `point` for the active session.
    fn apply(&mut self, point: Point) -> Option<PickerChange> {
        let mut hsv = self.hsv;
        match self.drag {
            DragState::Idle => return None,
            DragState::DraggingSatVal(b) => {
                hsv.s = b.fraction_x(point.x) * 100.0;
                hsv.v = (1.0 - b.fraction_y(point.y)) * 100.0;
            }
            DragState::DraggingHue(b) => {
                // The right edge is 360, the same hue as 0
                hsv.h = wrap_hue(b.fraction_x(point.x) * 360.0);
            }
            DragState::DraggingSaturation(b) => {
                hsv.s = b.fraction_x(point.x) * 100.0;
            }
            DragState::DraggingValue(b) => {
                hsv.v = b.fraction_x(point.x) * 100.0;
            }
        }
        Some(self.commit(hsv))
    }

    /// Begin a drag session on `control` and apply the color under the
    /// pointer.
    ///
    /// Ignored (returns `None`) while another session is active.
    pub fn pointer_down(
        &mut self,
        control: PickerControl,
        bounds: ControlBounds,
        point: Point,
    ) -> Option<PickerChange> {
        if self.drag.is_dragging() {
            tracing::trace!(?control, "pointer-down ignored during active drag");
            return None;
        }
        self.drag = DragState::begin(control, bounds);
        self.apply(point)
    }

    /// Track the pointer during a session. No-op when idle.
    pub fn pointer_move(&mut self, point: Point) -> Option<PickerChange> {
        self.apply(point)
    }

    /// Apply the final sample and end the session. No-op when idle.
    pub fn pointer_up(&mut self, point: Point) -> Option<PickerChange> {
        let change = self.apply(point);
        self.drag = DragState::Idle;
        change
    }

    /// End a session without applying anything.
    pub fn cancel(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Store typed hex text and commit it if it is a complete color.
    ///
    /// The text is kept verbatim so partial edits stay visible. The color
    /// updates only for exactly six hex digits with an optional leading
    /// `#`. Returns the change only when the committed color differs
    /// from the previous one.
    pub fn set_hex_input(&mut self, text: &str) -> Option<PickerChange> {
        self.hex_input = text.to_string();
        let Some(rgb) = hex_to_rgb(text) else {
            tracing::trace!(input = text, "incomplete hex input");
            return None;
        };
        if rgb == self.rgb {
            return None;
        }
        self.hsv = rgb_to_hsv(rgb);
        self.rgb = rgb;
        Some(PickerChange {
            hsv: self.hsv,
            hex: rgb.to_hex(),
        })
    }
}

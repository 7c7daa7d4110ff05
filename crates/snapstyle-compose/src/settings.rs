//! Canvas composition settings
//!
//! Everything the compositor needs apart from the source image: the
//! background, the frame style, the output size and the user's pan/zoom.
//! All types deserialize with `#[serde(default)]`, so a partial JSON file
//! fills the missing fields from the defaults below.

use crate::{ComposeError, ComposeResult};
use serde::{Deserialize, Serialize};
use snapstyle_color::Rgb;

/// Default first background color
pub const DEFAULT_COLOR1: Rgb = Rgb::new(0x66, 0x7e, 0xea);

/// Default second (gradient end) background color
pub const DEFAULT_COLOR2: Rgb = Rgb::new(0x76, 0x4b, 0xa2);

/// Default gradient angle in degrees
pub const DEFAULT_ANGLE: f64 = 135.0;

/// Default grain intensity (off)
pub const DEFAULT_GRAIN: f64 = 0.0;

/// Default corner radius in pixels
pub const DEFAULT_CORNER_RADIUS: f64 = 16.0;

/// Default shadow blur in pixels
pub const DEFAULT_SHADOW_BLUR: f64 = 40.0;

/// Default outer padding in pixels
pub const DEFAULT_PADDING: f64 = 64.0;

/// Default shadow opacity
pub const DEFAULT_SHADOW_OPACITY: f64 = 0.35;

/// Default horizontal shadow offset in pixels
pub const DEFAULT_SHADOW_OFFSET_X: f64 = 0.0;

/// Default vertical shadow offset in pixels
pub const DEFAULT_SHADOW_OFFSET_Y: f64 = 10.0;

/// Preview width assumed when the host has not measured its preview
pub const DEFAULT_PREVIEW_WIDTH: f64 = 600.0;

/// Background fill kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Solid,
    #[default]
    Gradient,
}

/// Background parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    pub kind: BackgroundKind,
    /// Solid color, or gradient start
    pub color1: Rgb,
    /// Gradient end; ignored for solid backgrounds
    pub color2: Rgb,
    /// Gradient direction in degrees, clockwise from left-to-right
    pub angle: f64,
    /// Grain intensity in `[0, 1]`
    pub grain: f64,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::default(),
            color1: DEFAULT_COLOR1,
            color2: DEFAULT_COLOR2,
            angle: DEFAULT_ANGLE,
            grain: DEFAULT_GRAIN,
        }
    }
}

/// Frame style around the source image, in output pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub corner_radius: f64,
    pub shadow_blur: f64,
    pub padding: f64,
    /// Shadow opacity in `[0, 1]`
    pub shadow_opacity: f64,
    pub shadow_offset_x: f64,
    pub shadow_offset_y: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            corner_radius: DEFAULT_CORNER_RADIUS,
            shadow_blur: DEFAULT_SHADOW_BLUR,
            padding: DEFAULT_PADDING,
            shadow_opacity: DEFAULT_SHADOW_OPACITY,
            shadow_offset_x: DEFAULT_SHADOW_OFFSET_X,
            shadow_offset_y: DEFAULT_SHADOW_OFFSET_Y,
        }
    }
}

/// Named output sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Square,
    Portrait,
    Story,
    Landscape,
    #[serde(rename = "linkedin")]
    LinkedIn,
    Dribbble,
    Desktop,
}

impl Preset {
    /// All presets, in menu order
    pub const ALL: [Preset; 7] = [
        Preset::Square,
        Preset::Portrait,
        Preset::Story,
        Preset::Landscape,
        Preset::LinkedIn,
        Preset::Dribbble,
        Preset::Desktop,
    ];

    /// Width and height in pixels
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Preset::Square => (1080, 1080),
            Preset::Portrait => (1080, 1350),
            Preset::Story => (1080, 1920),
            Preset::Landscape => (1600, 900),
            Preset::LinkedIn => (1200, 627),
            Preset::Dribbble => (1600, 1200),
            Preset::Desktop => (1920, 1080),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Square => "Square",
            Preset::Portrait => "Portrait",
            Preset::Story => "Story",
            Preset::Landscape => "Landscape",
            Preset::LinkedIn => "LinkedIn",
            Preset::Dribbble => "Dribbble",
            Preset::Desktop => "Desktop",
        }
    }
}

/// Largest accepted output width or height, in pixels
pub const MAX_OUTPUT_DIMENSION: i32 = 16384;

/// Output canvas size
///
/// Custom sizes are signed so that bad user input can be represented and
/// rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSize {
    Preset(Preset),
    Custom { width: i32, height: i32 },
}

impl Default for OutputSize {
    fn default() -> Self {
        OutputSize::Preset(Preset::default())
    }
}

impl OutputSize {
    /// Resolved width and height, possibly non-positive for custom sizes
    pub fn resolve(&self) -> (i32, i32) {
        match *self {
            OutputSize::Preset(p) => {
                let (w, h) = p.dimensions();
                (w as i32, h as i32)
            }
            OutputSize::Custom { width, height } => (width, height),
        }
    }

    /// Validated width and height.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::InvalidOutputSize`] if either dimension is
    /// zero, negative or above [`MAX_OUTPUT_DIMENSION`].
    pub fn dimensions(&self) -> ComposeResult<(u32, u32)> {
        let (width, height) = self.resolve();
        let valid = 1..=MAX_OUTPUT_DIMENSION;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(ComposeError::InvalidOutputSize { width, height });
        }
        Ok((width as u32, height as u32))
    }
}

/// Pan and zoom of the source image
///
/// Pan offsets are in preview pixels; the compositor rescales them to the
/// output size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

/// Measured size of the host's live preview
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PreviewViewport {
    /// Rendered preview width in pixels, once the host has measured it
    pub measured_width: Option<f64>,
}

impl PreviewViewport {
    pub fn measured(width: f64) -> Self {
        Self {
            measured_width: Some(width),
        }
    }

    /// Preview width used for pan rescaling.
    ///
    /// Falls back to [`DEFAULT_PREVIEW_WIDTH`] when unmeasured or when the
    /// measurement is not a positive number.
    pub fn width(&self) -> f64 {
        match self.measured_width {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => DEFAULT_PREVIEW_WIDTH,
        }
    }

    /// Factor converting preview pixels to output pixels.
    pub fn pan_scale(&self, output_width: u32) -> f64 {
        output_width as f64 / self.width()
    }
}

/// Complete canvas composition settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub background: Background,
    pub style: Style,
    pub output: OutputSize,
    pub position: Position,
}

fn check_finite(name: &str, value: f64) -> ComposeResult<()> {
    if !value.is_finite() {
        return Err(ComposeError::InvalidSetting(format!(
            "{name} must be finite, got {value}"
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> ComposeResult<()> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(ComposeError::InvalidSetting(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    Ok(())
}

fn check_unit(name: &str, value: f64) -> ComposeResult<()> {
    check_finite(name, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ComposeError::InvalidSetting(format!(
            "{name} must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}

impl CanvasSettings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> ComposeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings to pretty-printed JSON.
    pub fn to_json(&self) -> ComposeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validated output dimensions; see [`OutputSize::dimensions`].
    pub fn output_dimensions(&self) -> ComposeResult<(u32, u32)> {
        self.output.dimensions()
    }

    /// Check background, style and position parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::InvalidSetting`] for non-finite values,
    /// opacity or grain outside `[0, 1]`, negative radius, blur or
    /// padding, or a non-positive zoom.
    pub fn validate(&self) -> ComposeResult<()> {
        let bg = &self.background;
        check_finite("background angle", bg.angle)?;
        check_unit("grain", bg.grain)?;

        let st = &self.style;
        check_non_negative("corner radius", st.corner_radius)?;
        check_non_negative("shadow blur", st.shadow_blur)?;
        check_non_negative("padding", st.padding)?;
        check_unit("shadow opacity", st.shadow_opacity)?;
        check_finite("shadow offset x", st.shadow_offset_x)?;
        check_finite("shadow offset y", st.shadow_offset_y)?;

        let pos = &self.position;
        check_finite("pan x", pos.x)?;
        check_finite("pan y", pos.y)?;
        check_finite("zoom", pos.scale)?;
        if pos.scale <= 0.0 {
            return Err(ComposeError::InvalidSetting(format!(
                "zoom must be positive, got {}",
                pos.scale
            )));
        }
        Ok(())
    }
}

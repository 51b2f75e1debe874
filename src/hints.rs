//! Placement and sizing configuration for a page quad.
//!
//! [`GeometryHints`] tells a [`PageQuad`](crate::PageQuad) where the quad lives,
//! how large it nominally is, which way it faces, and how the document's own
//! aspect ratio should bend those nominal dimensions.
//!
//! ```
//! use pagequad::{AspectRatioPolicy, Color, GeometryHints, Vec3};
//!
//! let hints = GeometryHints::new()
//!     .position(Vec3::new(0.0, 1.0, -3.0))
//!     .width_vec(Vec3::X * 2.0)
//!     .height_vec(Vec3::Y * 2.0)
//!     .background_color(Color::rgb(0.9, 0.9, 0.85))
//!     .aspect_ratio_policy(AspectRatioPolicy::ResizeWidthToMatchAspect)
//!     .resolution(2048, 2048);
//!
//! assert!(hints.validate().is_ok());
//! ```

use crate::error::PageError;
use glam::{Vec3, Vec4};

/// An RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Quantizes to an 8-bit RGBA pixel, clamping out-of-range components.
    pub fn to_rgba8(self) -> image::Rgba<u8> {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        image::Rgba([q(self.r), q(self.g), q(self.b), q(self.a)])
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Self::rgba(v.x, v.y, v.z, v.w)
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

/// How the nominal quad size reacts to the document's aspect ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AspectRatioPolicy {
    /// Keep the nominal width, derive the height from the page aspect.
    #[default]
    ResizeHeightToMatchAspect,
    /// Keep the nominal height, derive the width from the page aspect.
    ResizeWidthToMatchAspect,
    /// Use the nominal width and height as-is. Pages may appear stretched.
    IgnoreDocumentAspectRatio,
}

/// Placement, orientation, fill and raster resolution for a page quad.
///
/// `width_vec` and `height_vec` are both direction and nominal length of the
/// quad's edges. Their cross product is the quad's front-facing normal.
///
/// # Default Values
///
/// - `position`: origin
/// - `width_vec`: `+X`, `height_vec`: `+Y` (a unit quad facing `+Z`)
/// - `background_color`: opaque white
/// - `aspect_ratio_policy`: [`AspectRatioPolicy::ResizeHeightToMatchAspect`]
/// - `width_resolution` / `height_resolution`: 1024
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryHints {
    pub position: Vec3,
    pub width_vec: Vec3,
    pub height_vec: Vec3,
    pub background_color: Color,
    pub aspect_ratio_policy: AspectRatioPolicy,
    pub width_resolution: u32,
    pub height_resolution: u32,
}

impl Default for GeometryHints {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            width_vec: Vec3::X,
            height_vec: Vec3::Y,
            background_color: Color::WHITE,
            aspect_ratio_policy: AspectRatioPolicy::default(),
            width_resolution: 1024,
            height_resolution: 1024,
        }
    }
}

impl GeometryHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn width_vec(mut self, width_vec: Vec3) -> Self {
        self.width_vec = width_vec;
        self
    }

    pub fn height_vec(mut self, height_vec: Vec3) -> Self {
        self.height_vec = height_vec;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn aspect_ratio_policy(mut self, policy: AspectRatioPolicy) -> Self {
        self.aspect_ratio_policy = policy;
        self
    }

    /// Sets the raster size requested from providers that can render at
    /// arbitrary resolution.
    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.width_resolution = width;
        self.height_resolution = height;
        self
    }

    /// The quad's front-facing normal, `normalize(width_vec × height_vec)`.
    pub fn normal(&self) -> Vec3 {
        self.width_vec.cross(self.height_vec).normalize_or_zero()
    }

    /// Rejects hints that cannot produce a well-oriented quad.
    ///
    /// Both axes must be finite and non-zero, and they must not be
    /// collinear (the cross product would leave the orientation undefined).
    /// Raster resolutions must be non-zero.
    pub fn validate(&self) -> Result<(), PageError> {
        if !self.position.is_finite() {
            return Err(PageError::InvalidGeometryHints(format!(
                "position {} is not finite",
                self.position
            )));
        }

        for (name, axis) in [("width_vec", self.width_vec), ("height_vec", self.height_vec)] {
            if !axis.is_finite() {
                return Err(PageError::InvalidGeometryHints(format!(
                    "{name} {axis} is not finite"
                )));
            }
            if axis.length_squared() <= f32::EPSILON * f32::EPSILON {
                return Err(PageError::InvalidGeometryHints(format!(
                    "{name} has zero length"
                )));
            }
        }

        // Sine of the angle between the axes
        let area = self.width_vec.cross(self.height_vec).length();
        let scale = self.width_vec.length() * self.height_vec.length();
        if area <= scale * 1e-6 {
            return Err(PageError::InvalidGeometryHints(format!(
                "width_vec {} and height_vec {} are collinear",
                self.width_vec, self.height_vec
            )));
        }

        if self.width_resolution == 0 || self.height_resolution == 0 {
            return Err(PageError::InvalidGeometryHints(format!(
                "resolution {}x{} has a zero dimension",
                self.width_resolution, self.height_resolution
            )));
        }

        Ok(())
    }
}

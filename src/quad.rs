//! Sizing a textured quad to fit a rendered page.
//!
//! [`QuadGeometry::build`] is a pure function of the [`GeometryHints`] and the
//! page's pixel dimensions. The same inputs always give bit-identical output,
//! so callers rebuild from scratch instead of patching a previous result.
//!
//! # Aspect Policies
//!
//! With nominal width `W = |width_vec|`, nominal height `H = |height_vec|` and
//! page aspect `a = image_width / image_height`:
//!
//! | Policy                        | Width     | Height    |
//! |-------------------------------|-----------|-----------|
//! | `ResizeHeightToMatchAspect`   | `W`       | `W / a`   |
//! | `ResizeWidthToMatchAspect`    | `H * a`   | `H`       |
//! | `IgnoreDocumentAspectRatio`   | `W`       | `H`       |
//!
//! # Corner Order
//!
//! Corners run counter-clockwise seen from the normal `width_vec × height_vec`:
//!
//! ```text
//!  3 (0,1) ---------- 2 (1,1)
//!    |                  |
//!    ^ height           |
//!    |                  |
//!  0 (0,0) -- width > 1 (1,0)
//! ```

use crate::error::PageError;
use crate::hints::{AspectRatioPolicy, GeometryHints};
use crate::mesh::Vertex3d;
use glam::{Vec2, Vec3};

/// Texture coordinates for corners 0..4, matching the provider's raster
/// orientation without flipping or rotating it.
pub const QUAD_TEXCOORDS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// The four corners and texture mapping of a page quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadGeometry {
    /// Corner positions in counter-clockwise order.
    pub corners: [Vec3; 4],
    /// Texture coordinates, one per corner.
    pub texcoords: [Vec2; 4],
    /// Effective `(width, height)` after applying the aspect policy.
    pub size: Vec2,
    /// Unit front-facing normal.
    pub normal: Vec3,
}

impl QuadGeometry {
    /// Two counter-clockwise triangles over the four corners.
    pub const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

    /// Computes the quad for a page of `image_width × image_height` pixels.
    ///
    /// Fails with [`PageError::InvalidGeometryHints`] for degenerate axes
    /// (checked first) and [`PageError::InvalidAspect`] when either image
    /// dimension is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use pagequad::{GeometryHints, QuadGeometry, Vec2, Vec3};
    ///
    /// let hints = GeometryHints::new()
    ///     .width_vec(Vec3::X * 2.0)
    ///     .height_vec(Vec3::Y * 2.0);
    ///
    /// // A landscape page halves the height under the default policy
    /// let quad = QuadGeometry::build(&hints, 800, 400)?;
    /// assert_eq!(quad.size, Vec2::new(2.0, 1.0));
    /// assert_eq!(quad.corners[2], Vec3::new(2.0, 1.0, 0.0));
    /// # Ok::<(), pagequad::PageError>(())
    /// ```
    pub fn build(
        hints: &GeometryHints,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self, PageError> {
        hints.validate()?;
        let aspect = document_aspect(image_width, image_height)?;

        let nominal_width = hints.width_vec.length();
        let nominal_height = hints.height_vec.length();

        let (width, height) = match hints.aspect_ratio_policy {
            AspectRatioPolicy::ResizeHeightToMatchAspect => (nominal_width, nominal_width / aspect),
            AspectRatioPolicy::ResizeWidthToMatchAspect => (nominal_height * aspect, nominal_height),
            AspectRatioPolicy::IgnoreDocumentAspectRatio => (nominal_width, nominal_height),
        };

        let width_vec = hints.width_vec * (width / nominal_width);
        let height_vec = hints.height_vec * (height / nominal_height);
        let origin = hints.position;

        Ok(Self {
            corners: [
                origin,
                origin + width_vec,
                origin + width_vec + height_vec,
                origin + height_vec,
            ],
            texcoords: QUAD_TEXCOORDS,
            size: Vec2::new(width, height),
            normal: hints.normal(),
        })
    }

    /// The scaled width axis, corner 0 to corner 1.
    pub fn width_vec(&self) -> Vec3 {
        self.corners[1] - self.corners[0]
    }

    /// The scaled height axis, corner 0 to corner 3.
    pub fn height_vec(&self) -> Vec3 {
        self.corners[3] - self.corners[0]
    }

    /// Corner vertices with the quad normal and texcoords, ready for
    /// [`QuadGeometry::INDICES`].
    pub fn vertices(&self) -> [Vertex3d; 4] {
        std::array::from_fn(|i| {
            Vertex3d::new(
                self.corners[i].into(),
                self.normal.into(),
                self.texcoords[i].into(),
            )
        })
    }
}

/// `width / height` of a page, rejecting empty rasters.
pub fn document_aspect(image_width: u32, image_height: u32) -> Result<f32, PageError> {
    if image_width == 0 || image_height == 0 {
        return Err(PageError::InvalidAspect {
            width: image_width,
            height: image_height,
        });
    }
    Ok(image_width as f32 / image_height as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two(policy: AspectRatioPolicy) -> GeometryHints {
        GeometryHints::new()
            .width_vec(Vec3::new(2.0, 0.0, 0.0))
            .height_vec(Vec3::new(0.0, 2.0, 0.0))
            .aspect_ratio_policy(policy)
    }

    #[test]
    fn resize_height_keeps_width() {
        let quad =
            QuadGeometry::build(&two_by_two(AspectRatioPolicy::ResizeHeightToMatchAspect), 800, 400)
                .unwrap();
        assert_eq!(quad.size, Vec2::new(2.0, 1.0));
        assert_eq!(quad.width_vec(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(quad.height_vec(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn resize_width_keeps_height() {
        let quad =
            QuadGeometry::build(&two_by_two(AspectRatioPolicy::ResizeWidthToMatchAspect), 800, 400)
                .unwrap();
        assert_eq!(quad.size, Vec2::new(4.0, 2.0));
        assert_eq!(quad.width_vec(), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(quad.height_vec(), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn ignore_aspect_keeps_both() {
        let quad =
            QuadGeometry::build(&two_by_two(AspectRatioPolicy::IgnoreDocumentAspectRatio), 800, 400)
                .unwrap();
        assert_eq!(quad.size, Vec2::new(2.0, 2.0));
        assert_eq!(quad.corners[2], Vec3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn corners_start_at_position_and_wind_ccw() {
        let hints = two_by_two(AspectRatioPolicy::IgnoreDocumentAspectRatio)
            .position(Vec3::new(1.0, -1.0, 5.0));
        let quad = QuadGeometry::build(&hints, 100, 100).unwrap();

        assert_eq!(
            quad.corners,
            [
                Vec3::new(1.0, -1.0, 5.0),
                Vec3::new(3.0, -1.0, 5.0),
                Vec3::new(3.0, 1.0, 5.0),
                Vec3::new(1.0, 1.0, 5.0),
            ]
        );
        assert_eq!(quad.texcoords, QUAD_TEXCOORDS);

        // Each triangle's winding agrees with the normal
        for tri in QuadGeometry::INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| quad.corners[i as usize]);
            assert!((b - a).cross(c - a).dot(quad.normal) > 0.0);
        }
    }

    #[test]
    fn tilted_axes_keep_their_directions() {
        let hints = GeometryHints::new()
            .width_vec(Vec3::new(0.0, 0.0, -3.0))
            .height_vec(Vec3::new(0.0, 3.0, 0.0));
        let quad = QuadGeometry::build(&hints, 300, 600).unwrap();

        assert_eq!(quad.size, Vec2::new(3.0, 6.0));
        assert_eq!(quad.width_vec(), Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(quad.height_vec(), Vec3::new(0.0, 6.0, 0.0));
        assert_eq!(quad.normal, Vec3::X);
    }

    #[test]
    fn identical_inputs_give_identical_geometry() {
        let hints = GeometryHints::new()
            .position(Vec3::new(0.3, 0.7, -1.1))
            .width_vec(Vec3::new(1.3, 0.2, 0.1))
            .height_vec(Vec3::new(-0.1, 0.9, 0.4));
        let a = QuadGeometry::build(&hints, 1237, 911).unwrap();
        let b = QuadGeometry::build(&hints, 1237, 911).unwrap();

        let bits = |q: &QuadGeometry| {
            q.corners
                .iter()
                .flat_map(|c| c.to_array())
                .chain(q.texcoords.iter().flat_map(|t| t.to_array()))
                .map(f32::to_bits)
                .collect::<Vec<_>>()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn zero_length_axis_is_rejected_before_aspect() {
        let hints = GeometryHints::new().height_vec(Vec3::ZERO);
        assert!(matches!(
            QuadGeometry::build(&hints, 100, 0),
            Err(PageError::InvalidGeometryHints(_))
        ));
    }

    #[test]
    fn zero_height_image_is_invalid_aspect() {
        assert_eq!(
            QuadGeometry::build(&GeometryHints::default(), 100, 0),
            Err(PageError::InvalidAspect {
                width: 100,
                height: 0
            })
        );
    }

    #[test]
    fn vertices_carry_normal_and_uv() {
        let quad = QuadGeometry::build(&GeometryHints::default(), 10, 10).unwrap();
        let vertices = quad.vertices();
        assert_eq!(vertices[2].position, [1.0, 1.0, 0.0]);
        assert_eq!(vertices[2].uv, [1.0, 1.0]);
        assert!(vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }
}

//! Geometric primitives for anti-aliased rendering
//!
//! Functions for computing distances and alpha values used in
//! anti-aliased rendering of the app-icon mask and border.

/// Smoothstep interpolation for anti-aliasing.
///
/// Returns smooth transition from 0 to 1 as t goes from 0 to 1.
/// Uses Hermite interpolation: 3t² - 2t³
///
/// # Properties
/// - smoothstep(0) = 0
/// - smoothstep(1) = 1
/// - First derivative is 0 at both endpoints (smooth)
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Compute anti-aliased alpha from signed distance.
///
/// # Arguments
/// * `d` - Signed distance to shape boundary (positive = inside)
/// * `aa_width` - Width of the anti-aliasing transition zone
///
/// # Returns
/// * `d >= 0`: 1.0 (fully inside)
/// * `d < -aa_width`: 0.0 (fully outside)
/// * Otherwise: smooth transition using smoothstep
#[inline]
pub fn aa_alpha_from_distance(d: f32, aa_width: f32) -> f32 {
    if d >= 0.0 {
        1.0
    } else {
        let t = (d / aa_width + 1.0).clamp(0.0, 1.0);
        smoothstep(t)
    }
}

/// Axis-aligned rectangle with uniformly rounded corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

impl RoundedRect {
    /// Square covering `size`×`size` with corner radius `size * ratio`
    pub fn square(size: f32, ratio: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size,
            height: size,
            radius: size * ratio,
        }
    }

    /// Same shape shrunk by `inset` on every side (radius shrinks with it)
    pub fn inset(&self, inset: f32) -> Self {
        Self {
            x: self.x + inset,
            y: self.y + inset,
            width: (self.width - inset * 2.0).max(0.0),
            height: (self.height - inset * 2.0).max(0.0),
            radius: (self.radius - inset).max(0.0),
        }
    }

    /// Signed distance from point to the boundary: positive inside, negative outside.
    ///
    /// # Algorithm
    /// Fold the point into the first quadrant around the center, subtract the
    /// half-extent minus radius, then measure distance to a circle of `radius`
    /// (standard box SDF with rounded corners).
    pub fn signed_distance(&self, px: f32, py: f32) -> f32 {
        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;
        let r = self.radius.min(half_w).min(half_h);

        let qx = (px - (self.x + half_w)).abs() - (half_w - r);
        let qy = (py - (self.y + half_h)).abs() - (half_h - r);

        let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
        let inside = qx.max(qy).min(0.0);
        -(outside + inside - r)
    }

    /// Anti-aliased coverage of the pixel whose center is (px, py)
    #[inline]
    pub fn coverage(&self, px: f32, py: f32, aa_width: f32) -> f32 {
        aa_alpha_from_distance(self.signed_distance(px, py), aa_width)
    }

    /// Anti-aliased coverage of a stroke of `stroke_width` centered on the boundary
    #[inline]
    pub fn stroke_coverage(&self, px: f32, py: f32, stroke_width: f32, aa_width: f32) -> f32 {
        let d = self.signed_distance(px, py).abs();
        aa_alpha_from_distance(stroke_width * 0.5 - d, aa_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_boundaries() {
        assert!((smoothstep(0.0) - 0.0).abs() < 1e-6);
        assert!((smoothstep(1.0) - 1.0).abs() < 1e-6);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rounded_rect_distance() {
        let rect = RoundedRect::square(100.0, 0.2);

        // Center is deep inside
        assert!(rect.signed_distance(50.0, 50.0) > 40.0);
        // Edge midpoint sits on the boundary
        assert!(rect.signed_distance(50.0, 0.0).abs() < 1e-4);
        // Corner pixel is cut away by the radius
        assert!(rect.signed_distance(0.5, 0.5) < -5.0);
        assert_eq!(rect.coverage(0.5, 0.5, 1.0), 0.0);
        assert_eq!(rect.coverage(50.0, 50.0, 1.0), 1.0);
    }

    #[test]
    fn test_stroke_stays_on_inset_boundary() {
        let rect = RoundedRect::square(120.0, 0.15);
        let ring = rect.inset(0.5);

        // Pixel next to the top edge is inside the 1px ring
        assert!(ring.stroke_coverage(60.0, 0.5, 1.0, 1.0) > 0.99);
        // Pixel well inside is not touched
        assert_eq!(ring.stroke_coverage(60.0, 10.5, 1.0, 1.0), 0.0);
    }
}

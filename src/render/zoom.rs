//! Pan and zoom as a 2-D translate + uniform scale.

use serde::Serialize;

/// Affine transform mapping diagram coordinates to screen coordinates:
/// `screen = diagram * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub const fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Map a diagram point to the screen.
    pub fn apply(&self, (px, py): (f64, f64)) -> (f64, f64) {
        (px * self.k + self.x, py * self.k + self.y)
    }

    /// Map a screen point back to the diagram.
    pub fn invert(&self, (sx, sy): (f64, f64)) -> (f64, f64) {
        ((sx - self.x) / self.k, (sy - self.y) / self.k)
    }

    /// Pan by a screen-space offset.
    #[must_use]
    pub fn translate_by(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Scale about the screen origin.
    #[must_use]
    pub fn scale_by(self, factor: f64) -> Self {
        Self {
            k: self.k * factor,
            ..self
        }
    }

    /// Set the scale to `k` while keeping `point` (screen space) fixed.
    #[must_use]
    pub fn scale_to_at(self, k: f64, point: (f64, f64)) -> Self {
        let (dx, dy) = self.invert(point);
        Self {
            k,
            x: point.0 - dx * k,
            y: point.1 - dy * k,
        }
    }

    /// Multiply the scale by `factor` while keeping `point` fixed.
    #[must_use]
    pub fn scale_at(self, factor: f64, point: (f64, f64)) -> Self {
        self.scale_to_at(self.k * factor, point)
    }

    /// SVG `transform` attribute value.
    pub fn to_svg(&self) -> String {
        format!("translate({},{}) scale({})", self.x, self.y, self.k)
    }
}

impl std::fmt::Display for ZoomTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_svg())
    }
}

/// Interaction rules applied on top of a [`ZoomTransform`]: the allowed
/// scale range and the factor used by discrete zoom steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBehavior {
    pub min_scale: f64,
    pub max_scale: f64,
    pub step: f64,
}

impl Default for ZoomBehavior {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 10.0,
            step: 1.2,
        }
    }
}

impl ZoomBehavior {
    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    fn clamp(&self, k: f64) -> f64 {
        k.clamp(self.min_scale, self.max_scale)
    }

    /// Bring an externally supplied transform into range. A non-finite
    /// scale resets to 1 and non-finite offsets reset to 0.
    pub fn clamp_transform(&self, t: ZoomTransform) -> ZoomTransform {
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        ZoomTransform {
            k: self.clamp(finite_or(t.k, 1.0)),
            x: finite_or(t.x, 0.0),
            y: finite_or(t.y, 0.0),
        }
    }

    /// Zoom in one step around `point`.
    pub fn zoom_in(&self, t: ZoomTransform, point: (f64, f64)) -> ZoomTransform {
        t.scale_to_at(self.clamp(t.k * self.step), point)
    }

    /// Zoom out one step around `point`.
    pub fn zoom_out(&self, t: ZoomTransform, point: (f64, f64)) -> ZoomTransform {
        t.scale_to_at(self.clamp(t.k / self.step), point)
    }

    /// Pan by a screen-space offset. Panning is unbounded.
    pub fn pan(&self, t: ZoomTransform, dx: f64, dy: f64) -> ZoomTransform {
        t.translate_by(dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_identity() {
        let t = ZoomTransform::default();
        assert!(t.is_identity());
        assert_eq!(t.apply((3.0, 4.0)), (3.0, 4.0));
        assert_eq!(t.to_svg(), "translate(0,0) scale(1)");
    }

    #[test]
    fn test_apply_invert_are_inverse() {
        let t = ZoomTransform::new(2.5, 10.0, -4.0);
        let p = (7.0, 3.0);
        assert!(close(t.invert(t.apply(p)), p));
    }

    #[test]
    fn test_scale_at_keeps_point_fixed() {
        let t = ZoomTransform::new(1.5, 20.0, 30.0);
        let pointer = (200.0, 120.0);
        let before = t.invert(pointer);
        let zoomed = t.scale_at(2.0, pointer);
        assert!((zoomed.k - 3.0).abs() < 1e-9);
        assert!(close(zoomed.invert(pointer), before));
    }

    #[test]
    fn test_translate_and_scale() {
        let t = ZoomTransform::IDENTITY.translate_by(5.0, -5.0).scale_by(2.0);
        assert_eq!(t, ZoomTransform::new(2.0, 5.0, -5.0));
        assert_eq!(t.to_svg(), "translate(5,-5) scale(2)");
    }

    #[test]
    fn test_behavior_clamps_scale() {
        let behavior = ZoomBehavior::default().with_step(100.0);
        let t = behavior.zoom_in(ZoomTransform::IDENTITY, (0.0, 0.0));
        assert_eq!(t.k, 10.0);
        let t = behavior.zoom_out(t, (0.0, 0.0));
        assert!((t.k - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_transform() {
        let behavior = ZoomBehavior::default();
        let clamp = |k, x, y| behavior.clamp_transform(ZoomTransform::new(k, x, y));

        assert_eq!(clamp(0.0, 5.0, 5.0), ZoomTransform::new(0.1, 5.0, 5.0));
        assert_eq!(clamp(100.0, 0.0, 0.0).k, 10.0);
        assert_eq!(clamp(f64::NAN, f64::INFINITY, 3.0), ZoomTransform::new(1.0, 0.0, 3.0));
        assert_eq!(clamp(2.0, -40.0, 12.0), ZoomTransform::new(2.0, -40.0, 12.0));
    }

    #[test]
    fn test_zoom_in_then_out_round_trips_about_same_point() {
        let behavior = ZoomBehavior::default();
        let start = ZoomTransform::new(1.0, 12.0, 8.0);
        let point = (50.0, 40.0);
        let back = behavior.zoom_out(behavior.zoom_in(start, point), point);
        assert!((back.k - 1.0).abs() < 1e-9);
        assert!(close((back.x, back.y), (start.x, start.y)));
    }
}

//! Infinite cutting planes in Hessian normal form (`n · p = w`).

use crate::errors::GeometryError;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::{EPSILON, Real, tolerance};
use nalgebra::{Point3, Vector3};

// Point classification bits relative to a plane
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane with a unit normal and offset `w` along that normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3<Real>,
    w: Real,
}

impl Plane {
    /// Build a plane through `origin` with the (not necessarily unit) `normal`.
    ///
    /// ## Errors
    /// [`GeometryError::InvalidPlane`] if any component is NaN or infinite,
    /// or if `normal` is the zero vector.
    pub fn from_origin_normal(
        origin: Point3<Real>,
        normal: Vector3<Real>,
    ) -> Result<Self, GeometryError> {
        let finite = origin.iter().all(|c| c.is_finite()) && normal.iter().all(|c| c.is_finite());
        let len = normal.norm();
        if !finite || len < EPSILON {
            return Err(GeometryError::InvalidPlane { origin, normal });
        }

        let normal = normal / len;
        Ok(Plane {
            normal,
            w: normal.dot(&origin.coords),
        })
    }

    /// Horizontal plane `z = height` facing +Z.
    pub fn horizontal(height: Real) -> Self {
        Plane {
            normal: Vector3::z(),
            w: height,
        }
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// The point of the plane closest to the world origin.
    pub fn anchor(&self) -> Point3<Real> {
        Point3::from(self.normal * self.w)
    }

    /// Signed distance from `point` to the plane (positive in front).
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as [`FRONT`], [`BACK`] or [`COPLANAR`] within [`tolerance()`].
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        Self::classify_distance(self.signed_distance(point), tolerance())
    }

    /// Distance below which points of geometry spanning `aabb` count as lying
    /// on the plane: [`tolerance()`] times the box's extent along the normal,
    /// floored at the rounding error of [`signed_distance`](Self::signed_distance).
    pub fn tolerance_for(&self, aabb: &Aabb) -> Real {
        let extent = self.normal.abs().dot(&(aabb.maxs - aabb.mins));
        let magnitude = aabb
            .mins
            .coords
            .abs()
            .max()
            .max(aabb.maxs.coords.abs().max())
            .max(self.w.abs());
        (tolerance() * extent).max(8.0 * Real::EPSILON * magnitude)
    }

    #[inline]
    pub(crate) fn classify_distance(distance: Real, eps: Real) -> i8 {
        if distance > eps {
            FRONT
        } else if distance < -eps {
            BACK
        } else {
            COPLANAR
        }
    }

    /// Combined classification of a point cloud: a bitmask of [`FRONT`] and [`BACK`].
    pub fn classify_points<'a, I>(&self, points: I) -> i8
    where
        I: IntoIterator<Item = &'a Point3<Real>>,
    {
        points
            .into_iter()
            .fold(COPLANAR, |acc, p| acc | self.orient_point(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_is_normalized() {
        let plane =
            Plane::from_origin_normal(Point3::new(0.0, 0.0, 2.0), Vector3::new(0.0, 0.0, 5.0))
                .unwrap();
        assert_eq!(plane.normal(), Vector3::z());
        assert_eq!(plane.offset(), 2.0);
        assert_eq!(plane, Plane::horizontal(2.0));
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        let origin = Point3::origin();
        assert!(Plane::from_origin_normal(origin, Vector3::zeros()).is_err());
        assert!(Plane::from_origin_normal(origin, Vector3::new(Real::NAN, 0.0, 1.0)).is_err());
        assert!(
            Plane::from_origin_normal(Point3::new(0.0, Real::INFINITY, 0.0), Vector3::z())
                .is_err()
        );
    }

    #[test]
    fn orient_point() {
        let plane = Plane::horizontal(1.0);
        assert_eq!(plane.orient_point(&Point3::new(5.0, -3.0, 2.0)), FRONT);
        assert_eq!(plane.orient_point(&Point3::new(5.0, -3.0, 0.0)), BACK);
        assert_eq!(plane.orient_point(&Point3::new(5.0, -3.0, 1.0)), COPLANAR);

        let pts = [Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 2.0)];
        assert_eq!(plane.classify_points(&pts), SPANNING);
    }

    #[test]
    fn tolerance_scales_with_extent_along_normal() {
        let plate = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1e-4));
        let across = Plane::horizontal(5e-5).tolerance_for(&plate);
        assert!(across > 0.0 && across <= tolerance() * 1e-4 * (1.0 + 1e-12));

        let along = Plane::from_origin_normal(Point3::origin(), Vector3::x())
            .unwrap()
            .tolerance_for(&plate);
        assert!((along - tolerance()).abs() < 1e-18);

        // no extent along the normal leaves only the rounding floor
        let flat = Aabb::new(Point3::origin(), Point3::new(2.0, 2.0, 0.0));
        let floor = Plane::horizontal(0.0).tolerance_for(&flat);
        assert!(floor > 0.0 && floor < 1e-14);
    }
}

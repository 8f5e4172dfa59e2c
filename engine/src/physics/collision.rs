//! Collision detection module
//!
//! Ray primitives used for picking bricks and for projecting the pointer onto
//! the build surface.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Example
//!
//! ```ignore
//! use block_forge_engine::physics::collision::{Ray, ray_aabb_intersect};
//! use glam::Vec3;
//!
//! let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
//! if let Some(t) = ray_aabb_intersect(&ray, Vec3::splat(-1.0), Vec3::splat(1.0)) {
//!     let hit_point = ray.at(t);
//! }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A ray from the camera through the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Ray origin in world space
    pub origin: Vec3,
    /// Ray direction (normalized on construction)
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized, a zero direction stays zero.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Create a ray from an origin toward a target point.
    pub fn toward(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Performs ray-AABB intersection using the slab method.
///
/// # Returns
///
/// * `Some(t)` - Distance to the entry point, or to the exit point when the
///   ray starts inside the box
/// * `None` - No intersection, or the box lies behind the ray origin
pub fn ray_aabb_intersect(ray: &Ray, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        let (lo, hi) = (aabb_min[axis], aabb_max[axis]);

        if dir.abs() < 1e-10 {
            // Parallel to this slab: must already be between its planes
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let t1 = (lo - origin) * inv;
        let t2 = (hi - origin) * inv;
        t_enter = t_enter.max(t1.min(t2));
        t_exit = t_exit.min(t1.max(t2));
    }

    if t_exit < t_enter || t_exit < 0.0 {
        return None;
    }

    Some(if t_enter >= 0.0 { t_enter } else { t_exit })
}

/// Intersect a ray with the horizontal plane `y = plane_y`.
///
/// Returns `None` when the ray is parallel to the plane or the plane is
/// behind the origin.
pub fn ray_plane_y(ray: &Ray, plane_y: f32) -> Option<Vec3> {
    if ray.direction.y.abs() < 1e-4 {
        return None;
    }

    let t = (plane_y - ray.origin.y) / ray.direction.y;
    if t < 0.0 {
        return None;
    }

    Some(ray.at(t))
}

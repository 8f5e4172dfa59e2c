//! Physics module
//!
//! Only the geometry needed for interaction lives here: rays, ray-box
//! intersection and ray-plane projection. There is no rigid-body simulation;
//! bricks never move on their own.
//!
//! # Unit System
//!
//! **1 unit = 1 stud** horizontally; brick heights are in the same units.

pub mod collision;

pub use collision::{Ray, ray_aabb_intersect, ray_plane_y};

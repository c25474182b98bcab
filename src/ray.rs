//! Rays, planes, and the intersection tests used for picking.

use glam::Vec3;

const EPSILON: f32 = 1e-8;

/// A half-line from `origin` along a unit `direction`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// The plane `normal · p + constant = 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    /// `normal` is normalized; a zero normal gives `None`.
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Option<Self> {
        let normal = normal.try_normalize()?;
        Some(Plane { normal, constant: -normal.dot(point) })
    }

    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Ray { origin, direction: direction.normalize_or_zero() }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Point where the ray crosses `plane`.
    ///
    /// `None` when the ray is parallel to the plane or the crossing lies
    /// behind the origin.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        let denom = plane.normal.dot(self.direction);
        if libm::fabsf(denom) < EPSILON {
            return None;
        }
        let t = -plane.signed_distance(self.origin) / denom;
        if t < 0.0 {
            return None;
        }
        Some(self.at(t))
    }

    /// Möller–Trumbore, both faces. Returns the ray parameter of the hit.
    pub fn intersect_triangle(&self, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let h = self.direction.cross(edge2);
        let a = edge1.dot(h);
        if libm::fabsf(a) < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = self.origin - v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * self.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if t > EPSILON { Some(t) } else { None }
    }
}

/// Nearest point where `ray` hits the mesh. `position` looks up a vertex by
/// index; triangles with a vertex it cannot resolve are ignored.
pub fn raycast_mesh<F>(ray: &Ray, position: F, triangles: &[[u32; 3]]) -> Option<Vec3>
where
    F: Fn(usize) -> Option<Vec3>,
{
    let mut nearest: Option<f32> = None;
    for tri in triangles {
        let (Some(v0), Some(v1), Some(v2)) = (
            position(tri[0] as usize),
            position(tri[1] as usize),
            position(tri[2] as usize),
        ) else {
            continue;
        };
        if let Some(t) = ray.intersect_triangle(v0, v1, v2) {
            if nearest.map_or(true, |best| t < best) {
                nearest = Some(t);
            }
        }
    }
    nearest.map(|t| ray.at(t))
}

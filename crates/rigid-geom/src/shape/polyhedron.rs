// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use rigid_core::math::{Vec3, EPSILON};
use tracing::debug;

use crate::error::GeomError;
use crate::ray::{RayCastInput, RayCastOutput, SlabInterval};
use crate::shape::Shape;
use crate::types::aabb::Aabb;
use crate::types::geometry::Geometry;
use crate::types::transform::Transform;

/// Relative tolerance for plane tests, scaled by the shape's reach (the
/// larger of its bounding diagonal and its farthest bound from the origin).
const PLANE_TOLERANCE_SCALE: f32 = 1e-5;

/// Cosine above which two face normals count as the same direction.
const COPLANAR_COS: f32 = 1.0 - 1e-5;

/// Supporting plane of a polyhedron face: points `x` on the plane satisfy
/// `normal · x = offset`, and `normal` points out of the solid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Face {
    normal: Vec3,
    offset: f32,
}

impl Face {
    /// Outward unit normal in model space.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Plane offset along the normal.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Signed distance of `p` from the plane; positive outside.
    pub fn signed_distance(&self, p: &Vec3) -> f32 {
        self.normal.dot(p) - self.offset
    }

    fn through(normal: Vec3, point: &Vec3) -> Self {
        Self {
            offset: normal.dot(point),
            normal,
        }
    }

    fn coincides(&self, other: &Self, tolerance: f32) -> bool {
        self.normal.dot(&other.normal) >= COPLANAR_COS
            && (self.offset - other.offset).abs() <= tolerance
    }
}

/// Convex polyhedron in model space.
///
/// Faces are read from the geometry's triangle indices when present
/// (counter-clockwise winding seen from outside gives the outward normal).
/// Without indices, faces are the supporting planes of the vertex set, found
/// by testing every vertex triple; that search is `O(n^4)` and meant for the
/// small hulls used as collision proxies. Coplanar triangles collapse into a
/// single face either way.
///
/// Convexity is a precondition. Concave input is accepted but ray casts
/// against it give unspecified results.
#[derive(Debug, Clone)]
pub struct PolyhedronShape {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    local_bounds: Aabb,
    tolerance: f32,
}

impl PolyhedronShape {
    /// Builds a polyhedron from `geometry`.
    ///
    /// Fails with [`GeomError::TooFewVertices`] below four vertices and with
    /// [`GeomError::TooFewFaces`] when fewer than four distinct face planes
    /// remain (no face at all, or a flat vertex set).
    pub fn new(geometry: &Geometry<'_>) -> Result<Self, GeomError> {
        let vertices = geometry.vertex_positions();
        if vertices.len() < 4 {
            return Err(GeomError::TooFewVertices {
                found: vertices.len(),
            });
        }
        let local_bounds = Aabb::from_geometry(geometry);
        let diagonal = local_bounds.max().sub(&local_bounds.min()).length();
        let reach = diagonal
            .max(local_bounds.min().length())
            .max(local_bounds.max().length());
        let tolerance = PLANE_TOLERANCE_SCALE * reach;
        // Triangle cross products scale with the square of the shape's size.
        let min_area = EPSILON * diagonal * diagonal;

        let faces = if geometry.is_indexed() {
            faces_from_triangles(geometry, min_area, tolerance)
        } else {
            supporting_planes(vertices, min_area, tolerance)
        };
        if faces.len() < 4 {
            return Err(GeomError::TooFewFaces { found: faces.len() });
        }
        debug!(
            vertices = vertices.len(),
            faces = faces.len(),
            indexed = geometry.is_indexed(),
            "polyhedron shape built"
        );
        Ok(Self {
            vertices: vertices.to_vec(),
            faces,
            local_bounds,
            tolerance,
        })
    }

    /// Builds a polyhedron from a bare vertex set (convex hull of the points).
    pub fn from_points(points: &[Vec3]) -> Result<Self, GeomError> {
        Self::new(&Geometry::new(points)?)
    }

    /// Model-space vertices.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Distinct face planes in model space.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Model-space bounds.
    pub fn local_aabb(&self) -> Aabb {
        self.local_bounds
    }

    /// Returns `true` if the world-space `point` lies inside or on the
    /// polyhedron placed by `transform`.
    pub fn contains_point(&self, point: &Vec3, transform: &Transform) -> bool {
        let local = transform.inverse_point(point);
        self.faces
            .iter()
            .all(|f| f.signed_distance(&local) <= self.tolerance)
    }
}

impl Shape for PolyhedronShape {
    fn compute_aabb(&self, transform: &Transform) -> Aabb {
        Aabb::from_point_iter(self.vertices.iter().map(|v| transform.apply_point(v)))
            .unwrap_or_else(|| self.local_bounds.transformed_by(transform))
    }

    /// Slab clipping against every face plane (Cyrus-Beck).
    ///
    /// The ray is mapped into model space; the transform is rigid, so
    /// fractions carry over unchanged. A face whose plane is parallel to the
    /// ray rejects it when the origin lies outside that plane.
    fn ray_cast(&self, input: &RayCastInput, transform: &Transform) -> Option<RayCastOutput> {
        if input.max_fraction() <= 0.0 {
            return None;
        }
        let origin = transform.inverse_point(&input.origin());
        let direction = transform.inverse_vector(&input.direction());
        let mut span = SlabInterval::new(input.max_fraction());

        for face in &self.faces {
            let denom = face.normal.dot(&direction);
            let dist = face.offset - face.normal.dot(&origin);
            if denom == 0.0 {
                if dist < 0.0 {
                    return None;
                }
                continue;
            }
            let t = dist / denom;
            if denom < 0.0 {
                span.enter(t, face.normal);
            } else {
                span.exit(t);
            }
            if span.is_empty() {
                return None;
            }
        }
        span.into_output().map(|out| RayCastOutput {
            fraction: out.fraction,
            normal: transform.apply_vector(&out.normal),
        })
    }
}

fn push_unique(faces: &mut Vec<Face>, face: Face, tolerance: f32) {
    if !faces.iter().any(|f| f.coincides(&face, tolerance)) {
        faces.push(face);
    }
}

/// Unit normal of triangle `abc`, or `None` when its doubled area is at or
/// below `min_area`.
fn triangle_normal(a: &Vec3, b: &Vec3, c: &Vec3, min_area: f32) -> Option<Vec3> {
    let cross = b.sub(a).cross(&c.sub(a));
    let len = cross.length();
    (len > min_area).then(|| cross.scale(1.0 / len))
}

fn faces_from_triangles(geometry: &Geometry<'_>, min_area: f32, tolerance: f32) -> Vec<Face> {
    let mut faces = Vec::new();
    for [a, b, c] in geometry.triangles() {
        if let Some(normal) = triangle_normal(&a, &b, &c, min_area) {
            push_unique(&mut faces, Face::through(normal, &a), tolerance);
        }
    }
    faces
}

fn supporting_planes(vertices: &[Vec3], min_area: f32, tolerance: f32) -> Vec<Face> {
    let mut faces = Vec::new();
    for (i, a) in vertices.iter().enumerate() {
        for (j, b) in vertices.iter().enumerate().skip(i + 1) {
            for c in vertices.iter().skip(j + 1) {
                let Some(normal) = triangle_normal(a, b, c, min_area) else {
                    continue;
                };
                let face = Face::through(normal, a);
                let mut above = false;
                let mut below = false;
                for v in vertices {
                    let d = face.signed_distance(v);
                    above |= d > tolerance;
                    below |= d < -tolerance;
                    if above && below {
                        break;
                    }
                }
                if !above {
                    push_unique(&mut faces, face, tolerance);
                }
                if !below {
                    let flipped = Face {
                        normal: face.normal.scale(-1.0),
                        offset: -face.offset,
                    };
                    push_unique(&mut faces, flipped, tolerance);
                }
            }
        }
    }
    faces
}

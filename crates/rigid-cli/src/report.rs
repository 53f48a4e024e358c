// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Report evaluation over a validated [`Scene`] and its text rendering.

use comfy_table::Table;
use rigid_geom::{BoundingVolumeFactory, RayCastInput, Shape, Transform, VolumeId};
use serde::Serialize;
use tracing::trace;

use crate::scene::Scene;

/// Per-mesh summary produced by `check`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshSummary {
    /// Mesh name.
    pub name: String,
    /// Vertex count.
    pub vertices: usize,
    /// Distinct face planes.
    pub faces: usize,
    /// Model-space minimum corner.
    pub local_min: [f32; 3],
    /// Model-space maximum corner.
    pub local_max: [f32; 3],
}

/// Result of `check`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    /// One entry per mesh.
    pub meshes: Vec<MeshSummary>,
    /// Object count.
    pub objects: usize,
    /// Ray count.
    pub rays: usize,
}

/// World-space bounds of one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundsRow {
    /// Object name.
    pub object: String,
    /// Mesh name.
    pub mesh: String,
    /// Minimum corner.
    pub min: [f32; 3],
    /// Maximum corner.
    pub max: [f32; 3],
}

/// Nearest hit of one ray.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    /// Object that was hit.
    pub object: String,
    /// Hit fraction along the ray direction.
    pub fraction: f32,
    /// World-space hit point.
    pub point: [f32; 3],
    /// World-space surface normal; zero when the ray starts inside.
    pub normal: [f32; 3],
    /// Fraction at which the ray entered the object's bounding box.
    pub aabb_fraction: f32,
}

/// Outcome of one ray against the whole scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastRow {
    /// Ray position in the document.
    pub ray: usize,
    /// Objects whose bounding box the ray hit.
    pub candidates: usize,
    /// Nearest shape hit, if any.
    pub hit: Option<Hit>,
}

/// Summarize meshes and counts.
pub fn check(scene: &Scene) -> CheckReport {
    let meshes = scene
        .meshes
        .iter()
        .map(|mesh| {
            let local = mesh.shape.local_aabb();
            MeshSummary {
                name: mesh.name.clone(),
                vertices: mesh.shape.vertices().len(),
                faces: mesh.shape.faces().len(),
                local_min: local.min().to_array(),
                local_max: local.max().to_array(),
            }
        })
        .collect();
    CheckReport {
        meshes,
        objects: scene.objects.len(),
        rays: scene.rays.len(),
    }
}

/// Tight world-space bounds for every object.
pub fn bounds(scene: &Scene) -> Vec<BoundsRow> {
    scene
        .objects
        .iter()
        .map(|object| {
            let mesh = scene.mesh_of(object);
            let bb = mesh.shape.compute_aabb(&object.transform);
            BoundsRow {
                object: object.name.clone(),
                mesh: mesh.name.clone(),
                min: bb.min().to_array(),
                max: bb.max().to_array(),
            }
        })
        .collect()
}

/// Cast every ray against every object and keep the nearest shape hit.
///
/// The factory-held model-space box, carried into world space, filters
/// objects before the polyhedron test. Ties keep the earliest object.
pub fn cast(scene: &Scene) -> Vec<CastRow> {
    scene
        .rays
        .iter()
        .enumerate()
        .map(|(ray, input)| {
            let mut candidates = 0;
            let mut nearest: Option<Hit> = None;
            for object in &scene.objects {
                let mesh = scene.mesh_of(object);
                let Some(broad) = world_box_hit(scene, mesh.volume, &object.transform, input)
                else {
                    continue;
                };
                candidates += 1;
                let Some(out) = mesh.shape.ray_cast(input, &object.transform) else {
                    continue;
                };
                trace!(ray, object = %object.name, fraction = out.fraction, "shape hit");
                if nearest.as_ref().is_some_and(|n| n.fraction <= out.fraction) {
                    continue;
                }
                nearest = Some(Hit {
                    object: object.name.clone(),
                    fraction: out.fraction,
                    point: out.point(input).to_array(),
                    normal: out.normal.to_array(),
                    aabb_fraction: broad,
                });
            }
            CastRow {
                ray,
                candidates,
                hit: nearest,
            }
        })
        .collect()
}

fn world_box_hit(
    scene: &Scene,
    volume: VolumeId,
    transform: &Transform,
    input: &RayCastInput,
) -> Option<f32> {
    let local = scene.volumes.get(volume)?;
    local
        .transformed_by(transform)
        .ray_cast(input)
        .map(|out| out.fraction)
}

fn fmt_vec(v: [f32; 3]) -> String {
    format!("({:.3}, {:.3}, {:.3})", v[0], v[1], v[2])
}

/// Text table for [`check`].
pub fn check_table(report: &CheckReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["mesh", "vertices", "faces", "local min", "local max"]);
    for mesh in &report.meshes {
        table.add_row(vec![
            mesh.name.clone(),
            mesh.vertices.to_string(),
            mesh.faces.to_string(),
            fmt_vec(mesh.local_min),
            fmt_vec(mesh.local_max),
        ]);
    }
    table
}

/// Text table for [`bounds`].
pub fn bounds_table(rows: &[BoundsRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["object", "mesh", "min", "max"]);
    for row in rows {
        table.add_row(vec![
            row.object.clone(),
            row.mesh.clone(),
            fmt_vec(row.min),
            fmt_vec(row.max),
        ]);
    }
    table
}

/// Text table for [`cast`].
pub fn cast_table(rows: &[CastRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ray", "candidates", "object", "fraction", "point", "normal"]);
    for row in rows {
        let cells = match &row.hit {
            Some(hit) => vec![
                row.ray.to_string(),
                row.candidates.to_string(),
                hit.object.clone(),
                format!("{:.4}", hit.fraction),
                fmt_vec(hit.point),
                fmt_vec(hit.normal),
            ],
            None => vec![
                row.ray.to_string(),
                row.candidates.to_string(),
                "miss".to_owned(),
                "-".to_owned(),
                "-".to_owned(),
                "-".to_owned(),
            ],
        };
        table.add_row(cells);
    }
    table
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;
    use crate::scene::{MeshDoc, ObjectDoc, RayDoc, SceneDoc};

    fn cube_mesh() -> MeshDoc {
        let h = 0.5;
        MeshDoc {
            name: "cube".into(),
            positions: vec![
                [-h, -h, -h],
                [h, -h, -h],
                [h, h, -h],
                [-h, h, -h],
                [-h, -h, h],
                [h, -h, h],
                [h, h, h],
                [-h, h, h],
            ],
            indices: None,
        }
    }

    fn place(name: &str, x: f32) -> ObjectDoc {
        ObjectDoc {
            name: Some(name.into()),
            mesh: "cube".into(),
            position: [x, 0.0, 0.0],
            orientation: [0.0, 0.0, 0.0, 1.0],
        }
    }

    fn scene() -> Scene {
        let doc = SceneDoc {
            meshes: vec![cube_mesh()],
            objects: vec![place("far", 8.0), place("near", 5.0)],
            rays: vec![
                RayDoc {
                    origin: [0.0, 0.0, 0.0],
                    direction: [1.0, 0.0, 0.0],
                    max_fraction: Some(20.0),
                },
                RayDoc {
                    origin: [0.0, 3.0, 0.0],
                    direction: [1.0, 0.0, 0.0],
                    max_fraction: None,
                },
            ],
        };
        Scene::build(&doc).unwrap()
    }

    #[test]
    fn bounds_follow_object_placement() {
        let rows = bounds(&scene());
        assert_eq!(rows[1].object, "near");
        assert_eq!(rows[1].min, [4.5, -0.5, -0.5]);
        assert_eq!(rows[1].max, [5.5, 0.5, 0.5]);
    }

    #[test]
    fn cast_reports_nearest_object() {
        let rows = cast(&scene());
        let hit = rows[0].hit.as_ref().unwrap();
        assert_eq!(rows[0].candidates, 2);
        assert_eq!(hit.object, "near");
        assert_eq!(hit.fraction, 4.5);
        assert_eq!(hit.aabb_fraction, 4.5);
        assert_eq!(hit.normal, [-1.0, 0.0, 0.0]);
        assert_eq!(rows[1].candidates, 0);
        assert!(rows[1].hit.is_none());
    }

    #[test]
    fn check_summarizes_meshes() {
        let report = check(&scene());
        assert_eq!(report.objects, 2);
        assert_eq!(report.rays, 2);
        assert_eq!(report.meshes[0].faces, 6);
        assert_eq!(report.meshes[0].vertices, 8);
    }

    #[test]
    fn tables_render_every_row() {
        let s = scene();
        let text = cast_table(&cast(&s)).to_string();
        assert!(text.contains("near"));
        assert!(text.contains("miss"));
        let text = bounds_table(&bounds(&s)).to_string();
        assert!(text.contains("(4.500, -0.500, -0.500)"));
        assert!(check_table(&check(&s)).to_string().contains("cube"));
    }
}

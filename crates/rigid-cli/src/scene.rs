// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Probe scenes: JSON documents, the storage port they load through, and the
//! validated in-memory form the reports run against.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use rigid_core::math::{Quat, Vec3};
use rigid_geom::{
    AabbFactory, BoundingVolumeFactory, GeomError, Geometry, PolyhedronShape, RayCastInput,
    Transform, VolumeId,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Storage port for raw scene documents (keyed by logical name).
pub trait SceneSource {
    /// Load a raw scene blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, SceneError>;
}

/// Error type for loading and validating probe scenes.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Key not present in the source.
    #[error("scene not found: {0}")]
    NotFound(String),
    /// I/O error while reading.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Two meshes share a name.
    #[error("duplicate mesh name `{0}`")]
    DuplicateMesh(String),
    /// An object references a mesh that is not declared.
    #[error("object `{object}` references unknown mesh `{mesh}`")]
    UnknownMesh {
        /// Object name.
        object: String,
        /// Missing mesh name.
        mesh: String,
    },
    /// An object placement holds a NaN or infinite component.
    #[error("object `{0}` has a non-finite position or orientation")]
    NonFinitePlacement(String),
    /// A mesh failed geometry or polyhedron validation.
    #[error("mesh `{mesh}`: {source}")]
    Mesh {
        /// Mesh name.
        mesh: String,
        /// Underlying geometry error.
        #[source]
        source: GeomError,
    },
    /// A ray failed validation.
    #[error("ray {index}: {source}")]
    Ray {
        /// Position of the ray in the document.
        index: usize,
        /// Underlying geometry error.
        #[source]
        source: GeomError,
    },
}

/// Reads scene documents from a directory; keys without an extension get `.json`.
pub struct FsSceneSource {
    base: PathBuf,
}

impl FsSceneSource {
    /// Create a source rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let path = self.base.join(key);
        if path.extension().is_none() {
            path.with_extension("json")
        } else {
            path
        }
    }
}

impl SceneSource for FsSceneSource {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, SceneError> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(SceneError::NotFound(path.display().to_string()))
            }
            Err(err) => Err(SceneError::Io(err)),
        }
    }
}

/// Parse a scene document for `key` from `source`.
pub fn load_document<S: SceneSource + ?Sized>(
    source: &S,
    key: &str,
) -> Result<SceneDoc, SceneError> {
    let bytes = source.load_raw(key)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Top-level probe scene document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDoc {
    /// Named convex meshes.
    #[serde(default)]
    pub meshes: Vec<MeshDoc>,
    /// Placed instances of the meshes.
    #[serde(default)]
    pub objects: Vec<ObjectDoc>,
    /// Rays to cast against every object.
    #[serde(default)]
    pub rays: Vec<RayDoc>,
}

/// A convex mesh in model space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshDoc {
    /// Unique mesh name.
    pub name: String,
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Counter-clockwise triangle indices; omitted means "derive faces".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<u16>>,
}

/// A mesh placed in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectDoc {
    /// Display name; defaults to `<mesh>#<index>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Mesh to instance.
    pub mesh: String,
    /// World position.
    #[serde(default)]
    pub position: [f32; 3],
    /// Orientation quaternion as `[x, y, z, w]`.
    #[serde(default = "identity_orientation")]
    pub orientation: [f32; 4],
}

/// A ray query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RayDoc {
    /// Ray origin.
    pub origin: [f32; 3],
    /// Ray direction; need not be unit length.
    pub direction: [f32; 3],
    /// Upper bound on the hit fraction; absent means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fraction: Option<f32>,
}

const fn identity_orientation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

/// A validated mesh: its convex shape plus the model-space bounds held by the
/// scene's factory.
#[derive(Debug)]
pub struct Mesh {
    /// Mesh name.
    pub name: String,
    /// Convex collision shape.
    pub shape: PolyhedronShape,
    /// Handle to the model-space bounding box in [`Scene::volumes`].
    pub volume: VolumeId,
}

/// A validated placement.
#[derive(Debug, Clone)]
pub struct Object {
    /// Display name.
    pub name: String,
    /// Index into [`Scene::meshes`].
    pub mesh: usize,
    /// Model-to-world transform.
    pub transform: Transform,
}

/// A probe scene that passed validation.
#[derive(Debug)]
pub struct Scene {
    /// Meshes in document order.
    pub meshes: Vec<Mesh>,
    /// Objects in document order.
    pub objects: Vec<Object>,
    /// Rays in document order.
    pub rays: Vec<RayCastInput>,
    /// Model-space bounds for every mesh.
    pub volumes: AabbFactory,
}

impl Scene {
    /// Validate `doc` and build shapes, bounds, transforms and rays.
    pub fn build(doc: &SceneDoc) -> Result<Self, SceneError> {
        let mut volumes = AabbFactory::new();
        let mut meshes = Vec::with_capacity(doc.meshes.len());
        let mut by_name: HashMap<&str, usize> = HashMap::new();

        for mesh in &doc.meshes {
            if by_name.insert(&mesh.name, meshes.len()).is_some() {
                return Err(SceneError::DuplicateMesh(mesh.name.clone()));
            }
            let positions: Vec<Vec3> = mesh.positions.iter().copied().map(Vec3::from).collect();
            let indices = mesh.indices.as_deref().unwrap_or_default();
            let built = Geometry::indexed(&positions, &[], indices, &[]).and_then(|geometry| {
                let shape = PolyhedronShape::new(&geometry)?;
                Ok((shape, volumes.create(&geometry)))
            });
            let (shape, volume) = built.map_err(|source| SceneError::Mesh {
                mesh: mesh.name.clone(),
                source,
            })?;
            debug!(mesh = %mesh.name, faces = shape.faces().len(), "mesh validated");
            meshes.push(Mesh {
                name: mesh.name.clone(),
                shape,
                volume,
            });
        }

        let mut objects = Vec::with_capacity(doc.objects.len());
        for (i, object) in doc.objects.iter().enumerate() {
            let name = object
                .name
                .clone()
                .unwrap_or_else(|| format!("{}#{i}", object.mesh));
            let Some(&mesh) = by_name.get(object.mesh.as_str()) else {
                return Err(SceneError::UnknownMesh {
                    object: name,
                    mesh: object.mesh.clone(),
                });
            };
            let finite = object.position.iter().all(|c| c.is_finite())
                && object.orientation.iter().all(|c| c.is_finite());
            if !finite {
                return Err(SceneError::NonFinitePlacement(name));
            }
            let transform = Transform::new(
                Vec3::from(object.position),
                Quat::from(object.orientation),
            );
            objects.push(Object {
                name,
                mesh,
                transform,
            });
        }

        let rays = doc
            .rays
            .iter()
            .enumerate()
            .map(|(index, ray)| {
                RayCastInput::new(
                    Vec3::from(ray.origin),
                    Vec3::from(ray.direction),
                    ray.max_fraction.unwrap_or(f32::INFINITY),
                )
                .map_err(|source| SceneError::Ray { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            meshes = meshes.len(),
            objects = objects.len(),
            rays = rays.len(),
            "scene built"
        );
        Ok(Self {
            meshes,
            objects,
            rays,
            volumes,
        })
    }

    /// Mesh placed by `object`.
    pub fn mesh_of(&self, object: &Object) -> &Mesh {
        &self.meshes[object.mesh]
    }
}

//! glTF 2.0 / GLB support
//!
//! Loading triangle geometry and scene metadata through the `gltf` crate, and
//! writing single-mesh `.gltf` (embedded base64 buffer) and `.glb` files.

use super::{LoadError, MetadataError};
use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::traits::GeometryKernel;
use ::gltf::mesh::Mode;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use hashbrown::HashSet;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::Serialize;
use serde_json::json;
use std::fmt::Debug;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Where a loaded mesh came from inside the glTF document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GltfMeshInfo {
    pub mesh_index: usize,
    pub primitive_index: usize,
    pub name: Option<String>,
}

pub type GltfMesh = Mesh<GltfMeshInfo>;

/// Every triangle primitive of a glTF document, in its local frame, plus the
/// mesh instances placed by the default scene's node graph.
#[derive(Debug, Clone)]
pub struct Scene {
    pub meshes: Vec<GltfMesh>,
    /// `(glTF mesh index, world transform)` per node that references a mesh.
    pub instances: Vec<(usize, Matrix4<Real>)>,
}

impl Scene {
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// The mesh at `index`.
    ///
    /// ## Errors
    /// [`GeometryError::InvalidMesh`] if the scene has no mesh at `index`.
    pub fn mesh(&self, index: usize) -> Result<&GltfMesh, GeometryError> {
        self.meshes.get(index).ok_or_else(|| {
            GeometryError::InvalidMesh(format!(
                "scene has no mesh at index {index} ({} loaded)",
                self.meshes.len()
            ))
        })
    }

    /// All instances merged into one world-space mesh.
    ///
    /// Without any scene graph the meshes are merged as stored.
    pub fn flatten(&self) -> GltfMesh {
        let placed: Vec<GltfMesh> = if self.instances.is_empty() {
            self.meshes.clone()
        } else {
            self.instances
                .iter()
                .flat_map(|(mesh_index, world)| {
                    self.meshes
                        .iter()
                        .filter(move |m| {
                            m.metadata
                                .as_ref()
                                .is_some_and(|info| info.mesh_index == *mesh_index)
                        })
                        .map(move |m| m.transform(world))
                })
                .collect()
        };

        let flattened = Mesh::empty(None).merge(&placed).with_name("scene");
        debug!(
            parts = placed.len(),
            vertices = flattened.vertex_count(),
            "flattened scene"
        );
        flattened
    }
}

/// Scene selected by the document's `scene` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultScene {
    pub index: usize,
    pub name: Option<String>,
    /// Root node indices of the scene.
    pub nodes: Vec<usize>,
}

/// Document-level metadata, read independently of the geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneMetadata {
    pub version: String,
    pub generator: Option<String>,
    pub scene_count: usize,
    pub node_count: usize,
    pub mesh_count: usize,
    pub material_count: usize,
    /// `None` when the document does not name a default scene.
    pub default_scene: Option<DefaultScene>,
}

/// Load every triangle primitive of the glTF/GLB file at `path`.
///
/// A document without any triangle primitive is [`LoadError::NoGeometry`].
/// External buffers are resolved relative to the file; images are not decoded.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    info!(path = %path.display(), bytes = bytes.len(), "loading glTF");
    import_scene(&bytes, path.parent())
}

/// Load every triangle primitive from in-memory glTF/GLB bytes.
///
/// Only embedded (GLB or data-URI) buffers can be resolved.
pub fn load_scene_from_slice(bytes: &[u8]) -> Result<Scene, LoadError> {
    import_scene(bytes, None)
}

fn import_scene(bytes: &[u8], base: Option<&Path>) -> Result<Scene, LoadError> {
    let ::gltf::Gltf { document, blob } = ::gltf::Gltf::from_slice(bytes)?;
    let buffers = ::gltf::import_buffers(&document, base, blob)?;

    let mut meshes = Vec::new();
    for mesh in document.meshes() {
        let primitive_count = mesh.primitives().len();
        for primitive in mesh.primitives() {
            let name = mesh.name().map(|name| {
                if primitive_count > 1 {
                    format!("{name}_{}", primitive.index())
                } else {
                    name.to_owned()
                }
            });
            let info = GltfMeshInfo {
                mesh_index: mesh.index(),
                primitive_index: primitive.index(),
                name,
            };
            if let Some(loaded) = read_primitive(&primitive, &buffers, info)? {
                meshes.push(loaded);
            }
        }
    }

    if meshes.is_empty() {
        return Err(LoadError::NoGeometry(format!(
            "{} mesh(es) but no triangle primitive with positions",
            document.meshes().len()
        )));
    }

    let instances = collect_instances(&document);
    info!(
        meshes = meshes.len(),
        instances = instances.len(),
        "loaded glTF scene"
    );
    Ok(Scene { meshes, instances })
}

fn read_primitive(
    primitive: &::gltf::Primitive<'_>,
    buffers: &[::gltf::buffer::Data],
    info: GltfMeshInfo,
) -> Result<Option<GltfMesh>, LoadError> {
    let mode = primitive.mode();
    if !matches!(mode, Mode::Triangles | Mode::TriangleStrip | Mode::TriangleFan) {
        warn!(
            mesh = info.mesh_index,
            primitive = info.primitive_index,
            ?mode,
            "skipping non-triangle primitive"
        );
        return Ok(None);
    }

    let reader =
        primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
    let Some(positions) = reader.read_positions() else {
        warn!(
            mesh = info.mesh_index,
            primitive = info.primitive_index,
            "skipping primitive without POSITION"
        );
        return Ok(None);
    };
    let vertices: Vec<Point3<Real>> = positions
        .map(|[x, y, z]| Point3::new(Real::from(x), Real::from(y), Real::from(z)))
        .collect();

    let indices: Vec<usize> = match reader.read_indices() {
        Some(indices) => indices.into_u32().map(|i| i as usize).collect(),
        None => (0..vertices.len()).collect(),
    };
    let faces = assemble_triangles(mode, &indices);

    let name = info.name.clone();
    let location = (info.mesh_index, info.primitive_index);
    let mut mesh = Mesh::new(vertices, faces, Some(info)).map_err(|e| {
        LoadError::MalformedInput(format!("mesh {} primitive {}: {e}", location.0, location.1))
    })?;
    if let Some(name) = name {
        mesh = mesh.with_name(name);
    }
    if let Some(normals) = reader.read_normals() {
        mesh = mesh.with_vertex_normals(
            normals
                .map(|[x, y, z]| Vector3::new(Real::from(x), Real::from(y), Real::from(z)))
                .collect(),
        );
    }

    debug!(
        mesh = location.0,
        primitive = location.1,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "read primitive"
    );
    Ok(Some(mesh))
}

/// Turn an index stream into triangles according to the primitive mode.
fn assemble_triangles(mode: Mode, indices: &[usize]) -> Vec<[usize; 3]> {
    match mode {
        Mode::TriangleStrip => indices
            .windows(3)
            .enumerate()
            .map(|(i, w)| if i % 2 == 0 { [w[0], w[1], w[2]] } else { [w[1], w[0], w[2]] })
            .collect(),
        Mode::TriangleFan => match indices.split_first() {
            Some((&hub, rest)) => rest.windows(2).map(|w| [hub, w[0], w[1]]).collect(),
            None => Vec::new(),
        },
        _ => {
            if indices.len() % 3 != 0 {
                warn!(
                    indices = indices.len(),
                    "index count is not a multiple of 3, ignoring the tail"
                );
            }
            indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
        },
    }
}

/// World transforms of every mesh-bearing node under the default (or first) scene.
fn collect_instances(document: &::gltf::Document) -> Vec<(usize, Matrix4<Real>)> {
    let Some(scene) = document.default_scene().or_else(|| document.scenes().next()) else {
        return Vec::new();
    };

    let mut instances = Vec::new();
    let mut visited = HashSet::new();
    let mut stack: Vec<(::gltf::Node<'_>, Matrix4<Real>)> =
        scene.nodes().map(|n| (n, Matrix4::identity())).collect();
    stack.reverse();

    while let Some((node, parent)) = stack.pop() {
        // node graphs must be trees; ignore anything reached twice
        if !visited.insert(node.index()) {
            continue;
        }
        let world = parent * Matrix4::from(node.transform().matrix()).cast::<Real>();
        if let Some(mesh) = node.mesh() {
            instances.push((mesh.index(), world));
        }
        let mut children: Vec<_> = node.children().map(|c| (c, world)).collect();
        children.reverse();
        stack.extend(children);
    }

    instances
}

/// Read the document metadata of the glTF/GLB file at `path`.
pub fn read_metadata<P: AsRef<Path>>(path: P) -> Result<SceneMetadata, MetadataError> {
    let bytes = std::fs::read(path)?;
    read_metadata_from_slice(&bytes)
}

pub fn read_metadata_from_slice(bytes: &[u8]) -> Result<SceneMetadata, MetadataError> {
    let ::gltf::Gltf { document, .. } = ::gltf::Gltf::from_slice(bytes)?;

    let default_scene = document.default_scene().map(|scene| DefaultScene {
        index: scene.index(),
        name: scene.name().map(str::to_owned),
        nodes: scene.nodes().map(|n| n.index()).collect(),
    });
    if default_scene.is_none() {
        debug!("document names no default scene");
    }

    let scene_count = document.scenes().len();
    let node_count = document.nodes().len();
    let mesh_count = document.meshes().len();
    let material_count = document.materials().len();
    let asset = document.into_json().asset;

    Ok(SceneMetadata {
        version: asset.version,
        generator: asset.generator,
        scene_count,
        node_count,
        mesh_count,
        material_count,
        default_scene,
    })
}

/// Little-endian POSITION, NORMAL and index data packed into one buffer.
struct PackedBuffers {
    data: Vec<u8>,
    positions_len: usize,
    normals_len: usize,
    indices_len: usize,
    vertex_count: usize,
    index_count: usize,
    min: [f32; 3],
    max: [f32; 3],
}

#[allow(clippy::cast_possible_truncation)]
fn pack_buffers<S: Clone + Debug + Send + Sync>(mesh: &Mesh<S>) -> PackedBuffers {
    let vertices = mesh.vertices();
    let normals = mesh.vertex_normals();

    let mut position_bytes = Vec::with_capacity(vertices.len() * 3 * 4);
    let mut normal_bytes = Vec::with_capacity(vertices.len() * 3 * 4);
    let mut index_bytes = Vec::with_capacity(mesh.face_count() * 3 * 4);

    for v in vertices {
        for c in [v.x, v.y, v.z] {
            position_bytes.extend_from_slice(&(c as f32).to_le_bytes());
        }
    }
    for n in normals {
        for c in [n.x, n.y, n.z] {
            normal_bytes.extend_from_slice(&(c as f32).to_le_bytes());
        }
    }
    for face in mesh.faces() {
        for &idx in face {
            index_bytes.extend_from_slice(&(idx as u32).to_le_bytes());
        }
    }

    let bb = mesh.bounding_box();
    let min = [bb.mins.x as f32, bb.mins.y as f32, bb.mins.z as f32];
    let max = [bb.maxs.x as f32, bb.maxs.y as f32, bb.maxs.z as f32];

    let (positions_len, normals_len, indices_len) =
        (position_bytes.len(), normal_bytes.len(), index_bytes.len());
    let mut data = position_bytes;
    data.extend_from_slice(&normal_bytes);
    data.extend_from_slice(&index_bytes);

    PackedBuffers {
        data,
        positions_len,
        normals_len,
        indices_len,
        vertex_count: vertices.len(),
        index_count: mesh.face_count() * 3,
        min,
        max,
    }
}

/// Single mesh, single node, single default scene; POSITION + NORMAL + u32 indices.
fn gltf_document(
    packed: &PackedBuffers,
    object_name: &str,
    uri: Option<String>,
) -> serde_json::Value {
    let normals_offset = packed.positions_len;
    let indices_offset = packed.positions_len + packed.normals_len;
    let mut buffer = json!({ "byteLength": packed.data.len() });
    if let Some(uri) = uri {
        buffer["uri"] = json!(uri);
    }

    json!({
        "asset": { "version": "2.0", "generator": "glb-inspect" },
        "buffers": [buffer],
        "bufferViews": [
            {
                "buffer": 0, "byteOffset": 0,
                "byteLength": packed.positions_len, "target": 34962
            },
            {
                "buffer": 0, "byteOffset": normals_offset,
                "byteLength": packed.normals_len, "target": 34962
            },
            {
                "buffer": 0, "byteOffset": indices_offset,
                "byteLength": packed.indices_len, "target": 34963
            }
        ],
        "accessors": [
            {
                "bufferView": 0, "componentType": 5126, "count": packed.vertex_count,
                "type": "VEC3", "min": packed.min, "max": packed.max
            },
            {
                "bufferView": 1, "componentType": 5126, "count": packed.vertex_count,
                "type": "VEC3"
            },
            {
                "bufferView": 2, "componentType": 5125, "count": packed.index_count,
                "type": "SCALAR"
            }
        ],
        "meshes": [{
            "name": object_name,
            "primitives": [{
                "attributes": { "POSITION": 0, "NORMAL": 1 },
                "indices": 2,
                "mode": 4
            }]
        }],
        "nodes": [{ "mesh": 0, "name": object_name }],
        "scenes": [{ "name": object_name, "nodes": [0] }],
        "scene": 0
    })
}

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

fn push_chunk(out: &mut Vec<u8>, kind: u32, payload: &[u8], pad: u8) {
    let padded = payload.len().next_multiple_of(4);
    #[allow(clippy::cast_possible_truncation)]
    out.extend_from_slice(&(padded as u32).to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(payload);
    out.resize(out.len() + padded - payload.len(), pad);
}

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// glTF 2.0 JSON with the geometry embedded as a base64 data URI.
    pub fn to_gltf(&self, object_name: &str) -> String {
        let packed = pack_buffers(self);
        let uri = format!(
            "data:application/octet-stream;base64,{}",
            BASE64_ENGINE.encode(&packed.data)
        );
        gltf_document(&packed, object_name, Some(uri)).to_string()
    }

    /// Binary glTF container: JSON chunk followed by one BIN chunk.
    pub fn to_glb(&self, object_name: &str) -> Vec<u8> {
        let packed = pack_buffers(self);
        let json = gltf_document(&packed, object_name, None).to_string();

        let mut body = Vec::with_capacity(json.len() + packed.data.len() + 24);
        push_chunk(&mut body, CHUNK_JSON, json.as_bytes(), b' ');
        push_chunk(&mut body, CHUNK_BIN, &packed.data, 0);

        let mut glb = Vec::with_capacity(12 + body.len());
        glb.extend_from_slice(GLB_MAGIC);
        glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
        #[allow(clippy::cast_possible_truncation)]
        glb.extend_from_slice(&((12 + body.len()) as u32).to_le_bytes());
        glb.extend_from_slice(&body);
        glb
    }

    pub fn write_glb<W: Write>(&self, writer: &mut W, object_name: &str) -> std::io::Result<()> {
        writer.write_all(&self.to_glb(object_name))
    }
}

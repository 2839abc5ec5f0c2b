//! Test support library
//! Provides helper functions & fixture builders for tests.
#![allow(dead_code)]

use glb_inspect::float_types::Real;
use std::path::PathBuf;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Path in the system temp dir that is unique to this test process and `name`.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("glb_inspect_{}_{name}", std::process::id()))
}

/// Write `bytes` to a fresh temp file and return its path.
pub fn write_temp(name: &str, bytes: &[u8]) -> PathBuf {
    let path = temp_path(name);
    std::fs::write(&path, bytes).expect("write temp fixture");
    path
}

/// Pack a glTF JSON document and an optional binary chunk into a GLB container.
pub fn glb_from_parts(json: &serde_json::Value, bin: Option<&[u8]>) -> Vec<u8> {
    fn chunk(out: &mut Vec<u8>, kind: u32, payload: &[u8], pad: u8) {
        let padded = payload.len().div_ceil(4) * 4;
        out.extend_from_slice(&(padded as u32).to_le_bytes());
        out.extend_from_slice(&kind.to_le_bytes());
        out.extend_from_slice(payload);
        out.resize(out.len() + padded - payload.len(), pad);
    }

    let mut body = Vec::new();
    chunk(&mut body, 0x4E4F_534A, json.to_string().as_bytes(), b' ');
    if let Some(bin) = bin {
        chunk(&mut body, 0x004E_4942, bin, 0);
    }

    let mut glb = Vec::new();
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&((12 + body.len()) as u32).to_le_bytes());
    glb.extend_from_slice(&body);
    glb
}

/// Parse the JSON written by `Mesh::to_gltf` so tests can edit the scene graph.
pub fn gltf_json(text: &str) -> serde_json::Value {
    serde_json::from_str(text).expect("writer emits valid JSON")
}

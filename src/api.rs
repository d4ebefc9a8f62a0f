//! Byte-level entry points for callers that only deal in buffers.
//!
//! Every function here reports failure with a sentinel (`0`, an empty buffer or `None`).
//! The reason is logged at `debug` level.

use std::time::Instant;

use log::{debug, trace};
use thiserror::Error;

use crate::core::mesh::Mesh;
use crate::decode;
use crate::flat::{self, layout::MeshLayout};

#[remain::sorted]
#[derive(Error, Debug)]
enum Err {
    #[error("Decoding failed: {0}")]
    DecodeError(#[from] decode::Err),
    #[error("Flattening failed: {0}")]
    FlatError(#[from] flat::Err),
}

fn decode_mesh_from_bytes(bitstream: &[u8]) -> Result<Mesh, Err> {
    let cfg = decode::Config { metadata: false };
    Ok(decode::decode_mesh(&mut bitstream.iter(), &cfg)?)
}

/// Decodes a mesh bitstream and writes its flat form into `out`.
/// Returns the number of bytes written, or `0` on failure.
pub fn decode_mesh_direct_write(bitstream: &[u8], out: &mut [u8]) -> usize {
    let start = Instant::now();
    let result = decode_mesh_from_bytes(bitstream)
        .and_then(|mesh| Ok(flat::write_mesh(&mesh, out)?));
    match result {
        Ok(written) => {
            trace!("Flattened {} bytes of bitstream into {} bytes in {:?}", bitstream.len(), written, start.elapsed());
            written
        },
        Err(err) => {
            debug!("decode_mesh_direct_write: {}", err);
            0
        }
    }
}

/// The number of bytes [`decode_mesh_direct_write`] needs for `bitstream`, or `0` on failure.
pub fn mesh_buffer_len(bitstream: &[u8]) -> usize {
    let start = Instant::now();
    let result = decode_mesh_from_bytes(bitstream)
        .and_then(|mesh| Ok(flat::mesh_buffer_len(&mesh)?));
    match result {
        Ok(len) => {
            trace!("Computed a flat size of {} bytes in {:?}", len, start.elapsed());
            len
        },
        Err(err) => {
            debug!("mesh_buffer_len: {}", err);
            0
        }
    }
}

/// Decodes a point cloud (or a mesh, ignoring its faces) and returns its positions
/// as three native-order `f32` per point. Returns an empty buffer on failure.
pub fn decode_point_cloud(bitstream: &[u8]) -> Vec<u8> {
    let start = Instant::now();
    let cfg = decode::Config { metadata: false };
    match decode::decode_point_cloud(&mut bitstream.iter(), &cfg) {
        Ok(pc) => {
            let out = flat::point_cloud_positions(&pc);
            if out.is_empty() && pc.num_points() > 0 {
                debug!("decode_point_cloud: no readable position attribute");
            }
            trace!("Extracted {} points in {:?}", out.len() / flat::POINT_STRIDE, start.elapsed());
            out
        },
        Err(err) => {
            debug!("decode_point_cloud: {}", Err::from(err));
            Vec::new()
        }
    }
}

/// Decodes a mesh into a new buffer of at most `layout.byte_len()` bytes.
/// Returns the written bytes, or `None` if decoding fails or the mesh does not fit the layout.
pub fn decode_mesh(bitstream: &[u8], layout: &MeshLayout) -> Option<Vec<u8>> {
    let start = Instant::now();
    let result = decode_mesh_from_bytes(bitstream).and_then(|mesh| {
        let required = flat::mesh_buffer_len(&mesh)?;
        // never allocate more than the mesh needs
        let mut out = vec![0u8; required.min(layout.byte_len())];
        let written = flat::write_mesh(&mesh, &mut out)?;
        out.truncate(written);
        Ok(out)
    });
    match result {
        Ok(out) => {
            trace!("Decoded a mesh into {} bytes in {:?}", out.len(), start.elapsed());
            Some(out)
        },
        Err(err) => {
            debug!("decode_mesh: {}", err);
            None
        }
    }
}

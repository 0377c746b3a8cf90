//! Tie records: large static mesh placements.
//!
//! On disk a tie is a transform matrix plus a handful of ints. The matrix is
//! kept verbatim as the encode source; decomposed parts are derived and
//! mutation goes through [`MatrixTransform`], so untouched records re-encode
//! byte-identically, sentinel element included.

use glam::Mat4;
use tracing::debug;

use crate::catalog::{ModelCatalog, ModelEntry};
use crate::error::Result;
use crate::objects::{MatrixTransform, ObjectKind};
use crate::{raw, transform};

/// A static large-structure mesh placement. Same 0x70 layout in all four
/// releases.
#[derive(Debug, Clone, PartialEq)]
pub struct Tie {
    pub transform: MatrixTransform,
    pub model_id: i32,
    pub model: Option<ModelEntry>,
    pub light: i32,
    /// Offset into the external per-vertex color blob; preserved verbatim.
    pub colors_offset: i32,
    /// Unidentified ints at 0x40/0x44/0x48/0x4C/0x54/0x58/0x5C/0x68/0x6C.
    pub unknowns: [i32; 9],
}

impl Tie {
    pub const LEN: usize = 0x70;

    pub fn read(block: &[u8], index: usize, models: &ModelCatalog) -> Result<Tie> {
        let buf = &block[index * Tie::LEN..(index + 1) * Tie::LEN];

        let matrix = raw::read_mat4(buf, 0x00);

        let model_id = raw::read_i32(buf, 0x50);
        let model = models.get(model_id);
        if model.is_none() {
            debug!(model_id, index, "tie model id missing from catalog");
        }

        Ok(Tie {
            transform: MatrixTransform::from_matrix(matrix, ObjectKind::Tie, index)?,
            model_id,
            model,
            light: raw::read_i32(buf, 0x60),
            colors_offset: raw::read_i32(buf, 0x64),
            unknowns: [
                raw::read_i32(buf, 0x40),
                raw::read_i32(buf, 0x44),
                raw::read_i32(buf, 0x48),
                raw::read_i32(buf, 0x4C),
                raw::read_i32(buf, 0x54),
                raw::read_i32(buf, 0x58),
                raw::read_i32(buf, 0x5C),
                raw::read_i32(buf, 0x68),
                raw::read_i32(buf, 0x6C),
            ],
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; Tie::LEN];

        raw::write_mat4(&mut out, 0x00, self.transform.matrix());

        raw::write_i32(&mut out, 0x40, self.unknowns[0]);
        raw::write_i32(&mut out, 0x44, self.unknowns[1]);
        raw::write_i32(&mut out, 0x48, self.unknowns[2]);
        raw::write_i32(&mut out, 0x4C, self.unknowns[3]);
        raw::write_i32(&mut out, 0x50, self.model_id);
        raw::write_i32(&mut out, 0x54, self.unknowns[4]);
        raw::write_i32(&mut out, 0x58, self.unknowns[5]);
        raw::write_i32(&mut out, 0x5C, self.unknowns[6]);
        raw::write_i32(&mut out, 0x60, self.light);
        raw::write_i32(&mut out, 0x64, self.colors_offset);
        raw::write_i32(&mut out, 0x68, self.unknowns[7]);
        raw::write_i32(&mut out, 0x6C, self.unknowns[8]);

        out
    }

    /// Render transform with the mesh's model size folded in.
    pub fn transform_matrix(&self) -> Mat4 {
        let model_size = self.model.map_or(1.0, |m| m.size);
        transform::compose(
            self.transform.position(),
            self.transform.rotation(),
            self.transform.scale() * model_size,
        )
    }
}

//! Spline records: variable-length vertex paths.

use binrw::{binrw, BinWrite};
use glam::Vec3;
use std::io::Cursor;

use crate::error::Result;

/// One spline vertex: a position and its interpolation w-value.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineVertex {
    #[br(map = Vec3::from_array)]
    #[bw(map = |v: &Vec3| v.to_array())]
    pub position: Vec3,
    pub w: f32,
}

/// A vertex path: a 0x10 header (count + three unidentified ints) followed
/// by count 0x10-byte vertices.
///
/// The vertex count is never cached: encoding always derives the record
/// length from the live vertex buffer, so edits that add or remove vertices
/// cannot desynchronize the header.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    #[br(temp)]
    #[bw(try_calc(u32::try_from(vertices.len())))]
    vertex_count: u32,
    pub unk1: i32,
    pub unk2: i32,
    pub unk3: i32,
    #[br(count = vertex_count)]
    pub vertices: Vec<SplineVertex>,
}

impl Spline {
    /// Header length; every vertex adds another 0x10.
    pub const HEADER_LEN: usize = 0x10;

    /// Reads one spline starting at the beginning of `buf`. Callers
    /// pre-validate that `buf` holds the full record.
    pub fn read(buf: &[u8]) -> Result<Spline> {
        Ok(<Spline as binrw::BinRead>::read_le(&mut Cursor::new(buf))?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(self.encoded_len()));
        self.write_le(&mut cursor)?;
        let out = cursor.into_inner();
        assert_eq!(out.len(), self.encoded_len());
        Ok(out)
    }

    /// `0x10 + N * 0x10`, recomputed from the current vertex buffer.
    pub fn encoded_len(&self) -> usize {
        Spline::HEADER_LEN + self.vertices.len() * 0x10
    }

    /// Moves every vertex by `delta`.
    ///
    /// There is intentionally no `rotate`: the reference implementation's
    /// spline rotation is known to corrupt the Y component and the feature
    /// is withheld until the intended behavior is confirmed.
    pub fn translate(&mut self, delta: Vec3) {
        for vertex in &mut self.vertices {
            vertex.position += delta;
        }
    }
}

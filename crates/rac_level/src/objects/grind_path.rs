//! Grind path records.
//!
//! A grind path is a 0x20-byte parameter record paired one-to-one, by
//! ordinal, with a spline from the level's dedicated grind spline list. The
//! pairing lives in the level aggregate; the record itself never embeds the
//! spline.

use binrw::{BinRead, BinWrite};
use glam::Vec3;
use std::io::Cursor;

use crate::error::Result;

/// Rail-grinding path parameters. Fixed layout in all four releases.
#[derive(BinRead, BinWrite, Debug, Clone, PartialEq)]
#[brw(little)]
pub struct GrindPath {
    #[br(map = Vec3::from_array)]
    #[bw(map = |v: &Vec3| v.to_array())]
    pub position: Vec3,
    pub radius: f32,
    pub wobble: i32,
    pub unk1: i32,
    pub unk2: i32,
    pub unk3: i32,
}

impl GrindPath {
    pub const LEN: usize = 0x20;

    pub fn read(block: &[u8], index: usize) -> Result<GrindPath> {
        let buf = &block[index * GrindPath::LEN..(index + 1) * GrindPath::LEN];
        Ok(GrindPath::read_le(&mut Cursor::new(buf))?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(GrindPath::LEN));
        self.write_le(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips() -> Result<()> {
        #[rustfmt::skip]
        let input: Vec<u8> = vec![
            0x00, 0x00, 0xC8, 0x42, // x = 100.0
            0x00, 0x00, 0x20, 0x41, // y = 10.0
            0x00, 0x00, 0x00, 0xC0, // z = -2.0
            0x00, 0x00, 0x40, 0x40, // radius = 3.0
            0x01, 0x00, 0x00, 0x00, // wobble
            0x00, 0x00, 0x00, 0x00,
            0xFE, 0xFF, 0xFF, 0xFF, // unk2 = -2
            0x00, 0x00, 0x00, 0x00,
        ];

        let path = GrindPath::read(&input, 0)?;
        assert_eq!(path.position, Vec3::new(100.0, 10.0, -2.0));
        assert_eq!(path.radius, 3.0);
        assert_eq!(path.wobble, 1);
        assert_eq!(path.unk2, -2);
        assert_eq!(path.to_bytes()?, input);
        Ok(())
    }
}

//! Game camera records.
//!
//! One of the few families whose layout never moved between releases, so the
//! codec is a plain binrw derive instead of an offset table.

use binrw::{BinRead, BinWrite};
use glam::Vec3;
use std::io::Cursor;

use crate::error::Result;

/// A scripted camera. Fixed 0x20-byte record, no game-version branching.
#[derive(BinRead, BinWrite, Debug, Clone, PartialEq)]
#[brw(little)]
pub struct GameCamera {
    pub id: i32,
    #[br(map = Vec3::from_array)]
    #[bw(map = |v: &Vec3| v.to_array())]
    pub position: Vec3,
    pub unk1: i32,
    pub unk2: i32,
    pub unk3: i32,
    pub id2: i32,
}

impl GameCamera {
    pub const LEN: usize = 0x20;

    pub fn read(block: &[u8], index: usize) -> Result<GameCamera> {
        let buf = &block[index * GameCamera::LEN..(index + 1) * GameCamera::LEN];
        Ok(GameCamera::read_le(&mut Cursor::new(buf))?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(GameCamera::LEN));
        self.write_le(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

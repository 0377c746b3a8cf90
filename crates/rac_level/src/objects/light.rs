//! Illumination records: level-wide directional light pairs and positional
//! point lights.
//!
//! Point lights are the poster child for the RAC1 / later-release split:
//! RAC1 stores full floats and 8-bit color, everything after it packs
//! position and radius into 16-bit fixed point (6 fractional bits) and color
//! into 16-bit channels.

use binrw::{BinRead, BinWrite};
use glam::{Vec3, Vec4};
use std::io::Cursor;

use crate::error::Result;
use crate::game::Game;
use crate::math;
use crate::raw;

/// A directional light pair: two color/direction vector pairs. Fixed
/// 0x40-byte record in every release.
#[derive(BinRead, BinWrite, Debug, Clone, PartialEq)]
#[brw(little)]
pub struct DirectionalLight {
    #[br(map = Vec4::from_array)]
    #[bw(map = |v: &Vec4| v.to_array())]
    pub color_a: Vec4,
    #[br(map = Vec4::from_array)]
    #[bw(map = |v: &Vec4| v.to_array())]
    pub direction_a: Vec4,
    #[br(map = Vec4::from_array)]
    #[bw(map = |v: &Vec4| v.to_array())]
    pub color_b: Vec4,
    #[br(map = Vec4::from_array)]
    #[bw(map = |v: &Vec4| v.to_array())]
    pub direction_b: Vec4,
}

impl DirectionalLight {
    pub const LEN: usize = 0x40;

    pub fn read(block: &[u8], index: usize) -> Result<DirectionalLight> {
        let buf = &block[index * DirectionalLight::LEN..(index + 1) * DirectionalLight::LEN];
        Ok(DirectionalLight::read_le(&mut Cursor::new(buf))?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::with_capacity(DirectionalLight::LEN));
        self.write_le(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

/// A positional point light.
///
/// Color channels are normalized to 0..=1 in memory so that both on-disk
/// widths (8-bit in RAC1, 16-bit later) decode losslessly and re-encode
/// byte-exactly. The trailing unidentified bytes of each layout are kept
/// verbatim in `tail`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub radius: f32,
    pub color: Vec3,
    tail: Vec<u8>,
}

impl PointLight {
    const RAC1_LEN: usize = 0x20;
    const RAC1_KNOWN: usize = 0x13;
    const PACKED_LEN: usize = 0x10;
    const PACKED_KNOWN: usize = 0x0E;

    /// Record length under the given game.
    pub fn len(game: Game) -> usize {
        if game.packs_fixed_point() {
            PointLight::PACKED_LEN
        } else {
            PointLight::RAC1_LEN
        }
    }

    /// A dark light at the origin, with a zeroed tail sized for `game`.
    pub fn new(game: Game) -> PointLight {
        PointLight {
            position: Vec3::ZERO,
            radius: 0.0,
            color: Vec3::ZERO,
            tail: vec![0; PointLight::len(game) - PointLight::known_len(game)],
        }
    }

    fn known_len(game: Game) -> usize {
        if game.packs_fixed_point() {
            PointLight::PACKED_KNOWN
        } else {
            PointLight::RAC1_KNOWN
        }
    }

    pub fn read(block: &[u8], index: usize, game: Game) -> Result<PointLight> {
        let len = PointLight::len(game);
        let buf = &block[index * len..(index + 1) * len];

        let light = if game.packs_fixed_point() {
            PointLight {
                position: Vec3::new(
                    math::fixed_to_f32(raw::read_i16(buf, 0x00)),
                    math::fixed_to_f32(raw::read_i16(buf, 0x02)),
                    math::fixed_to_f32(raw::read_i16(buf, 0x04)),
                ),
                radius: math::fixed_to_f32(raw::read_i16(buf, 0x06)),
                color: Vec3::new(
                    math::color16_to_f32(raw::read_u16(buf, 0x08)),
                    math::color16_to_f32(raw::read_u16(buf, 0x0A)),
                    math::color16_to_f32(raw::read_u16(buf, 0x0C)),
                ),
                tail: buf[PointLight::PACKED_KNOWN..].to_vec(),
            }
        } else {
            PointLight {
                position: raw::read_vec3(buf, 0x00),
                radius: raw::read_f32(buf, 0x0C),
                color: Vec3::new(
                    math::color8_to_f32(raw::read_u8(buf, 0x10)),
                    math::color8_to_f32(raw::read_u8(buf, 0x11)),
                    math::color8_to_f32(raw::read_u8(buf, 0x12)),
                ),
                tail: buf[PointLight::RAC1_KNOWN..].to_vec(),
            }
        };
        Ok(light)
    }

    pub fn to_bytes(&self, game: Game) -> Vec<u8> {
        let len = PointLight::len(game);
        let known = PointLight::known_len(game);
        let mut out = vec![0u8; len];

        if game.packs_fixed_point() {
            raw::write_i16(&mut out, 0x00, math::f32_to_fixed(self.position.x));
            raw::write_i16(&mut out, 0x02, math::f32_to_fixed(self.position.y));
            raw::write_i16(&mut out, 0x04, math::f32_to_fixed(self.position.z));
            raw::write_i16(&mut out, 0x06, math::f32_to_fixed(self.radius));
            raw::write_u16(&mut out, 0x08, math::f32_to_color16(self.color.x));
            raw::write_u16(&mut out, 0x0A, math::f32_to_color16(self.color.y));
            raw::write_u16(&mut out, 0x0C, math::f32_to_color16(self.color.z));
        } else {
            raw::write_vec3(&mut out, 0x00, self.position);
            raw::write_f32(&mut out, 0x0C, self.radius);
            raw::write_u8(&mut out, 0x10, math::f32_to_color8(self.color.x));
            raw::write_u8(&mut out, 0x11, math::f32_to_color8(self.color.y));
            raw::write_u8(&mut out, 0x12, math::f32_to_color8(self.color.z));
        }
        for (dst, src) in out[known..].iter_mut().zip(&self.tail) {
            *dst = *src;
        }

        out
    }
}

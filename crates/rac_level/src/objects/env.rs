//! Environment records: ambient lighting samples and fog transition zones.

use glam::Vec3;

use crate::error::Result;
use crate::game::Game;
use crate::math::Rgb;
use crate::objects::{ObjectKind, ZoneRecord};
use crate::{math, raw};

/// A positional ambient lighting/audio sample.
///
/// Shares the point light's version split: full floats and 8-bit color in
/// RAC1, 16-bit fixed point and 16-bit color afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvSample {
    pub position: Vec3,
    pub radius: f32,
    pub color: Vec3,
    tail: Vec<u8>,
}

impl EnvSample {
    const RAC1_LEN: usize = 0x20;
    const RAC1_KNOWN: usize = 0x13;
    const PACKED_LEN: usize = 0x10;
    const PACKED_KNOWN: usize = 0x0E;

    pub fn len(game: Game) -> usize {
        if game.packs_fixed_point() {
            EnvSample::PACKED_LEN
        } else {
            EnvSample::RAC1_LEN
        }
    }

    fn known_len(game: Game) -> usize {
        if game.packs_fixed_point() {
            EnvSample::PACKED_KNOWN
        } else {
            EnvSample::RAC1_KNOWN
        }
    }

    pub fn read(block: &[u8], index: usize, game: Game) -> Result<EnvSample> {
        let len = EnvSample::len(game);
        let buf = &block[index * len..(index + 1) * len];

        let sample = if game.packs_fixed_point() {
            EnvSample {
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
                tail: buf[EnvSample::PACKED_KNOWN..].to_vec(),
            }
        } else {
            EnvSample {
                position: raw::read_vec3(buf, 0x00),
                radius: raw::read_f32(buf, 0x0C),
                color: Vec3::new(
                    math::color8_to_f32(raw::read_u8(buf, 0x10)),
                    math::color8_to_f32(raw::read_u8(buf, 0x11)),
                    math::color8_to_f32(raw::read_u8(buf, 0x12)),
                ),
                tail: buf[EnvSample::RAC1_KNOWN..].to_vec(),
            }
        };
        Ok(sample)
    }

    pub fn to_bytes(&self, game: Game) -> Vec<u8> {
        let len = EnvSample::len(game);
        let known = EnvSample::known_len(game);
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

/// A fog transition zone: a two-matrix body followed by the fog parameters
/// blended across the zone. 0xA0 bytes in all four releases.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvTransition {
    pub zone: ZoneRecord,
    pub fog_color_a: Rgb,
    pub fog_near_a: f32,
    pub fog_far_a: f32,
    pub fog_color_b: Rgb,
    pub fog_near_b: f32,
    pub fog_far_b: f32,
    pub flags: i32,
    pub unk1: i32,
    /// Padding byte after each fog color, preserved verbatim.
    pad: [u8; 2],
}

impl EnvTransition {
    pub const LEN: usize = 0xA0;

    pub fn read(block: &[u8], index: usize) -> Result<EnvTransition> {
        let buf = &block[index * EnvTransition::LEN..(index + 1) * EnvTransition::LEN];
        Ok(EnvTransition {
            zone: ZoneRecord::read(buf, 0, ObjectKind::EnvTransition)?,
            fog_color_a: Rgb::new(
                raw::read_u8(buf, 0x80),
                raw::read_u8(buf, 0x81),
                raw::read_u8(buf, 0x82),
            ),
            fog_near_a: raw::read_f32(buf, 0x84),
            fog_far_a: raw::read_f32(buf, 0x88),
            fog_color_b: Rgb::new(
                raw::read_u8(buf, 0x8C),
                raw::read_u8(buf, 0x8D),
                raw::read_u8(buf, 0x8E),
            ),
            fog_near_b: raw::read_f32(buf, 0x90),
            fog_far_b: raw::read_f32(buf, 0x94),
            flags: raw::read_i32(buf, 0x98),
            unk1: raw::read_i32(buf, 0x9C),
            pad: [raw::read_u8(buf, 0x83), raw::read_u8(buf, 0x8F)],
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; EnvTransition::LEN];
        out[..ZoneRecord::LEN].copy_from_slice(&self.zone.to_bytes());
        raw::write_u8(&mut out, 0x80, self.fog_color_a.r);
        raw::write_u8(&mut out, 0x81, self.fog_color_a.g);
        raw::write_u8(&mut out, 0x82, self.fog_color_a.b);
        raw::write_u8(&mut out, 0x83, self.pad[0]);
        raw::write_f32(&mut out, 0x84, self.fog_near_a);
        raw::write_f32(&mut out, 0x88, self.fog_far_a);
        raw::write_u8(&mut out, 0x8C, self.fog_color_b.r);
        raw::write_u8(&mut out, 0x8D, self.fog_color_b.g);
        raw::write_u8(&mut out, 0x8E, self.fog_color_b.b);
        raw::write_u8(&mut out, 0x8F, self.pad[1]);
        raw::write_f32(&mut out, 0x90, self.fog_near_b);
        raw::write_f32(&mut out, 0x94, self.fog_far_b);
        raw::write_i32(&mut out, 0x98, self.flags);
        raw::write_i32(&mut out, 0x9C, self.unk1);
        out
    }
}

//! Ambient sound instance records.

use crate::error::Result;
use crate::objects::{ObjectKind, ZoneRecord};
use crate::raw;

/// A positional ambient sound emitter: a 0x10-byte parameter header followed
/// by the usual two-matrix zone body. 0x90 bytes in all four releases.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundInstance {
    pub unk1: i32,
    pub unk2: i32,
    pub unk3: i32,
    pub volume: f32,
    pub zone: ZoneRecord,
}

impl SoundInstance {
    pub const LEN: usize = 0x90;

    pub fn read(block: &[u8], index: usize) -> Result<SoundInstance> {
        let buf = &block[index * SoundInstance::LEN..(index + 1) * SoundInstance::LEN];
        Ok(SoundInstance {
            unk1: raw::read_i32(buf, 0x00),
            unk2: raw::read_i32(buf, 0x04),
            unk3: raw::read_i32(buf, 0x08),
            volume: raw::read_f32(buf, 0x0C),
            zone: ZoneRecord::read(&buf[0x10..], 0, ObjectKind::SoundInstance)?,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; SoundInstance::LEN];
        raw::write_i32(&mut out, 0x00, self.unk1);
        raw::write_i32(&mut out, 0x04, self.unk2);
        raw::write_i32(&mut out, 0x08, self.unk3);
        raw::write_f32(&mut out, 0x0C, self.volume);
        out[0x10..].copy_from_slice(&self.zone.to_bytes());
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use glam::Mat4;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips() -> Result<()> {
        let mut bytes = vec![0u8; SoundInstance::LEN];
        raw::write_i32(&mut bytes, 0x00, 3);
        raw::write_f32(&mut bytes, 0x0C, 0.75);
        raw::write_mat4(&mut bytes, 0x10, Mat4::IDENTITY);
        raw::write_mat4(&mut bytes, 0x50, Mat4::IDENTITY);

        let sound = SoundInstance::read(&bytes, 0)?;
        assert_eq!(sound.unk1, 3);
        assert_eq!(sound.volume, 0.75);
        assert_eq!(sound.to_bytes(), bytes);
        Ok(())
    }
}

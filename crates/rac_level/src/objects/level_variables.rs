//! The per-level global variables record.
//!
//! Exactly one of these exists per level. The four releases use
//! near-identical encodings that shuffle offsets and add or drop a couple of
//! fields, so the codec is a single routine driven by a per-version delta
//! table instead of four parallel implementations.

use glam::Vec3;

use crate::error::{Error, Result};
use crate::game::Game;
use crate::math::RgbSlot;
use crate::objects::ObjectKind;
use crate::raw;

/// Per-version field offsets. `None` marks a field the release does not
/// carry.
struct VarsLayout {
    background_color: usize,
    fog_color: usize,
    fog_near_dist: usize,
    fog_far_dist: usize,
    fog_near_intensity: usize,
    fog_far_intensity: usize,
    deathplane_z: usize,
    /// Spherical-world flag and sphere centre; absent in RAC1.
    spherical: Option<(usize, usize)>,
    ship_position: usize,
    ship_rotation: usize,
    ship_color: usize,
    /// RAC1-only color slot of unknown purpose.
    unk_color: Option<usize>,
    unknowns: &'static [usize],
    known_len: usize,
}

const RAC1: VarsLayout = VarsLayout {
    background_color: 0x00,
    fog_color: 0x0C,
    fog_near_dist: 0x18,
    fog_far_dist: 0x1C,
    fog_near_intensity: 0x20,
    fog_far_intensity: 0x24,
    deathplane_z: 0x28,
    spherical: None,
    ship_position: 0x2C,
    ship_rotation: 0x38,
    ship_color: 0x3C,
    unk_color: Some(0x48),
    unknowns: &[0x54, 0x58],
    known_len: 0x5C,
};

const RAC2: VarsLayout = VarsLayout {
    background_color: 0x00,
    fog_color: 0x0C,
    fog_near_dist: 0x18,
    fog_far_dist: 0x1C,
    fog_near_intensity: 0x20,
    fog_far_intensity: 0x24,
    deathplane_z: 0x28,
    spherical: Some((0x2C, 0x30)),
    ship_position: 0x3C,
    ship_rotation: 0x48,
    ship_color: 0x4C,
    unk_color: None,
    unknowns: &[0x58, 0x5C],
    known_len: 0x60,
};

const RAC3: VarsLayout = VarsLayout {
    unknowns: &[0x58, 0x5C, 0x60],
    known_len: 0x64,
    ..RAC2
};

const DEADLOCKED: VarsLayout = VarsLayout {
    unknowns: &[0x58, 0x5C, 0x60, 0x64],
    known_len: 0x68,
    ..RAC2
};

fn layout(game: Game) -> &'static VarsLayout {
    match game {
        Game::Rac1 => &RAC1,
        Game::Rac2 => &RAC2,
        Game::Rac3 => &RAC3,
        Game::Deadlocked => &DEADLOCKED,
    }
}

/// Level-wide constants: fog, background, deathplane, ship spawn.
///
/// The record length is dictated by the section header, not the layout;
/// everything past the known fields is an opaque tail that re-encodes
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelVariables {
    pub background_color: RgbSlot,
    pub fog_color: RgbSlot,
    pub fog_near_dist: f32,
    pub fog_far_dist: f32,
    pub fog_near_intensity: f32,
    pub fog_far_intensity: f32,
    pub deathplane_z: f32,
    /// Present from RAC2 onwards.
    pub spherical_world: Option<SphericalWorld>,
    pub ship_position: Vec3,
    pub ship_rotation: f32,
    pub ship_color: RgbSlot,
    /// RAC1 only; `(-1, 0, 0)` sentinel means unset.
    pub unk_color: Option<RgbSlot>,
    pub unknowns: Vec<i32>,
    /// Bytes between the known header and the end of the record.
    pub tail: Vec<u8>,
}

/// The spherical-world parameters carried by RAC2/RAC3/Deadlocked levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalWorld {
    pub enabled: i32,
    pub center: Vec3,
}

fn read_color(buf: &[u8], offset: usize) -> RgbSlot {
    RgbSlot::from_raw([
        raw::read_i32(buf, offset),
        raw::read_i32(buf, offset + 4),
        raw::read_i32(buf, offset + 8),
    ])
}

fn write_color(buf: &mut [u8], offset: usize, color: RgbSlot) {
    let [r, g, b] = color.raw();
    raw::write_i32(buf, offset, r);
    raw::write_i32(buf, offset + 4, g);
    raw::write_i32(buf, offset + 8, b);
}

impl LevelVariables {
    /// Smallest record the given release can produce.
    pub fn known_len(game: Game) -> usize {
        layout(game).known_len
    }

    /// Decodes the whole variables section; `buf` is the full record, tail
    /// included.
    pub fn read(buf: &[u8], game: Game) -> Result<LevelVariables> {
        let l = layout(game);
        if buf.len() < l.known_len {
            return Err(Error::TruncatedSection {
                kind: ObjectKind::LevelVariables,
                expected: l.known_len,
                actual: buf.len(),
            });
        }

        Ok(LevelVariables {
            background_color: read_color(buf, l.background_color),
            fog_color: read_color(buf, l.fog_color),
            fog_near_dist: raw::read_f32(buf, l.fog_near_dist),
            fog_far_dist: raw::read_f32(buf, l.fog_far_dist),
            fog_near_intensity: raw::read_f32(buf, l.fog_near_intensity),
            fog_far_intensity: raw::read_f32(buf, l.fog_far_intensity),
            deathplane_z: raw::read_f32(buf, l.deathplane_z),
            spherical_world: l.spherical.map(|(flag, center)| SphericalWorld {
                enabled: raw::read_i32(buf, flag),
                center: raw::read_vec3(buf, center),
            }),
            ship_position: raw::read_vec3(buf, l.ship_position),
            ship_rotation: raw::read_f32(buf, l.ship_rotation),
            ship_color: read_color(buf, l.ship_color),
            unk_color: l.unk_color.map(|off| read_color(buf, off)),
            unknowns: l
                .unknowns
                .iter()
                .map(|&off| raw::read_i32(buf, off))
                .collect(),
            tail: buf[l.known_len..].to_vec(),
        })
    }

    pub fn to_bytes(&self, game: Game) -> Vec<u8> {
        let l = layout(game);
        let mut out = vec![0u8; l.known_len + self.tail.len()];

        write_color(&mut out, l.background_color, self.background_color);
        write_color(&mut out, l.fog_color, self.fog_color);
        raw::write_f32(&mut out, l.fog_near_dist, self.fog_near_dist);
        raw::write_f32(&mut out, l.fog_far_dist, self.fog_far_dist);
        raw::write_f32(&mut out, l.fog_near_intensity, self.fog_near_intensity);
        raw::write_f32(&mut out, l.fog_far_intensity, self.fog_far_intensity);
        raw::write_f32(&mut out, l.deathplane_z, self.deathplane_z);
        if let (Some((flag, center)), Some(world)) = (l.spherical, self.spherical_world) {
            raw::write_i32(&mut out, flag, world.enabled);
            raw::write_vec3(&mut out, center, world.center);
        }
        raw::write_vec3(&mut out, l.ship_position, self.ship_position);
        raw::write_f32(&mut out, l.ship_rotation, self.ship_rotation);
        write_color(&mut out, l.ship_color, self.ship_color);
        if let (Some(off), Some(color)) = (l.unk_color, self.unk_color) {
            write_color(&mut out, off, color);
        }
        assert_eq!(
            self.unknowns.len(),
            l.unknowns.len(),
            "level variables unknowns vector does not match the {game} layout",
        );
        for (&off, &value) in l.unknowns.iter().zip(&self.unknowns) {
            raw::write_i32(&mut out, off, value);
        }
        out[l.known_len..].copy_from_slice(&self.tail);

        out
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Rgb;
    use pretty_assertions::assert_eq;

    fn fixture(game: Game, tail: &[u8]) -> Vec<u8> {
        let l = layout(game);
        let mut buf = vec![0u8; l.known_len + tail.len()];
        write_color(&mut buf, l.background_color, Rgb::new(0, 20, 60).into());
        write_color(&mut buf, l.fog_color, Rgb::new(90, 90, 120).into());
        raw::write_f32(&mut buf, l.fog_near_dist, 25.0);
        raw::write_f32(&mut buf, l.fog_far_dist, 600.0);
        raw::write_f32(&mut buf, l.fog_near_intensity, 0.1);
        raw::write_f32(&mut buf, l.fog_far_intensity, 0.9);
        raw::write_f32(&mut buf, l.deathplane_z, -120.0);
        if let Some((flag, center)) = l.spherical {
            raw::write_i32(&mut buf, flag, 1);
            raw::write_vec3(&mut buf, center, Vec3::new(0.0, 0.0, 50.0));
        }
        raw::write_vec3(&mut buf, l.ship_position, Vec3::new(300.0, 200.0, 12.0));
        raw::write_f32(&mut buf, l.ship_rotation, 1.5);
        write_color(&mut buf, l.ship_color, Rgb::new(255, 0, 0).into());
        if let Some(off) = l.unk_color {
            write_color(&mut buf, off, RgbSlot::EMPTY);
        }
        for (i, &off) in l.unknowns.iter().enumerate() {
            raw::write_i32(&mut buf, off, 0x40 + i as i32);
        }
        buf[l.known_len..].copy_from_slice(tail);
        buf
    }

    #[test]
    fn every_version_round_trips_with_tail() -> Result<()> {
        let tail = [0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04];
        for game in [Game::Rac1, Game::Rac2, Game::Rac3, Game::Deadlocked] {
            let bytes = fixture(game, &tail);
            let vars = LevelVariables::read(&bytes, game)?;
            assert_eq!(vars.tail, tail, "{game}");
            assert_eq!(vars.to_bytes(game), bytes, "{game}");
        }
        Ok(())
    }

    #[test]
    fn rac1_unk_color_sentinel_decodes_as_unset() -> Result<()> {
        let bytes = fixture(Game::Rac1, &[]);
        let vars = LevelVariables::read(&bytes, Game::Rac1)?;

        let unk = vars.unk_color.expect("RAC1 carries the slot");
        assert_eq!(unk.get(), None);
        assert_eq!(unk.raw(), [-1, 0, 0]);

        // Re-encode keeps the sentinel, not (0, 0, 0).
        let out = vars.to_bytes(Game::Rac1);
        assert_eq!(raw::read_i32(&out, 0x48), -1);
        assert_eq!(out, bytes);
        Ok(())
    }

    #[test]
    fn spherical_world_is_version_gated() -> Result<()> {
        let rac1 = LevelVariables::read(&fixture(Game::Rac1, &[]), Game::Rac1)?;
        assert_eq!(rac1.spherical_world, None);
        assert!(rac1.unk_color.is_some());

        let rac3 = LevelVariables::read(&fixture(Game::Rac3, &[]), Game::Rac3)?;
        let world = rac3.spherical_world.expect("RAC3 carries the flag");
        assert_eq!(world.enabled, 1);
        assert_eq!(world.center, Vec3::new(0.0, 0.0, 50.0));
        assert_eq!(rac3.unk_color, None);
        Ok(())
    }

    #[test]
    #[should_panic(expected = "unknowns vector does not match")]
    fn encode_rejects_wrong_unknowns_count() {
        let bytes = fixture(Game::Rac3, &[]);
        let mut vars = LevelVariables::read(&bytes, Game::Rac3).unwrap();
        vars.unknowns.truncate(1);
        let _ = vars.to_bytes(Game::Rac3);
    }

    #[test]
    fn truncated_record_is_fatal() {
        let result = LevelVariables::read(&[0u8; 0x20], Game::Rac2);
        assert!(matches!(
            result,
            Err(Error::TruncatedSection {
                kind: ObjectKind::LevelVariables,
                expected: 0x60,
                actual: 0x20,
            })
        ));
    }
}

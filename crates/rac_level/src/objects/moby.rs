//! Moby records: dynamically placed, animatable game-object instances.
//!
//! The moby is the most complex single record and the one whose layout moves
//! the most between releases. Field *order*, not just presence, changes
//! between the three layout variants, so each variant gets its own offset
//! table rather than a shared table with exceptions.

use glam::{Mat4, Quat, Vec3};
use tracing::debug;

use crate::catalog::{ModelCatalog, ModelEntry};
use crate::error::Result;
use crate::game::Game;
use crate::math::RgbSlot;
use crate::{raw, transform};

/// Per-variant field offset table.
struct MobyLayout {
    len: usize,
    mission_id: usize,
    spawn_type: usize,
    spawn_id: usize,
    bolts: usize,
    model_id: usize,
    scale: usize,
    draw_distance: usize,
    update_distance: usize,
    position: usize,
    rotation: usize,
    group_index: usize,
    is_rooted: usize,
    rooted_distance: usize,
    pvar_index: usize,
    occlusion: usize,
    mode: usize,
    color: usize,
    light: usize,
    cutscene: usize,
    unknowns: &'static [usize],
}

const RAC1: MobyLayout = MobyLayout {
    len: 0x78,
    mission_id: 0x00,
    spawn_type: 0x08,
    spawn_id: 0x0C,
    bolts: 0x10,
    model_id: 0x18,
    scale: 0x1C,
    draw_distance: 0x20,
    update_distance: 0x24,
    position: 0x30,
    rotation: 0x3C,
    group_index: 0x48,
    is_rooted: 0x4C,
    rooted_distance: 0x50,
    pvar_index: 0x58,
    occlusion: 0x5C,
    mode: 0x60,
    color: 0x64,
    light: 0x70,
    cutscene: 0x74,
    unknowns: &[0x04, 0x14, 0x28, 0x2C, 0x54],
};

const RAC23: MobyLayout = MobyLayout {
    len: 0x88,
    mission_id: 0x00,
    spawn_type: 0x08,
    spawn_id: 0x0C,
    bolts: 0x10,
    model_id: 0x28,
    scale: 0x2C,
    draw_distance: 0x30,
    update_distance: 0x34,
    position: 0x40,
    rotation: 0x4C,
    group_index: 0x58,
    is_rooted: 0x5C,
    rooted_distance: 0x60,
    pvar_index: 0x68,
    occlusion: 0x6C,
    mode: 0x70,
    color: 0x74,
    light: 0x80,
    cutscene: 0x84,
    unknowns: &[0x04, 0x14, 0x18, 0x1C, 0x20, 0x24, 0x38, 0x3C, 0x64],
};

const DEADLOCKED: MobyLayout = MobyLayout {
    len: 0x70,
    mission_id: 0x00,
    spawn_type: 0x08,
    spawn_id: 0x0C,
    bolts: 0x10,
    model_id: 0x14,
    scale: 0x18,
    draw_distance: 0x1C,
    update_distance: 0x20,
    position: 0x24,
    rotation: 0x30,
    group_index: 0x3C,
    is_rooted: 0x40,
    rooted_distance: 0x44,
    pvar_index: 0x48,
    occlusion: 0x4C,
    mode: 0x50,
    color: 0x54,
    light: 0x60,
    cutscene: 0x64,
    unknowns: &[0x04, 0x68, 0x6C],
};

fn layout(game: Game) -> &'static MobyLayout {
    match game {
        Game::Rac1 => &RAC1,
        Game::Rac2 | Game::Rac3 => &RAC23,
        Game::Deadlocked => &DEADLOCKED,
    }
}

/// A dynamically placed game-object instance (NPC, pickup, hazard).
///
/// Rotation is held as a quaternion; the on-disk Euler angles are an
/// intentionally normalized field, recomputed from the live quaternion at
/// encode time. The `unknowns` vector carries the variant's unidentified
/// integers in layout order, verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Moby {
    pub mission_id: i32,
    pub spawn_type: i32,
    pub spawn_id: i32,
    pub bolts: i32,
    pub model_id: i32,
    /// Resolved mesh catalog entry; `None` when `model_id` is absent from
    /// the catalog. The moby stays editable as a placeholder either way.
    pub model: Option<ModelEntry>,
    pub scale: f32,
    pub draw_distance: i32,
    pub update_distance: i32,
    pub position: Vec3,
    pub rotation: Quat,
    pub group_index: i32,
    pub is_rooted: i32,
    pub rooted_distance: f32,
    /// Index into the external pvar blob table, owned by another subsystem.
    pub pvar_index: i32,
    pub occlusion: i32,
    pub mode: i32,
    pub color: RgbSlot,
    pub light: i32,
    pub cutscene: i32,
    pub unknowns: Vec<i32>,
}

impl Moby {
    /// Record length under the given game.
    pub fn len(game: Game) -> usize {
        layout(game).len
    }

    /// Decodes the record at `index` of a moby section.
    ///
    /// The model id is resolved against `models`; a miss is not an error.
    pub fn read(block: &[u8], index: usize, game: Game, models: &ModelCatalog) -> Result<Moby> {
        let l = layout(game);
        let buf = &block[index * l.len..(index + 1) * l.len];

        let model_id = raw::read_i32(buf, l.model_id);
        let model = models.get(model_id);
        if model.is_none() {
            debug!(model_id, index, "moby model id missing from catalog");
        }

        Ok(Moby {
            mission_id: raw::read_i32(buf, l.mission_id),
            spawn_type: raw::read_i32(buf, l.spawn_type),
            spawn_id: raw::read_i32(buf, l.spawn_id),
            bolts: raw::read_i32(buf, l.bolts),
            model_id,
            model,
            scale: raw::read_f32(buf, l.scale),
            draw_distance: raw::read_i32(buf, l.draw_distance),
            update_distance: raw::read_i32(buf, l.update_distance),
            position: raw::read_vec3(buf, l.position),
            rotation: transform::quat_from_euler(raw::read_vec3(buf, l.rotation)),
            group_index: raw::read_i32(buf, l.group_index),
            is_rooted: raw::read_i32(buf, l.is_rooted),
            rooted_distance: raw::read_f32(buf, l.rooted_distance),
            pvar_index: raw::read_i32(buf, l.pvar_index),
            occlusion: raw::read_i32(buf, l.occlusion),
            mode: raw::read_i32(buf, l.mode),
            color: RgbSlot::from_raw([
                raw::read_i32(buf, l.color),
                raw::read_i32(buf, l.color + 4),
                raw::read_i32(buf, l.color + 8),
            ]),
            light: raw::read_i32(buf, l.light),
            cutscene: raw::read_i32(buf, l.cutscene),
            unknowns: l
                .unknowns
                .iter()
                .map(|&off| raw::read_i32(buf, off))
                .collect(),
        })
    }

    pub fn to_bytes(&self, game: Game) -> Vec<u8> {
        let l = layout(game);
        let mut out = vec![0u8; l.len];

        raw::write_i32(&mut out, l.mission_id, self.mission_id);
        raw::write_i32(&mut out, l.spawn_type, self.spawn_type);
        raw::write_i32(&mut out, l.spawn_id, self.spawn_id);
        raw::write_i32(&mut out, l.bolts, self.bolts);
        raw::write_i32(&mut out, l.model_id, self.model_id);
        raw::write_f32(&mut out, l.scale, self.scale);
        raw::write_i32(&mut out, l.draw_distance, self.draw_distance);
        raw::write_i32(&mut out, l.update_distance, self.update_distance);
        raw::write_vec3(&mut out, l.position, self.position);
        raw::write_vec3(&mut out, l.rotation, transform::euler_from_quat(self.rotation));
        raw::write_i32(&mut out, l.group_index, self.group_index);
        raw::write_i32(&mut out, l.is_rooted, self.is_rooted);
        raw::write_f32(&mut out, l.rooted_distance, self.rooted_distance);
        raw::write_i32(&mut out, l.pvar_index, self.pvar_index);
        raw::write_i32(&mut out, l.occlusion, self.occlusion);
        raw::write_i32(&mut out, l.mode, self.mode);
        let [r, g, b] = self.color.raw();
        raw::write_i32(&mut out, l.color, r);
        raw::write_i32(&mut out, l.color + 4, g);
        raw::write_i32(&mut out, l.color + 8, b);
        raw::write_i32(&mut out, l.light, self.light);
        raw::write_i32(&mut out, l.cutscene, self.cutscene);
        assert_eq!(
            self.unknowns.len(),
            l.unknowns.len(),
            "moby unknowns vector does not match the {game} layout",
        );
        for (&off, &value) in l.unknowns.iter().zip(&self.unknowns) {
            raw::write_i32(&mut out, off, value);
        }

        out
    }

    /// The render transform: authored scale times the referenced mesh's
    /// model size (1.0 for unresolved placeholders).
    pub fn transform_matrix(&self) -> Mat4 {
        let model_size = self.model.map_or(1.0, |m| m.size);
        transform::compose_placement(self.position, self.rotation, self.scale, model_size)
    }
}

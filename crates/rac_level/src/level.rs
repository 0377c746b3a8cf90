//! Section-level decoding and the [`Level`] aggregate.
//!
//! A level file is a series of homogeneous sections, each a record count plus
//! a block of records of one [`ObjectKind`]. This module turns section blocks
//! into typed collections and back. Section framing (where each block sits in
//! the file) is the caller's concern; this layer only sees the block bytes.

use tracing::{debug, instrument};

use crate::catalog::Catalogs;
use crate::error::{Error, Result};
use crate::game::Game;
use crate::objects::{
    Cuboid, Cylinder, DirectionalLight, EnvSample, EnvTransition, GameCamera, GrindPath,
    LanguageData, LevelObject, LevelVariables, Moby, ObjectKind, PointLight, Shrub, SoundInstance,
    Sphere, Spline, Tie, Type0C,
};
use crate::raw;

/// Decodes one section block into `count` records of `kind`.
///
/// The block length is validated up front: fixed kinds against
/// `count * record_len`, variable kinds record by record while walking. A
/// short buffer fails with [`Error::TruncatedSection`] before any partial
/// result is produced.
#[instrument(level = "debug", skip(bytes, catalogs), fields(len = bytes.len()))]
pub fn decode_section(
    kind: ObjectKind,
    bytes: &[u8],
    count: usize,
    game: Game,
    catalogs: &Catalogs,
) -> Result<Vec<LevelObject>> {
    if let Some(record_len) = kind.fixed_len(game) {
        let expected = count * record_len;
        if bytes.len() < expected {
            return Err(Error::TruncatedSection {
                kind,
                expected,
                actual: bytes.len(),
            });
        }
    }

    let mut objects = Vec::with_capacity(count);
    match kind {
        ObjectKind::Moby => {
            for i in 0..count {
                objects.push(LevelObject::Moby(Moby::read(
                    bytes,
                    i,
                    game,
                    &catalogs.moby_models,
                )?));
            }
        }
        ObjectKind::Tie => {
            for i in 0..count {
                objects.push(LevelObject::Tie(Tie::read(bytes, i, &catalogs.tie_models)?));
            }
        }
        ObjectKind::Shrub => {
            for i in 0..count {
                objects.push(LevelObject::Shrub(Shrub::read(
                    bytes,
                    i,
                    &catalogs.shrub_models,
                )?));
            }
        }
        ObjectKind::GameCamera => {
            for i in 0..count {
                objects.push(LevelObject::GameCamera(GameCamera::read(bytes, i)?));
            }
        }
        ObjectKind::Cuboid => {
            for i in 0..count {
                objects.push(LevelObject::Cuboid(Cuboid::read(bytes, i)?));
            }
        }
        ObjectKind::Sphere => {
            for i in 0..count {
                objects.push(LevelObject::Sphere(Sphere::read(bytes, i)?));
            }
        }
        ObjectKind::Cylinder => {
            for i in 0..count {
                objects.push(LevelObject::Cylinder(Cylinder::read(bytes, i)?));
            }
        }
        ObjectKind::Type0C => {
            for i in 0..count {
                objects.push(LevelObject::Type0C(Type0C::read(bytes, i)?));
            }
        }
        ObjectKind::SoundInstance => {
            for i in 0..count {
                objects.push(LevelObject::SoundInstance(SoundInstance::read(bytes, i)?));
            }
        }
        ObjectKind::DirectionalLight => {
            for i in 0..count {
                objects.push(LevelObject::DirectionalLight(DirectionalLight::read(
                    bytes, i,
                )?));
            }
        }
        ObjectKind::PointLight => {
            for i in 0..count {
                objects.push(LevelObject::PointLight(PointLight::read(bytes, i, game)?));
            }
        }
        ObjectKind::EnvSample => {
            for i in 0..count {
                objects.push(LevelObject::EnvSample(EnvSample::read(bytes, i, game)?));
            }
        }
        ObjectKind::EnvTransition => {
            for i in 0..count {
                objects.push(LevelObject::EnvTransition(EnvTransition::read(bytes, i)?));
            }
        }
        ObjectKind::GrindPath => {
            for i in 0..count {
                objects.push(LevelObject::GrindPath(GrindPath::read(bytes, i)?));
            }
        }
        ObjectKind::Spline => {
            let mut cursor = 0usize;
            for _ in 0..count {
                let header_end = cursor + Spline::HEADER_LEN;
                if bytes.len() < header_end {
                    return Err(Error::TruncatedSection {
                        kind,
                        expected: header_end,
                        actual: bytes.len(),
                    });
                }
                let vertex_count = raw::read_u32(bytes, cursor) as usize;
                let record_end = header_end + vertex_count * 0x10;
                if bytes.len() < record_end {
                    return Err(Error::TruncatedSection {
                        kind,
                        expected: record_end,
                        actual: bytes.len(),
                    });
                }
                objects.push(LevelObject::Spline(Spline::read(
                    &bytes[cursor..record_end],
                )?));
                cursor = record_end;
            }
        }
        ObjectKind::LanguageData => {
            let mut offset = 0usize;
            for _ in 0..count {
                if bytes.len() < offset + LanguageData::HEADER_LEN {
                    return Err(Error::TruncatedSection {
                        kind,
                        expected: offset + LanguageData::HEADER_LEN,
                        actual: bytes.len(),
                    });
                }
                let record = LanguageData::read(bytes, offset)?;
                offset += record.encoded_len();
                objects.push(LevelObject::LanguageData(record));
            }
        }
        ObjectKind::LevelVariables => {
            // One record per level; the whole block is the record.
            if count > 0 {
                objects.push(LevelObject::LevelVariables(LevelVariables::read(
                    bytes, game,
                )?));
            }
        }
    }

    debug!(count = objects.len(), "decoded section");
    Ok(objects)
}

/// Encodes a homogeneous section block from `objects`, in collection order.
///
/// Every object must be of `kind`; a stray object of another kind fails with
/// [`Error::SectionKindMismatch`] and nothing is emitted.
pub fn encode_section(objects: &[LevelObject], kind: ObjectKind, game: Game) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for object in objects {
        if object.kind() != kind {
            return Err(Error::SectionKindMismatch {
                expected: kind,
                actual: object.kind(),
            });
        }
        out.extend(object.encode(game)?);
    }
    Ok(out)
}

/// An in-memory level: one insertion-ordered collection per record kind.
///
/// Objects are plain `Clone` values; duplicating or removing one is ordinary
/// `Vec` manipulation. The grind spline list is kept separate from the main
/// spline list because grind paths pair with it by ordinal.
#[derive(Debug, Clone)]
pub struct Level {
    pub game: Game,
    pub mobies: Vec<Moby>,
    pub ties: Vec<Tie>,
    pub shrubs: Vec<Shrub>,
    pub cameras: Vec<GameCamera>,
    pub splines: Vec<Spline>,
    pub cuboids: Vec<Cuboid>,
    pub spheres: Vec<Sphere>,
    pub cylinders: Vec<Cylinder>,
    pub type0cs: Vec<Type0C>,
    pub sound_instances: Vec<SoundInstance>,
    pub directional_lights: Vec<DirectionalLight>,
    pub point_lights: Vec<PointLight>,
    pub env_samples: Vec<EnvSample>,
    pub env_transitions: Vec<EnvTransition>,
    pub grind_paths: Vec<GrindPath>,
    /// Splines paired 1:1 by ordinal with `grind_paths`.
    pub grind_splines: Vec<Spline>,
    pub language_data: Vec<LanguageData>,
    pub variables: Option<LevelVariables>,
}

impl Level {
    pub fn new(game: Game) -> Level {
        Level {
            game,
            mobies: Vec::new(),
            ties: Vec::new(),
            shrubs: Vec::new(),
            cameras: Vec::new(),
            splines: Vec::new(),
            cuboids: Vec::new(),
            spheres: Vec::new(),
            cylinders: Vec::new(),
            type0cs: Vec::new(),
            sound_instances: Vec::new(),
            directional_lights: Vec::new(),
            point_lights: Vec::new(),
            env_samples: Vec::new(),
            env_transitions: Vec::new(),
            grind_paths: Vec::new(),
            grind_splines: Vec::new(),
            language_data: Vec::new(),
            variables: None,
        }
    }

    /// Decodes a section block and appends the records to the matching typed
    /// collection.
    pub fn decode_section(
        &mut self,
        kind: ObjectKind,
        bytes: &[u8],
        count: usize,
        catalogs: &Catalogs,
    ) -> Result<()> {
        let objects = decode_section(kind, bytes, count, self.game, catalogs)?;
        for object in objects {
            match object {
                LevelObject::Moby(o) => self.mobies.push(o),
                LevelObject::Tie(o) => self.ties.push(o),
                LevelObject::Shrub(o) => self.shrubs.push(o),
                LevelObject::GameCamera(o) => self.cameras.push(o),
                LevelObject::Spline(o) => self.splines.push(o),
                LevelObject::Cuboid(o) => self.cuboids.push(o),
                LevelObject::Sphere(o) => self.spheres.push(o),
                LevelObject::Cylinder(o) => self.cylinders.push(o),
                LevelObject::Type0C(o) => self.type0cs.push(o),
                LevelObject::SoundInstance(o) => self.sound_instances.push(o),
                LevelObject::DirectionalLight(o) => self.directional_lights.push(o),
                LevelObject::PointLight(o) => self.point_lights.push(o),
                LevelObject::EnvSample(o) => self.env_samples.push(o),
                LevelObject::EnvTransition(o) => self.env_transitions.push(o),
                LevelObject::GrindPath(o) => self.grind_paths.push(o),
                LevelObject::LanguageData(o) => self.language_data.push(o),
                LevelObject::LevelVariables(o) => self.variables = Some(o),
            }
        }
        Ok(())
    }

    /// Decodes a spline section into the grind spline list instead of the
    /// general one.
    pub fn decode_grind_splines(
        &mut self,
        bytes: &[u8],
        count: usize,
        catalogs: &Catalogs,
    ) -> Result<()> {
        for object in decode_section(ObjectKind::Spline, bytes, count, self.game, catalogs)? {
            if let LevelObject::Spline(spline) = object {
                self.grind_splines.push(spline);
            }
        }
        Ok(())
    }

    /// Encodes the typed collection for `kind` back into a section block.
    pub fn encode_section(&self, kind: ObjectKind) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        match kind {
            ObjectKind::Moby => {
                for o in &self.mobies {
                    out.extend(o.to_bytes(self.game));
                }
            }
            ObjectKind::Tie => {
                for o in &self.ties {
                    out.extend(o.to_bytes());
                }
            }
            ObjectKind::Shrub => {
                for o in &self.shrubs {
                    out.extend(o.to_bytes());
                }
            }
            ObjectKind::GameCamera => {
                for o in &self.cameras {
                    out.extend(o.to_bytes()?);
                }
            }
            ObjectKind::Spline => {
                for o in &self.splines {
                    out.extend(o.to_bytes()?);
                }
            }
            ObjectKind::Cuboid => {
                for o in &self.cuboids {
                    out.extend(o.to_bytes());
                }
            }
            ObjectKind::Sphere => {
                for o in &self.spheres {
                    out.extend(o.to_bytes());
                }
            }
            ObjectKind::Cylinder => {
                for o in &self.cylinders {
                    out.extend(o.to_bytes());
                }
            }
            ObjectKind::Type0C => {
                for o in &self.type0cs {
                    out.extend(o.to_bytes());
                }
            }
            ObjectKind::SoundInstance => {
                for o in &self.sound_instances {
                    out.extend(o.to_bytes());
                }
            }
            ObjectKind::DirectionalLight => {
                for o in &self.directional_lights {
                    out.extend(o.to_bytes()?);
                }
            }
            ObjectKind::PointLight => {
                for o in &self.point_lights {
                    out.extend(o.to_bytes(self.game));
                }
            }
            ObjectKind::EnvSample => {
                for o in &self.env_samples {
                    out.extend(o.to_bytes(self.game));
                }
            }
            ObjectKind::EnvTransition => {
                for o in &self.env_transitions {
                    out.extend(o.to_bytes());
                }
            }
            ObjectKind::GrindPath => {
                for o in &self.grind_paths {
                    out.extend(o.to_bytes()?);
                }
            }
            ObjectKind::LanguageData => {
                for o in &self.language_data {
                    out.extend(o.to_bytes());
                }
            }
            ObjectKind::LevelVariables => {
                if let Some(vars) = &self.variables {
                    out.extend(vars.to_bytes(self.game));
                }
            }
        }
        Ok(out)
    }

    /// The grind path at `index` together with its spline, paired by
    /// ordinal. `None` when either list is too short.
    pub fn grind_spline(&self, index: usize) -> Option<(&GrindPath, &Spline)> {
        Some((self.grind_paths.get(index)?, self.grind_splines.get(index)?))
    }

    /// Encodes the grind spline list as a section block.
    pub fn encode_grind_splines(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for spline in &self.grind_splines {
            out.extend(spline.to_bytes()?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::objects::SplineVertex;
    use glam::Vec3;
    use pretty_assertions::assert_eq;

    fn spline(points: &[(f32, f32, f32)]) -> Spline {
        Spline {
            unk1: 0,
            unk2: 0,
            unk3: 0,
            vertices: points
                .iter()
                .map(|&(x, y, z)| SplineVertex {
                    position: Vec3::new(x, y, z),
                    w: 0.0,
                })
                .collect(),
        }
    }

    #[test]
    fn spline_section_walks_variable_records() -> Result<()> {
        let a = spline(&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)]);
        let b = spline(&[(5.0, 5.0, 5.0)]);
        let mut bytes = a.to_bytes()?;
        bytes.extend(b.to_bytes()?);

        let catalogs = Catalogs::default();
        let objects = decode_section(ObjectKind::Spline, &bytes, 2, Game::Rac2, &catalogs)?;
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0], LevelObject::Spline(a));
        assert_eq!(objects[1], LevelObject::Spline(b));

        assert_eq!(encode_section(&objects, ObjectKind::Spline, Game::Rac2)?, bytes);
        Ok(())
    }

    #[test]
    fn truncated_spline_section_fails_before_partial_decode() -> Result<()> {
        let bytes = spline(&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)]).to_bytes()?;
        let catalogs = Catalogs::default();

        let result = decode_section(
            ObjectKind::Spline,
            &bytes[..bytes.len() - 4],
            1,
            Game::Rac1,
            &catalogs,
        );
        assert!(matches!(
            result,
            Err(Error::TruncatedSection {
                kind: ObjectKind::Spline,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn fixed_section_length_is_validated_up_front() {
        let catalogs = Catalogs::default();
        let bytes = vec![0u8; GrindPath::LEN * 2 - 1];

        let result = decode_section(ObjectKind::GrindPath, &bytes, 2, Game::Rac3, &catalogs);
        assert!(matches!(
            result,
            Err(Error::TruncatedSection {
                kind: ObjectKind::GrindPath,
                expected: 0x40,
                actual: 0x3F,
            })
        ));
    }

    #[test]
    fn encode_section_rejects_mixed_kinds() -> Result<()> {
        let objects = vec![
            LevelObject::GrindPath(GrindPath::read(&[0u8; GrindPath::LEN], 0)?),
            LevelObject::Spline(spline(&[(0.0, 0.0, 0.0)])),
        ];

        let result = encode_section(&objects, ObjectKind::GrindPath, Game::Rac1);
        assert!(matches!(
            result,
            Err(Error::SectionKindMismatch {
                expected: ObjectKind::GrindPath,
                actual: ObjectKind::Spline,
            })
        ));
        Ok(())
    }

    #[test]
    fn level_routes_records_to_typed_collections() -> Result<()> {
        let catalogs = Catalogs::default();
        let mut level = Level::new(Game::Rac2);

        let path_bytes = vec![0u8; GrindPath::LEN];
        level.decode_section(ObjectKind::GrindPath, &path_bytes, 1, &catalogs)?;

        let spline_bytes = spline(&[(1.0, 2.0, 3.0)]).to_bytes()?;
        level.decode_grind_splines(&spline_bytes, 1, &catalogs)?;

        assert_eq!(level.grind_paths.len(), 1);
        assert_eq!(level.grind_splines.len(), 1);
        assert!(level.splines.is_empty());

        let (path, rail) = level.grind_spline(0).expect("paired by ordinal");
        assert_eq!(path.radius, 0.0);
        assert_eq!(rail.vertices[0].position, Vec3::new(1.0, 2.0, 3.0));
        assert!(level.grind_spline(1).is_none());

        assert_eq!(level.encode_section(ObjectKind::GrindPath)?, path_bytes);
        assert_eq!(level.encode_grind_splines()?, spline_bytes);
        Ok(())
    }

    #[test]
    fn level_variables_section_is_a_single_record() -> Result<()> {
        let catalogs = Catalogs::default();
        let mut level = Level::new(Game::Rac1);
        let bytes = vec![0u8; LevelVariables::known_len(Game::Rac1) + 4];

        level.decode_section(ObjectKind::LevelVariables, &bytes, 1, &catalogs)?;
        let vars = level.variables.as_ref().expect("variables decoded");
        assert_eq!(vars.tail.len(), 4);
        assert_eq!(level.encode_section(ObjectKind::LevelVariables)?, bytes);
        Ok(())
    }
}

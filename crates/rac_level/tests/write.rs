use glam::{Mat4, Quat, Vec3};
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

use rac_level::catalog::Catalogs;
use rac_level::error::Result;
use rac_level::objects::ObjectKind;
use rac_level::{decode_section, encode_section, Game};

const ALL_GAMES: [Game; 4] = [Game::Rac1, Game::Rac2, Game::Rac3, Game::Deadlocked];

/// Fills a record with a deterministic byte pattern, then patches the matrix
/// fields (if any) so decode does not reject it as malformed.
fn patterned_record(len: usize, seed: u8, matrix_offsets: &[usize]) -> Vec<u8> {
    let mut buf: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(seed)).collect();
    for &offset in matrix_offsets {
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, 2.0, 0.5),
            Quat::from_rotation_z(0.75),
            Vec3::new(40.0, -3.0, 12.0),
        );
        for (i, value) in matrix.to_cols_array().iter().enumerate() {
            buf[offset + i * 4..offset + i * 4 + 4].copy_from_slice(&value.to_le_bytes());
        }
    }
    buf
}

fn assert_section_round_trips(kind: ObjectKind, game: Game, bytes: &[u8], count: usize) {
    let catalogs = Catalogs::default();
    let objects = decode_section(kind, bytes, count, game, &catalogs)
        .unwrap_or_else(|e| panic!("decode {kind} under {game}: {e}"));
    assert_eq!(objects.len(), count);
    let encoded = encode_section(&objects, kind, game)
        .unwrap_or_else(|e| panic!("encode {kind} under {game}: {e}"));
    assert_eq!(encoded, bytes, "{kind} under {game} is not byte-exact");
}

#[traced_test]
#[test]
fn fixed_kinds_round_trip_byte_exact_in_every_version() {
    // Kinds whose record carries no transform matrix: any byte pattern is a
    // valid record and must survive decode/encode untouched.
    let plain_kinds = [
        ObjectKind::GameCamera,
        ObjectKind::DirectionalLight,
        ObjectKind::PointLight,
        ObjectKind::EnvSample,
        ObjectKind::GrindPath,
    ];

    for game in ALL_GAMES {
        for kind in plain_kinds {
            let len = kind.fixed_len(game).unwrap();
            let mut block = patterned_record(len, 3, &[]);
            block.extend(patterned_record(len, 7, &[]));
            assert_section_round_trips(kind, game, &block, 2);
        }
    }
}

#[traced_test]
#[test]
fn moby_round_trips_byte_exact_in_every_version() {
    for game in ALL_GAMES {
        let len = ObjectKind::Moby.fixed_len(game).unwrap();
        // The on-disk Euler angles are recomputed from the live quaternion at
        // encode time, so only a representable rotation (zero here) is
        // byte-stable; everything else is arbitrary passthrough.
        let rotation_offset = match game {
            Game::Rac1 => 0x3C,
            Game::Rac2 | Game::Rac3 => 0x4C,
            Game::Deadlocked => 0x30,
        };
        let mut block = patterned_record(len, 9, &[]);
        block.extend(patterned_record(len, 11, &[]));
        for record in 0..2 {
            let offset = record * len + rotation_offset;
            block[offset..offset + 12].fill(0);
        }
        assert_section_round_trips(ObjectKind::Moby, game, &block, 2);
    }
}

#[traced_test]
#[test]
fn matrix_kinds_round_trip_arbitrary_matrices_byte_exact() {
    // These record families keep the on-disk matrix as source of truth, so
    // any finite matrix (rotation and non-uniform scale included) must
    // survive verbatim when the record is never mutated.
    // (kind, matrix offsets within the record)
    let matrix_kinds = [
        (ObjectKind::Tie, &[0x00][..]),
        (ObjectKind::Shrub, &[0x00][..]),
        (ObjectKind::Cuboid, &[0x00, 0x40][..]),
        (ObjectKind::Sphere, &[0x00, 0x40][..]),
        (ObjectKind::Cylinder, &[0x00, 0x40][..]),
        (ObjectKind::Type0C, &[0x00, 0x40][..]),
        (ObjectKind::SoundInstance, &[0x10, 0x50][..]),
        (ObjectKind::EnvTransition, &[0x00, 0x40][..]),
    ];

    for game in ALL_GAMES {
        for (kind, offsets) in matrix_kinds {
            let len = kind.fixed_len(game).unwrap();
            let block = patterned_record(len, 5, offsets);
            assert_section_round_trips(kind, game, &block, 1);
        }
    }
}

#[traced_test]
#[test]
fn tie_with_awkward_rotation_and_m44_sentinel_round_trips() {
    let mut block = patterned_record(0x70, 0, &[]);
    let matrix = Mat4::from_scale_rotation_translation(
        Vec3::new(1.37, 2.09, 0.52),
        Quat::from_euler(glam::EulerRot::ZYX, 0.31, -0.77, 1.23),
        Vec3::new(40.0, -3.0, 12.0),
    );
    for (i, value) in matrix.to_cols_array().iter().enumerate() {
        block[i * 4..i * 4 + 4].copy_from_slice(&value.to_le_bytes());
    }
    // stash a non-1.0 value in the matrix's last element
    block[0x3C..0x40].copy_from_slice(&1017.0f32.to_le_bytes());

    assert_section_round_trips(ObjectKind::Tie, Game::Rac2, &block, 1);
}

#[traced_test]
#[test]
fn volume_with_stale_inverse_round_trips() {
    // The stored inverse deliberately disagrees with the transform; decode
    // must keep it verbatim rather than recompute.
    let mut block = patterned_record(0x80, 0, &[0x00]);
    for (i, value) in Mat4::from_translation(Vec3::new(9.0, 9.0, 9.0))
        .to_cols_array()
        .iter()
        .enumerate()
    {
        block[0x40 + i * 4..0x44 + i * 4].copy_from_slice(&value.to_le_bytes());
    }

    assert_section_round_trips(ObjectKind::Sphere, Game::Deadlocked, &block, 1);
}

#[traced_test]
#[test]
fn spline_section_round_trips() -> Result<()> {
    #[rustfmt::skip]
    let block: Vec<u8> = vec![
        0x02, 0x00, 0x00, 0x00, // 2 vertices
        0x00, 0x00, 0x00, 0x00,
        0x05, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x80, 0x3F, // (1, 0, 0, 0)
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x40, // (2, 2, 2, 1)
        0x00, 0x00, 0x00, 0x40,
        0x00, 0x00, 0x00, 0x40,
        0x00, 0x00, 0x80, 0x3F,
        0x01, 0x00, 0x00, 0x00, // second spline, 1 vertex
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0xA0, 0x40, // (5, 0, 0, 0)
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
    ];

    let catalogs = Catalogs::default();
    let objects = decode_section(ObjectKind::Spline, &block, 2, Game::Rac1, &catalogs)?;
    assert_eq!(encode_section(&objects, ObjectKind::Spline, Game::Rac1)?, block);
    Ok(())
}

#[traced_test]
#[test]
fn level_variables_tail_round_trips_in_every_version() -> Result<()> {
    use rac_level::objects::LevelVariables;

    for game in ALL_GAMES {
        let known = LevelVariables::known_len(game);
        let block: Vec<u8> = (0..known + 12).map(|i| i as u8).collect();

        let vars = LevelVariables::read(&block, game)?;
        assert_eq!(vars.tail.len(), 12);
        assert_eq!(vars.to_bytes(game), block, "{game}");
    }
    Ok(())
}

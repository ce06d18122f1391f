use std::fs;

use rand::Rng;
use sepconv::{io, CodecError, Raster, RasterType};

fn random_raster(width: usize, height: usize, ty: RasterType) -> Raster {
    let mut rng = rand::thread_rng();
    match ty.element_type() {
        sepconv::ElementType::U8 => {
            let bytes = (0..width * height * ty.pixel_size()).map(|_| rng.gen()).collect();
            Raster::from_vec(width, height, ty, bytes).unwrap()
        }
        sepconv::ElementType::F32 => {
            let mut raster = Raster::create(width, height, ty);
            for v in raster.as_f32_mut() {
                *v = rng.gen_range(-1000.0..1000.0);
            }
            raster
        }
    }
}

#[test]
fn raw_round_trip_preserves_every_tag() {
    let dir = tempfile::tempdir().unwrap();
    for ty in [
        RasterType::U8Gray,
        RasterType::F32Gray,
        RasterType::U8Rgb,
        RasterType::F32Rgb,
        RasterType::U8PlanarRgb,
        RasterType::F32PlanarRgb,
    ] {
        let path = dir.path().join(format!("raster_{}.srb", ty.pixel_size()));
        let original = random_raster(11, 6, ty);
        io::save(&path, &original).unwrap();
        let loaded = io::load(&path).unwrap();
        assert_eq!(loaded.raster_type(), ty);
        assert_eq!(loaded.width(), 11);
        assert_eq!(loaded.height(), 6);
        assert_eq!(loaded.as_bytes(), original.as_bytes(), "{ty:?}");
    }
}

#[test]
fn corrupted_begin_sentinel_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.srb");
    io::save(&path, &random_raster(4, 4, RasterType::U8Gray)).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes[0] ^= 0xFF;
    fs::write(&path, &bytes).unwrap();

    match io::load(&path) {
        Err(CodecError::CorruptStream("begin")) => {}
        other => panic!("expected a begin-sentinel error, got {other:?}"),
    }
}

#[test]
fn corrupted_end_sentinel_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt_end.srb");
    io::save(&path, &random_raster(4, 4, RasterType::U8Gray)).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&path, &bytes).unwrap();

    match io::load(&path) {
        Err(CodecError::CorruptStream("end")) => {}
        other => panic!("expected an end-sentinel error, got {other:?}"),
    }
}

#[test]
fn truncated_stream_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.srb");
    io::save(&path, &random_raster(4, 4, RasterType::F32Gray)).unwrap();

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    assert!(matches!(io::load(&path), Err(CodecError::Io(_))));
}

#[test]
fn unknown_type_code_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("badtag.srb");
    io::save(&path, &random_raster(3, 3, RasterType::U8Gray)).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    // header layout: begin(4) width(4) height(4) channels(4) type(4)
    bytes[16] = 99;
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        io::load(&path),
        Err(CodecError::UnknownTypeTag(99))
    ));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raster.xyz");
    let raster = random_raster(2, 2, RasterType::U8Gray);
    assert!(matches!(
        io::save(&path, &raster),
        Err(CodecError::UnknownExtension(_))
    ));
    assert!(matches!(
        io::load(&path),
        Err(CodecError::UnknownExtension(_))
    ));
}

#[cfg(feature = "image")]
mod containers {
    use super::*;

    #[test]
    fn png_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        for ty in [RasterType::U8Gray, RasterType::U8Rgb] {
            let path = dir.path().join(format!("img_{}.png", ty.pixel_size()));
            let original = random_raster(16, 12, ty);
            io::save(&path, &original).unwrap();
            let loaded = io::load(&path).unwrap();
            assert_eq!(loaded.raster_type(), ty);
            assert_eq!(loaded.as_u8(), original.as_u8());
        }
    }

    #[test]
    fn saving_a_float_raster_narrows_to_u8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float.png");
        let mut raster = Raster::create(8, 8, RasterType::F32Gray);
        raster.fill_f32(&[64.2]);
        io::save(&path, &raster).unwrap();
        let loaded = io::load(&path).unwrap();
        assert_eq!(loaded.raster_type(), RasterType::U8Gray);
        assert_eq!(loaded.get_u8(3, 3), 64);
    }

    #[test]
    fn saving_a_planar_raster_reorders_to_interleaved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planar.png");
        let original = random_raster(9, 9, RasterType::U8PlanarRgb);
        io::save(&path, &original).unwrap();
        let loaded = io::load(&path).unwrap();
        assert_eq!(loaded.raster_type(), RasterType::U8Rgb);
        for y in 0..9 {
            for x in 0..9 {
                assert_eq!(loaded.get_rgb_u8(x, y), original.get_rgb_u8(x, y));
            }
        }
    }
}

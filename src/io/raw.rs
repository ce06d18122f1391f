//! Tagged raw raster dump: `begin | width | height | channels | type |
//! element bytes | end`, all integers little-endian, with fixed sentinels
//! to catch stream corruption.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::errors::CodecError;
use crate::pixels::{ElementType, RasterType};
use crate::raster::{Raster, MAX_DIMENSION};

pub(crate) const BEGIN_TAG: u32 = u32::from_le_bytes(*b"SRB{");
pub(crate) const END_TAG: u32 = u32::from_le_bytes(*b"}SRB");

pub(crate) fn load(path: &Path) -> Result<Raster, CodecError> {
    let mut reader = BufReader::new(File::open(path)?);
    if read_u32(&mut reader)? != BEGIN_TAG {
        return Err(CodecError::CorruptStream("begin"));
    }
    let width = read_i32(&mut reader)?;
    let height = read_i32(&mut reader)?;
    let channels = read_i32(&mut reader)?;
    let code = read_i32(&mut reader)?;
    let ty = RasterType::from_code(code).ok_or(CodecError::UnknownTypeTag(code))?;
    if width <= 0
        || height <= 0
        || width as usize > MAX_DIMENSION
        || height as usize > MAX_DIMENSION
        || channels as usize != ty.channel_count()
    {
        return Err(CodecError::InvalidHeader(width, height));
    }
    let (width, height) = (width as usize, height as usize);

    let mut bytes = vec![0u8; width * height * ty.pixel_size()];
    reader.read_exact(&mut bytes)?;
    if ty.element_type() == ElementType::F32 {
        for quad in bytes.chunks_exact_mut(4) {
            let v = f32::from_le_bytes([quad[0], quad[1], quad[2], quad[3]]);
            quad.copy_from_slice(&v.to_ne_bytes());
        }
    }
    if read_u32(&mut reader)? != END_TAG {
        return Err(CodecError::CorruptStream("end"));
    }
    Ok(Raster::from_vec(width, height, ty, bytes)?)
}

pub(crate) fn save(path: &Path, raster: &Raster) -> Result<(), CodecError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&BEGIN_TAG.to_le_bytes())?;
    write_i32(&mut writer, raster.width() as i32)?;
    write_i32(&mut writer, raster.height() as i32)?;
    write_i32(&mut writer, raster.channel_count() as i32)?;
    write_i32(&mut writer, raster.raster_type().code())?;
    match raster.element_type() {
        ElementType::U8 => writer.write_all(raster.as_bytes())?,
        ElementType::F32 => {
            for v in raster.as_f32() {
                writer.write_all(&v.to_le_bytes())?;
            }
        }
    }
    writer.write_all(&END_TAG.to_le_bytes())?;
    writer.flush()?;
    Ok(())
}

fn read_u32(reader: &mut impl Read) -> Result<u32, CodecError> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

fn read_i32(reader: &mut impl Read) -> Result<i32, CodecError> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(i32::from_le_bytes(bytes))
}

fn write_i32(writer: &mut impl Write, v: i32) -> Result<(), CodecError> {
    writer.write_all(&v.to_le_bytes())?;
    Ok(())
}

//! Binary grid header format
//!
//! The header stores only the bake parameters; occupancy is re-sampled when
//! the grid is rebuilt from it. Layout, all little-endian IEEE-754 `f32`:
//!
//! | offset | field |
//! |---|---|
//! | 0, 4, 8 | size x, y, z |
//! | 12, 16, 20 | origin x, y, z |
//! | 24 | cell size |

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::Vec3;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use voxnav_common::{Error, Result};

use crate::config::BakeConfig;

/// Size of the encoded header in bytes
pub const GRID_HEADER_SIZE: usize = 7 * 4;

fn read_vec3<R: Read>(reader: &mut R) -> Result<Vec3> {
    Ok(Vec3::new(
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
    ))
}

fn write_vec3<W: Write>(writer: &mut W, v: Vec3) -> Result<()> {
    writer.write_f32::<LittleEndian>(v.x)?;
    writer.write_f32::<LittleEndian>(v.y)?;
    writer.write_f32::<LittleEndian>(v.z)?;
    Ok(())
}

/// Writes the header for `config` to a writer
pub fn write_grid_header<W: Write>(config: &BakeConfig, writer: &mut W) -> Result<()> {
    write_vec3(writer, config.size)?;
    write_vec3(writer, config.origin)?;
    writer.write_f32::<LittleEndian>(config.cell_size)?;
    Ok(())
}

/// Encodes the header for `config` into a new buffer
pub fn grid_header_to_bytes(config: &BakeConfig) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(GRID_HEADER_SIZE);
    write_grid_header(config, &mut data)?;
    Ok(data)
}

/// Decodes and validates a header
///
/// Bytes beyond the first [`GRID_HEADER_SIZE`] are ignored.
pub fn read_grid_header(data: &[u8]) -> Result<BakeConfig> {
    if data.len() < GRID_HEADER_SIZE {
        log::warn!(
            "Rejected grid header: {} bytes, need at least {}",
            data.len(),
            GRID_HEADER_SIZE
        );
        return Err(Error::Serialization(format!(
            "grid header needs {} bytes, got {}",
            GRID_HEADER_SIZE,
            data.len()
        )));
    }

    let mut cursor = Cursor::new(data);
    let size = read_vec3(&mut cursor)?;
    let origin = read_vec3(&mut cursor)?;
    let cell_size = cursor.read_f32::<LittleEndian>()?;

    let config = BakeConfig::new(size, origin, cell_size);
    if let Err(e) = config.validate() {
        log::warn!("Rejected grid header: {}", e);
        return Err(e);
    }
    Ok(config)
}

/// Writes the header for `config` to a file
pub fn save_grid_header<P: AsRef<Path>>(config: &BakeConfig, path: P) -> Result<()> {
    let data = grid_header_to_bytes(config)?;
    std::fs::write(path, data)?;
    Ok(())
}

/// Reads and validates a header from a file
pub fn load_grid_header<P: AsRef<Path>>(path: P) -> Result<BakeConfig> {
    let data = std::fs::read(path)?;
    read_grid_header(&data)
}

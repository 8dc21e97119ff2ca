//! Binary buffer files
//!
//! Layout (all little endian):
//!
//! ```text
//! magic   4 bytes  "MQB1"
//! dtype   u8       0 = f64, 1 = u32
//! rows    u64      number of 3-component rows
//! data    rows * 3 scalars, row major
//! ```

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use meshquant_core::{Error, Point3d, QuantizedVertex, Result, VertexBuffer, QuantizedBuffer};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// File magic of a buffer file
pub const BUFFER_MAGIC: [u8; 4] = *b"MQB1";

/// Conventional extension for buffer files
pub const BUFFER_EXTENSION: &str = "mqb";

/// Scalar type stored in a buffer file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferDType {
    F64,
    U32,
}

impl BufferDType {
    fn tag(self) -> u8 {
        match self {
            BufferDType::F64 => 0,
            BufferDType::U32 => 1,
        }
    }

    fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(BufferDType::F64),
            1 => Ok(BufferDType::U32),
            other => Err(Error::InvalidData(format!("unknown buffer dtype tag {}", other))),
        }
    }
}

/// Write a vertex buffer with full `f64` precision
pub fn write_vertex_buffer<P: AsRef<Path>>(vertices: &[Point3d], path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_header(&mut writer, BufferDType::F64, vertices.len())?;
    for v in vertices {
        writer.write_f64::<LittleEndian>(v.x)?;
        writer.write_f64::<LittleEndian>(v.y)?;
        writer.write_f64::<LittleEndian>(v.z)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a vertex buffer written by [`write_vertex_buffer`]
pub fn read_vertex_buffer<P: AsRef<Path>>(path: P) -> Result<VertexBuffer> {
    let mut reader = BufReader::new(File::open(path)?);
    let rows = read_header(&mut reader, BufferDType::F64)?;
    let mut vertices = Vec::with_capacity(rows.min(1 << 20));
    for _ in 0..rows {
        let x = reader.read_f64::<LittleEndian>()?;
        let y = reader.read_f64::<LittleEndian>()?;
        let z = reader.read_f64::<LittleEndian>()?;
        vertices.push(Point3d::new(x, y, z));
    }
    Ok(vertices)
}

/// Write quantized codes
pub fn write_quantized_buffer<P: AsRef<Path>>(codes: &[QuantizedVertex], path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_header(&mut writer, BufferDType::U32, codes.len())?;
    for code in codes {
        for &c in code {
            writer.write_u32::<LittleEndian>(c)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Read quantized codes written by [`write_quantized_buffer`]
pub fn read_quantized_buffer<P: AsRef<Path>>(path: P) -> Result<QuantizedBuffer> {
    let mut reader = BufReader::new(File::open(path)?);
    let rows = read_header(&mut reader, BufferDType::U32)?;
    let mut codes = Vec::with_capacity(rows.min(1 << 20));
    for _ in 0..rows {
        let mut code = [0u32; 3];
        reader.read_u32_into::<LittleEndian>(&mut code)?;
        codes.push(code);
    }
    Ok(codes)
}

fn write_header<W: Write>(writer: &mut W, dtype: BufferDType, rows: usize) -> Result<()> {
    writer.write_all(&BUFFER_MAGIC)?;
    writer.write_u8(dtype.tag())?;
    writer.write_u64::<LittleEndian>(rows as u64)?;
    Ok(())
}

fn read_header<R: Read>(reader: &mut R, expected: BufferDType) -> Result<usize> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != BUFFER_MAGIC {
        return Err(Error::InvalidData(format!("not a buffer file (magic {:?})", magic)));
    }
    let dtype = BufferDType::from_tag(reader.read_u8()?)?;
    if dtype != expected {
        return Err(Error::InvalidData(format!(
            "buffer holds {:?} values, expected {:?}",
            dtype, expected
        )));
    }
    let rows = reader.read_u64::<LittleEndian>()?;
    usize::try_from(rows).map_err(|_| Error::InvalidData(format!("row count {} too large", rows)))
}

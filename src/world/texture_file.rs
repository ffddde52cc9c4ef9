//! Binary texture files.
//!
//! Layout: width and height as little-endian `u32`, then one 9 byte record per
//! cell in row-major order: foreground RGBA, background RGBA, character.

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use common_stdx::Point;

use crate::{
    UPoint,
    color::{CellA, Rgba},
    error::FileError,
};

const HEADER_LEN: u64 = 8;
const RECORD_LEN: u64 = 9;

pub(crate) fn read(path: &Path) -> Result<(UPoint, Vec<CellA>), FileError> {
    let display = path.display().to_string();
    let read_err = |source| FileError::FailedReadingPath {
        path: display.clone(),
        source,
    };

    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|mut f| f.read_to_end(&mut bytes))
        .map_err(read_err)?;

    if (bytes.len() as u64) < HEADER_LEN {
        return Err(FileError::MissingTextureHeader {
            path: display,
            found: bytes.len() as u64,
        });
    }

    let width = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let height = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let Some(expected) = (width as u64)
        .checked_mul(height as u64)
        .and_then(|cells| cells.checked_mul(RECORD_LEN))
        .and_then(|records| records.checked_add(HEADER_LEN))
    else {
        return Err(FileError::TextureTooLarge {
            path: display,
            width,
            height,
        });
    };
    if bytes.len() as u64 != expected {
        return Err(FileError::TextureSizeMismatch {
            path: display,
            width,
            height,
            expected,
            found: bytes.len() as u64,
        });
    }

    let cells = bytes[HEADER_LEN as usize..]
        .chunks_exact(RECORD_LEN as usize)
        .map(|r| {
            CellA::new(
                r[8] as char,
                Rgba::new(r[0], r[1], r[2], r[3]),
                Rgba::new(r[4], r[5], r[6], r[7]),
            )
        })
        .collect();

    Ok((Point::new(width, height), cells))
}

pub(crate) fn write(path: &Path, size: UPoint, cells: &[CellA]) -> Result<(), FileError> {
    let write_err = |source| FileError::FailedWritingPath {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);

    let mut bytes = Vec::with_capacity(HEADER_LEN as usize + cells.len() * RECORD_LEN as usize);
    bytes.extend_from_slice(&size.x.to_le_bytes());
    bytes.extend_from_slice(&size.y.to_le_bytes());
    for cell in cells {
        let f = cell.foreground;
        let b = cell.background;
        // one byte per character on disk
        let character = u8::try_from(cell.character).unwrap_or(b'?');
        bytes.extend_from_slice(&[f.r, f.g, f.b, f.a, b.r, b.g, b.b, b.a, character]);
    }

    out.write_all(&bytes).map_err(write_err)?;
    out.flush().map_err(write_err)?;
    Ok(())
}

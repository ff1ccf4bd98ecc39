//! Deterministic byte-level serialization of a [`Codebook`].
//!
//! Layout (all multi-byte fields big-endian, mirroring
//! `rank_retrieve::persistence::format::SegmentFooter`'s write/read pair,
//! but big-endian per `spec.md` §4.5/§6):
//!
//! | field        | encoding                                          |
//! |--------------|----------------------------------------------------|
//! | magic        | 4 bytes ASCII `"LVQ1"`                              |
//! | version      | `u16`, value `1`                                    |
//! | D            | `u32`                                               |
//! | N            | `u32`                                               |
//! | has_labels   | `u8` ∈ {0, 1}                                       |
//! | prototypes   | `N * D` × `f64`, row-major (prototype-major)        |
//! | labels       | present iff `has_labels = 1`: `N` × `i32`           |
//!
//! A prototype with no label is written as `-1` in the label block (only
//! emitted when at least one prototype in the codebook has a label;
//! otherwise the whole label block is omitted and `has_labels = 0`). This
//! keeps `load(store(c)) == c` exact for both fully-labeled and fully-
//! unlabeled codebooks, as well as mixes of the two.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

use crate::codebook::Codebook;
use crate::error::{LvqError, LvqResult};

const MAGIC: &[u8; 4] = b"LVQ1";
const VERSION: u16 = 1;

/// Serialize `codebook` to its deterministic byte representation.
pub fn store(codebook: &Codebook) -> LvqResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(4 + 2 + 4 + 4 + 1 + codebook.n() * codebook.dim() * 8);
    write_to(codebook, &mut buf)?;
    Ok(buf)
}

/// Write `codebook` to any [`Write`] sink.
pub fn write_to<W: Write>(codebook: &Codebook, writer: &mut W) -> LvqResult<()> {
    writer.write_all(MAGIC)?;
    writer.write_u16::<BigEndian>(VERSION)?;
    writer.write_u32::<BigEndian>(codebook.dim() as u32)?;
    writer.write_u32::<BigEndian>(codebook.n() as u32)?;

    let has_labels = codebook.labels().iter().any(Option::is_some);
    writer.write_u8(has_labels as u8)?;

    for i in 0..codebook.n() {
        for &component in codebook.prototype_slice(i) {
            writer.write_f64::<BigEndian>(component)?;
        }
    }

    if has_labels {
        for label in codebook.labels() {
            let encoded = label.map(|l| l as i32).unwrap_or(-1);
            writer.write_i32::<BigEndian>(encoded)?;
        }
    }

    Ok(())
}

/// Deserialize a codebook previously produced by [`store`].
pub fn load(bytes: &[u8]) -> LvqResult<Codebook> {
    let mut cursor = std::io::Cursor::new(bytes);
    read_from(&mut cursor)
}

/// Classify an I/O failure during a read: a short read (`UnexpectedEof`) is
/// a truncated payload, a Format error per `spec.md` §7, not an I/O error —
/// everything else (a genuine device/stream failure) stays `LvqError::Io`.
fn io_field<T>(result: std::io::Result<T>) -> LvqResult<T> {
    result.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            LvqError::Format {
                message: "truncated payload".to_string(),
                expected: None,
                actual: None,
            }
        } else {
            LvqError::Io(e)
        }
    })
}

/// Read a codebook from any [`Read`] source.
pub fn read_from<R: Read>(reader: &mut R) -> LvqResult<Codebook> {
    let mut magic = [0u8; 4];
    io_field(reader.read_exact(&mut magic))?;
    if &magic != MAGIC {
        return Err(LvqError::Format {
            message: "invalid magic bytes".to_string(),
            expected: Some(String::from_utf8_lossy(MAGIC).into_owned()),
            actual: Some(String::from_utf8_lossy(&magic).into_owned()),
        });
    }

    let version = io_field(reader.read_u16::<BigEndian>())?;
    if version != VERSION {
        return Err(LvqError::Format {
            message: "unsupported format version".to_string(),
            expected: Some(VERSION.to_string()),
            actual: Some(version.to_string()),
        });
    }

    let dim = io_field(reader.read_u32::<BigEndian>())? as usize;
    let n = io_field(reader.read_u32::<BigEndian>())? as usize;
    if dim == 0 || n == 0 {
        return Err(LvqError::Format {
            message: "dimension and prototype count must be >= 1".to_string(),
            expected: None,
            actual: Some(format!("D={dim}, N={n}")),
        });
    }

    let has_labels = match io_field(reader.read_u8())? {
        0 => false,
        1 => true,
        other => {
            return Err(LvqError::Format {
                message: "has_labels flag must be 0 or 1".to_string(),
                expected: Some("0 or 1".to_string()),
                actual: Some(other.to_string()),
            })
        }
    };

    let mut codebook = Codebook::new(dim, n).map_err(|e| LvqError::Format {
        message: format!("failed to allocate codebook: {e}"),
        expected: None,
        actual: None,
    })?;

    let mut prototype = vec![0.0f64; dim];
    for i in 0..n {
        for component in prototype.iter_mut() {
            let value = io_field(reader.read_f64::<BigEndian>())?;
            if !value.is_finite() {
                return Err(LvqError::Format {
                    message: "prototype contains a non-finite component".to_string(),
                    expected: None,
                    actual: None,
                });
            }
            *component = value;
        }
        codebook.set(&prototype, i).map_err(|e| LvqError::Format {
            message: format!("failed to place prototype {i}: {e}"),
            expected: None,
            actual: None,
        })?;
    }

    if has_labels {
        for i in 0..n {
            let raw = io_field(reader.read_i32::<BigEndian>())?;
            let label = if raw < 0 {
                None
            } else {
                Some(raw as u32)
            };
            codebook.set_label(i, label).map_err(|e| LvqError::Format {
                message: format!("failed to set label {i}: {e}"),
                expected: None,
                actual: None,
            })?;
        }
    }

    Ok(codebook)
}

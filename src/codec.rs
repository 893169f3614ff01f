//! Patch file format.
//!
//! ```text
//! "BDLT" | version u8 | source len | source BLAKE3 (32) | target len | record count
//! per record: offset | delete | insert len | insert bytes
//! trailer: BLAKE3 (32) of everything before it
//! ```
//!
//! Every integer is an unsigned LEB128 varint.

use std::io::{Read, Write};

use tracing::debug;

use crate::error::{PatchError, PatchResult};
use crate::{Delta, apply_in_place};

const MAGIC: &[u8; 4] = b"BDLT";
const VERSION: u8 = 1;
const HASH_LEN: usize = blake3::OUT_LEN;

/// A decoded patch: the edit list plus what it expects to be applied to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patch {
    pub source_len: usize,
    pub source_hash: blake3::Hash,
    pub target_len: usize,
    pub deltas: Vec<Delta>,
}

impl Patch {
    /// Wrap an edit list made against `source`.
    #[must_use]
    pub fn new(source: &[u8], deltas: Vec<Delta>) -> Self {
        Self {
            source_len: source.len(),
            source_hash: blake3::hash(source),
            target_len: target_len(source.len(), &deltas),
            deltas,
        }
    }

    /// # Errors
    /// Returns an error if writing to `writer` fails.
    pub fn write_to<W: Write>(&self, writer: W) -> std::io::Result<()> {
        encode(
            writer,
            self.source_len,
            &self.source_hash,
            self.target_len,
            &self.deltas,
        )
    }

    /// Replay the patch against `source`.
    ///
    /// Unlike [`crate::apply_all`], every record is checked before it is
    /// applied, since a patch read from outside is not trusted.
    ///
    /// # Errors
    /// Returns [`PatchError::SourceMismatch`] if `source` is not the buffer the
    /// patch was made for, [`PatchError::OffsetOutOfRange`] if a record starts
    /// past the end of the buffer it is applied to, and
    /// [`PatchError::TargetLengthMismatch`] if the result has the wrong length.
    pub fn apply_to(&self, source: &[u8]) -> PatchResult<Vec<u8>> {
        if source.len() != self.source_len || blake3::hash(source) != self.source_hash {
            return Err(PatchError::SourceMismatch {
                expected_len: self.source_len,
                actual_len: source.len(),
            });
        }

        let mut buffer = source.to_vec();
        for (index, delta) in self.deltas.iter().enumerate() {
            if delta.offset > buffer.len() {
                return Err(PatchError::OffsetOutOfRange {
                    index,
                    offset: delta.offset,
                    len: buffer.len(),
                });
            }
            apply_in_place(&mut buffer, delta);
        }

        if buffer.len() != self.target_len {
            return Err(PatchError::TargetLengthMismatch {
                expected: self.target_len,
                actual: buffer.len(),
            });
        }
        Ok(buffer)
    }
}

/// Serialize `deltas`, computed against `source`, to `writer`.
///
/// # Errors
/// Returns an error if writing to `writer` fails.
pub fn write_to<W: Write>(writer: W, deltas: &[Delta], source: &[u8]) -> std::io::Result<()> {
    encode(
        writer,
        source.len(),
        &blake3::hash(source),
        target_len(source.len(), deltas),
        deltas,
    )
}

/// Read a patch written by [`write_to`].
///
/// # Errors
/// Returns an error if reading fails or the bytes are not a well-formed patch.
pub fn read_from<R: Read>(mut reader: R) -> PatchResult<Patch> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode(&data)
}

/// Read a patch from `reader` and apply it to `source`.
///
/// # Errors
/// See [`read_from`] and [`Patch::apply_to`].
pub fn patch<R: Read>(source: &[u8], reader: R) -> PatchResult<Vec<u8>> {
    read_from(reader)?.apply_to(source)
}

fn target_len(source_len: usize, deltas: &[Delta]) -> usize {
    deltas
        .iter()
        .fold(source_len, |len, delta| delta.applied_len(len))
}

fn encode<W: Write>(
    mut writer: W,
    source_len: usize,
    source_hash: &blake3::Hash,
    target_len: usize,
    deltas: &[Delta],
) -> std::io::Result<()> {
    let payload: usize = deltas.iter().map(|d| d.insert.len()).sum();
    let mut data = Vec::with_capacity(64 + payload + deltas.len() * 4);

    data.extend_from_slice(MAGIC);
    data.push(VERSION);
    encode_varint(&mut data, source_len as u64);
    data.extend_from_slice(source_hash.as_bytes());
    encode_varint(&mut data, target_len as u64);
    encode_varint(&mut data, deltas.len() as u64);

    for delta in deltas {
        encode_varint(&mut data, delta.offset as u64);
        encode_varint(&mut data, delta.delete as u64);
        encode_varint(&mut data, delta.insert.len() as u64);
        data.extend_from_slice(&delta.insert);
    }

    let checksum = blake3::hash(&data);
    data.extend_from_slice(checksum.as_bytes());

    debug!(records = deltas.len(), bytes = data.len(), "encoded patch");
    writer.write_all(&data)?;
    writer.flush()
}

fn decode(data: &[u8]) -> PatchResult<Patch> {
    if data.len() < MAGIC.len() + 1 + HASH_LEN {
        return Err(PatchError::Truncated { what: "header" });
    }
    if &data[..MAGIC.len()] != MAGIC {
        return Err(PatchError::InvalidMagic {
            actual: String::from_utf8_lossy(&data[..MAGIC.len()]).into(),
        });
    }

    let (body, trailer) = data.split_at(data.len() - HASH_LEN);
    if blake3::hash(body) != blake3::Hash::from_bytes(to_hash_bytes(trailer)) {
        return Err(PatchError::ChecksumMismatch);
    }

    let mut reader = SliceReader {
        data: body,
        pos: MAGIC.len(),
    };
    let version = reader.take(1, "version")?[0];
    if version != VERSION {
        return Err(PatchError::UnsupportedVersion(version));
    }

    let source_len = reader.varint("source length")?;
    let source_hash =
        blake3::Hash::from_bytes(to_hash_bytes(reader.take(HASH_LEN, "source hash")?));
    let target_len = reader.varint("target length")?;
    let count = reader.varint("record count")?;

    // A record is at least three bytes.
    let mut deltas = Vec::with_capacity(count.min(reader.remaining() / 3));
    for _ in 0..count {
        let offset = reader.varint("record offset")?;
        let delete = reader.varint("record delete count")?;
        let insert_len = reader.varint("record insert length")?;
        let insert = reader.take(insert_len, "record insert bytes")?.to_vec();
        deltas.push(Delta {
            offset,
            delete,
            insert,
        });
    }
    if reader.remaining() != 0 {
        return Err(PatchError::TrailingBytes(reader.remaining()));
    }

    debug!(records = deltas.len(), source_len, target_len, "decoded patch");
    Ok(Patch {
        source_len,
        source_hash,
        target_len,
        deltas,
    })
}

fn to_hash_bytes(bytes: &[u8]) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(bytes);
    out
}

struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, len: usize, what: &'static str) -> PatchResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(PatchError::Truncated { what });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn varint(&mut self, what: &'static str) -> PatchResult<usize> {
        let (value, consumed) = decode_varint(&self.data[self.pos..], what)?;
        self.pos += consumed;
        usize::try_from(value).map_err(|_| PatchError::VarintOverflow { what })
    }
}

fn encode_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        #[allow(clippy::cast_possible_truncation)]
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value > 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Returns the value and the number of bytes it took.
fn decode_varint(data: &[u8], what: &'static str) -> PatchResult<(u64, usize)> {
    let mut value: u64 = 0;
    for (i, &byte) in data.iter().enumerate() {
        let shift = i * 7;
        if shift >= 64 || (shift == 63 && byte & 0x7F > 1) {
            return Err(PatchError::VarintOverflow { what });
        }
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(PatchError::Truncated { what })
}

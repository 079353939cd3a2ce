//! Binary file format.
//!
//! All integers are little endian.
//!
//! ```text
//! header (12 bytes):  magic u32 = 0x53324453 ("S2DS") | version u32 = 1 | count u32
//! record (repeated):  id_len u32 | id bytes | code u32 | has_time u8
//!                     [has_time != 0] hour u32 | minute u32 | second u32
//! ```
//!
//! Records are written in index traversal order. Reading re-inserts each one,
//! so a file with duplicate or malformed ids is rejected as corrupt.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::index::Index;
use crate::record::{Record, Time};

pub const MAGIC: u32 = 0x5332_4453;
pub const VERSION: u32 = 1;
pub const HEADER_LEN: usize = 12;
/// Encoded size of a [`Time`].
pub const TIME_LEN: usize = 12;

fn fit_u32(what: &'static str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::Oversized { what, len })
}

/// Write `index` to `out`. An empty index is refused.
pub fn write_to<W: Write>(index: &Index, mut out: W) -> Result<()> {
    let count = index.len();
    if count == 0 {
        return Err(Error::EmptyStructure);
    }

    let mut header = [0u8; HEADER_LEN];
    header[0..4].copy_from_slice(&MAGIC.to_le_bytes());
    header[4..8].copy_from_slice(&VERSION.to_le_bytes());
    header[8..12].copy_from_slice(&fit_u32("record count", count)?.to_le_bytes());
    out.write_all(&header)?;

    let mut buf = Vec::new();
    for record in index.iter() {
        buf.clear();
        encode_record(record, &mut buf)?;
        out.write_all(&buf)?;
    }
    out.flush()?;
    Ok(())
}

fn encode_record(record: &Record, buf: &mut Vec<u8>) -> Result<()> {
    let id = record.id().as_bytes();
    buf.extend_from_slice(&fit_u32("identifier length", id.len())?.to_le_bytes());
    buf.extend_from_slice(id);
    buf.extend_from_slice(&record.code().to_le_bytes());
    match record.time() {
        Some(time) => {
            buf.push(1);
            buf.extend_from_slice(&time.hour.to_le_bytes());
            buf.extend_from_slice(&time.minute.to_le_bytes());
            buf.extend_from_slice(&time.second.to_le_bytes());
        }
        None => buf.push(0),
    }
    Ok(())
}

/// Read an index from `input`.
pub fn read_from<R: Read>(mut input: R) -> Result<Index> {
    let mut header = [0u8; HEADER_LEN];
    read_exact(&mut input, &mut header, "header")?;
    let magic = le_u32(&header[0..4]);
    let version = le_u32(&header[4..8]);
    let count = le_u32(&header[8..12]);
    if magic != MAGIC {
        return Err(Error::CorruptFile(format!("bad magic {magic:#010x}")));
    }
    if version != VERSION {
        return Err(Error::CorruptFile(format!("unsupported version {version}")));
    }

    let mut index = Index::new();
    for n in 0..count {
        let record = decode_record(&mut input, n)?;
        index
            .insert_owned(record)
            .map_err(|err| Error::CorruptFile(format!("record {n}: {err}")))?;
    }
    Ok(index)
}

fn decode_record<R: Read>(input: &mut R, n: u32) -> Result<Record> {
    let id_len = read_u32(input, "identifier length")?;
    if id_len == 0 {
        return Err(Error::CorruptFile(format!("record {n}: zero-length identifier")));
    }

    // Bounded read so a corrupt length cannot force a huge allocation up front.
    let mut id = Vec::new();
    input.by_ref().take(u64::from(id_len)).read_to_end(&mut id)?;
    if id.len() != id_len as usize {
        return Err(Error::CorruptFile(format!("record {n}: truncated identifier")));
    }
    let id = String::from_utf8(id)
        .map_err(|_| Error::CorruptFile(format!("record {n}: identifier is not UTF-8")))?;

    let code = read_u32(input, "code")?;
    let mut flag = [0u8; 1];
    read_exact(input, &mut flag, "time flag")?;

    let record = Record::new(id, code);
    if flag[0] == 0 {
        return Ok(record);
    }
    let mut time = [0u8; TIME_LEN];
    read_exact(input, &mut time, "time")?;
    Ok(record.with_time(Time::new(
        le_u32(&time[0..4]),
        le_u32(&time[4..8]),
        le_u32(&time[8..12]),
    )))
}

#[inline]
fn le_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn read_u32<R: Read>(input: &mut R, what: &str) -> Result<u32> {
    let mut buf = [0u8; 4];
    read_exact(input, &mut buf, what)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_exact<R: Read>(input: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    input.read_exact(buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => Error::CorruptFile(format!("truncated {what}")),
        _ => Error::Io(err),
    })
}

/// Write `index` to a new file at `path`, replacing any existing file.
///
/// The empty check happens before the file is created.
pub fn write_file(index: &Index, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if index.is_empty() {
        return Err(Error::EmptyStructure);
    }
    let file = File::create(path).map_err(|source| Error::Resource {
        path: path.to_path_buf(),
        source,
    })?;
    write_to(index, BufWriter::new(file))?;
    info!(path = %path.display(), records = index.len(), "wrote index file");
    Ok(())
}

/// Read an index from the file at `path`.
pub fn read_file(path: impl AsRef<Path>) -> Result<Index> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Resource {
        path: path.to_path_buf(),
        source,
    })?;
    match read_from(BufReader::new(file)) {
        Ok(index) => {
            info!(path = %path.display(), records = index.len(), "read index file");
            Ok(index)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "rejected index file");
            Err(err)
        }
    }
}

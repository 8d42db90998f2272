//! Explicit per-field parameter block codec
//!
//! Fixed-layout blocks are read and written field by field against a
//! declared size, never reinterpreted from raw memory. This keeps the
//! length contract an explicit, testable assertion and removes any
//! dependence on platform layout or padding rules. All integers are
//! little-endian on the wire.

use crate::error::WireError;

/// A fixed-layout parameter block with a declared wire size
///
/// `decode` fails only on a size contract break (a [`WireError`]);
/// `encode_into` is infallible for well-formed values.
pub trait ParamBlock: Sized {
    /// Declared wire size in bytes
    const SIZE: usize;

    /// Decode from exactly `SIZE` bytes
    fn decode(bytes: &[u8]) -> Result<Self, WireError>;

    /// Append the encoded form to a writer
    fn encode_into(&self, w: &mut ParamWriter);

    /// Encode into a fresh byte vector
    fn encode(&self) -> Vec<u8> {
        let mut w = ParamWriter::with_capacity(Self::SIZE);
        self.encode_into(&mut w);
        w.into_bytes()
    }
}

/// Field-by-field reader over a parameter block
///
/// Construction asserts the declared length; reads past the declared end
/// are an [`WireError::Overrun`].
#[derive(Debug)]
pub struct ParamReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ParamReader<'a> {
    /// Open a reader over `bytes`, asserting it is exactly `declared` long
    pub fn new(bytes: &'a [u8], declared: usize) -> Result<Self, WireError> {
        if bytes.len() != declared {
            return Err(WireError::BlockSizeMismatch {
                declared,
                actual: bytes.len(),
            });
        }
        Ok(Self { buf: bytes, pos: 0 })
    }

    fn take(&mut self, wanted: usize) -> Result<&'a [u8], WireError> {
        if self.pos + wanted > self.buf.len() {
            return Err(WireError::Overrun {
                offset: self.pos,
                wanted,
                size: self.buf.len(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + wanted];
        self.pos += wanted;
        Ok(slice)
    }

    /// Skip declared padding bytes
    pub fn skip(&mut self, n: usize) -> Result<(), WireError> {
        self.take(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, WireError> {
        let b = self.take(8)?;
        Ok(u64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    pub fn read_i64(&mut self) -> Result<i64, WireError> {
        self.read_u64().map(|v| v as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32, WireError> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Single-byte boolean (nonzero = true)
    pub fn read_bool(&mut self) -> Result<bool, WireError> {
        Ok(self.read_u8()? != 0)
    }

    /// Word-sized boolean (nonzero = true)
    pub fn read_bool32(&mut self) -> Result<bool, WireError> {
        Ok(self.read_u32()? != 0)
    }

    /// Decode a nested fixed-size block at the current offset
    pub fn read_block<T: ParamBlock>(&mut self) -> Result<T, WireError> {
        T::decode(self.take(T::SIZE)?)
    }

    /// Bytes remaining before the declared end
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

/// Field-by-field writer for a parameter block
///
/// The mirror of [`ParamReader`]; writing well-formed values never fails.
#[derive(Default)]
pub struct ParamWriter {
    buf: Vec<u8>,
}

impl ParamWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append zeroed padding bytes
    pub fn pad(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.write_u64(v as u64);
    }

    pub fn write_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Single-byte boolean
    pub fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    /// Word-sized boolean
    pub fn write_bool32(&mut self, v: bool) {
        self.write_u32(u32::from(v));
    }

    pub fn write_block<T: ParamBlock>(&mut self, block: &T) {
        block.encode_into(self);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Split a variable-length buffer into fixed-stride typed elements
///
/// The element stride is `T::SIZE`; a buffer length that is not a whole
/// multiple of the stride is a protocol violation. An empty buffer yields
/// an empty vector.
pub fn read_elements<T: ParamBlock>(buffer: &[u8]) -> Result<Vec<T>, WireError> {
    if buffer.len() % T::SIZE != 0 {
        return Err(WireError::BufferStrideMismatch {
            stride: T::SIZE,
            len: buffer.len(),
        });
    }
    buffer.chunks_exact(T::SIZE).map(T::decode).collect()
}

/// Encode a sequence of typed elements into one contiguous buffer
pub fn write_elements<T: ParamBlock>(elements: &[T]) -> Vec<u8> {
    let mut w = ParamWriter::with_capacity(elements.len() * T::SIZE);
    for element in elements {
        element.encode_into(&mut w);
    }
    w.into_bytes()
}

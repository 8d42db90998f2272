//! Wire-level error types
//!
//! Every variant here is a protocol violation: a disagreement between the
//! encoder and decoder about a block's declared layout. These cannot be
//! produced by a correctly-encoded client request, so callers treat them
//! as a hard failure of the request path rather than a result code.

use thiserror::Error;

/// Errors from decoding or framing a parameter block
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Declared and actual fixed-block lengths differ
    #[error("parameter block size mismatch: declared {declared} bytes, got {actual}")]
    BlockSizeMismatch { declared: usize, actual: usize },

    /// A field read would cross the declared end of the block
    #[error("read past end of parameter block: offset {offset} + {wanted} > {size}")]
    Overrun {
        offset: usize,
        wanted: usize,
        size: usize,
    },

    /// Buffer length is not a whole number of fixed-stride elements
    #[error("buffer length {len} is not a multiple of element stride {stride}")]
    BufferStrideMismatch { stride: usize, len: usize },
}

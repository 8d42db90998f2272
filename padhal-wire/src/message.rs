//! Request and response envelopes
//!
//! A request names an operation by opcode and carries a fixed parameter
//! block (length declared per opcode), zero or more variable-length
//! buffers, and zero or more transferable resource handles. The response
//! mirrors that shape with a result code in front.

use crate::result::ResultCode;

/// Opaque reference to a transferable resource (event, object, memory)
///
/// The service only produces and relays these; the transport layer gives
/// them meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle(pub u32);

impl ResourceHandle {
    /// Placeholder pushed by retired operations that used to return a
    /// real handle
    pub const NULL: ResourceHandle = ResourceHandle(0);
}

/// One decoded client request
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Operation selector
    pub opcode: u32,
    /// Fixed parameter block, length declared per opcode
    pub params: Vec<u8>,
    /// Ordered variable-length input buffers
    pub buffers: Vec<Vec<u8>>,
    /// Ordered input resource handles
    pub handles: Vec<ResourceHandle>,
}

impl Request {
    pub fn new(opcode: u32, params: Vec<u8>) -> Self {
        Self {
            opcode,
            params,
            ..Default::default()
        }
    }

    pub fn with_buffer(mut self, buffer: Vec<u8>) -> Self {
        self.buffers.push(buffer);
        self
    }

    pub fn with_handle(mut self, handle: ResourceHandle) -> Self {
        self.handles.push(handle);
        self
    }

    /// Input buffer by index, empty if absent
    pub fn buffer(&self, index: usize) -> &[u8] {
        self.buffers.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One response, mirroring the request envelope
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// In-band operation result, `SUCCESS` or a domain error
    pub result: ResultCode,
    /// Fixed output block
    pub params: Vec<u8>,
    /// Ordered variable-length output buffers
    pub buffers: Vec<Vec<u8>>,
    /// Ordered output resource handles
    pub handles: Vec<ResourceHandle>,
}

impl Response {
    pub fn success() -> Self {
        Self::with_result(ResultCode::SUCCESS)
    }

    pub fn with_result(result: ResultCode) -> Self {
        Self {
            result,
            params: Vec::new(),
            buffers: Vec::new(),
            handles: Vec::new(),
        }
    }

    pub fn params(mut self, params: Vec<u8>) -> Self {
        self.params = params;
        self
    }

    pub fn buffer(mut self, buffer: Vec<u8>) -> Self {
        self.buffers.push(buffer);
        self
    }

    pub fn handle(mut self, handle: ResourceHandle) -> Self {
        self.handles.push(handle);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result;

    #[test]
    fn request_buffer_access_is_total() {
        let req = Request::new(55, Vec::new());
        assert!(req.buffer(0).is_empty());
        assert!(req.buffer(3).is_empty());

        let req = req.with_buffer(vec![1, 2, 3]);
        assert_eq!(req.buffer(0), &[1, 2, 3]);
    }

    #[test]
    fn response_builders_compose() {
        let resp = Response::success()
            .params(vec![4, 0, 0, 0])
            .buffer(vec![9])
            .handle(ResourceHandle(7));
        assert!(resp.result.is_success());
        assert_eq!(resp.params, vec![4, 0, 0, 0]);
        assert_eq!(resp.buffers.len(), 1);
        assert_eq!(resp.handles, vec![ResourceHandle(7)]);

        let err = Response::with_result(result::NOT_IMPLEMENTED);
        assert!(err.result.is_error());
        assert!(err.params.is_empty());
    }
}

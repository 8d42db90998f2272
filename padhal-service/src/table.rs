//! Immutable opcode dispatch tables
//!
//! A table is built once at service construction and never mutated
//! afterwards. Every opcode the service acknowledges is registered in one
//! of three tiers: implemented (a real handler), stubbed (a canned reply,
//! for retired or not-yet-backed operations), or unimplemented (known but
//! deliberately unbound).

use std::collections::HashMap;

use padhal_wire::{Request, ResourceHandle, Response, ResultCode, WireError};

/// Handler signature for implemented operations
///
/// Handlers are plain functions over the service object; the only error
/// they surface is a protocol violation. Domain failures travel in-band
/// in the response's result code.
pub type Handler<S> = fn(&S, &Request) -> Result<Response, WireError>;

/// Canned reply for a stubbed operation
#[derive(Debug, Clone)]
pub struct StubReply {
    /// Declared parameter block length, checked before replying
    pub params: usize,
    result: ResultCode,
    output: Vec<u8>,
    buffers: Vec<Vec<u8>>,
    null_handle: bool,
}

impl StubReply {
    /// Success stub expecting a `params`-byte input block
    pub fn success(params: usize) -> Self {
        Self {
            params,
            result: ResultCode::SUCCESS,
            output: Vec::new(),
            buffers: Vec::new(),
            null_handle: false,
        }
    }

    /// Fixed output block appended to the reply
    pub fn with_output(mut self, output: Vec<u8>) -> Self {
        self.output = output;
        self
    }

    /// Canned output buffer appended to the reply
    pub fn with_buffer(mut self, buffer: Vec<u8>) -> Self {
        self.buffers.push(buffer);
        self
    }

    /// Push a null resource handle, for retired operations whose clients
    /// still expect a handle slot in the reply
    pub fn with_null_handle(mut self) -> Self {
        self.null_handle = true;
        self
    }

    pub fn to_response(&self) -> Response {
        let mut resp = Response::with_result(self.result).params(self.output.clone());
        for buffer in &self.buffers {
            resp = resp.buffer(buffer.clone());
        }
        if self.null_handle {
            resp = resp.handle(ResourceHandle::NULL);
        }
        resp
    }
}

/// One registered opcode
pub enum DispatchEntry<S> {
    /// Backed by a handler; `params` is the declared input block length
    Implemented { params: usize, handler: Handler<S> },
    /// Acknowledged with a canned reply
    Stubbed(StubReply),
    /// Known opcode with no binding; answered "not implemented"
    Unimplemented,
}

/// Immutable opcode-to-entry table for one service object type
pub struct CommandTable<S> {
    service: &'static str,
    name_of: fn(u32) -> &'static str,
    entries: HashMap<u32, DispatchEntry<S>>,
}

impl<S> CommandTable<S> {
    /// Table named after the service object; `name_of` maps opcodes to
    /// the human-readable names used in logs
    pub fn new(service: &'static str, name_of: fn(u32) -> &'static str) -> Self {
        Self {
            service,
            name_of,
            entries: HashMap::new(),
        }
    }

    /// Service object name used in logs
    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Human-readable name for an opcode in this table's namespace
    pub fn opcode_name(&self, opcode: u32) -> &'static str {
        (self.name_of)(opcode)
    }

    pub fn implemented(mut self, opcode: u32, params: usize, handler: Handler<S>) -> Self {
        self.entries
            .insert(opcode, DispatchEntry::Implemented { params, handler });
        self
    }

    pub fn stubbed(mut self, opcode: u32, reply: StubReply) -> Self {
        self.entries.insert(opcode, DispatchEntry::Stubbed(reply));
        self
    }

    pub fn unimplemented(mut self, opcode: u32) -> Self {
        self.entries.insert(opcode, DispatchEntry::Unimplemented);
        self
    }

    pub fn lookup(&self, opcode: u32) -> Option<&DispatchEntry<S>> {
        self.entries.get(&opcode)
    }

    /// All registered opcodes, in no particular order
    pub fn opcodes(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// Declared input block length for an opcode, if it checks one
    pub fn declared_params(&self, opcode: u32) -> Option<usize> {
        match self.entries.get(&opcode)? {
            DispatchEntry::Implemented { params, .. } => Some(*params),
            DispatchEntry::Stubbed(reply) => Some(reply.params),
            DispatchEntry::Unimplemented => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

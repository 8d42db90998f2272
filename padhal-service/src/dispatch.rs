//! Request dispatch
//!
//! The single entry point from the transport into a service object. The
//! only `Err` a dispatch can produce is a [`WireError`]; everything else,
//! including unknown opcodes, is an in-band result code so one
//! misbehaving request never takes the session down.

use tracing::{debug, warn};

use padhal_wire::{result, Request, Response, WireError};

use crate::table::{CommandTable, DispatchEntry};

/// Route one request through a service object's table
///
/// Unknown and unimplemented opcodes answer `NOT_IMPLEMENTED` without
/// looking at the parameter block. Implemented and stubbed entries check
/// the declared block length first; a mismatch is a protocol violation.
pub fn dispatch<S>(
    service: &S,
    table: &CommandTable<S>,
    request: &Request,
) -> Result<Response, WireError> {
    let name = table.opcode_name(request.opcode);

    match table.lookup(request.opcode) {
        None => {
            warn!(
                service = table.service(),
                opcode = request.opcode,
                name,
                "unknown opcode"
            );
            Ok(Response::with_result(result::NOT_IMPLEMENTED))
        }
        Some(DispatchEntry::Unimplemented) => {
            warn!(
                service = table.service(),
                opcode = request.opcode,
                name,
                "unbound opcode"
            );
            Ok(Response::with_result(result::NOT_IMPLEMENTED))
        }
        Some(DispatchEntry::Stubbed(reply)) => {
            check_params(reply.params, request)?;
            warn!(
                service = table.service(),
                opcode = request.opcode,
                name,
                "(stubbed) called"
            );
            Ok(reply.to_response())
        }
        Some(DispatchEntry::Implemented { params, handler }) => {
            check_params(*params, request)?;
            debug!(
                service = table.service(),
                opcode = request.opcode,
                name,
                "called"
            );
            handler(service, request)
        }
    }
}

fn check_params(declared: usize, request: &Request) -> Result<(), WireError> {
    if request.params.len() != declared {
        return Err(WireError::BlockSizeMismatch {
            declared,
            actual: request.params.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::StubReply;

    struct Echo;

    fn echo_params(_: &Echo, req: &Request) -> Result<Response, WireError> {
        Ok(Response::success().params(req.params.clone()))
    }

    fn names(_: u32) -> &'static str {
        "Echo"
    }

    fn table() -> CommandTable<Echo> {
        CommandTable::new("Echo", names)
            .implemented(1, 4, echo_params)
            .stubbed(2, StubReply::success(0))
            .unimplemented(3)
    }

    #[test]
    fn unknown_opcode_is_in_band() {
        let resp = dispatch(&Echo, &table(), &Request::new(999, Vec::new())).unwrap();
        assert_eq!(resp.result, result::NOT_IMPLEMENTED);
    }

    #[test]
    fn unbound_opcode_skips_the_param_check() {
        // wrong-length block is fine when nothing is bound
        let resp = dispatch(&Echo, &table(), &Request::new(3, vec![0; 99])).unwrap();
        assert_eq!(resp.result, result::NOT_IMPLEMENTED);
    }

    #[test]
    fn implemented_opcode_checks_length_then_runs() {
        let err = dispatch(&Echo, &table(), &Request::new(1, vec![0; 3])).unwrap_err();
        assert_eq!(
            err,
            WireError::BlockSizeMismatch {
                declared: 4,
                actual: 3
            }
        );

        let resp = dispatch(&Echo, &table(), &Request::new(1, vec![9, 8, 7, 6])).unwrap();
        assert!(resp.result.is_success());
        assert_eq!(resp.params, vec![9, 8, 7, 6]);
    }

    #[test]
    fn stubbed_opcode_checks_length_too() {
        let err = dispatch(&Echo, &table(), &Request::new(2, vec![0; 4])).unwrap_err();
        assert!(matches!(err, WireError::BlockSizeMismatch { .. }));

        let resp = dispatch(&Echo, &table(), &Request::new(2, Vec::new())).unwrap();
        assert!(resp.result.is_success());
    }
}

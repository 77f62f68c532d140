//! Calculator wire protocol
//!
//! TCP requests are single lines `<OPER> <ARG1> <ARG2>` answered by a single
//! line carrying either the decimal result or [`ERROR_RESPONSE`]. Discovery
//! runs over UDP on the same port number with two fixed payloads.

mod evaluator;
mod request;

pub use evaluator::{Evaluation, evaluate};
pub use request::{EvalError, Operation, Request};

/// Response line sent for every failed request (without terminator)
pub const ERROR_RESPONSE: &str = "ERROR";

/// Discovery probe payload broadcast by clients
pub const DISCOVER_PROBE: &str = "CCS DISCOVER";

/// Discovery acknowledgment sent back by the server
pub const DISCOVER_REPLY: &str = "CCS FOUND";

/// Check whether a datagram payload is a discovery probe
///
/// The payload is decoded lossily and trimmed; anything starting with
/// [`DISCOVER_PROBE`] matches, so trailing garbage after the literal is accepted.
#[must_use]
pub fn is_discovery_probe(payload: &[u8]) -> bool {
    String::from_utf8_lossy(payload)
        .trim()
        .starts_with(DISCOVER_PROBE)
}

/// Check whether a datagram payload is exactly the discovery reply
#[must_use]
pub fn is_discovery_reply(payload: &[u8]) -> bool {
    String::from_utf8_lossy(payload).trim() == DISCOVER_REPLY
}

use core::fmt;
use std::error::Error;
use std::fmt::Display;

/// Category of a coordination failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum ErrorKind {
    /// Internal invariant broken: unknown peer, duplicate id, role mismatch.
    ProtocolViolation,

    /// Unknown recipient for a direct message.
    UnknownPeer,

    /// The other side of an endpoint is gone.
    Disconnected,

    /// Nothing arrived in time.
    Timeout,

    /// Wire frame could not be decoded.
    InvalidFrame,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NexusError {
    kind: ErrorKind,
    text: String,
    cause: String,
}

pub type Result<T> = std::result::Result<T, NexusError>;

pub fn new_err<T>(kind: ErrorKind, text: String, cause: String) -> Result<T> {
    Err(NexusError { kind, text, cause })
}

impl NexusError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_protocol_violation(&self) -> bool {
        self.kind == ErrorKind::ProtocolViolation
    }
}

impl Display for NexusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cause_word = {
            if !self.cause.is_empty() {
                " Cause: ".to_string()
            } else {
                String::new()
            }
        };
        write!(f, "{}.{}{}", self.text, cause_word, self.cause)
    }
}

impl Error for NexusError {}

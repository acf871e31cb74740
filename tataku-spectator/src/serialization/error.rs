use std::string::FromUtf8Error;
use thiserror::Error;

pub type SerializationResult<S> = Result<S, SerializationError>;

/// a read failure, along with the path of names that were being read when it happened
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializationError {
    pub inner: SerializationErrorKind,
    pub stack: Vec<&'static str>,
}
impl SerializationError {
    pub fn unknown_packet_id(packet: &'static str, id: u16) -> Self {
        SerializationErrorKind::UnknownPacketId { packet, id }.into()
    }

    /// only the innermost read gets to set the stack
    pub(crate) fn with_stack(mut self, stack: &[&'static str]) -> Self {
        if self.stack.is_empty() {
            self.stack = stack.to_vec();
        }
        self
    }

    pub fn format_stack(&self) -> String {
        self.stack.join(" -> ")
    }
}
impl From<SerializationErrorKind> for SerializationError {
    fn from(inner: SerializationErrorKind) -> Self {
        Self {
            inner,
            stack: Vec::new()
        }
    }
}
impl From<FromUtf8Error> for SerializationError {
    fn from(e: FromUtf8Error) -> Self {
        SerializationErrorKind::InvalidUtf8(e).into()
    }
}

impl std::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.stack.is_empty() {
            write!(f, "{}", self.inner)
        } else {
            write!(f, "{} (while reading {})", self.inner, self.format_stack())
        }
    }
}
impl std::error::Error for SerializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}


#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SerializationErrorKind {
    #[error("tried to read {wanted} bytes but only {remaining} are left")]
    OutOfBounds { wanted: usize, remaining: usize },

    #[error("invalid utf8: {0}")]
    InvalidUtf8(FromUtf8Error),

    #[error("unknown packet id {id} for {packet}")]
    UnknownPacketId { packet: &'static str, id: u16 },
}

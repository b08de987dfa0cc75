use crate::gen::ValueType;
use std::convert::Infallible;
use thiserror::Error;

pub type Result<T, E = WatError> = std::result::Result<T, E>;

/// Errors raised by the builder methods.
///
/// Every error is reported at the call site of the violating method, or, for
/// methods called inside a function body, by the `render` that ran the body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
    #[error("invalid operand for `{op}`: {reason}")]
    InvalidOperand { op: &'static str, reason: String },
    #[error("bit width {bits} of `{ty}.{op}` exceeds the supported maximum of {max}")]
    OutOfRange {
        op: &'static str,
        ty: ValueType,
        bits: u32,
        max: u32,
    },
    #[error("`{op}` is not supported for `{ty}`")]
    UnsupportedOperation { op: &'static str, ty: ValueType },
    #[error("module only exports functions, found {found}")]
    TypeMismatch { found: &'static str },
}

impl WatError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_operand(op: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOperand {
            op,
            reason: reason.into(),
        }
    }
}

// Lets `Sign` be passed where `TryInto<Sign>` is expected.
impl From<Infallible> for WatError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

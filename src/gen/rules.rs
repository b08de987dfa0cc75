//! Which operations each value type supports, and how wide its sized memory
//! accesses may be.
use super::operand::ValueType;
use crate::config::WidthCaps;
use crate::error::{Result, WatError};

/// Numeric operations that an operand can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Const,
    Div,
    Rem,
    Load,
    /// `load<N>_s` / `load<N>_u`
    SizedLoad,
    Store,
    /// `store<N>`
    SizedStore,
}

impl Op {
    pub fn name(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Mul => "mul",
            Op::Const => "const",
            Op::Div => "div",
            Op::Rem => "rem",
            Op::Load | Op::SizedLoad => "load",
            Op::Store | Op::SizedStore => "store",
        }
    }
}

impl ValueType {
    /// Returns `true` if the operation is defined for this type.
    ///
    /// ```
    /// # use watgen::gen::{Op, ValueType};
    /// assert!(ValueType::I64.supports(Op::Rem));
    /// assert!(!ValueType::F32.supports(Op::Rem));
    /// assert!(ValueType::F64.supports(Op::Div));
    /// ```
    pub fn supports(self, op: Op) -> bool {
        match op {
            Op::Rem | Op::SizedLoad | Op::SizedStore => self.is_integer(),
            Op::Add | Op::Sub | Op::Mul | Op::Const | Op::Div | Op::Load | Op::Store => true,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, ValueType::I32 | ValueType::I64)
    }
}

impl WidthCaps {
    /// The largest bit width a sized load/store of `ty` may use. Float types
    /// have no sized variants.
    pub fn max_bits(&self, ty: ValueType) -> Option<u32> {
        match ty {
            ValueType::I32 => Some(self.i32),
            ValueType::I64 => Some(self.i64),
            ValueType::F32 | ValueType::F64 => None,
        }
    }
}

pub(crate) fn check(ty: ValueType, op: Op) -> Result<()> {
    if ty.supports(op) {
        Ok(())
    } else {
        Err(WatError::UnsupportedOperation { op: op.name(), ty })
    }
}

/// Validates the bit width of a sized load/store.
pub(crate) fn check_width(ty: ValueType, op: Op, bits: u32, caps: &WidthCaps) -> Result<()> {
    check(ty, op)?;

    if bits == 0 || bits % 8 != 0 {
        return Err(WatError::invalid_operand(
            op.name(),
            format!("bit width must be a positive multiple of 8, found {}", bits),
        ));
    }

    match caps.max_bits(ty) {
        Some(max) if bits <= max => Ok(()),
        Some(max) => Err(WatError::OutOfRange {
            op: op.name(),
            ty,
            bits,
            max,
        }),
        None => Err(WatError::UnsupportedOperation { op: op.name(), ty }),
    }
}

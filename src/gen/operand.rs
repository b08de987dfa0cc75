//! Typed numeric operands.
//!
//! An [`Operand`] plays two parts. As a declaration it renders to a
//! `(param ...)`, `(local ...)` or `(result ...)` node of a function
//! signature. As an instruction source it produces mnemonics such as
//! `i32.add` or `i64.load8_s`.
use super::rules::{self, Op};
use crate::config::WidthCaps;
use crate::error::{Result, WatError};
use crate::sexp::{self, SExpr};
use std::fmt;
use std::iter;
use std::str::FromStr;

/// Number types. Integers are not inherently signed or unsigned, their
/// interpretation is determined by individual operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part an operand plays in a function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Param,
    Local,
    Result,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Param => "param",
            Role::Local => "local",
            Role::Result => "result",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signedness suffix of `div`, `rem` and sized `load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Signed,
    Unsigned,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sign::Signed => "s",
            Sign::Unsigned => "u",
        })
    }
}

impl FromStr for Sign {
    type Err = WatError;

    /// ```
    /// # use watgen::gen::Sign;
    /// assert_eq!("s".parse::<Sign>(), Ok(Sign::Signed));
    /// assert_eq!("u".parse::<Sign>(), Ok(Sign::Unsigned));
    /// assert!("x".parse::<Sign>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "s" => Ok(Sign::Signed),
            "u" => Ok(Sign::Unsigned),
            _ => Err(WatError::invalid_operand(
                "sign",
                format!("sign flag must be `s` or `u`, found `{}`", s),
            )),
        }
    }
}

impl TryFrom<&str> for Sign {
    type Error = WatError;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

/// Converts a sign flag, reporting failures against `op`.
fn parse_sign<S>(op: Op, sign: S) -> Result<Sign>
where
    S: TryInto<Sign>,
    S::Error: Into<WatError>,
{
    sign.try_into().map_err(|err| {
        let err: WatError = err.into();
        match err {
            WatError::InvalidOperand { reason, .. } => WatError::InvalidOperand {
                op: op.name(),
                reason,
            },
            other => other,
        }
    })
}

/// A typed value slot.
///
/// The value type is fixed at construction. The role and the name only
/// affect how the operand renders as a declaration, never the mnemonics it
/// produces.
///
/// # Examples
///
/// ```
/// # use watgen::gen::{self, Role};
/// let local = gen::i32().as_role(Role::Local).set("tmp");
/// assert_eq!(local.render().to_string(), "(local tmp i32)");
/// assert_eq!(local.add(), "i32.add");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operand {
    ty: ValueType,
    role: Role,
    name: Option<String>,
    caps: WidthCaps,
}

pub fn i32() -> Operand {
    Operand::new(ValueType::I32)
}

pub fn i64() -> Operand {
    Operand::new(ValueType::I64)
}

pub fn f32() -> Operand {
    Operand::new(ValueType::F32)
}

pub fn f64() -> Operand {
    Operand::new(ValueType::F64)
}

impl Operand {
    /// Creates a new `param` operand without a name.
    pub fn new(ty: ValueType) -> Self {
        Self {
            ty,
            role: Role::default(),
            name: None,
            caps: WidthCaps::default(),
        }
    }

    pub fn as_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn set<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_caps(mut self, caps: WidthCaps) -> Self {
        self.caps = caps;
        self
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// Renders the declaration node: `(<role> <name>? <type>)`.
    pub fn render(&self) -> SExpr {
        let name = self.name.as_deref().map(SExpr::symbol);
        let ty = SExpr::symbol(self.ty.as_str());

        sexp::format(self.role.as_str(), name.into_iter().chain(iter::once(ty)))
    }

    fn mnemonic(&self, op: Op) -> String {
        format!("{}.{}", self.ty, op.name())
    }

    pub fn add(&self) -> String {
        self.mnemonic(Op::Add)
    }

    pub fn sub(&self) -> String {
        self.mnemonic(Op::Sub)
    }

    pub fn mul(&self) -> String {
        self.mnemonic(Op::Mul)
    }

    /// `<type>.const <value>`, with the value written exactly as it displays.
    ///
    /// ```
    /// # use watgen::gen;
    /// assert_eq!(gen::f64().const_("3.0"), "f64.const 3.0");
    /// assert_eq!(gen::i32().const_(-7), "i32.const -7");
    /// ```
    pub fn const_<V: fmt::Display>(&self, value: V) -> String {
        format!("{} {}", self.mnemonic(Op::Const), value)
    }

    /// ```
    /// # use watgen::gen::{self, Sign};
    /// assert_eq!(gen::i32().div("s").unwrap(), "i32.div_s");
    /// assert_eq!(gen::i64().div(Sign::Unsigned).unwrap(), "i64.div_u");
    /// assert!(gen::i32().div("x").is_err());
    /// ```
    pub fn div<S>(&self, sign: S) -> Result<String>
    where
        S: TryInto<Sign>,
        S::Error: Into<WatError>,
    {
        let sign = parse_sign(Op::Div, sign)?;
        rules::check(self.ty, Op::Div)?;
        Ok(format!("{}_{}", self.mnemonic(Op::Div), sign))
    }

    /// Integer remainder. Float types fail with `UnsupportedOperation`
    /// whatever the flag.
    pub fn rem<S>(&self, sign: S) -> Result<String>
    where
        S: TryInto<Sign>,
        S::Error: Into<WatError>,
    {
        rules::check(self.ty, Op::Rem)?;
        let sign = parse_sign(Op::Rem, sign)?;
        Ok(format!("{}_{}", self.mnemonic(Op::Rem), sign))
    }

    /// `<type>.load`, or with both a width and a sign flag the sized,
    /// sign- or zero-extending `<type>.load<bits>_<sign>`. Giving only one of
    /// the two is an `InvalidOperand` error.
    ///
    /// ```
    /// # use watgen::gen::{self, Sign};
    /// assert_eq!(gen::f32().load(None, None).unwrap(), "f32.load");
    /// assert_eq!(gen::i32().load(Some(8), Some(Sign::Unsigned)).unwrap(), "i32.load8_u");
    /// assert!(gen::i32().load(Some(32), Some(Sign::Signed)).is_err());
    /// assert!(gen::i32().load(Some(8), None).is_err());
    /// ```
    pub fn load(&self, bits: Option<u32>, sign: Option<Sign>) -> Result<String> {
        match (bits, sign) {
            (None, None) => Ok(self.mnemonic(Op::Load)),
            (Some(bits), Some(sign)) => {
                rules::check_width(self.ty, Op::SizedLoad, bits, &self.caps)?;
                Ok(format!("{}{}_{}", self.mnemonic(Op::Load), bits, sign))
            }
            (Some(_), None) => Err(WatError::invalid_operand(
                "load",
                "bit width given without a sign flag",
            )),
            (None, Some(_)) => Err(WatError::invalid_operand(
                "load",
                "sign flag given without a bit width",
            )),
        }
    }

    /// `<type>.store`, or the truncating `<type>.store<bits>` when a width
    /// is given.
    pub fn store(&self, bits: Option<u32>) -> Result<String> {
        match bits {
            None => Ok(self.mnemonic(Op::Store)),
            Some(bits) => {
                rules::check_width(self.ty, Op::SizedStore, bits, &self.caps)?;
                Ok(format!("{}{}", self.mnemonic(Op::Store), bits))
            }
        }
    }
}

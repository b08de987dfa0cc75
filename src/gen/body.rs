//! Recording of function bodies.
use super::operand::{Operand, Sign, ValueType};
use crate::config::WidthCaps;
use crate::error::{Result, WatError};
use std::fmt;

/// Indices can be given either in raw numeric form or as symbolic identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Index {
    Index(u32),
    Id(String),
}

impl From<&str> for Index {
    fn from(s: &str) -> Self {
        Self::Id(s.to_string())
    }
}

impl From<String> for Index {
    fn from(s: String) -> Self {
        Self::Id(s)
    }
}

impl From<u32> for Index {
    fn from(n: u32) -> Self {
        Self::Index(n)
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Index(i) => write!(f, "{}", i),
            Index::Id(id) => f.write_str(id),
        }
    }
}

/// The recording context handed to a function body.
///
/// Every instruction produced through the context is appended to its
/// instruction list in call order. Nothing checks the sequence against the
/// surrounding control flow: an unmatched `end` is recorded like any other
/// instruction.
///
/// # Examples
///
/// ```
/// # use watgen::gen::Body;
/// let mut body = Body::new();
/// body.get(0).get(1);
/// body.i32().add();
///
/// assert_eq!(
///     body.into_instructions(),
///     ["get_local 0", "get_local 1", "i32.add"]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    instructions: Vec<String>,
    caps: WidthCaps,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_caps(caps: WidthCaps) -> Self {
        Self {
            instructions: Vec::new(),
            caps,
        }
    }

    fn push(&mut self, inst: String) {
        tracing::trace!(instruction = %inst, "record");
        self.instructions.push(inst);
    }

    // locals
    pub fn get<T: Into<Index>>(&mut self, index: T) -> &mut Self {
        self.push(format!("get_local {}", index.into()));
        self
    }
    pub fn set<T: Into<Index>>(&mut self, index: T) -> &mut Self {
        self.push(format!("set_local {}", index.into()));
        self
    }

    // globals
    pub fn gget<T: Into<Index>>(&mut self, index: T) -> &mut Self {
        self.push(format!("get_global {}", index.into()));
        self
    }
    pub fn gset<T: Into<Index>>(&mut self, index: T) -> &mut Self {
        self.push(format!("set_global {}", index.into()));
        self
    }

    // control
    pub fn nop(&mut self) -> &mut Self {
        self.push("nop".to_string());
        self
    }
    pub fn block(&mut self) -> &mut Self {
        self.push("block".to_string());
        self
    }
    pub fn end(&mut self) -> &mut Self {
        self.push("end".to_string());
        self
    }
    pub fn call<T: Into<Index>>(&mut self, name: T) -> &mut Self {
        self.push(format!("call {}", name.into()));
        self
    }

    // numeric
    pub fn i32(&mut self) -> Emitter<'_> {
        self.emitter(ValueType::I32)
    }
    pub fn i64(&mut self) -> Emitter<'_> {
        self.emitter(ValueType::I64)
    }
    pub fn f32(&mut self) -> Emitter<'_> {
        self.emitter(ValueType::F32)
    }
    pub fn f64(&mut self) -> Emitter<'_> {
        self.emitter(ValueType::F64)
    }

    fn emitter(&mut self, ty: ValueType) -> Emitter<'_> {
        Emitter {
            operand: Operand::new(ty).with_caps(self.caps),
            body: self,
        }
    }

    pub fn into_instructions(self) -> Vec<String> {
        self.instructions
    }
}

/// A typed operand wired to a [`Body`]: each method appends the mnemonic it
/// produces to the body, then returns it.
#[derive(Debug)]
pub struct Emitter<'b> {
    operand: Operand,
    body: &'b mut Body,
}

impl Emitter<'_> {
    fn record<F>(self, emit: F) -> String
    where
        F: FnOnce(&Operand) -> String,
    {
        let inst = emit(&self.operand);
        self.body.push(inst.clone());
        inst
    }

    fn try_record<F>(self, emit: F) -> Result<String>
    where
        F: FnOnce(&Operand) -> Result<String>,
    {
        let inst = emit(&self.operand)?;
        self.body.push(inst.clone());
        Ok(inst)
    }

    pub fn add(self) -> String {
        self.record(Operand::add)
    }

    pub fn sub(self) -> String {
        self.record(Operand::sub)
    }

    pub fn mul(self) -> String {
        self.record(Operand::mul)
    }

    pub fn const_<V: fmt::Display>(self, value: V) -> String {
        self.record(|operand| operand.const_(value))
    }

    pub fn div<S>(self, sign: S) -> Result<String>
    where
        S: TryInto<Sign>,
        S::Error: Into<WatError>,
    {
        self.try_record(|operand| operand.div(sign))
    }

    pub fn rem<S>(self, sign: S) -> Result<String>
    where
        S: TryInto<Sign>,
        S::Error: Into<WatError>,
    {
        self.try_record(|operand| operand.rem(sign))
    }

    pub fn load(self, bits: Option<u32>, sign: Option<Sign>) -> Result<String> {
        self.try_record(|operand| operand.load(bits, sign))
    }

    pub fn store(self, bits: Option<u32>) -> Result<String> {
        self.try_record(|operand| operand.store(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let mut body = Body::new();
        body.gget(2).block().nop();
        body.i64().const_(10);
        body.i64().mul();
        body.set("$acc").end().call("$log").gset(0);

        assert_eq!(
            body.into_instructions(),
            [
                "get_global 2",
                "block",
                "nop",
                "i64.const 10",
                "i64.mul",
                "set_local $acc",
                "end",
                "call $log",
                "set_global 0",
            ]
        );
    }

    #[test]
    fn emitters_return_what_they_record() {
        let mut body = Body::new();
        let returned = vec![
            body.f32().sub(),
            body.f64().load(None, None).unwrap(),
            body.i32().store(None).unwrap(),
            body.i32().store(Some(8)).unwrap(),
            body.i64().load(Some(32), Some(Sign::Unsigned)).unwrap(),
            body.i32().rem("u").unwrap(),
            body.i64().div(Sign::Signed).unwrap(),
        ];

        assert_eq!(
            returned,
            [
                "f32.sub",
                "f64.load",
                "i32.store",
                "i32.store8",
                "i64.load32_u",
                "i32.rem_u",
                "i64.div_s",
            ]
        );
        assert_eq!(body.into_instructions(), returned);
    }

    #[test]
    fn failed_instructions_are_not_recorded() {
        let mut body = Body::new();
        body.i32().add();

        assert!(body.f32().rem("s").is_err());
        assert!(body.i32().div("x").is_err());
        assert!(body.i32().store(Some(32)).is_err());
        assert!(body.i64().load(None, Some(Sign::Signed)).is_err());

        assert_eq!(body.into_instructions(), ["i32.add"]);
    }

    #[test]
    fn caps_reach_emitters() {
        let mut body = Body::with_caps(WidthCaps { i32: 32, i64: 64 });
        assert_eq!(body.i32().store(Some(32)).unwrap(), "i32.store32");
        assert_eq!(
            body.i64().load(Some(64), Some(Sign::Signed)).unwrap(),
            "i64.load64_s"
        );
    }

    #[test]
    fn unmatched_end_is_recorded() {
        let mut body = Body::new();
        body.end().end();
        assert_eq!(body.into_instructions(), ["end", "end"]);
    }
}

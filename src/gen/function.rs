//! Function signatures and definitions.
use super::body::Body;
use super::operand::{Operand, Role};
use crate::config::WidthCaps;
use crate::error::{Result, WatError};
use crate::sexp::{self, SExpr};
use std::fmt;
use std::rc::Rc;

/// The key a declaration is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A positional declaration. It renders with the role the operand
    /// carries, which is how params and anonymous locals are told apart.
    Index(u32),
    /// A named declaration. The key becomes the operand's name.
    Named(String),
    /// The function result. It always renders as `result`.
    Result,
}

/// An ordered list of params, locals and results.
///
/// Declarations render in the order they were first declared. Declaring a
/// slot again replaces its operand but keeps its position.
///
/// # Examples
///
/// ```
/// # use watgen::gen::{self, Signature};
/// let sig = Signature::new()
///     .param(gen::i32())
///     .local("tmp", gen::f64())
///     .result(gen::i64());
///
/// let rendered: Vec<_> = sig.render().iter().map(ToString::to_string).collect();
/// assert_eq!(rendered, ["(param i32)", "(local tmp f64)", "(result i64)"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    declarations: Vec<(Slot, Operand)>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `operand` under `slot`, replacing an existing declaration in
    /// place.
    pub fn declare(&mut self, slot: Slot, operand: Operand) -> &mut Self {
        if let Some(entry) = self.declarations.iter_mut().find(|(s, _)| *s == slot) {
            entry.1 = operand;
        } else {
            self.declarations.push((slot, operand));
        }
        self
    }

    pub fn with(mut self, slot: Slot, operand: Operand) -> Self {
        self.declare(slot, operand);
        self
    }

    /// Appends a positional `param`.
    pub fn param(self, operand: Operand) -> Self {
        let index = self.next_index();
        self.with(Slot::Index(index), operand.as_role(Role::Param))
    }

    /// Declares a named `local`.
    pub fn local<S: Into<String>>(self, name: S, operand: Operand) -> Self {
        self.with(Slot::Named(name.into()), operand.as_role(Role::Local))
    }

    pub fn result(self, operand: Operand) -> Self {
        self.with(Slot::Result, operand)
    }

    /// One past the highest positional index in use.
    fn next_index(&self) -> u32 {
        self.declarations
            .iter()
            .filter_map(|(slot, _)| match slot {
                Slot::Index(index) => Some(index.saturating_add(1)),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Renders the declaration nodes in declaration order.
    pub fn render(&self) -> Vec<SExpr> {
        self.declarations
            .iter()
            .map(|(slot, operand)| match slot {
                Slot::Result => {
                    let mut operand = operand.clone();
                    operand.set_role(Role::Result);
                    operand.render()
                }
                Slot::Index(_) => operand.render(),
                Slot::Named(name) => {
                    let mut operand = operand.clone();
                    operand.set_name(name);
                    operand.render()
                }
            })
            .collect()
    }
}

type BodyFn = dyn Fn(&mut Body) -> Result<()>;

/// A named function: a [`Signature`] and, unless it only describes an
/// imported function, a body.
///
/// The body callback runs every time the function is rendered, each time
/// against a fresh [`Body`], so renders never see each other's instructions.
///
/// # Examples
///
/// ```
/// # use watgen::gen::{self, FunctionBuilder};
/// let add = FunctionBuilder::new("$add")?
///     .param(gen::i32())
///     .param(gen::i32())
///     .result(gen::i32())
///     .body(|b| {
///         b.get(0).get(1);
///         b.i32().add();
///         Ok(())
///     });
///
/// assert_eq!(
///     add.render()?.to_string(),
///     "(func \"$add\" (param i32) (param i32) (result i32) get_local 0 get_local 1 i32.add)"
/// );
/// # Ok::<(), watgen::WatError>(())
/// ```
#[derive(Clone)]
pub struct FunctionBuilder {
    name: String,
    signature: Signature,
    body: Option<Rc<BodyFn>>,
    caps: WidthCaps,
}

impl fmt::Debug for FunctionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionBuilder")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("body", &self.body.is_some())
            .field("caps", &self.caps)
            .finish()
    }
}

impl FunctionBuilder {
    /// Creates a function without declarations or body. The name is
    /// mandatory since `call` and `export` address the function by it.
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        Self::with_signature(name, Signature::new())
    }

    pub fn with_signature<S: Into<String>>(name: S, signature: Signature) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(WatError::invalid_argument(
                "name",
                "function name must not be empty",
            ));
        }

        Ok(Self {
            name,
            signature,
            body: None,
            caps: WidthCaps::default(),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn param(mut self, operand: Operand) -> Self {
        self.signature = self.signature.param(operand);
        self
    }

    pub fn local<S: Into<String>>(mut self, name: S, operand: Operand) -> Self {
        self.signature = self.signature.local(name, operand);
        self
    }

    pub fn result(mut self, operand: Operand) -> Self {
        self.signature = self.signature.result(operand);
        self
    }

    pub fn declare(mut self, slot: Slot, operand: Operand) -> Self {
        self.signature.declare(slot, operand);
        self
    }

    pub fn body<F>(mut self, body: F) -> Self
    where
        F: Fn(&mut Body) -> Result<()> + 'static,
    {
        self.body = Some(Rc::new(body));
        self
    }

    /// Width caps for the sized loads and stores recorded by the body.
    pub fn with_caps(mut self, caps: WidthCaps) -> Self {
        self.caps = caps;
        self
    }

    /// Runs the body callback once against a fresh [`Body`]. Returns `None`
    /// for declaration-only functions.
    pub fn record(&self) -> Result<Option<Body>> {
        match &self.body {
            None => Ok(None),
            Some(callback) => {
                let mut body = Body::with_caps(self.caps);
                callback(&mut body)?;
                Ok(Some(body))
            }
        }
    }

    /// Renders `(func "<name>" <declarations>... <instructions>...)`.
    pub fn render(&self) -> Result<SExpr> {
        let instructions = self
            .record()?
            .map(Body::into_instructions)
            .unwrap_or_default();

        tracing::debug!(
            function = %self.name,
            declarations = self.signature.len(),
            instructions = instructions.len(),
            "render function"
        );

        let mut nodes = vec![SExpr::str(self.name.as_str())];
        nodes.extend(self.signature.render());
        nodes.extend(instructions.into_iter().map(SExpr::Symbol));

        Ok(sexp::format("func", nodes))
    }
}

//! Modules: imports, function definitions and exports.
use super::function::{FunctionBuilder, Signature};
use super::operand::Operand;
use crate::config::FormatOptions;
use crate::error::{Result, WatError};
use crate::sexp::{self, SExpr};

/// An imported function: where it comes from, and the declaration-only
/// function it is bound to inside the module.
#[derive(Debug, Clone)]
struct Import {
    /// The segments of the dot-separated source path, e.g. `console.log`.
    path: Vec<String>,
    function: FunctionBuilder,
}

impl Import {
    fn render(&self) -> Result<SExpr> {
        let mut nodes: Vec<SExpr> = self.path.iter().map(|s| SExpr::str(s.as_str())).collect();
        nodes.push(self.function.render()?);
        Ok(sexp::format("import", nodes))
    }
}

/// Values offered to [`Module::export`]. Only function definitions can be
/// exported.
#[derive(Debug, Clone)]
pub enum Exportable {
    Function(FunctionBuilder),
    Signature(Signature),
    Operand(Operand),
}

impl Exportable {
    fn kind(&self) -> &'static str {
        match self {
            Exportable::Function(_) => "function",
            Exportable::Signature(_) => "signature",
            Exportable::Operand(_) => "operand",
        }
    }
}

impl From<FunctionBuilder> for Exportable {
    fn from(fun: FunctionBuilder) -> Self {
        Self::Function(fun)
    }
}

impl From<Signature> for Exportable {
    fn from(signature: Signature) -> Self {
        Self::Signature(signature)
    }
}

impl From<Operand> for Exportable {
    fn from(operand: Operand) -> Self {
        Self::Operand(operand)
    }
}

/// WebAssembly programs are organized into modules. A `Module` collects
/// imports and exported functions, and renders them as one tree.
///
/// Registering under an existing key replaces the entry but keeps its
/// position.
///
/// # Examples
///
/// ```
/// # use watgen::gen::{self, FunctionBuilder, Module, Signature};
/// let mut module = Module::new();
/// module.import("console.log", "$log", Signature::new().param(gen::i32()))?;
/// module.export("nothing", FunctionBuilder::new("$nothing")?.body(|b| {
///     b.nop();
///     Ok(())
/// }))?;
///
/// assert_eq!(
///     module.to_wat()?,
///     r#"(module
///   (import "console" "log" (func "$log" (param i32)))
///   (func "$nothing" nop)
///   (export "nothing" (func "$nothing"))
/// )"#
/// );
/// # Ok::<(), watgen::WatError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Module {
    imports: Vec<(String, Import)>,
    exports: Vec<(String, FunctionBuilder)>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Imports the function at `source_path` (e.g. `console.log`) under the
    /// local name `name`.
    pub fn import<P, N>(&mut self, source_path: P, name: N, signature: Signature) -> Result<&mut Self>
    where
        P: AsRef<str>,
        N: Into<String>,
    {
        let source_path = source_path.as_ref();
        let path: Vec<String> = source_path.split('.').map(str::to_string).collect();

        if path.iter().any(String::is_empty) {
            return Err(WatError::invalid_argument(
                "source_path",
                format!("`{}` has an empty segment", source_path),
            ));
        }

        let name = name.into();
        let function = FunctionBuilder::with_signature(name.clone(), signature)?;

        tracing::debug!(source = source_path, name = %name, "import");
        upsert(&mut self.imports, name, Import { path, function });
        Ok(self)
    }

    /// Exports a function definition under `name`. Anything else fails with
    /// `TypeMismatch` and leaves the exports untouched.
    pub fn export<N, E>(&mut self, name: N, item: E) -> Result<&mut Self>
    where
        N: Into<String>,
        E: Into<Exportable>,
    {
        let fun = match item.into() {
            Exportable::Function(fun) => fun,
            other => {
                return Err(WatError::TypeMismatch {
                    found: other.kind(),
                })
            }
        };

        let name = name.into();
        if name.is_empty() {
            return Err(WatError::invalid_argument(
                "name",
                "export name must not be empty",
            ));
        }

        tracing::debug!(name = %name, function = fun.name(), "export");
        upsert(&mut self.exports, name, fun);
        Ok(self)
    }

    /// Renders the module: imports first, then the definitions of all
    /// exported functions, then the export entries.
    pub fn render(&self) -> Result<SExpr> {
        let mut nodes = Vec::with_capacity(self.imports.len() + 2 * self.exports.len());

        for (_, import) in &self.imports {
            nodes.push(import.render()?);
        }

        let mut exports = Vec::with_capacity(self.exports.len());
        for (name, fun) in &self.exports {
            nodes.push(fun.render()?);
            exports.push(sexp::format(
                "export",
                [
                    SExpr::str(name.as_str()),
                    sexp::format("func", [SExpr::str(fun.name())]),
                ],
            ));
        }
        nodes.extend(exports);

        tracing::debug!(
            imports = self.imports.len(),
            exports = self.exports.len(),
            "render module"
        );
        Ok(sexp::format("module", nodes))
    }

    pub fn to_wat(&self) -> Result<String> {
        self.to_wat_with(&FormatOptions::default())
    }

    pub fn to_wat_with(&self, options: &FormatOptions) -> Result<String> {
        Ok(self.render()?.to_string_with(options))
    }
}

fn upsert<T>(entries: &mut Vec<(String, T)>, key: String, value: T) {
    if let Some(entry) = entries.iter_mut().find(|(k, _)| *k == key) {
        entry.1 = value;
    } else {
        entries.push((key, value));
    }
}

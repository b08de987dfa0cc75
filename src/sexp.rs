//! S-expression tree and its textual rendering.
use crate::config::FormatOptions;
use std::fmt;

/// A node of the text tree: a bare symbol, a quoted string, or a tagged
/// list of child nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SExpr {
    Symbol(String),
    Str(String),
    List { tag: String, children: Vec<SExpr> },
}

/// Builds a tagged list node.
///
/// # Examples
///
/// ```
/// # use watgen::sexp::{self, SExpr};
/// let node = sexp::format("param", [SExpr::symbol("i32")]);
/// assert_eq!(node.to_string(), "(param i32)");
/// ```
pub fn format<T, I>(tag: T, children: I) -> SExpr
where
    T: Into<String>,
    I: IntoIterator<Item = SExpr>,
{
    SExpr::List {
        tag: tag.into(),
        children: children.into_iter().collect(),
    }
}

impl SExpr {
    pub fn symbol<S: Into<String>>(s: S) -> Self {
        Self::Symbol(s.into())
    }

    pub fn str<S: Into<String>>(s: S) -> Self {
        Self::Str(s.into())
    }

    /// Returns the tag of a list node, `None` for atoms.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::List { tag, .. } => Some(tag.as_str()),
            _ => None,
        }
    }

    /// Returns the children of a list node. Atoms have no children.
    pub fn children(&self) -> &[SExpr] {
        match self {
            Self::List { children, .. } => children.as_slice(),
            _ => &[],
        }
    }

    pub fn to_string_with(&self, options: &FormatOptions) -> String {
        let mut printer = Printer::new(options);
        printer.print(&Measured::new(self));
        printer.buffer
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&FormatOptions::default()))
    }
}

/// A node paired with its nesting height: `0` for atoms, and one more than
/// the tallest child for lists.
#[derive(Debug)]
struct Measured<'e> {
    expr: &'e SExpr,
    height: usize,
    children: Vec<Measured<'e>>,
}

impl<'e> Measured<'e> {
    fn new(expr: &'e SExpr) -> Self {
        let children: Vec<_> = expr.children().iter().map(Measured::new).collect();
        let height = match expr {
            SExpr::List { .. } => 1 + children.iter().map(|c| c.height).max().unwrap_or(0),
            _ => 0,
        };

        Self {
            expr,
            height,
            children,
        }
    }
}

#[derive(Debug)]
struct Printer<'o> {
    buffer: String,
    indent: usize,
    options: &'o FormatOptions,
}

impl<'o> Printer<'o> {
    fn new(options: &'o FormatOptions) -> Self {
        Self {
            buffer: String::new(),
            indent: 0,
            options,
        }
    }

    /// Prints a newline and indent.
    fn newline(&mut self) {
        self.buffer.push('\n');
        for _ in 0..self.indent {
            self.buffer.push(' ');
        }
    }

    fn breaks(&self, node: &Measured<'_>, tag: &str) -> bool {
        if node.children.is_empty() {
            return false;
        }
        node.height > self.options.inline_height
            || self.options.break_tags.iter().any(|t| *t == tag)
    }

    fn print(&mut self, node: &Measured<'_>) {
        match node.expr {
            SExpr::Symbol(s) => self.buffer.push_str(s),
            SExpr::Str(s) => self.print_str(s),
            SExpr::List { tag, .. } => {
                self.buffer.push('(');
                self.buffer.push_str(tag);

                if self.breaks(node, tag) {
                    self.indent += self.options.indent;
                    for child in &node.children {
                        self.newline();
                        self.print(child);
                    }
                    self.indent -= self.options.indent;
                    self.newline();
                } else {
                    for child in &node.children {
                        self.buffer.push(' ');
                        self.print(child);
                    }
                }

                self.buffer.push(')');
            }
        }
    }

    fn print_str(&mut self, s: &str) {
        self.buffer.push('"');
        for c in s.escape_default() {
            self.buffer.push(c);
        }
        self.buffer.push('"');
    }
}

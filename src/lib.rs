//! Builds WAT (WebAssembly Text Format) modules from typed operands,
//! functions whose bodies are recorded from method calls, and import/export
//! declarations.
//!
//! ```
//! use watgen::gen::{self, FunctionBuilder, Module, Signature};
//!
//! let add = FunctionBuilder::new("$add")?
//!     .param(gen::i32())
//!     .param(gen::i32())
//!     .result(gen::i32())
//!     .body(|b| {
//!         b.get(0).get(1);
//!         b.i32().add();
//!         Ok(())
//!     });
//!
//! let mut module = Module::new();
//! module.import("console.log", "$log", Signature::new().param(gen::i32()))?;
//! module.export("add", add)?;
//!
//! assert!(module.to_wat()?.starts_with("(module\n  (import \"console\" \"log\""));
//! # Ok::<(), watgen::WatError>(())
//! ```
pub mod config;
pub mod error;
pub mod gen;
pub mod sexp;

pub use config::{Config, FormatOptions, WidthCaps};
pub use error::{Result, WatError};

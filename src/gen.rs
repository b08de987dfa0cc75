//! Typed builders which emit WAT (WebAssembly Text Format).
pub mod body;
pub mod function;
pub mod module;
pub mod operand;
mod rules;

pub use body::{Body, Emitter, Index};
pub use function::{FunctionBuilder, Signature, Slot};
pub use module::{Exportable, Module};
pub use operand::{f32, f64, i32, i64, Operand, Role, Sign, ValueType};
pub use rules::Op;

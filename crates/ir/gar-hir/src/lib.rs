//! High-level Intermediate Representation consumed by the Monomorphizer.
//!
//! This crate owns the data model spec.md §3 calls "HIR entities (as
//! consumed)" — it does not itself construct HIR from source text (that
//! remains an external collaborator per spec.md §1); the `FunctionBuilder`
//! here exists only to assemble HIR programmatically for this workspace's
//! own tests.

pub mod block;
pub mod builder;
pub mod call;
pub mod function;
pub mod instruction;
pub mod param;
pub mod program;
pub mod types;

pub use block::{BasicBlock, Terminator};
pub use builder::FunctionBuilder;
pub use call::CallIdAllocator;
pub use function::Function;
pub use instruction::{Call, CallAnnotation, CallId, Instruction, UnionDispatchInfo};
pub use param::{DefaultValue, Param};
pub use program::Program;
pub use types::Type;

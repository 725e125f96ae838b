//! Functions — the unit the Monomorphizer clones.

use crate::block::BasicBlock;
use crate::param::Param;
use crate::types::Type;
use gar_intern::Symbol;

/// A function (method) in the program.
///
/// A specialized clone produced by the planner (spec.md §4.3 Step D) is
/// itself a `Function` value, appended to `Program::functions` alongside
/// the original — there is no separate "template vs. instance" type split.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The function's name. Unique among original functions; specialized
    /// clones get a synthesized name (spec.md §4.1) that must not collide
    /// with any other function in the program.
    pub name: Symbol,
    /// Parameters, in declaration order.
    pub params: Vec<Param>,
    /// Basic blocks making up the function body, in declaration order.
    pub body: Vec<BasicBlock>,
    /// The function's declared/inferred return type.
    pub return_type: Type,
    /// True for instance methods (as opposed to module-level functions).
    pub is_instance_method: bool,
    /// The owning class, for instance methods.
    pub owner_class: Option<Symbol>,
}

impl Function {
    /// True if this function has at least one parameter with `rest` or
    /// `keyword_rest` set — the collector's rule 4 (spec.md §4.2):
    /// "No target parameter has `rest` or `keyword_rest` set."
    #[must_use]
    pub fn has_aggregating_param(&self) -> bool {
        self.params.iter().any(|param| param.rest || param.keyword_rest)
    }
}

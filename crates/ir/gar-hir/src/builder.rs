//! Programmatic HIR construction.
//!
//! Real HIR construction from source text is an external collaborator
//! (spec.md §1, "HIR construction from source (parser/lowerer)"); this
//! builder — directly mirroring the teacher workspace's `MirBuilder` — is
//! the only construction path this workspace's own tests exercise.

use crate::block::{BasicBlock, Terminator};
use crate::call::CallIdAllocator;
use crate::function::Function;
use crate::instruction::{Call, CallId, Instruction};
use crate::param::Param;
use crate::types::Type;
use gar_intern::Symbol;

/// Builds a `Function` one block and instruction at a time.
///
/// Borrows its `CallId` allocator from the enclosing `Program` (via
/// `Program::builder`) rather than owning one, so that every function
/// built into the same program draws from a single counter — `CallId`s
/// must be unique program-wide, not merely within one function (see
/// `CallIdAllocator`'s own doc comment).
pub struct FunctionBuilder<'alloc> {
    function: Function,
    current_block: usize,
    call_ids: &'alloc mut CallIdAllocator,
}

impl<'alloc> FunctionBuilder<'alloc> {
    /// Starts building a function with the given name and an initial,
    /// current, unlabeled block, drawing `CallId`s from `call_ids`.
    #[must_use]
    pub fn new(name: Symbol, entry_label: Symbol, call_ids: &'alloc mut CallIdAllocator) -> Self {
        Self {
            function: Function {
                name,
                params: Vec::new(),
                body: vec![BasicBlock::new(entry_label)],
                return_type: Type::Untyped,
                is_instance_method: true,
                owner_class: None,
            },
            current_block: 0,
            call_ids,
        }
    }

    /// Appends a parameter to the function's signature.
    pub fn param(&mut self, param: Param) -> &mut Self {
        self.function.params.push(param);
        self
    }

    /// Sets the function's return type.
    pub fn return_type(&mut self, ty: Type) -> &mut Self {
        self.function.return_type = ty;
        self
    }

    /// Sets whether this function is an instance method.
    pub fn is_instance_method(&mut self, yes: bool) -> &mut Self {
        self.function.is_instance_method = yes;
        self
    }

    /// Sets the function's owning class.
    pub fn owner_class(&mut self, owner: Symbol) -> &mut Self {
        self.function.owner_class = Some(owner);
        self
    }

    /// Starts a new block and makes it current, returning its index.
    pub fn block(&mut self, label: Symbol) -> usize {
        self.function.body.push(BasicBlock::new(label));
        self.current_block = self.function.body.len() - 1;
        self.current_block
    }

    /// Builds a `Call` instruction with a freshly allocated `CallId`,
    /// appends it to the current block, and returns the id so the caller
    /// (typically a test) can later look up its annotation.
    pub fn push_call(
        &mut self,
        receiver: Instruction,
        method_name: Symbol,
        args: Vec<Instruction>,
        ty: Type,
    ) -> CallId {
        let id = self.call_ids.next();
        let call = Call {
            id,
            receiver: Box::new(receiver),
            method_name,
            args,
            ty,
            annotation: None,
        };
        self.function.body[self.current_block]
            .instructions
            .push(Instruction::Call(call));
        id
    }

    /// Appends a non-`Call` instruction to the current block.
    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.function.body[self.current_block]
            .instructions
            .push(instruction);
        self
    }

    /// Sets the current block's terminator.
    pub fn terminator(&mut self, terminator: Terminator) -> &mut Self {
        self.function.body[self.current_block].terminator = Some(terminator);
        self
    }

    /// Finishes building and returns the assembled function.
    #[must_use]
    pub fn finish(self) -> Function {
        self.function
    }
}

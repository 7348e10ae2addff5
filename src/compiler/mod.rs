//! The Compiler module is in charge of taking source text and
//! producing a hex instruction listing.
//!
//! It does this in four stages: a single-pass tokenizer, a recursive
//! descent parser driven by the command table, a rewrite that binds
//! assignments to their targets, and a code generator that allocates
//! storage and registers.
//!
//! Each call starts from fresh state; only the command table is shared.

pub mod ast;
pub mod codegen;
pub mod commands;
pub mod error;
pub mod instruction;
pub mod lexer;
pub mod parser;
pub mod symbols;
pub mod transform;

pub use error::CompileError;
pub use instruction::Listing;

/// Compiles source text into the final listing text.
pub fn compile(source: &str) -> Result<String, CompileError> {
    compile_listing(source).map(|listing| listing.to_string())
}

/// Compiles source text, keeping the structured lines and symbol table.
pub fn compile_listing(source: &str) -> Result<Listing, CompileError> {
    let tokens = lexer::tokenize(source)?;
    let program = parser::Parser::new(tokens).run()?;
    let program = transform::bind_assignments(program)?;
    trace!("bound program:\n{}", program);
    codegen::Generator::new().generate(&program)
}

use thiserror::Error;

/// Every failure aborts the whole compilation; no partial listing is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("Unknown character: {0}")]
    UnknownCharacter(char),

    #[error("Invalid register: {0}")]
    InvalidRegister(String),

    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("Expression nested more than {0} levels deep")]
    NestingTooDeep(usize),

    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("Number out of bounds: {0}")]
    NumberOutOfBounds(String),

    #[error("Unimplemented operation: {0}")]
    UnimplementedOperation(String),

    #[error("Unexpected node kind: {0}")]
    UnknownNodeKind(String),

    #[error("Assignment has no target")]
    DanglingAssignment,

    #[error("Ran out of registers in a single statement")]
    RegistersExhausted,

    #[error("Out of memory: storage would overlap program code")]
    OutOfMemory,
}

pub type Result<T> = std::result::Result<T, CompileError>;

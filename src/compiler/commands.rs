//! The command table shared by the lexer, parser and code generator.
//!
//! Adding an opcode means adding a row here and a case to the generator.

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Opcode {
    Let,
    Add,
    Sub,
    And,
    Xor,
    ShiftR,
    ShiftL,
    Jz,
    Jp,
    Exit,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Command {
    pub name:   &'static str,
    pub opcode: Opcode,
    /// Number of operands the parser walks after the command word.
    /// `let` additionally takes an optional `= initializer`.
    pub args:   usize,
}

pub static COMMANDS: [Command; 10] = [
    Command { name: "let",    opcode: Opcode::Let,    args: 1 },
    Command { name: "add",    opcode: Opcode::Add,    args: 2 },
    Command { name: "sub",    opcode: Opcode::Sub,    args: 2 },
    Command { name: "and",    opcode: Opcode::And,    args: 2 },
    Command { name: "xor",    opcode: Opcode::Xor,    args: 2 },
    Command { name: "shiftr", opcode: Opcode::ShiftR, args: 2 },
    Command { name: "shiftl", opcode: Opcode::ShiftL, args: 2 },
    Command { name: "jz",     opcode: Opcode::Jz,     args: 2 },
    Command { name: "jp",     opcode: Opcode::Jp,     args: 2 },
    Command { name: "exit",   opcode: Opcode::Exit,   args: 0 },
];

/// Finds a command by its exact (case-sensitive) name.
pub fn lookup(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|cmd| cmd.name == name)
}

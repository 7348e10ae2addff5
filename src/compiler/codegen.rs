//! Walks a bound program and emits the listing.
//!
//! Registers are handed out from `F` downward and recycled at every
//! statement boundary. Storage comes from the symbol table, growing down
//! from `FF`, while code grows up from `10`; the two regions must never meet.

use super::ast::{Node, Program};
use super::commands::Opcode;
use super::error::{CompileError, Result};
use super::instruction::{encode_word, Address, Instruction, Line, Listing, Register};
use super::symbols::{SymbolKey, SymbolTable, SCRATCH_NAME};

/// Address of the first computed instruction.
pub const PROGRAM_START: Address = 0x10;

const REGISTER_COUNT: u8 = 16;

/// What a node evaluates to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Operand {
    Register(Register),
    Address(Address),
    /// Statements that only emit lines.
    Effect,
}

pub struct Generator {
    symbols:   SymbolTable,
    registers: u8,
    /// Next program counter value. Kept wider than an address so that
    /// running off the end is detected rather than wrapped.
    address:   u16,
    output:    Vec<Line>,
}

impl Generator {
    pub fn new() -> Self {
        Generator {
            symbols:   SymbolTable::new(),
            registers: 0,
            address:   u16::from(PROGRAM_START),
            output:    Vec::new(),
        }
    }

    /// Assembles the whole program, consuming the generator.
    pub fn generate(mut self, program: &Program) -> Result<Listing> {
        for node in &program.body {
            self.registers = 0;
            self.assemble(node)?;
        }

        debug!(
            "generated {} lines using {} symbols",
            self.output.len(),
            self.symbols.len()
        );

        let symbols = self.symbols.iter()
            .map(|sym| (sym.key.to_string(), sym.address))
            .collect();
        Ok(Listing::new(self.output, symbols))
    }

    fn assemble(&mut self, node: &Node) -> Result<Operand> {
        match node {
            Node::NumberLiteral(value) => {
                let loc = self.constant(*value)?;
                let dest = self.free_register()?;
                self.emit(Instruction::Load { dest, addr: loc })?;
                Ok(Operand::Register(dest))
            },
            Node::Variable(name) => {
                let addr = self.find_variable(name)?;
                let dest = self.free_register()?;
                self.emit(Instruction::Load { dest, addr })?;
                Ok(Operand::Register(dest))
            },
            Node::Register(reg) => Ok(Operand::Register(*reg)),
            Node::Assignment { value, target } => {
                let target = target.as_deref().ok_or(CompileError::DanglingAssignment)?;
                self.assignment(value, target)
            },
            Node::Operation { command, params } => match command.opcode {
                Opcode::Let => self.let_binding(params),
                Opcode::Add => {
                    let lhs = self.value(operand(params, 0)?)?;
                    let rhs = self.value(operand(params, 1)?)?;
                    let dest = self.free_register()?;
                    self.emit(Instruction::Add { dest, lhs, rhs })?;
                    Ok(Operand::Register(dest))
                },
                Opcode::Sub | Opcode::And | Opcode::Xor |
                Opcode::ShiftR | Opcode::ShiftL |
                Opcode::Jz | Opcode::Jp | Opcode::Exit => {
                    Err(CompileError::UnimplementedOperation(command.name.to_owned()))
                },
            },
            Node::JumpLabel(name) => Err(CompileError::UnimplementedOperation(format!("label `{}`", name))),
        }
    }

    fn assignment(&mut self, value: &Node, target: &Node) -> Result<Operand> {
        let src = self.value(value)?;
        let addr = match target {
            Node::Variable(name) => self.find_variable(name)?,
            Node::Register(_)    => self.find_variable(SCRATCH_NAME)?,
            other => match self.assemble(other)? {
                Operand::Address(addr) => addr,
                _ => return Err(CompileError::UnknownNodeKind(format!("cannot assign to {}", other.kind()))),
            },
        };

        self.emit(Instruction::Store { src, addr })?;

        // A store only writes memory; bring the value back into the register.
        if let Node::Register(reg) = target {
            self.emit(Instruction::Load { dest: *reg, addr })?;
        }

        self.registers = 0;
        Ok(Operand::Effect)
    }

    fn let_binding(&mut self, params: &[Node]) -> Result<Operand> {
        let name = match operand(params, 0)? {
            Node::Variable(name) => name.clone(),
            other => return Err(CompileError::UnknownNodeKind(format!("cannot declare {}", other.kind()))),
        };

        let addr = self.allocate(SymbolKey::Name(name))?;

        match operand(params, 1)? {
            Node::NumberLiteral(value) => self.push(Line::data(addr, encode_word(*value)?)),
            init => {
                let src = self.value(init)?;
                self.emit(Instruction::Store { src, addr })?;
            },
        }

        self.registers = 0;
        Ok(Operand::Address(addr))
    }

    /// Assembles a node that must leave its result in a register.
    fn value(&mut self, node: &Node) -> Result<Register> {
        match self.assemble(node)? {
            Operand::Register(reg) => Ok(reg),
            _ => Err(CompileError::UnknownNodeKind(format!("{} does not produce a value", node.kind()))),
        }
    }

    /// Returns the storage for a literal, emitting its data line the first
    /// time the value is seen. Reusing a literal does not consume an address.
    fn constant(&mut self, value: i64) -> Result<Address> {
        if let Some(addr) = self.symbols.constant(value) {
            return Ok(addr);
        }

        let word = encode_word(value)?;
        let addr = self.allocate(SymbolKey::Constant(value))?;
        self.push(Line::data(addr, word));
        Ok(addr)
    }

    fn find_variable(&self, name: &str) -> Result<Address> {
        self.symbols.lookup(name)
            .ok_or_else(|| CompileError::UndefinedVariable(name.to_owned()))
    }

    fn allocate(&mut self, key: SymbolKey) -> Result<Address> {
        match self.symbols.next_address() {
            Some(addr) if u16::from(addr) >= self.address => {},
            _ => return Err(CompileError::OutOfMemory),
        }
        self.symbols.insert(key).ok_or(CompileError::OutOfMemory)
    }

    fn free_register(&mut self) -> Result<Register> {
        if self.registers >= REGISTER_COUNT {
            return Err(CompileError::RegistersExhausted);
        }
        let reg = Register::new(REGISTER_COUNT - 1 - self.registers)
            .ok_or(CompileError::RegistersExhausted)?;
        self.registers += 1;
        Ok(reg)
    }

    fn next_line(&mut self) -> Result<Address> {
        if self.address >= u16::from(self.symbols.lowest_address()) {
            return Err(CompileError::OutOfMemory);
        }
        let addr = self.address as Address;
        self.address += 1;
        Ok(addr)
    }

    fn emit(&mut self, instruction: Instruction) -> Result<()> {
        let addr = self.next_line()?;
        self.push(Line::code(addr, instruction));
        Ok(())
    }

    fn push(&mut self, line: Line) {
        trace!("{}", line);
        self.output.push(line);
    }
}

fn operand(params: &[Node], idx: usize) -> Result<&Node> {
    params.get(idx).ok_or(CompileError::UnexpectedEndOfInput)
}

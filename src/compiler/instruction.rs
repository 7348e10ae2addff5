//! Machine-level model of the target: registers, instructions and the lines
//! of the final listing.
//!
//! Every line is a two-digit address followed by one 16-bit word. A computed
//! instruction packs a 4-bit opcode and three 4-bit operand fields:
//!
//! ```text
//! 1DAB   ; ADD   RD <= RA + RB
//! 8AFD   ; LOAD  RA <= [FD]
//! 9AFD   ; STORE [FD] <= RA
//! ```

use std::convert::TryFrom;
use std::fmt;

use super::error::{CompileError, Result};

/// One byte of storage in the target machine.
pub type Address = u8;

/// One of the sixteen registers, `0` through `F`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Register(u8);

impl Register {
    pub fn new(id: u8) -> Option<Self> {
        if id <= 0x0F {
            Some(Register(id))
        } else {
            None
        }
    }

    pub fn to_u16(self) -> u16 {
        u16::from(self.0)
    }
}

impl TryFrom<char> for Register {
    type Error = CompileError;

    fn try_from(c: char) -> Result<Self> {
        c.to_digit(16)
            .map(|id| Register(id as u8))
            .ok_or_else(|| CompileError::InvalidRegister(c.to_string()))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Instruction {
    Add   { dest: Register, lhs: Register, rhs: Register },
    Load  { dest: Register, addr: Address },
    Store { src: Register, addr: Address },
}

impl Instruction {
    /// Assembles the instruction into its 16-bit machine word.
    pub fn assemble(&self) -> u16 {
        use Instruction::*;
        match self {
            Add { dest, lhs, rhs } => (self.opcode() << 12) | (dest.to_u16() << 8) | (lhs.to_u16() << 4) | rhs.to_u16(),
            Load { dest: reg, addr } |
            Store { src: reg, addr } => (self.opcode() << 12) | (reg.to_u16() << 8) | u16::from(*addr),
        }
    }

    fn opcode(&self) -> u16 {
        use Instruction::*;
        match self {
            Add { .. }   => 0b0001,
            Load { .. }  => 0b1000,
            Store { .. } => 0b1001,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;
        match self {
            Add { dest, lhs, rhs } => write!(f, "ADD R{} <= R{} + R{}", dest, lhs, rhs),
            Load { dest, addr }    => write!(f, "LOAD R{} <= [{:02X}]", dest, addr),
            Store { src, addr }    => write!(f, "STORE [{:02X}] <= R{}", addr, src),
        }
    }
}

/// Encodes a signed value as a 16-bit data word.
/// Negative values use two's complement.
pub fn encode_word(value: i64) -> Result<u16> {
    if (-0x8000..0x8000).contains(&value) {
        Ok(value as i16 as u16)
    } else {
        Err(CompileError::NumberOutOfBounds(value.to_string()))
    }
}

pub fn decode_word(word: u16) -> i64 {
    i64::from(word as i16)
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Line {
    pub address: Address,
    pub word:    u16,
    /// `None` for a data line holding a literal.
    pub instruction: Option<Instruction>,
}

impl Line {
    pub fn data(address: Address, word: u16) -> Self {
        Line { address, word, instruction: None }
    }

    pub fn code(address: Address, instruction: Instruction) -> Self {
        Line { address, word: instruction.assemble(), instruction: Some(instruction) }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02X}: {:04X}", self.address, self.word)
    }
}

/// A finished compilation: lines in ascending address order and the symbol
/// table as it stood at the end.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Listing {
    pub lines:   Vec<Line>,
    pub symbols: Vec<(String, Address)>,
}

impl Listing {
    /// Orders lines the way their fixed-width text sorts, which is
    /// ascending by address and then by word.
    pub fn new(mut lines: Vec<Line>, symbols: Vec<(String, Address)>) -> Self {
        lines.sort_by_key(|line| (line.address, line.word));
        Listing { lines, symbols }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(id: u8) -> Register {
        Register::new(id).unwrap()
    }

    #[test]
    fn test_register() {
        for i in 0..=0x0F {
            assert_eq!(Register::new(i).map(Register::to_u16), Some(u16::from(i)));
        }
        for i in 0x10..=u8::MAX {
            assert_eq!(Register::new(i), None);
        }

        assert_eq!(Register::try_from('a'), Ok(reg(0xA)));
        assert_eq!(Register::try_from('F'), Ok(reg(0xF)));
        assert_eq!(Register::try_from('7'), Ok(reg(7)));
        assert!(Register::try_from('g').is_err());
        assert_eq!(reg(0xC).to_string(), "C");
    }

    #[test]
    fn test_assemble() {
        assert_eq!(Instruction::Load { dest: reg(0xF), addr: 0xFD }.assemble(), 0x8FFD);
        assert_eq!(Instruction::Store { src: reg(0xF), addr: 0xFE }.assemble(), 0x9FFE);
        assert_eq!(Instruction::Add { dest: reg(0xD), lhs: reg(0xF), rhs: reg(0xE) }.assemble(), 0x1DFE);
        assert_eq!(Instruction::Load { dest: reg(0), addr: 0 }.assemble(), 0x8000);
    }

    #[test]
    fn test_encode_word() {
        assert_eq!(encode_word(0), Ok(0x0000));
        assert_eq!(encode_word(5), Ok(0x0005));
        assert_eq!(encode_word(0x7FFF), Ok(0x7FFF));
        assert_eq!(encode_word(-1), Ok(0xFFFF));
        assert_eq!(encode_word(-0x7FFF), Ok(0x8001));
        assert_eq!(encode_word(-0x8000), Ok(0x8000));

        assert!(encode_word(0x8000).is_err());
        assert!(encode_word(-0x8001).is_err());
        assert_eq!(encode_word(40000), Err(CompileError::NumberOutOfBounds("40000".to_owned())));
    }

    #[test]
    fn test_word_roundtrip() {
        for value in -0x8000..0x8000 {
            assert_eq!(decode_word(encode_word(value).unwrap()), value);
        }
    }

    #[test]
    fn test_listing_order() {
        let lines = vec![
            Line::data(0xFD, 0x0005),
            Line::code(0x11, Instruction::Store { src: reg(0xF), addr: 0xFE }),
            Line::code(0x10, Instruction::Load { dest: reg(0xF), addr: 0xFD }),
            Line::data(0x0F, 0x0001),
        ];
        let listing = Listing::new(lines, vec![]);
        assert_eq!(listing.to_string(), "0F: 0001\n10: 8FFD\n11: 9FFE\nFD: 0005");

        let text: Vec<String> = listing.lines.iter().map(Line::to_string).collect();
        let mut sorted = text.clone();
        sorted.sort();
        assert_eq!(text, sorted);
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(Listing::new(vec![], vec![]).to_string(), "");
    }
}

//! Named storage locations.
//!
//! Addresses are handed out downward from `FF`: entry `k` lives at `FF - k`.
//! Entries are never removed, so two entries can never share an address.

use std::fmt;

use super::instruction::Address;

pub const IO_NAME: &str = "io";
pub const IO_ADDRESS: Address = 0xFF;
pub const SCRATCH_NAME: &str = "temp";
pub const SCRATCH_ADDRESS: Address = 0xFE;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SymbolKey {
    Name(String),
    /// A literal constant, stored once and shared by every use.
    Constant(i64),
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SymbolKey::Name(name)      => write!(f, "{}", name),
            SymbolKey::Constant(value) => write!(f, "#{}", value),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Symbol {
    pub key:     SymbolKey,
    pub address: Address,
}

#[derive(Clone, Debug)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            entries: vec![
                Symbol { key: SymbolKey::Name(IO_NAME.to_owned()),      address: IO_ADDRESS },
                Symbol { key: SymbolKey::Name(SCRATCH_NAME.to_owned()), address: SCRATCH_ADDRESS },
            ],
        }
    }

    /// The address the next inserted entry will receive, if any is left.
    pub fn next_address(&self) -> Option<Address> {
        0xFFusize.checked_sub(self.entries.len()).map(|addr| addr as Address)
    }

    /// The lowest address currently in use.
    pub fn lowest_address(&self) -> Address {
        self.entries.last().map(|sym| sym.address).unwrap_or(IO_ADDRESS)
    }

    /// Appends an entry at the next free address.
    /// Returns `None` once every address has been handed out.
    pub fn insert(&mut self, key: SymbolKey) -> Option<Address> {
        let address = self.next_address()?;
        self.entries.push(Symbol { key, address });
        Some(address)
    }

    /// Resolves a name to its most recent binding.
    pub fn lookup(&self, name: &str) -> Option<Address> {
        self.entries.iter().rev()
            .find(|sym| matches!(&sym.key, SymbolKey::Name(n) if n == name))
            .map(|sym| sym.address)
    }

    pub fn constant(&self, value: i64) -> Option<Address> {
        self.entries.iter()
            .find(|sym| sym.key == SymbolKey::Constant(value))
            .map(|sym| sym.address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded() {
        let table = SymbolTable::new();
        assert_eq!(table.lookup("io"), Some(0xFF));
        assert_eq!(table.lookup("temp"), Some(0xFE));
        assert_eq!(table.lookup("a"), None);
        assert_eq!(table.next_address(), Some(0xFD));
        assert_eq!(table.lowest_address(), 0xFE);
    }

    #[test]
    fn test_insert_downward() {
        let mut table = SymbolTable::new();
        assert_eq!(table.insert(SymbolKey::Name("a".to_owned())), Some(0xFD));
        assert_eq!(table.insert(SymbolKey::Constant(5)), Some(0xFC));
        assert_eq!(table.insert(SymbolKey::Name("b".to_owned())), Some(0xFB));

        assert_eq!(table.lookup("a"), Some(0xFD));
        assert_eq!(table.constant(5), Some(0xFC));
        assert_eq!(table.constant(6), None);
        assert_eq!(table.lowest_address(), 0xFB);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_constants_and_names_are_separate() {
        let mut table = SymbolTable::new();
        table.insert(SymbolKey::Constant(1));
        assert_eq!(table.lookup("1"), None);
    }

    #[test]
    fn test_shadowing() {
        let mut table = SymbolTable::new();
        table.insert(SymbolKey::Name("a".to_owned()));
        table.insert(SymbolKey::Name("a".to_owned()));
        assert_eq!(table.lookup("a"), Some(0xFC));
    }

    #[test]
    fn test_exhausted() {
        let mut table = SymbolTable::new();
        for i in 0..254 {
            assert!(table.insert(SymbolKey::Constant(i)).is_some());
        }
        assert_eq!(table.lowest_address(), 0x00);
        assert_eq!(table.insert(SymbolKey::Constant(-1)), None);

        let mut addrs: Vec<Address> = table.iter().map(|sym| sym.address).collect();
        addrs.sort();
        addrs.dedup();
        assert_eq!(addrs.len(), 256);
    }
}

//! The syntax tree produced by the parser.
//!
//! A program is a flat list of statements. Operands are nested nodes whose
//! count is fixed by the command table:
//!
//! ```text
//! let a = 5        ; Operation(let, [Variable a, NumberLiteral 5])
//! let b            ; Operation(let, [Variable b, NumberLiteral 0])
//! &a = add a 1     ; Register A, Assignment(Operation(add, [a, 1]))
//! loop:            ; JumpLabel loop
//! ```
//!
//! The parser leaves every `Assignment` without a target. The transformer
//! binds it to the statement that precedes it.

use std::fmt;

use super::commands::Command;
use super::instruction::Register;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Program {
    pub body: Vec<Node>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Node {
    JumpLabel(String),
    NumberLiteral(i64),
    Assignment {
        value:  Box<Node>,
        target: Option<Box<Node>>,
    },
    Register(Register),
    Variable(String),
    Operation {
        command: &'static Command,
        params:  Vec<Node>,
    },
}

impl Node {
    /// Builds an assignment that has not been bound to a target yet.
    pub fn assignment(value: Node) -> Self {
        Node::Assignment { value: Box::new(value), target: None }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::JumpLabel(_)       => "JumpLabel",
            Node::NumberLiteral(_)   => "NumberLiteral",
            Node::Assignment { .. }  => "Assignment",
            Node::Register(_)        => "Register",
            Node::Variable(_)        => "Variable",
            Node::Operation { .. }   => "Operation",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::JumpLabel(name)     => write!(f, "{}:", name),
            Node::NumberLiteral(val)  => write!(f, "{}", val),
            Node::Register(reg)       => write!(f, "&{}", reg),
            Node::Variable(name)      => write!(f, "{}", name),
            Node::Assignment { value, target: Some(target) } => write!(f, "{} = {}", target, value),
            Node::Assignment { value, target: None }         => write!(f, "= {}", value),
            Node::Operation { command, params } => {
                write!(f, "{}", command.name)?;
                for param in params {
                    write!(f, " {}", param)?;
                }
                Ok(())
            },
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for node in &self.body {
            writeln!(f, "{}", node)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::commands;

    #[test]
    fn test_display() {
        let add = Node::Operation {
            command: commands::lookup("add").unwrap(),
            params:  vec![Node::Variable("a".to_owned()), Node::NumberLiteral(1)],
        };
        assert_eq!(add.to_string(), "add a 1");

        let assign = Node::Assignment {
            value:  Box::new(add),
            target: Some(Box::new(Node::Register(Register::new(0xA).unwrap()))),
        };
        assert_eq!(assign.to_string(), "&A = add a 1");
        assert_eq!(Node::assignment(Node::NumberLiteral(3)).to_string(), "= 3");
        assert_eq!(Node::JumpLabel("top".to_owned()).to_string(), "top:");
    }

    #[test]
    fn test_kind() {
        assert_eq!(Node::NumberLiteral(0).kind(), "NumberLiteral");
        assert_eq!(Node::assignment(Node::NumberLiteral(0)).kind(), "Assignment");
        assert_eq!(Node::Variable("x".to_owned()).kind(), "Variable");
    }
}

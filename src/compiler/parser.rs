//! The Parser module takes a token stream from the lexer and converts it
//! into a `Program`. Operand counts come from the command table.
use std::collections::VecDeque;
use std::convert::TryFrom;

use super::ast::{Node, Program};
use super::commands::Opcode;
use super::error::{CompileError, Result};
use super::instruction::Register;
use super::lexer::Token;

/// Deepest operand nesting a single statement may reach.
pub const MAX_DEPTH: usize = 256;

pub struct Parser {
    tokens: VecDeque<Token>,
    depth:  usize,
}

impl Parser {
    pub fn new<T: Into<VecDeque<Token>>>(tokens: T) -> Self {
        Parser { tokens: tokens.into(), depth: 0 }
    }

    /// Run the parser, consuming itself and returning the program.
    pub fn run(mut self) -> Result<Program> {
        let mut program = Program::default();

        while !self.tokens.is_empty() {
            let node = self.walk()?;
            program.body.push(node);
        }

        debug!("parsed {} top-level statements", program.body.len());
        Ok(program)
    }

    /// Consumes at least one token and returns the node it starts.
    fn walk(&mut self) -> Result<Node> {
        if self.depth >= MAX_DEPTH {
            return Err(CompileError::NestingTooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let node = self.node();
        self.depth -= 1;
        node
    }

    fn node(&mut self) -> Result<Node> {
        let cur_tok = self.consume().ok_or(CompileError::UnexpectedEndOfInput)?;

        match cur_tok {
            Token::Label(name)  => Ok(Node::JumpLabel(name)),
            Token::Number(digits) => digits.parse::<i64>()
                .map(Node::NumberLiteral)
                .map_err(|_| CompileError::NumberOutOfBounds(digits)),
            Token::Assign       => Ok(Node::assignment(self.walk()?)),
            Token::Pointer(c)   => Ok(Node::Register(Register::try_from(c)?)),
            Token::Name(name)   => Ok(Node::Variable(name)),
            Token::Command(command) => {
                let mut params = Vec::with_capacity(command.args + 1);
                for _ in 0..command.args {
                    params.push(self.walk()?);
                }

                // `let` always carries an initializer in its second slot.
                if command.opcode == Opcode::Let {
                    let init = if self.peek() == Some(&Token::Assign) {
                        self.consume();
                        self.walk()?
                    } else {
                        Node::NumberLiteral(0)
                    };

                    if params.len() > 1 {
                        params[1] = init;
                    } else {
                        params.push(init);
                    }
                }

                Ok(Node::Operation { command, params })
            },
        }
    }

    #[inline]
    fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Pops a token off the input stream and returns it.
    /// Returns None if no tokens are left.
    #[inline]
    fn consume(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }
}

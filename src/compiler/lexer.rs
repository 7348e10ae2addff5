//! This lexer tokenizes source text in a single left-to-right pass
//! with one character of lookahead.
use std::iter::Peekable;
use std::str::Chars;

use super::commands;
use super::error::{CompileError, Result};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    /// `&` followed by a single hex digit, as written.
    Pointer(char),
    Assign,
    /// A run of decimal digits. Converted to an integer by the parser.
    Number(String),
    /// An identifier immediately followed by `:`.
    Label(String),
    Name(String),
    Command(&'static commands::Command),
}

/// Whitespace and the decorative `(`, `)` and `,` never produce tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens: Vec<Token> = Vec::with_capacity(input.len() / 2);
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            },
            '(' | ')' | ',' => {
                chars.next();
            },
            '&' => {
                chars.next();
                tokens.push(pointer(&mut chars)?);
            },
            '=' => {
                chars.next();
                tokens.push(Token::Assign);
            },
            '0'..='9' => {
                let digits = take_while(&mut chars, |c| c.is_ascii_digit());
                tokens.push(Token::Number(digits));
            },
            c if c.is_ascii_alphabetic() => {
                let word = take_while(&mut chars, |c| c.is_ascii_alphabetic());
                tokens.push(word_token(word, &mut chars));
            },
            _ => return Err(CompileError::UnknownCharacter(c)),
        }
    }

    debug!("tokenized {} characters into {} tokens", input.len(), tokens.len());
    Ok(tokens)
}

fn pointer(chars: &mut Peekable<Chars>) -> Result<Token> {
    match chars.next() {
        Some(c) if c.is_ascii_hexdigit() => Ok(Token::Pointer(c)),
        Some(c) => Err(CompileError::InvalidRegister(c.to_string())),
        None => Err(CompileError::InvalidRegister("end of input".to_owned())),
    }
}

/// Classifies an identifier. The colon of a label is consumed here.
fn word_token(word: String, chars: &mut Peekable<Chars>) -> Token {
    if chars.peek() == Some(&':') {
        chars.next();
        return Token::Label(word);
    }

    match commands::lookup(&word) {
        Some(cmd) => Token::Command(cmd),
        None => Token::Name(word),
    }
}

fn take_while<F>(chars: &mut Peekable<Chars>, pred: F) -> String
where
    F: Fn(char) -> bool,
{
    let mut sb = String::new();
    while let Some(&c) = chars.peek() {
        if !pred(c) {
            break;
        }
        sb.push(c);
        chars.next();
    }
    sb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(name: &str) -> Token {
        Token::Command(commands::lookup(name).unwrap())
    }

    #[test]
    fn test_tokenize_let() {
        assert_eq!(tokenize("let a = 5"), Ok(vec![
            cmd("let"),
            Token::Name("a".to_owned()),
            Token::Assign,
            Token::Number("5".to_owned()),
        ]));
    }

    #[test]
    fn test_tokenize_pointer() {
        assert_eq!(tokenize("&a &F &0"), Ok(vec![
            Token::Pointer('a'),
            Token::Pointer('F'),
            Token::Pointer('0'),
        ]));

        assert_eq!(tokenize("&g"), Err(CompileError::InvalidRegister("g".to_owned())));
        assert_eq!(tokenize("& a"), Err(CompileError::InvalidRegister(" ".to_owned())));
        assert!(matches!(tokenize("let a &"), Err(CompileError::InvalidRegister(_))));
    }

    #[test]
    fn test_tokenize_label() {
        assert_eq!(tokenize("loop: jp loop 1"), Ok(vec![
            Token::Label("loop".to_owned()),
            cmd("jp"),
            Token::Name("loop".to_owned()),
            Token::Number("1".to_owned()),
        ]));

        // The colon must follow the name directly.
        assert_eq!(tokenize("loop :"), Err(CompileError::UnknownCharacter(':')));
    }

    #[test]
    fn test_tokenize_decoration() {
        let plain = tokenize("add a 12").unwrap();
        assert_eq!(tokenize("add(a, 12)"), Ok(plain.clone()));
        assert_eq!(tokenize(" ((add)) ,a,\t,12\n) "), Ok(plain));
        assert_eq!(tokenize("(),,\n\t "), Ok(vec![]));
    }

    #[test]
    fn test_tokenize_names() {
        // Commands are case-sensitive and identifiers are letters only.
        assert_eq!(tokenize("LET ab1"), Ok(vec![
            Token::Name("LET".to_owned()),
            Token::Name("ab".to_owned()),
            Token::Number("1".to_owned()),
        ]));
        assert_eq!(tokenize("letter"), Ok(vec![Token::Name("letter".to_owned())]));
        assert_eq!(tokenize("exit"), Ok(vec![cmd("exit")]));
    }

    #[test]
    fn test_tokenize_unknown() {
        assert_eq!(tokenize("#"), Err(CompileError::UnknownCharacter('#')));
        assert_eq!(tokenize("let a = 5 # x"), Err(CompileError::UnknownCharacter('#')));
        assert_eq!(tokenize("let a = -5"), Err(CompileError::UnknownCharacter('-')));
        assert_eq!(tokenize("a_b"), Err(CompileError::UnknownCharacter('_')));
    }

    #[test]
    fn test_pointer_chars_are_hex() {
        let src: String = "0123456789abcdefABCDEF".chars().map(|c| format!("&{} ", c)).collect();
        let tokens = tokenize(&src).unwrap();
        assert_eq!(tokens.len(), 22);
        for tok in tokens {
            match tok {
                Token::Pointer(c) => assert!(c.is_ascii_hexdigit()),
                other => panic!("unexpected token {:?}", other),
            }
        }
    }
}

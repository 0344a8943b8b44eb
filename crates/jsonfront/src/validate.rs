//! Whole-buffer pre-validation.
//!
//! [`Validator`] walks the buffer once with an explicit container stack, so
//! arbitrarily deep input cannot exhaust the call stack here. It checks the
//! full grammar, including string escapes, UTF-8 and trailing bytes, which
//! lets the decode engine skip some of those checks afterwards.

use alloc::vec::Vec;

use crate::{
    ErrorClass, ErrorKind, ParseError,
    scan::{self, ScanError},
};

/// A pre-pass run before structural decoding when
/// [`ParseConfig::VALIDATE_JSON`](crate::ParseConfig::VALIDATE_JSON) is set.
///
/// Returning `false` aborts the parse call before any decoding happens. An
/// implementation that wants its reason reported pushes its own records onto
/// `errors`.
///
/// Any `FnMut(&[u8]) -> bool` closure is a validator that records nothing.
pub trait Validate {
    /// Accept or reject `input`.
    fn validate(&mut self, input: &[u8], errors: &mut Vec<ParseError>) -> bool;
}

impl<F: FnMut(&[u8]) -> bool> Validate for F {
    fn validate(&mut self, input: &[u8], _errors: &mut Vec<ParseError>) -> bool {
        self(input)
    }
}

/// RFC 8259 validator that accepts exactly one value surrounded by optional
/// whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator;

impl Validate for Validator {
    fn validate(&mut self, input: &[u8], errors: &mut Vec<ParseError>) -> bool {
        match check(input) {
            Ok(()) => true,
            Err((kind, offset)) => {
                let err = ParseError::new(ErrorClass::Validation, kind, offset, input.len(), input);
                tracing::debug!(kind = %err.kind, offset = err.offset, "validation rejected input");
                errors.push(err);
                false
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Expect {
    Value,
    Key,
    AfterValue,
}

fn check(input: &[u8]) -> Result<(), (ErrorKind, usize)> {
    let lexed = |result: Result<usize, ScanError>| {
        result.map_err(|err| match err {
            ScanError::Incomplete => (ErrorKind::UnexpectedEndOfInput, input.len()),
            ScanError::Invalid(kind, at) => (kind, at),
        })
    };
    let end_of_input = (ErrorKind::UnexpectedEndOfInput, input.len());

    let mut stack: Vec<u8> = Vec::new();
    let mut state = Expect::Value;
    let mut pos = 0;
    loop {
        pos = scan::skip_whitespace(input, pos);
        let byte = input.get(pos).copied();
        state = match state {
            Expect::Value => match byte.ok_or(end_of_input)? {
                open @ (b'{' | b'[') => {
                    stack.push(open);
                    pos = scan::skip_whitespace(input, pos + 1);
                    if input.get(pos) == Some(&closer(open)) {
                        stack.pop();
                        pos += 1;
                        Expect::AfterValue
                    } else if open == b'{' {
                        Expect::Key
                    } else {
                        Expect::Value
                    }
                }
                b'"' => {
                    pos = lexed(scan::scan_string(input, pos + 1).map(|span| span.close + 1))?;
                    Expect::AfterValue
                }
                b't' => {
                    pos = lexed(scan::scan_literal(input, pos, b"true"))?;
                    Expect::AfterValue
                }
                b'f' => {
                    pos = lexed(scan::scan_literal(input, pos, b"false"))?;
                    Expect::AfterValue
                }
                b'n' => {
                    pos = lexed(scan::scan_literal(input, pos, b"null"))?;
                    Expect::AfterValue
                }
                b'-' | b'0'..=b'9' => {
                    pos = lexed(scan::scan_number(input, pos))?;
                    Expect::AfterValue
                }
                b => return Err((ErrorKind::UnexpectedCharacter(b), pos)),
            },
            Expect::Key => match byte.ok_or(end_of_input)? {
                b'"' => {
                    pos = lexed(scan::scan_string(input, pos + 1).map(|span| span.close + 1))?;
                    pos = scan::skip_whitespace(input, pos);
                    match input.get(pos) {
                        None => return Err(end_of_input),
                        Some(b':') => pos += 1,
                        Some(_) => return Err((ErrorKind::MissingColon, pos)),
                    }
                    Expect::Value
                }
                _ => return Err((ErrorKind::ExpectedKey, pos)),
            },
            Expect::AfterValue => {
                let Some(&open) = stack.last() else {
                    return match byte {
                        None => Ok(()),
                        Some(_) => Err((ErrorKind::TrailingCharacters, pos)),
                    };
                };
                match byte.ok_or(end_of_input)? {
                    b',' => {
                        pos += 1;
                        if open == b'{' { Expect::Key } else { Expect::Value }
                    }
                    b if b == closer(open) => {
                        stack.pop();
                        pos += 1;
                        Expect::AfterValue
                    }
                    _ => return Err((ErrorKind::MissingComma, pos)),
                }
            }
        };
    }
}

fn closer(open: u8) -> u8 {
    if open == b'{' { b'}' } else { b']' }
}

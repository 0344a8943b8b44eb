//! Lexical scanning shared by the decode engine and the validator.
//!
//! Every function takes the whole buffer plus an offset and returns the
//! offset just past the token. Running out of input in the middle of a token
//! is reported as [`ScanError::Incomplete`], separately from malformed bytes.

use alloc::string::String;

use crate::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanError {
    /// Input ended before the token did.
    Incomplete,
    /// Malformed token; the offset points at the offending byte.
    Invalid(ErrorKind, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StringSpan {
    /// Offset of the closing quote.
    pub close: usize,
    /// Whether the body contains at least one escape sequence.
    pub escaped: bool,
}

#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline]
pub(crate) fn skip_whitespace(input: &[u8], mut pos: usize) -> usize {
    while input.get(pos).copied().is_some_and(is_whitespace) {
        pos += 1;
    }
    pos
}

/// `pos` must point at the first byte of `word`.
pub(crate) fn scan_literal(input: &[u8], pos: usize, word: &[u8]) -> Result<usize, ScanError> {
    let rest = input.get(pos..).unwrap_or_default();
    for (i, &expected) in word.iter().enumerate() {
        match rest.get(i) {
            None => return Err(ScanError::Incomplete),
            Some(&b) if b == expected => {}
            Some(_) => return Err(ScanError::Invalid(ErrorKind::InvalidLiteral, pos)),
        }
    }
    Ok(pos + word.len())
}

/// Full RFC 8259 number grammar starting at `pos`.
pub(crate) fn scan_number(input: &[u8], pos: usize) -> Result<usize, ScanError> {
    let mut i = pos;
    if input.get(i) == Some(&b'-') {
        i += 1;
    }
    match input.get(i) {
        None => return Err(ScanError::Incomplete),
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i = skip_digits(input, i + 1),
        Some(_) => return Err(ScanError::Invalid(ErrorKind::InvalidNumber, i)),
    }
    if input.get(i) == Some(&b'.') {
        i = scan_digits(input, i + 1)?;
    }
    if matches!(input.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(input.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        i = scan_digits(input, i)?;
    }
    Ok(i)
}

/// Number extent for input that already passed validation.
pub(crate) fn skip_number(input: &[u8], mut pos: usize) -> usize {
    while matches!(
        input.get(pos),
        Some(b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
    ) {
        pos += 1;
    }
    pos
}

fn skip_digits(input: &[u8], mut pos: usize) -> usize {
    while input.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

/// One or more digits.
fn scan_digits(input: &[u8], pos: usize) -> Result<usize, ScanError> {
    match input.get(pos) {
        None => Err(ScanError::Incomplete),
        Some(b) if b.is_ascii_digit() => Ok(skip_digits(input, pos + 1)),
        Some(_) => Err(ScanError::Invalid(ErrorKind::InvalidNumber, pos)),
    }
}

/// `start` is the offset just past the opening quote.
pub(crate) fn scan_string(input: &[u8], start: usize) -> Result<StringSpan, ScanError> {
    let mut i = start;
    let mut escaped = false;
    loop {
        match input.get(i) {
            None => return Err(ScanError::Incomplete),
            Some(b'"') => break,
            Some(b'\\') => {
                escaped = true;
                i = scan_escape(input, i)?;
            }
            Some(0x00..=0x1F) => {
                return Err(ScanError::Invalid(ErrorKind::ControlCharacterInString, i));
            }
            Some(_) => i += 1,
        }
    }
    // Escapes are ASCII, so the raw body is valid UTF-8 iff the content is.
    if let Err(e) = core::str::from_utf8(&input[start..i]) {
        return Err(ScanError::Invalid(ErrorKind::InvalidUtf8, start + e.valid_up_to()));
    }
    Ok(StringSpan { close: i, escaped })
}

/// `pos` points at the backslash.
fn scan_escape(input: &[u8], pos: usize) -> Result<usize, ScanError> {
    match input.get(pos + 1) {
        None => Err(ScanError::Incomplete),
        Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => Ok(pos + 2),
        Some(b'u') => {
            let unit = scan_hex4(input, pos + 2)?;
            match unit {
                0xD800..=0xDBFF => {
                    match (input.get(pos + 6), input.get(pos + 7)) {
                        (None, _) | (Some(b'\\'), None) => return Err(ScanError::Incomplete),
                        (Some(b'\\'), Some(b'u')) => {}
                        _ => return Err(ScanError::Invalid(ErrorKind::InvalidEscape, pos)),
                    }
                    let low = scan_hex4(input, pos + 8)?;
                    if (0xDC00..=0xDFFF).contains(&low) {
                        Ok(pos + 12)
                    } else {
                        Err(ScanError::Invalid(ErrorKind::InvalidEscape, pos + 6))
                    }
                }
                0xDC00..=0xDFFF => Err(ScanError::Invalid(ErrorKind::InvalidEscape, pos)),
                _ => Ok(pos + 6),
            }
        }
        Some(_) => Err(ScanError::Invalid(ErrorKind::InvalidEscape, pos)),
    }
}

fn scan_hex4(input: &[u8], pos: usize) -> Result<u32, ScanError> {
    let mut unit = 0;
    for i in pos..pos + 4 {
        let b = *input.get(i).ok_or(ScanError::Incomplete)?;
        let digit = hex_value(b).ok_or(ScanError::Invalid(ErrorKind::InvalidEscape, i))?;
        unit = unit << 4 | digit;
    }
    Ok(unit)
}

fn hex_value(b: u8) -> Option<u32> {
    char::from(b).to_digit(16)
}

/// Decode the body of a string that [`scan_string`] accepted.
///
/// Returns `None` if the body is not well formed, which cannot happen for
/// scanned input.
pub(crate) fn unescape(raw: &[u8]) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let run_end = raw[i..]
            .iter()
            .position(|&b| b == b'\\')
            .map_or(raw.len(), |n| i + n);
        out.push_str(core::str::from_utf8(&raw[i..run_end]).ok()?);
        i = run_end;
        if i == raw.len() {
            break;
        }
        let (c, width) = match *raw.get(i + 1)? {
            b'"' => ('"', 2),
            b'\\' => ('\\', 2),
            b'/' => ('/', 2),
            b'b' => ('\u{0008}', 2),
            b'f' => ('\u{000C}', 2),
            b'n' => ('\n', 2),
            b'r' => ('\r', 2),
            b't' => ('\t', 2),
            b'u' => {
                let high = scan_hex4(raw, i + 2).ok()?;
                if (0xD800..=0xDBFF).contains(&high) {
                    let low = scan_hex4(raw, i + 8).ok()?;
                    let c = char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))?;
                    (c, 12)
                } else {
                    (char::from_u32(high)?, 6)
                }
            }
            _ => return None,
        };
        out.push(c);
        i += width;
    }
    Some(out)
}

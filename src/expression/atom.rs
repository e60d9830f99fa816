//! Lexical rules for atoms: identifiers, quoted strings, numerals.

use std::fmt::Write as _;
use std::num::IntErrorKind;

use crate::expression::ast::Literal;
use crate::foundation::error::{AstError, AstResult};

pub(crate) const TRUE: &str = "True";
pub(crate) const FALSE: &str = "False";
pub(crate) const NULL: &str = "None";

/// Identifier spellings that read back as constants.
pub(crate) const RESERVED: [&str; 3] = [TRUE, FALSE, NULL];

/// `letter (letter | digit | "_")*`
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Constant named by a reserved identifier spelling.
pub(crate) fn reserved_constant(s: &str) -> Option<Literal> {
    match s {
        TRUE => Some(Literal::Bool(true)),
        FALSE => Some(Literal::Bool(false)),
        NULL => Some(Literal::Null),
        _ => None,
    }
}

pub(crate) fn check_identifier(s: &str) -> AstResult<()> {
    if is_identifier(s) && !RESERVED.contains(&s) {
        Ok(())
    } else {
        Err(AstError::InvalidIdentifier(s.to_owned()))
    }
}

pub(crate) fn write_literal(out: &mut String, lit: &Literal) -> AstResult<()> {
    match lit {
        Literal::Int(v) => {
            let _ = write!(out, "{v}");
        }
        Literal::Float(v) => write_float(out, *v)?,
        Literal::Str(s) => write_quoted(out, s),
        Literal::Bool(true) => out.push_str(TRUE),
        Literal::Bool(false) => out.push_str(FALSE),
        Literal::Null => out.push_str(NULL),
    }
    Ok(())
}

/// Shortest round-tripping decimal, never in exponent form, always with a fractional part.
fn write_float(out: &mut String, v: f64) -> AstResult<()> {
    if !v.is_finite() {
        return Err(AstError::UnrepresentableLiteral(v.to_string()));
    }
    let start = out.len();
    let _ = write!(out, "{v}");
    if !out[start..].contains('.') {
        out.push_str(".0");
    }
    Ok(())
}

/// Single quotes unless that would need more escaping than double quotes.
pub(crate) fn write_quoted(out: &mut String, s: &str) {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// Decode a quoted literal (quotes included) into its value.
pub(crate) fn unquote(raw: &str) -> AstResult<String> {
    let mut chars = raw.chars();
    let quote = chars
        .next()
        .filter(|q| *q == '\'' || *q == '"')
        .ok_or_else(|| AstError::malformed_text(format!("string literal not quoted: {raw}")))?;
    if raw.len() < 2 || !raw.ends_with(quote) {
        return Err(AstError::malformed_text(format!(
            "unterminated string literal: {raw}"
        )));
    }
    let body = &raw[1..raw.len() - 1];

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let esc = chars
            .next()
            .ok_or_else(|| AstError::malformed_text("dangling backslash in string literal"))?;
        match esc {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '0' => out.push('\0'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            'x' => out.push(hex_escape(&mut chars, 2)?),
            'u' => out.push(hex_escape(&mut chars, 4)?),
            'U' => out.push(hex_escape(&mut chars, 8)?),
            other => {
                return Err(AstError::malformed_text(format!(
                    "unknown escape sequence \\{other}"
                )));
            }
        }
    }
    Ok(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> AstResult<char> {
    let mut code = 0u32;
    for _ in 0..digits {
        let d = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| AstError::malformed_text("truncated hex escape in string literal"))?;
        code = code * 16 + d;
    }
    char::from_u32(code).ok_or_else(|| {
        AstError::malformed_text(format!("escape \\u{{{code:x}}} is not a valid character"))
    })
}

/// Parse a numeral. A leading `+` is dropped; a leading `-` stays in the value.
pub(crate) fn parse_numeric(raw: &str) -> AstResult<Literal> {
    let text = raw.strip_prefix('+').unwrap_or(raw);
    let is_float = text.contains(['.', 'e', 'E']);
    if is_float {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Literal::Float)
            .ok_or_else(|| AstError::malformed_text(format!("invalid float literal: {raw}")))
    } else {
        text.parse::<i64>().map(Literal::Int).map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => AstError::UnrepresentableLiteral(
                format!("integer {raw} is outside the 64-bit signed range"),
            ),
            _ => AstError::malformed_text(format!("invalid integer literal {raw}: {e}")),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/atom.rs"]
mod tests;

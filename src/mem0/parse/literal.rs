//! Restricted decoder for Python-style literal syntax.
//!
//! Users often paste blocks such as `{'provider': 'openai', 'config': {'temperature': 0.2}}`
//! or with `True`/`None`. Only literals are accepted: mappings, sequences, quoted strings,
//! numbers and the boolean/none keywords. Names, calls and operators are rejected.

use std::iter::Peekable;

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, one_of, satisfy},
    combinator::{all_consuming, map, map_opt, not, opt, value},
    error::{Error, ErrorKind},
    number::complete::recognize_float,
    sequence::{delimited, terminated},
};
use serde_json::{Map, Number, Value};

/// Maximum nesting of mappings and sequences.
pub const MAX_DEPTH: usize = 64;

/// Decode `text` as a single literal, or `None` if it is not one.
#[must_use]
pub fn parse_literal(text: &str) -> Option<Value> {
    all_consuming(delimited(multispace0, root, multispace0))(text)
        .ok()
        .map(|(_, decoded)| decoded)
}

fn root(input: &str) -> IResult<&str, Value> {
    literal(input, 0)
}

fn literal(input: &str, depth: usize) -> IResult<&str, Value> {
    if depth > MAX_DEPTH {
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
    }

    match input.chars().next() {
        Some('{') => mapping(input, depth),
        Some('[') => sequence(input, '[', ']', depth),
        Some('(') => sequence(input, '(', ')', depth),
        Some('\'' | '"') => map(quoted, Value::String)(input),
        _ => alt((keyword, number))(input),
    }
}

fn mapping(input: &str, depth: usize) -> IResult<&str, Value> {
    let (rest, entries) = collection(input, '{', '}', |item| {
        let (item, name) = terminated(key, multispace0)(item)?;
        let (item, _) = terminated(char(':'), multispace0)(item)?;
        let (item, entry) = literal(item, depth + 1)?;
        Ok((item, (name, entry)))
    })?;
    Ok((rest, Value::Object(entries.into_iter().collect::<Map<_, _>>())))
}

fn sequence(input: &str, open: char, close: char, depth: usize) -> IResult<&str, Value> {
    let (rest, items) = collection(input, open, close, |item| literal(item, depth + 1))?;
    Ok((rest, Value::Array(items)))
}

/// Comma separated items between `open` and `close`, trailing comma allowed.
fn collection<'a, O, F>(
    input: &'a str,
    open: char,
    close: char,
    mut element: F,
) -> IResult<&'a str, Vec<O>>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    let (mut rest, _) = terminated(char(open), multispace0)(input)?;
    let mut items = Vec::new();

    loop {
        if let Ok((after, _)) = char::<&str, Error<&str>>(close)(rest) {
            return Ok((after, items));
        }

        let (after_item, item) = element(rest)?;
        let (after_item, _) = multispace0(after_item)?;
        items.push(item);

        let (after_sep, separator) = opt(terminated(char(','), multispace0))(after_item)?;
        if separator.is_none() {
            let (after, _) = char(close)(after_sep)?;
            return Ok((after, items));
        }
        rest = after_sep;
    }
}

fn key(input: &str) -> IResult<&str, String> {
    alt((
        quoted,
        map(keyword, |decoded| match decoded {
            Value::Bool(flag) => flag.to_string(),
            _ => "null".to_string(),
        }),
        map(number, |decoded| decoded.to_string()),
    ))(input)
}

fn keyword(input: &str) -> IResult<&str, Value> {
    terminated(
        alt((
            value(Value::Bool(true), alt((tag("True"), tag("true")))),
            value(Value::Bool(false), alt((tag("False"), tag("false")))),
            value(Value::Null, alt((tag("None"), tag("null")))),
        )),
        not(satisfy(|c: char| c.is_alphanumeric() || c == '_')),
    )(input)
}

/// Digits are handed to `serde_json` so literal and JSON blocks agree on number types.
fn number(input: &str) -> IResult<&str, Value> {
    map_opt(recognize_float::<&str, Error<&str>>, |text: &str| {
        let text = text.strip_prefix('+').unwrap_or(text);
        serde_json::from_str::<Number>(text)
            .ok()
            .or_else(|| text.parse::<f64>().ok().and_then(Number::from_f64))
            .map(Value::Number)
    })(input)
}

/// Single or double quoted string with backslash escapes.
fn quoted(input: &str) -> IResult<&str, String> {
    let (body, quote) = one_of("'\"")(input)?;
    let unterminated = || nom::Err::Error(Error::new(input, ErrorKind::Char));

    let mut out = String::new();
    let mut chars = body.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            c if c == quote => return Ok((&body[idx + c.len_utf8()..], out)),
            '\n' => return Err(unterminated()),
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    return Err(unterminated());
                };
                if !unescape(escaped, &mut chars, &mut out) {
                    return Err(nom::Err::Error(Error::new(input, ErrorKind::Escaped)));
                }
            }
            c => out.push(c),
        }
    }

    Err(unterminated())
}

/// Append the decoded form of `\<escaped>`; `false` on a malformed escape.
///
/// Unknown escapes keep their backslash.
fn unescape<I>(escaped: char, chars: &mut Peekable<I>, out: &mut String) -> bool
where
    I: Iterator<Item = (usize, char)>,
{
    let decoded = match escaped {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0c}',
        'v' => '\u{0b}',
        '\\' | '\'' | '"' => escaped,
        '\n' => return true,
        'x' => return push_code(hex_code(chars, 2), out),
        'u' => return push_code(hex_code(chars, 4), out),
        'U' => return push_code(hex_code(chars, 8), out),
        '0'..='7' => return push_code(octal_code(escaped, chars), out),
        other => {
            out.push('\\');
            other
        }
    };
    out.push(decoded);
    true
}

fn push_code(code: Option<u32>, out: &mut String) -> bool {
    let Some(decoded) = code.and_then(char::from_u32) else {
        return false;
    };
    out.push(decoded);
    true
}

/// Exactly `digits` hex digits.
fn hex_code<I>(chars: &mut I, digits: usize) -> Option<u32>
where
    I: Iterator<Item = (usize, char)>,
{
    let hex: String = chars.take(digits).map(|(_, c)| c).collect();
    if hex.len() != digits || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok()
}

/// One to three octal digits, the first already consumed.
fn octal_code<I>(first: char, chars: &mut Peekable<I>) -> Option<u32>
where
    I: Iterator<Item = (usize, char)>,
{
    let mut code = first.to_digit(8)?;
    for _ in 0..2 {
        let Some(digit) = chars.peek().and_then(|(_, c)| c.to_digit(8)) else {
            break;
        };
        code = code * 8 + digit;
        chars.next();
    }
    Some(code)
}

//! Recursive-descent parser for unit expressions.
//!
//! ```text
//! unit    := product [ shift ]
//! shift   := ("since" | "after" | "from" | "ref" | "@") origin
//! product := power { ["*" | "." | "/" | "per" | blank] power }
//! power   := factor [ ("^" | "**") integer | integer ]
//! factor  := number | identifier | "(" product ")"
//! ```
//!
//! An integer written directly after an identifier or `)` is an exponent
//! (`m2`, `s-1`). A numeric origin shifts the unit (`K @ 273.15`); a
//! timestamp origin is only accepted on time units.

use std::iter::Peekable;
use std::str::CharIndices;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::error::UnitError;
use crate::registry::UnitRegistry;
use crate::unit::Unit;

static SHIFT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<unit>.+?)(?:\s+(?:since|after|from|ref)\s+|\s*@\s*)(?P<origin>.+)$")
        .expect("Invalid unit shift regex")
});

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<year>[+-]?\d{1,4})-(?P<month>\d{1,2})(?:-(?P<day>\d{1,2}))?",
        r"(?:(?:\s+|T)(?P<hour>\d{1,2}):(?P<minute>\d{1,2})(?::(?P<second>\d{1,2}(?:\.\d*)?))?)?",
        r"(?:\s*(?:Z|UTC|GMT|[+-]\d{1,2}(?::?\d{2})?))?$",
    ))
    .expect("Invalid timestamp regex")
});

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Exponent(i32),
    Mul,
    Div,
    Pow,
    LParen,
    RParen,
}

pub(crate) fn parse(registry: &UnitRegistry, expr: &str) -> Result<Unit, UnitError> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Err(UnitError::Empty);
    }
    let (body, origin) = match SHIFT.captures(trimmed) {
        Some(caps) => (
            caps.name("unit").map_or(trimmed, |m| m.as_str()),
            caps.name("origin").map(|m| m.as_str().trim()),
        ),
        None => (trimmed, None),
    };

    let tokens = tokenize(body)?;
    let mut parser = Parser {
        registry,
        expr: body,
        tokens,
        pos: 0,
    };
    let mut unit = parser.product()?;
    if parser.pos < parser.tokens.len() {
        return Err(UnitError::syntax(expr, "unexpected trailing input"));
    }

    if let Some(origin) = origin {
        apply_origin(&mut unit, origin)?;
    }
    trace!(expr, %unit, "parsed unit");
    Ok(unit)
}

fn apply_origin(unit: &mut Unit, origin: &str) -> Result<(), UnitError> {
    if let Ok(shift) = origin.parse::<f64>() {
        unit.offset += shift * unit.scale;
        return Ok(());
    }
    if !unit.is_time() || !is_valid_timestamp(origin) {
        return Err(UnitError::InvalidOrigin(origin.to_string()));
    }
    unit.origin = Some(origin.to_string());
    Ok(())
}

/// Whether `text` is a reference time such as `1990-01-01 00:00:00 -6:00`.
pub fn is_valid_timestamp(text: &str) -> bool {
    let Some(caps) = TIMESTAMP.captures(text.trim()) else {
        return false;
    };
    let field = |name: &str| -> Option<f64> {
        caps.name(name).and_then(|m| m.as_str().parse().ok())
    };
    let within = |name: &str, low: f64, high: f64| {
        field(name).is_none_or(|v| (low..=high).contains(&v))
    };
    within("month", 1.0, 12.0)
        && within("day", 1.0, 31.0)
        && within("hour", 0.0, 23.0)
        && within("minute", 0.0, 59.0)
        && within("second", 0.0, 60.999)
}

fn tokenize(expr: &str) -> Result<Vec<Token>, UnitError> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();
    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        let attached = matches!(tokens.last(), Some(Token::Ident(_) | Token::RParen))
            && start > 0
            && !expr[..start].ends_with(char::is_whitespace);
        match ch {
            '*' => {
                chars.next();
                if matches!(chars.peek(), Some((_, '*'))) {
                    chars.next();
                    tokens.push(Token::Pow);
                } else {
                    tokens.push(Token::Mul);
                }
            }
            '^' => {
                chars.next();
                tokens.push(Token::Pow);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Div);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '.' if !next_is_digit(expr, start + 1) => {
                chars.next();
                tokens.push(Token::Mul);
            }
            c if attached && (c.is_ascii_digit() || c == '-' || c == '+') => {
                let text = take_while(&mut chars, expr, |c, first| {
                    c.is_ascii_digit() || (first && (c == '-' || c == '+'))
                });
                let exponent = text
                    .parse::<i32>()
                    .map_err(|_| UnitError::syntax(expr, format!("invalid exponent `{text}`")))?;
                tokens.push(Token::Exponent(exponent));
            }
            c if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' => {
                let text = take_number(&mut chars, expr);
                let value = text
                    .parse::<f64>()
                    .map_err(|_| UnitError::syntax(expr, format!("invalid number `{text}`")))?;
                tokens.push(Token::Number(value));
            }
            c if is_ident_char(c) => {
                let text = take_while(&mut chars, expr, |c, _| is_ident_char(c));
                tokens.push(Token::Ident(text.to_string()));
            }
            other => {
                return Err(UnitError::syntax(
                    expr,
                    format!("unexpected character `{other}`"),
                ));
            }
        }
    }
    Ok(tokens)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '%' || c == '°'
}

fn next_is_digit(expr: &str, index: usize) -> bool {
    expr[index..].chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn take_while<'a>(
    chars: &mut Peekable<CharIndices<'a>>,
    expr: &'a str,
    mut accept: impl FnMut(char, bool) -> bool,
) -> &'a str {
    let Some(&(start, _)) = chars.peek() else {
        return "";
    };
    let mut end = start;
    let mut first = true;
    while let Some(&(index, c)) = chars.peek() {
        if !accept(c, first) {
            break;
        }
        end = index + c.len_utf8();
        first = false;
        chars.next();
    }
    &expr[start..end]
}

fn take_number<'a>(chars: &mut Peekable<CharIndices<'a>>, expr: &'a str) -> &'a str {
    let mut previous = ' ';
    let mut first = true;
    take_while(chars, expr, |c, _| {
        let accept = c.is_ascii_digit()
            || c == '.'
            || (first && (c == '-' || c == '+'))
            || ((c == 'e' || c == 'E') && previous.is_ascii_digit())
            || ((c == '-' || c == '+') && (previous == 'e' || previous == 'E'));
        previous = c;
        first = false;
        accept
    })
}

struct Parser<'a> {
    registry: &'a UnitRegistry,
    expr: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn product(&mut self) -> Result<Unit, UnitError> {
        let mut unit = self.power()?;
        loop {
            let next = match self.peek() {
                Some(Token::Mul) => {
                    self.pos += 1;
                    self.power()?
                }
                Some(Token::Div) => {
                    self.pos += 1;
                    let divisor = self.power()?;
                    self.raise(&divisor, -1)?
                }
                Some(Token::Ident(word)) if word.eq_ignore_ascii_case("per") => {
                    self.pos += 1;
                    let divisor = self.power()?;
                    self.raise(&divisor, -1)?
                }
                Some(Token::Number(_) | Token::Ident(_) | Token::LParen) => self.power()?,
                _ => return Ok(unit),
            };
            unit = unit
                .checked_multiply(&next)
                .ok_or_else(|| UnitError::ExponentRange(self.expr.to_string()))?;
        }
    }

    fn power(&mut self) -> Result<Unit, UnitError> {
        let factor = self.factor()?;
        match self.peek() {
            Some(Token::Exponent(exponent)) => {
                let exponent = *exponent;
                self.pos += 1;
                self.raise(&factor, exponent)
            }
            Some(Token::Pow) => {
                self.pos += 1;
                match self.advance() {
                    Some(Token::Number(value))
                        if value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) =>
                    {
                        self.raise(&factor, value as i32)
                    }
                    Some(Token::Exponent(exponent)) => self.raise(&factor, exponent),
                    _ => Err(UnitError::syntax(self.expr, "exponent must be an integer")),
                }
            }
            _ => Ok(factor),
        }
    }

    fn raise(&self, unit: &Unit, power: i32) -> Result<Unit, UnitError> {
        unit.checked_powi(power)
            .ok_or_else(|| UnitError::ExponentRange(self.expr.to_string()))
    }

    fn factor(&mut self) -> Result<Unit, UnitError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Unit::dimensionless(value)),
            Some(Token::Ident(name)) => self
                .registry
                .lookup(&name)
                .ok_or(UnitError::UnknownUnit(name)),
            Some(Token::LParen) => {
                let inner = self.product()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(UnitError::syntax(self.expr, "unbalanced parenthesis")),
                }
            }
            Some(token) => Err(UnitError::syntax(
                self.expr,
                format!("unexpected token {token:?}"),
            )),
            None => Err(UnitError::syntax(self.expr, "unexpected end of expression")),
        }
    }
}

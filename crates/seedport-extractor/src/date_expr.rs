//! Safe evaluation of millisecond timestamp expressions
//!
//! Seed source builds dates as `Date(System.currentTimeMillis() - 3 * 86400000L)`.
//! The inner expression is evaluated here with a dedicated arithmetic
//! evaluator: numbers, `+ - * /`, unary minus, parentheses and a single
//! `now` symbol. Input outside a strict character whitelist is never
//! evaluated; every failure resolves to the current time.

use chrono::{DateTime, TimeZone, Utc};

/// Call token replaced by the `now` placeholder
pub const CURRENT_TIME_CALL: &str = "System.currentTimeMillis()";

const NOW_PLACEHOLDER: &str = "now";

// JavaScript Date range, which is what clients reading the export accept.
const MAX_ABS_MILLIS: f64 = 8.64e15;

/// Evaluate `expr` relative to `now`, falling back to `now` on any failure.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use seedport_extractor::evaluate_timestamp;
///
/// let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
/// let day_ago = evaluate_timestamp("System.currentTimeMillis() - 86400000L", now);
/// assert_eq!(day_ago.timestamp_millis(), 1_700_000_000_000 - 86_400_000);
///
/// // Anything outside the whitelist is not evaluated.
/// assert_eq!(evaluate_timestamp("Runtime.getRuntime().exit(1)", now), now);
/// ```
pub fn evaluate_timestamp(expr: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    evaluate_millis(expr, now.timestamp_millis() as f64)
        .and_then(|ms| Utc.timestamp_millis_opt(ms.trunc() as i64).single())
        .unwrap_or(now)
}

/// Evaluate `expr` to milliseconds since the epoch, or `None` when it is
/// empty, contains a character outside the whitelist, does not parse, or
/// yields a non-finite or out-of-range value.
pub fn evaluate_millis(expr: &str, now_ms: f64) -> Option<f64> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return None;
    }

    let substituted = strip_long_suffixes(&trimmed.replace(CURRENT_TIME_CALL, NOW_PLACEHOLDER));
    if !substituted.chars().all(is_whitelisted) {
        return None;
    }

    let tokens = lex(&substituted)?;
    let mut eval = Evaluator {
        tokens: &tokens,
        pos: 0,
        now_ms,
    };
    let value = eval.expr()?;
    if eval.pos != tokens.len() {
        return None;
    }

    (value.is_finite() && value.abs() <= MAX_ABS_MILLIS).then_some(value)
}

fn is_whitelisted(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_whitespace()
        || matches!(c, '+' | '-' | '*' | '/' | '(' | ')')
        || NOW_PLACEHOLDER.contains(c)
}

/// Drop `L`/`l` size suffixes that directly follow a digit.
fn strip_long_suffixes(expr: &str) -> String {
    let chars: Vec<char> = expr.chars().collect();
    let mut out = String::with_capacity(expr.len());
    for (idx, &c) in chars.iter().enumerate() {
        let after_digit = idx > 0 && chars[idx - 1].is_ascii_digit();
        let at_word_end = chars
            .get(idx + 1)
            .map(|next| !(next.is_alphanumeric() || *next == '_'))
            .unwrap_or(true);
        if (c == 'L' || c == 'l') && after_digit && at_word_end {
            continue;
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tok {
    Num(f64),
    Now,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn lex(expr: &str) -> Option<Vec<Tok>> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        let tok = match c {
            c if c.is_whitespace() => continue,
            '+' => Tok::Plus,
            '-' => Tok::Minus,
            '*' => Tok::Star,
            '/' => Tok::Slash,
            '(' => Tok::LParen,
            ')' => Tok::RParen,
            c if c.is_ascii_digit() => {
                let mut end = idx + 1;
                while let Some(&(next_idx, next)) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    end = next_idx + 1;
                    chars.next();
                }
                Tok::Num(expr[idx..end].parse().ok()?)
            }
            c if c.is_ascii_alphabetic() => {
                let mut end = idx + 1;
                while let Some(&(next_idx, next)) = chars.peek() {
                    if !next.is_ascii_alphabetic() {
                        break;
                    }
                    end = next_idx + 1;
                    chars.next();
                }
                if &expr[idx..end] != NOW_PLACEHOLDER {
                    return None;
                }
                Tok::Now
            }
            _ => return None,
        };
        tokens.push(tok);
    }
    Some(tokens)
}

struct Evaluator<'a> {
    tokens: &'a [Tok],
    pos: usize,
    now_ms: f64,
}

impl Evaluator<'_> {
    fn peek(&self) -> Option<Tok> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Tok> {
        let tok = self.peek()?;
        self.pos += 1;
        Some(tok)
    }

    // expr := term { ('+' | '-') term }
    fn expr(&mut self) -> Option<f64> {
        let mut acc = self.term()?;
        while let Some(op @ (Tok::Plus | Tok::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = if op == Tok::Plus { acc + rhs } else { acc - rhs };
        }
        Some(acc)
    }

    // term := unary { ('*' | '/') unary }
    fn term(&mut self) -> Option<f64> {
        let mut acc = self.unary()?;
        while let Some(op @ (Tok::Star | Tok::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            acc = if op == Tok::Star { acc * rhs } else { acc / rhs };
        }
        Some(acc)
    }

    // unary := ('-' | '+') unary | primary
    fn unary(&mut self) -> Option<f64> {
        match self.peek()? {
            Tok::Minus => {
                self.pos += 1;
                Some(-self.unary()?)
            }
            Tok::Plus => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        }
    }

    // primary := NUMBER | now | '(' expr ')'
    fn primary(&mut self) -> Option<f64> {
        match self.next()? {
            Tok::Num(n) => Some(n),
            Tok::Now => Some(self.now_ms),
            Tok::LParen => {
                let value = self.expr()?;
                match self.next()? {
                    Tok::RParen => Some(value),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

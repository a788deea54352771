//! Recursive-descent parser for constructor calls
//!
//! Grammar (over the token stream from [`crate::lexer`]):
//!
//! ```text
//! call     := path '(' [ argument { ',' argument } [ ',' ] ] ')'
//! argument := [ IDENT '=' ] value
//! value    := STRING | NUMBER | path | call | <balanced token run>
//! path     := IDENT { '.' IDENT }
//! ```
//!
//! Argument values may nest brackets to any depth; anything that is not one
//! of the recognised shapes is kept as raw source text.

use crate::lexer::{tokenize, Token, TokenKind};
use std::collections::HashSet;
use std::fmt;

/// A parsed call expression
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CallExpr {
    /// Callee, possibly qualified (`java.util.Date`)
    pub name: String,
    /// Arguments in source order
    pub args: Vec<Argument>,
    /// Source text between the outer parentheses
    pub inner_source: String,
    /// 1-based line of the callee
    pub line: usize,
}

impl CallExpr {
    /// First argument with the given name
    pub fn named(&self, name: &str) -> Option<&ArgValue> {
        self.args
            .iter()
            .find(|arg| arg.name.as_deref() == Some(name))
            .map(|arg| &arg.value)
    }

    /// Unqualified callee name
    pub fn simple_name(&self) -> &str {
        seedport_domain::token::last_segment(&self.name)
    }
}

/// One call argument
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Argument {
    pub name: Option<String>,
    pub value: ArgValue,
}

/// Classified argument value
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ArgValue {
    /// String literal, escapes resolved
    Str(String),
    /// Numeric literal, raw text
    Number(String),
    /// Bare or dotted identifier (`ADMIN`, `Role.ADMIN`, `null`)
    Path(String),
    /// Nested call
    Call(CallExpr),
    /// Anything else, as source text
    Raw(String),
}

/// Why a call could not be parsed
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParseError {
    /// Input ended before the closing parenthesis
    Unterminated { line: usize },
    /// A closing bracket did not match the innermost open one
    Mismatched { line: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Unterminated { line } => {
                write!(f, "argument list opened on line {} is never closed", line)
            }
            ParseError::Mismatched { line } => write!(f, "mismatched bracket on line {}", line),
        }
    }
}

/// A call site of one of the requested callee names
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CallSite {
    /// Unqualified callee name that matched
    pub callee: String,
    /// 1-based line of the callee
    pub line: usize,
    /// The parsed call, or why it failed
    pub call: Result<CallExpr, ParseError>,
}

/// Find every call to one of `callees` in `source`, in source order.
///
/// A callee matches when its unqualified name is followed directly by `(`.
/// Declarations (`class User(`, `fun User(`) are not call sites.
pub(crate) fn find_calls(source: &str, callees: &HashSet<&str>) -> Vec<CallSite> {
    let tokens = tokenize(source);
    let parser = Parser {
        source,
        tokens: &tokens,
    };

    let mut sites = Vec::new();
    for (idx, token) in tokens.iter().enumerate() {
        let TokenKind::Ident(name) = &token.kind else {
            continue;
        };
        if !callees.contains(name.as_str()) {
            continue;
        }
        if !matches!(tokens.get(idx + 1).map(|t| &t.kind), Some(TokenKind::LParen)) {
            continue;
        }
        if parser.is_declaration(idx) {
            continue;
        }

        let call = parser
            .call_from_paren(name.clone(), token.line, idx + 1)
            .map(|(call, _)| call);
        sites.push(CallSite {
            callee: name.clone(),
            line: token.line,
            call,
        });
    }
    sites
}

struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
}

impl<'a> Parser<'a> {
    fn kind(&self, idx: usize) -> Option<&TokenKind> {
        self.tokens.get(idx).map(|t| &t.kind)
    }

    fn is_declaration(&self, idx: usize) -> bool {
        if idx == 0 {
            return false;
        }
        matches!(
            self.kind(idx - 1),
            Some(TokenKind::Ident(kw)) if kw == "class" || kw == "fun" || kw == "interface"
        )
    }

    /// Parse the argument list whose `(` is at `open`. Returns the call and
    /// the index just past the closing `)`.
    fn call_from_paren(
        &self,
        name: String,
        line: usize,
        open: usize,
    ) -> Result<(CallExpr, usize), ParseError> {
        let close = self.matching_close(open)?;
        let inner_source = self.source[self.tokens[open].span.end..self.tokens[close].span.start].to_string();

        let mut args = Vec::new();
        let mut start = open + 1;
        while start < close {
            let end = self.argument_end(start, close);
            if end > start {
                args.push(self.argument(start, end)?);
            }
            start = end + 1;
        }

        Ok((
            CallExpr {
                name,
                args,
                inner_source,
                line,
            },
            close + 1,
        ))
    }

    /// Index of the bracket closing the one opened at `open`.
    fn matching_close(&self, open: usize) -> Result<usize, ParseError> {
        let mut stack = Vec::new();
        for idx in open..self.tokens.len() {
            let token = &self.tokens[idx];
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => stack.push(&token.kind),
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    let expected = match stack.pop() {
                        Some(TokenKind::LParen) => TokenKind::RParen,
                        Some(TokenKind::LBracket) => TokenKind::RBracket,
                        Some(_) => TokenKind::RBrace,
                        None => return Err(ParseError::Mismatched { line: token.line }),
                    };
                    if token.kind != expected {
                        return Err(ParseError::Mismatched { line: token.line });
                    }
                    if stack.is_empty() {
                        return Ok(idx);
                    }
                }
                _ => {}
            }
        }
        Err(ParseError::Unterminated {
            line: self.tokens[open].line,
        })
    }

    /// Index of the depth-0 comma ending the argument at `start`, or `close`.
    fn argument_end(&self, start: usize, close: usize) -> usize {
        let mut depth = 0usize;
        for idx in start..close {
            match self.tokens[idx].kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1)
                }
                TokenKind::Comma if depth == 0 => return idx,
                _ => {}
            }
        }
        close
    }

    fn argument(&self, start: usize, end: usize) -> Result<Argument, ParseError> {
        if let (Some(TokenKind::Ident(name)), Some(TokenKind::Assign)) = (self.kind(start), self.kind(start + 1)) {
            if start + 2 <= end {
                return Ok(Argument {
                    name: Some(name.clone()),
                    value: self.value(start + 2, end)?,
                });
            }
        }
        Ok(Argument {
            name: None,
            value: self.value(start, end)?,
        })
    }

    fn value(&self, start: usize, end: usize) -> Result<ArgValue, ParseError> {
        let slice = &self.tokens[start..end];
        match slice {
            [] => return Ok(ArgValue::Raw(String::new())),
            [Token { kind: TokenKind::Str(s), .. }] => return Ok(ArgValue::Str(s.clone())),
            [Token { kind: TokenKind::Number(n), .. }] => return Ok(ArgValue::Number(n.clone())),
            _ => {}
        }

        if let Some((path, after)) = self.path(start, end) {
            if after == end {
                return Ok(ArgValue::Path(path));
            }
            if matches!(self.kind(after), Some(TokenKind::LParen)) {
                let line = self.tokens[start].line;
                let (call, next) = self.call_from_paren(path, line, after)?;
                if next == end {
                    return Ok(ArgValue::Call(call));
                }
            }
        }

        let text = &self.source[self.tokens[start].span.start..self.tokens[end - 1].span.end];
        Ok(ArgValue::Raw(text.to_string()))
    }

    /// Dotted identifier starting at `start`; returns it and the index after it.
    fn path(&self, start: usize, end: usize) -> Option<(String, usize)> {
        let TokenKind::Ident(first) = self.kind(start)? else {
            return None;
        };
        let mut path = first.clone();
        let mut idx = start + 1;
        while idx + 1 < end {
            match (self.kind(idx), self.kind(idx + 1)) {
                (Some(TokenKind::Dot), Some(TokenKind::Ident(seg))) => {
                    path.push('.');
                    path.push_str(seg);
                    idx += 2;
                }
                _ => break,
            }
        }
        Some((path, idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calls(source: &str, names: &[&str]) -> Vec<CallSite> {
        let set: HashSet<&str> = names.iter().copied().collect();
        find_calls(source, &set)
    }

    fn only_call(source: &str, name: &str) -> CallExpr {
        let mut sites = calls(source, &[name]);
        assert_eq!(sites.len(), 1, "expected one call site in {:?}", source);
        sites.remove(0).call.unwrap()
    }

    #[test]
    fn test_named_arguments_in_any_order() {
        let call = only_call(r#"User(username = "alice", id = "u1")"#, "User");
        assert_eq!(call.named("id"), Some(&ArgValue::Str("u1".to_string())));
        assert_eq!(call.named("username"), Some(&ArgValue::Str("alice".to_string())));
    }

    #[test]
    fn test_value_shapes() {
        let call = only_call(
            "CaseEntity(status = CaseStatus.OPEN, progressPercentage = 40, note = a + b, flag = true)",
            "CaseEntity",
        );
        assert_eq!(call.named("status"), Some(&ArgValue::Path("CaseStatus.OPEN".to_string())));
        assert_eq!(call.named("progressPercentage"), Some(&ArgValue::Number("40".to_string())));
        assert_eq!(call.named("note"), Some(&ArgValue::Raw("a + b".to_string())));
        assert_eq!(call.named("flag"), Some(&ArgValue::Path("true".to_string())));
    }

    #[test]
    fn test_nested_call_keeps_inner_source() {
        let call = only_call(
            "CaseEntity(createdAt = Date(System.currentTimeMillis() - (2 * 86400000L)))",
            "CaseEntity",
        );
        match call.named("createdAt") {
            Some(ArgValue::Call(inner)) => {
                assert_eq!(inner.simple_name(), "Date");
                assert_eq!(inner.inner_source, "System.currentTimeMillis() - (2 * 86400000L)");
            }
            other => panic!("expected nested call, got {:?}", other),
        }
    }

    #[test]
    fn test_qualified_nested_call() {
        let call = only_call("Progress(updatedAt = java.util.Date(0))", "Progress");
        match call.named("updatedAt") {
            Some(ArgValue::Call(inner)) => assert_eq!(inner.simple_name(), "Date"),
            other => panic!("expected nested call, got {:?}", other),
        }
    }

    #[test]
    fn test_parenthesis_inside_string() {
        let call = only_call(r#"CaseEntity(id = "c1", title = "Fix (urgent)")"#, "CaseEntity");
        assert_eq!(call.named("title"), Some(&ArgValue::Str("Fix (urgent)".to_string())));
    }

    #[test]
    fn test_trailing_comma_and_multiline() {
        let call = only_call("User(\n    id = \"u1\",\n    username = \"a\",\n)", "User");
        assert_eq!(call.args.len(), 2);
        assert_eq!(call.line, 1);
    }

    #[test]
    fn test_sites_in_source_order() {
        let src = r#"
            val users = listOf(
                User(id = "u1"),
                User(id = "u2"),
            )
            progressDao.insert(Progress(id = "p1"))
        "#;
        let sites = calls(src, &["User", "Progress"]);
        let callees: Vec<_> = sites.iter().map(|s| s.callee.as_str()).collect();
        assert_eq!(callees, vec!["User", "User", "Progress"]);
        assert_eq!(sites[2].line, 6);
    }

    #[test]
    fn test_prefix_names_do_not_match() {
        let sites = calls(r#"createUser(id = "x"); UserProgress(id = "y")"#, &["User", "Progress"]);
        assert!(sites.is_empty());
    }

    #[test]
    fn test_declarations_are_skipped() {
        let sites = calls("data class User(val id: String)", &["User"]);
        assert!(sites.is_empty());
    }

    #[test]
    fn test_unterminated_call_reports_error() {
        let sites = calls(r#"User(id = "u1", username = "a""#, &["User"]);
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].call, Err(ParseError::Unterminated { line: 1 }));
    }

    #[test]
    fn test_positional_arguments_have_no_name() {
        let call = only_call(r#"User("u1", "alice")"#, "User");
        assert!(call.args.iter().all(|a| a.name.is_none()));
        assert_eq!(call.named("id"), None);
    }
}

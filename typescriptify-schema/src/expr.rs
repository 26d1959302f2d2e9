//! Type expression parsing.
//!
//! Type expressions use the familiar Go notation: `*T` for pointers,
//! `[]T` for slices, `[N]T` for fixed arrays (treated as slices),
//! `map[K]V` for maps, and bare identifiers for scalar kinds or named types.

use crate::error::ParseError;
use crate::types::{Kind, TypeDesc};
use std::str::FromStr;

impl TypeDesc {
    /// Parses a type expression such as `map[string][]*Address`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidTypeExpr` if the expression is malformed.
    pub fn parse(expr: &str) -> Result<Self, ParseError> {
        let mut parser = ExprParser {
            expr,
            rest: expr.trim(),
        };
        let desc = parser.parse_type()?;
        if !parser.rest.is_empty() {
            return Err(ParseError::type_expr(
                expr,
                format!("unexpected trailing input '{}'", parser.rest),
            ));
        }
        Ok(desc)
    }
}

impl FromStr for TypeDesc {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct ExprParser<'a> {
    expr: &'a str,
    rest: &'a str,
}

impl<'a> ExprParser<'a> {
    fn parse_type(&mut self) -> Result<TypeDesc, ParseError> {
        self.rest = self.rest.trim_start();
        if let Some(rest) = self.rest.strip_prefix('*') {
            self.rest = rest;
            return Ok(TypeDesc::pointer(self.parse_type()?));
        }
        if let Some(rest) = self.rest.strip_prefix('[') {
            let close = rest
                .find(']')
                .ok_or_else(|| ParseError::type_expr(self.expr, "missing ']'"))?;
            let length = rest[..close].trim();
            if !length.is_empty() && length.parse::<usize>().is_err() {
                return Err(ParseError::type_expr(
                    self.expr,
                    format!("invalid array length '{length}'"),
                ));
            }
            self.rest = &rest[close + 1..];
            return Ok(TypeDesc::slice(self.parse_type()?));
        }
        if let Some(rest) = self.rest.strip_prefix("map[") {
            self.rest = rest;
            let key = self.parse_type()?;
            self.rest = self
                .rest
                .trim_start()
                .strip_prefix(']')
                .ok_or_else(|| ParseError::type_expr(self.expr, "missing ']' after map key"))?;
            let value = self.parse_type()?;
            return Ok(TypeDesc::map(key, value));
        }
        self.parse_ident()
    }

    fn parse_ident(&mut self) -> Result<TypeDesc, ParseError> {
        if let Some(rest) = self.rest.strip_prefix("interface{}") {
            self.rest = rest;
            return Ok(TypeDesc::Primitive(Kind::Any));
        }
        let end = self
            .rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(ParseError::type_expr(self.expr, "expected a type name"));
        }
        let ident = &self.rest[..end];
        self.rest = &self.rest[end..];
        Ok(match Kind::from_name(ident) {
            Some(kind) => TypeDesc::Primitive(kind),
            None => TypeDesc::named(ident),
        })
    }
}

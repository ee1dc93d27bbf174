use crate::core::error::{Error, Result};
use crate::core::types::FieldValue;
use crate::query::ast::Expr;
use crate::query::lexer::{Lexer, Spanned, Token};

/// Parse an expression such as `country == 'India' and not deaths < 100`
pub fn parse(input: &str) -> Result<Expr> {
    QueryParser::new(input)?.parse_expression()
}

/// Recursive-descent parser with one token of lookahead.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// or_expr    := and_expr ("or" and_expr)*
/// and_expr   := not_expr ("and" not_expr)*
/// not_expr   := "not" not_expr | primary
/// primary    := "(" or_expr ")" | comparison
/// comparison := IDENT OP (STRING | NUMBER)
/// ```
pub struct QueryParser<'a> {
    lexer: Lexer<'a>,
    current: Option<Spanned<'a>>,
    end: usize,
    depth: usize,
    comparisons: usize,
}

/// Deepest run of `not` and `(` accepted before parsing gives up
pub const MAX_NESTING: usize = 256;

/// Comparisons per expression; bounds the height of `and`/`or` chains
pub const MAX_COMPARISONS: usize = 1024;

impl<'a> QueryParser<'a> {
    pub fn new(input: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next().transpose()?;
        Ok(QueryParser {
            lexer,
            current,
            end: input.len(),
            depth: 0,
            comparisons: 0,
        })
    }

    /// Parse a complete expression; leftover tokens are an error
    pub fn parse_expression(mut self) -> Result<Expr> {
        let expr = self.parse_or()?;
        if self.current.is_some() {
            return Err(self.unexpected("end of input"));
        }
        Ok(expr)
    }

    fn advance(&mut self) -> Result<Option<Spanned<'a>>> {
        let next = self.lexer.next().transpose()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consume the lookahead if it is `token`
    fn eat(&mut self, token: &Token) -> Result<bool> {
        if self.current.as_ref().is_some_and(|s| &s.token == token) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        match &self.current {
            Some(found) => Error::parse(expected, found.token.kind_name(), Some(found.text), found.position),
            None => Error::parse(expected, "end of input", None, self.end),
        }
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut node = self.parse_and()?;
        while self.eat(&Token::Or)? {
            let rhs = self.parse_and()?;
            node = Expr::or(node, rhs);
        }
        Ok(node)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut node = self.parse_not()?;
        while self.eat(&Token::And)? {
            let rhs = self.parse_not()?;
            node = Expr::and(node, rhs);
        }
        Ok(node)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING {
            let position = self.current.as_ref().map_or(self.end, |s| s.position);
            let found = format!("nesting deeper than {}", MAX_NESTING);
            return Err(Error::parse("expression", &found, None, position));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_not(&mut self) -> Result<Expr> {
        if self.eat(&Token::Not)? {
            self.enter()?;
            let operand = self.parse_not()?;
            self.depth -= 1;
            return Ok(Expr::not(operand));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        if self.eat(&Token::LParen)? {
            self.enter()?;
            let expr = self.parse_or()?;
            if !self.eat(&Token::RParen)? {
                return Err(self.unexpected("RPAREN"));
            }
            self.depth -= 1;
            return Ok(expr);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        if self.comparisons >= MAX_COMPARISONS {
            let position = self.current.as_ref().map_or(self.end, |s| s.position);
            let found = format!("more than {} comparisons", MAX_COMPARISONS);
            return Err(Error::parse("end of input", &found, None, position));
        }
        self.comparisons += 1;

        let field = match self.current.as_ref().map(|s| &s.token) {
            Some(Token::Ident(name)) => name.clone(),
            _ => return Err(self.unexpected("IDENT")),
        };
        self.advance()?;

        let op = match self.current.as_ref().map(|s| &s.token) {
            Some(Token::Op(op)) => *op,
            _ => return Err(self.unexpected("OP")),
        };
        self.advance()?;

        let value = match self.current.as_ref().map(|s| &s.token) {
            Some(Token::Str(text)) => FieldValue::Text(text.clone()),
            Some(Token::Number(n)) => FieldValue::Number(*n),
            _ => return Err(self.unexpected("STRING or NUMBER")),
        };
        self.advance()?;

        Ok(Expr::comparison(&field, op, value))
    }
}

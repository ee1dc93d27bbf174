use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{map_res, opt, recognize, value},
};
use crate::core::error::{Error, Result};
use crate::query::ast::CmpOp;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Str(String),
    Number(f64),
    Op(CmpOp),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl Token {
    /// Name used in parse error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Ident(_) => "IDENT",
            Token::Str(_) => "STRING",
            Token::Number(_) => "NUMBER",
            Token::Op(_) => "OP",
            Token::And => "AND",
            Token::Or => "OR",
            Token::Not => "NOT",
            Token::LParen => "LPAREN",
            Token::RParen => "RPAREN",
        }
    }
}

/// A token with the source text it was read from and its byte offset
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<'a> {
    pub token: Token,
    pub text: &'a str,
    pub position: usize,
}

/// Lazy tokenizer over an expression.
///
/// Yields one token per `next()` call and stops for good after the first error.
/// Cloning gives an independent cursor; `restart` rewinds to the beginning.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    rest: &'a str,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            rest: input,
            done: false,
        }
    }

    pub fn restart(&mut self) {
        self.rest = self.input;
        self.done = false;
    }

    fn offset(&self, rest: &str) -> usize {
        self.input.len() - rest.len()
    }

    fn scan_token(&self, first: char) -> Result<(Token, &'a str)> {
        let input: &'a str = self.rest;

        match first {
            '(' => return Ok((Token::LParen, &input[1..])),
            ')' => return Ok((Token::RParen, &input[1..])),
            '\'' | '"' => return self.string_literal(first),
            _ => {}
        }

        if let Ok((rest, op)) = operator(input) {
            return Ok((Token::Op(op), rest));
        }
        if let Ok((rest, number)) = number(input) {
            return Ok((Token::Number(number), rest));
        }
        if let Ok((rest, word)) = identifier(input) {
            // Keywords are lowercase only; `AND` stays an identifier
            let token = match word {
                "and" => Token::And,
                "or" => Token::Or,
                "not" => Token::Not,
                "contains" => Token::Op(CmpOp::Contains),
                _ => Token::Ident(word.to_string()),
            };
            return Ok((token, rest));
        }

        Err(Error::lex(first, self.offset(input), "Unexpected character"))
    }

    fn string_literal(&self, quote: char) -> Result<(Token, &'a str)> {
        let input: &'a str = self.rest;
        let mut out = String::new();
        let mut chars = input.char_indices().skip(1);

        while let Some((i, ch)) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, escaped)) => out.push(escaped),
                    None => break,
                },
                c if c == quote => {
                    return Ok((Token::Str(out), &input[i + c.len_utf8()..]));
                }
                c => out.push(c),
            }
        }

        Err(Error::lex(quote, self.offset(input), "Unterminated string starting with"))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Spanned<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.rest = self.rest.trim_start();
        let Some(first) = self.rest.chars().next() else {
            self.done = true;
            return None;
        };

        let current: &'a str = self.rest;
        let position = self.offset(current);
        match self.scan_token(first) {
            Ok((token, rest)) => {
                let text = &current[..current.len() - rest.len()];
                self.rest = rest;
                Some(Ok(Spanned { token, text, position }))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Tokenize the whole expression at once
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input)
        .map(|spanned| spanned.map(|s| s.token))
        .collect()
}

fn operator(input: &str) -> IResult<&str, CmpOp> {
    alt((
        value(CmpOp::Eq, tag("==")),
        value(CmpOp::Ne, tag("!=")),
        value(CmpOp::Le, tag("<=")),
        value(CmpOp::Ge, tag(">=")),
        value(CmpOp::Lt, tag("<")),
        value(CmpOp::Gt, tag(">")),
    ))
    .parse(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize((opt(char('-')), digit1, opt((char('.'), digit1)))),
        |text: &str| text.parse::<f64>(),
    )
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize((
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn test_comparison_tokens() {
        let tokens = tokenize("deaths >= 1000").unwrap();
        assert_eq!(tokens, vec![
            Token::Ident("deaths".to_string()),
            Token::Op(CmpOp::Ge),
            Token::Number(1000.0),
        ]);
    }

    #[test]
    fn test_all_operators() {
        let tokens = tokenize("== != < <= > >= contains").unwrap();
        let ops: Vec<CmpOp> = tokens.into_iter()
            .map(|t| match t {
                Token::Op(op) => op,
                other => panic!("unexpected token {:?}", other),
            })
            .collect();
        assert_eq!(ops, vec![
            CmpOp::Eq, CmpOp::Ne, CmpOp::Lt, CmpOp::Le, CmpOp::Gt, CmpOp::Ge, CmpOp::Contains,
        ]);
    }

    #[test]
    fn test_keywords_are_lowercase_only() {
        let tokens = tokenize("and or not AND Or NOT").unwrap();
        assert_eq!(tokens, vec![
            Token::And,
            Token::Or,
            Token::Not,
            Token::Ident("AND".to_string()),
            Token::Ident("Or".to_string()),
            Token::Ident("NOT".to_string()),
        ]);
    }

    #[test]
    fn test_literals() {
        let tokens = tokenize(r#"'India' "Sri Lanka" -3.5 42 'it\'s'"#).unwrap();
        assert_eq!(tokens, vec![
            Token::Str("India".to_string()),
            Token::Str("Sri Lanka".to_string()),
            Token::Number(-3.5),
            Token::Number(42.0),
            Token::Str("it's".to_string()),
        ]);
    }

    #[test]
    fn test_parentheses_without_spaces() {
        let tokens = tokenize("(year>2000)").unwrap();
        assert_eq!(tokens, vec![
            Token::LParen,
            Token::Ident("year".to_string()),
            Token::Op(CmpOp::Gt),
            Token::Number(2000.0),
            Token::RParen,
        ]);
    }

    #[test]
    fn test_spans() {
        let spans: Vec<Spanned> = Lexer::new("  country == 'Chile'")
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(spans[0].position, 2);
        assert_eq!(spans[0].text, "country");
        assert_eq!(spans[2].position, 13);
        assert_eq!(spans[2].text, "'Chile'");
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("country == 'India").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
        assert!(err.context.contains("'\\''"), "{}", err.context);
        assert!(err.context.contains("position 11"), "{}", err.context);
    }

    #[test]
    fn test_unrecognized_symbol() {
        let err = tokenize("deaths = 10").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
        assert!(err.context.contains("'='"));
        assert!(err.context.contains("position 7"));

        let err = tokenize("deaths > 10 & year < 3").unwrap_err();
        assert!(err.context.contains("'&'"));
    }

    #[test]
    fn test_lexer_is_lazy_and_stops_after_error() {
        let mut lexer = Lexer::new("a == 1 $ b");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_restart() {
        let mut lexer = Lexer::new("x == 1");
        assert_eq!(lexer.by_ref().count(), 3);
        assert!(lexer.next().is_none());
        lexer.restart();
        assert_eq!(lexer.next().unwrap().unwrap().token, Token::Ident("x".to_string()));
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("   ").unwrap().is_empty());
    }
}

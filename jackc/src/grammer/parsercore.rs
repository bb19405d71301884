use super::token::Token;
use crate::error::Error;

/// Token cursor shared by the code generator and the constant folder.
///
/// Unlike a plain iterator the cursor can be rewound to a [`Mark`], which is
/// what lets the folder evaluate an expression speculatively.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    /// Line of the next token, or of the last token once the input is exhausted
    pub fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |token| token.line)
    }
}

impl Parser {
    /// Skip all invalid tokens
    fn skip(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.pos += 1;
        }
    }

    /// Peek : Watch next token without consuming it
    pub fn peek(&mut self) -> Option<&Token> {
        self.skip();
        self.tokens.get(self.pos)
    }

    /// Peek the n-th significant token ahead (0 = next)
    pub fn peek_nth(&mut self, n: usize) -> Option<&Token> {
        self.skip();
        self.tokens[self.pos..]
            .iter()
            .filter(|token| !token.kind.is_trivia())
            .nth(n)
    }

    /// Next : Consume next token and return it
    pub fn next(&mut self) -> Option<Token> {
        self.skip();
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Peek and check next token is match with condition
    pub fn check_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> bool {
        match self.peek() {
            Some(token) => cond(token),
            None => false,
        }
    }

    /// Consume if next token is match with condition
    pub fn consume_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> Option<Token> {
        if self.check_if(cond) {
            self.next()
        } else {
            None
        }
    }

    /// Next token must be match with condition, `expected` names it in the error
    pub fn expect_tobe<F: Fn(&Token) -> bool>(
        &mut self,
        cond: F,
        expected: &str,
    ) -> Result<Token, Error> {
        let line = self.line();
        match self.next() {
            Some(token) if cond(&token) => Ok(token),
            Some(token) => Err(Error::UnexpectedToken {
                expected: expected.to_string(),
                found: token.kind.to_string(),
                line: token.line,
            }),
            None => Err(Error::UnexpectedEOF {
                expected: expected.to_string(),
                line,
            }),
        }
    }
}

#[macro_export]
macro_rules! check {
    ($parser:expr, $kind:pat) => {
        $parser.check_if(|token| matches!(&token.kind, $kind))
    };
}

/// Consume a fixed token, the variant's text is reported when it is missing
#[macro_export]
macro_rules! expect {
    ($parser:expr, $kind:ident) => {
        $parser.expect_tobe(|token| matches!(&token.kind, $kind), &$kind.to_string())
    };
}

#[macro_export]
macro_rules! optional {
    ($parser:expr, $kind:pat) => {
        $parser.consume_if(|token| matches!(&token.kind, $kind))
    };
}

/// Parse repeated elements with delimiters
/// [ element { delimiter element } ] terminal
#[macro_export]
macro_rules! repeat {
    ($parser:expr, $elem:expr, $delimiter:pat, $terminal:pat) => {{
        let mut items = Vec::new();
        if !check!($parser, $terminal) {
            items.push($elem?);
            while optional!($parser, $delimiter).is_some() {
                items.push($elem?);
            }
        }
        items
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::grammer::lexer::Lexer;
    use crate::grammer::token::TokenKind::*;

    fn parser(code: &str) -> Parser {
        Parser::new(Lexer::new(code).parse())
    }

    #[test]
    fn trivia_is_invisible() {
        let mut p = parser("let /* c */ x // d\n $ = 1;");
        assert_eq!(p.next().map(|t| t.kind), Some(KwLet));
        assert!(check!(p, Ident(_)));
        assert_eq!(p.peek_nth(1).map(|t| t.kind.clone()), Some(Equal));
        p.next();
        assert!(expect!(p, Equal).is_ok());
        assert_eq!(p.line(), 2);
    }

    #[test]
    fn mark_and_reset() {
        let mut p = parser("a b c");
        let mark = p.mark();
        p.next();
        p.next();
        p.reset(mark);
        assert_eq!(p.next().map(|t| t.kind), Some(Ident("a".into())));
    }

    #[test]
    fn expect_reports_expected_found_and_line() {
        let mut p = parser("\n\n{ )");
        assert!(expect!(p, LCurly).is_ok());
        match expect!(p, Semicolon) {
            Err(Error::UnexpectedToken {
                expected,
                found,
                line,
            }) => {
                assert_eq!(expected, ";");
                assert_eq!(found, ")");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            expect!(p, RCurly),
            Err(Error::UnexpectedEOF { line: 3, .. })
        ));
    }
}

use super::token::{Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;

pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            iter: code.chars().peekable(),
            line: 1,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.iter.clone().nth(n)
    }
    fn consume(&mut self) -> Option<char> {
        let ch = self.iter.next();
        if ch == Some('\n') {
            self.line += 1;
        }
        ch
    }
}

// ----------------------------------------------------------------------------
// Parser
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    pub fn parse(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(ch0) = self.peek_nth(0) {
            // 0. Skip whitespaces
            if ch0.is_whitespace() {
                self.consume();
                continue;
            }

            let line = self.line;

            // 1. Comments
            if ch0 == '/' {
                match self.peek_nth(1) {
                    Some('/') => {
                        tokens.push(Token::new(self.parse_line_comment(), line));
                        continue;
                    }
                    Some('*') => {
                        tokens.push(Token::new(self.parse_block_comment(), line));
                        continue;
                    }
                    _ => {}
                }
            }

            // 2. Single character token
            if let Some(kind) = single_char_token(ch0) {
                self.consume();
                tokens.push(Token::new(kind, line));
                continue;
            }

            // 3. Number literal
            if ch0.is_ascii_digit() {
                tokens.push(Token::new(self.parse_number(), line));
                continue;
            }

            // 4. String literal
            if ch0 == '"' {
                tokens.push(Token::new(self.parse_text(), line));
                continue;
            }

            // 5. Identifier or keyword
            if ch0.is_ascii_alphabetic() || ch0 == '_' {
                tokens.push(Token::new(self.parse_string(), line));
                continue;
            }

            // Error
            self.consume();
            tracing::warn!(line, "skipping unknown character {:?}", ch0);
            tokens.push(Token::new(TokenKind::Error(format!("{ch0}")), line));
        }
        tokens
    }

    // Comment: // text
    fn parse_line_comment(&mut self) -> TokenKind {
        self.consume(); // consume '/'
        self.consume(); // consume '/'
        while self.iter.next_if(|c| *c != '\n' && c.is_whitespace()).is_some() {}
        let mut lexeme = String::new();
        while let Some(ch) = self.iter.next_if(|c| *c != '\n') {
            lexeme.push(ch);
        }
        TokenKind::Comment(lexeme.trim_end().to_string())
    }

    // Comment: /* text */ (may span lines, unterminated runs to the end of input)
    fn parse_block_comment(&mut self) -> TokenKind {
        self.consume(); // consume '/'
        self.consume(); // consume '*'
        let mut lexeme = String::new();
        while let Some(ch) = self.consume() {
            if ch == '*' && self.peek_nth(0) == Some('/') {
                self.consume();
                break;
            }
            lexeme.push(ch);
        }
        TokenKind::Comment(lexeme.trim().to_string())
    }

    // Text: "hoge" (no escapes, must close on the same line)
    fn parse_text(&mut self) -> TokenKind {
        let line = self.line;
        self.consume();

        let mut lexeme = String::new();
        while let Some(ch) = self.iter.next_if(|c| *c != '\n') {
            if ch == '"' {
                return TokenKind::Text(lexeme);
            }
            lexeme.push(ch);
        }
        tracing::warn!(line, "skipping unterminated string literal");
        TokenKind::Error(format!("\"{lexeme}"))
    }

    fn parse_number(&mut self) -> TokenKind {
        let mut lexeme = String::new();
        while let Some(ch) = self.iter.next_if(|c| c.is_ascii_digit()) {
            lexeme.push(ch);
        }
        TokenKind::Number(lexeme)
    }

    fn parse_string(&mut self) -> TokenKind {
        let mut lexeme = String::new();
        while let Some(ch) = self
            .iter
            .next_if(|ch| matches!(ch, '_' | '0'..='9' | 'a'..='z' | 'A'..='Z'))
        {
            lexeme.push(ch);
        }
        match keyword(&lexeme) {
            Some(kind) => kind,
            None => TokenKind::Ident(lexeme),
        }
    }
}

fn single_char_token(ch: char) -> Option<TokenKind> {
    match ch {
        '{' => Some(TokenKind::LCurly),
        '}' => Some(TokenKind::RCurly),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '.' => Some(TokenKind::Period),
        ',' => Some(TokenKind::Comma),
        ';' => Some(TokenKind::Semicolon),
        '+' => Some(TokenKind::Plus),
        '-' => Some(TokenKind::Minus),
        '*' => Some(TokenKind::Star),
        '/' => Some(TokenKind::Slash),
        '&' => Some(TokenKind::Ampasand),
        '|' => Some(TokenKind::Pipe),
        '<' => Some(TokenKind::LAngle),
        '>' => Some(TokenKind::RAngle),
        '=' => Some(TokenKind::Equal),
        '~' => Some(TokenKind::Tilde),
        _ => None,
    }
}

fn keyword(s: &str) -> Option<TokenKind> {
    match s {
        "class" => Some(TokenKind::KwClass),
        "constructor" => Some(TokenKind::KwConstructor),
        "function" => Some(TokenKind::KwFunction),
        "method" => Some(TokenKind::KwMethod),
        "field" => Some(TokenKind::KwField),
        "static" => Some(TokenKind::KwStatic),
        "var" => Some(TokenKind::KwVar),
        "int" => Some(TokenKind::KwInt),
        "char" => Some(TokenKind::KwChar),
        "boolean" => Some(TokenKind::KwBoolean),
        "void" => Some(TokenKind::KwVoid),
        "true" => Some(TokenKind::KwTrue),
        "false" => Some(TokenKind::KwFalse),
        "null" => Some(TokenKind::KwNull),
        "this" => Some(TokenKind::KwThis),
        "let" => Some(TokenKind::KwLet),
        "do" => Some(TokenKind::KwDo),
        "if" => Some(TokenKind::KwIf),
        "else" => Some(TokenKind::KwElse),
        "while" => Some(TokenKind::KwWhile),
        "return" => Some(TokenKind::KwReturn),
        _ => None,
    }
}

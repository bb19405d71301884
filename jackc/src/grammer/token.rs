use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Token { kind, line }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Symbols
    LCurly,    // '{'
    RCurly,    // '}'
    LParen,    // '('
    RParen,    // ')'
    LBracket,  // '['
    RBracket,  // ']'
    Period,    // '.'
    Comma,     // ','
    Semicolon, // ';'
    Plus,      // '+'
    Minus,     // '-'
    Star,      // '*'
    Slash,     // '/'
    Ampasand,  // '&'
    Pipe,      // '|'
    LAngle,    // '<'
    RAngle,    // '>'
    Equal,     // '='
    Tilde,     // '~'

    // Keywords
    KwClass,       // "class"
    KwConstructor, // "constructor"
    KwFunction,    // "function"
    KwMethod,      // "method"
    KwField,       // "field"
    KwStatic,      // "static"
    KwVar,         // "var"
    KwInt,         // "int"
    KwChar,        // "char"
    KwBoolean,     // "boolean"
    KwVoid,        // "void"
    KwTrue,        // "true"
    KwFalse,       // "false"
    KwNull,        // "null"
    KwThis,        // "this"
    KwLet,         // "let"
    KwDo,          // "do"
    KwIf,          // "if"
    KwElse,        // "else"
    KwWhile,       // "while"
    KwReturn,      // "return"

    // Identifier
    Ident(String),

    // Literals
    Number(String),
    Text(String),

    // Special
    Comment(String), // Comment
    Error(String),   // Error
}

/// The five token classes of the language. Comments and unknown input have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Keyword,
    Symbol,
    IntConstant,
    StringConstant,
    Identifier,
}

/// Binary operators. All share one precedence level and associate to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Lt,
    Gt,
    Eq,
}

impl TokenKind {
    pub fn category(&self) -> Option<Category> {
        use TokenKind::*;
        match self {
            Comment(_) | Error(_) => None,
            Ident(_) => Some(Category::Identifier),
            Number(_) => Some(Category::IntConstant),
            Text(_) => Some(Category::StringConstant),
            kind if kind.symbol().is_some() => Some(Category::Symbol),
            _ => Some(Category::Keyword),
        }
    }

    pub fn is_trivia(&self) -> bool {
        self.category().is_none()
    }

    pub fn binop(&self) -> Option<BinOp> {
        use TokenKind::*;
        match self {
            Plus => Some(BinOp::Add),
            Minus => Some(BinOp::Sub),
            Star => Some(BinOp::Mul),
            Slash => Some(BinOp::Div),
            Ampasand => Some(BinOp::And),
            Pipe => Some(BinOp::Or),
            LAngle => Some(BinOp::Lt),
            RAngle => Some(BinOp::Gt),
            Equal => Some(BinOp::Eq),
            _ => None,
        }
    }

    fn symbol(&self) -> Option<char> {
        use TokenKind::*;
        Some(match self {
            LCurly => '{',
            RCurly => '}',
            LParen => '(',
            RParen => ')',
            LBracket => '[',
            RBracket => ']',
            Period => '.',
            Comma => ',',
            Semicolon => ';',
            Plus => '+',
            Minus => '-',
            Star => '*',
            Slash => '/',
            Ampasand => '&',
            Pipe => '|',
            LAngle => '<',
            RAngle => '>',
            Equal => '=',
            Tilde => '~',
            _ => return None,
        })
    }

    fn keyword(&self) -> Option<&'static str> {
        use TokenKind::*;
        Some(match self {
            KwClass => "class",
            KwConstructor => "constructor",
            KwFunction => "function",
            KwMethod => "method",
            KwField => "field",
            KwStatic => "static",
            KwVar => "var",
            KwInt => "int",
            KwChar => "char",
            KwBoolean => "boolean",
            KwVoid => "void",
            KwTrue => "true",
            KwFalse => "false",
            KwNull => "null",
            KwThis => "this",
            KwLet => "let",
            KwDo => "do",
            KwIf => "if",
            KwElse => "else",
            KwWhile => "while",
            KwReturn => "return",
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ch) = self.symbol() {
            return write!(f, "{}", ch);
        }
        if let Some(kw) = self.keyword() {
            return write!(f, "{}", kw);
        }
        match self {
            TokenKind::Ident(s) | TokenKind::Number(s) | TokenKind::Error(s) => write!(f, "{}", s),
            TokenKind::Text(s) => write!(f, "\"{}\"", s),
            TokenKind::Comment(_) => write!(f, "comment"),
            other => write!(f, "{:?}", other),
        }
    }
}

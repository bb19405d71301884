use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    This,
    That,
    Pointer,
    Temp,
}

impl Segment {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown segment: {s}")),
        }
    }

    /// The literal segment only feeds the stack, nothing can be popped into it.
    pub fn is_writable(self) -> bool {
        self != Segment::Constant
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithOp {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown arithmetic command: {s}")),
        }
    }

    pub fn is_unary(self) -> bool {
        matches!(self, ArithOp::Neg | ArithOp::Not)
    }
}

#[test]
fn test() {
    assert_eq!(Segment::This.to_string(), "this");
    assert_eq!(Segment::parse("pointer"), Ok(Segment::Pointer));
    assert!(Segment::parse("POINTER").is_err());
    assert!(!Segment::Constant.is_writable());
    assert_eq!(ArithOp::parse("not"), Ok(ArithOp::Not));
    assert!(ArithOp::Neg.is_unary());
    assert!(!ArithOp::Lt.is_unary());
}

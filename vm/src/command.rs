use crate::error::Error;
use crate::segment::{ArithOp, Segment};
use color_print::cformat;
use std::fmt;

/// One line of the stack machine language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Push(Segment, u32),
    Pop(Segment, u32),
    Arith(ArithOp),
    Label(String),
    Goto(String),
    IfGoto(String),
    Function(String, u32),
    Call(String, u32),
    Return,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Push(seg, idx) => write!(f, "push {} {}", seg, idx),
            Command::Pop(seg, idx) => write!(f, "pop {} {}", seg, idx),
            Command::Arith(op) => write!(f, "{}", op),
            Command::Label(name) => write!(f, "label {}", name),
            Command::Goto(name) => write!(f, "goto {}", name),
            Command::IfGoto(name) => write!(f, "if-goto {}", name),
            Command::Function(name, locals) => write!(f, "function {} {}", name, locals),
            Command::Call(name, args) => write!(f, "call {} {}", name, args),
            Command::Return => write!(f, "return"),
        }
    }
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, Error> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.split_first() {
            Some((op, args)) => {
                // Get argument by index and parse it
                // Example: arg!(1, u32) -> u32
                macro_rules! arg {
                    ($idx:expr, Segment) => {{
                        let s = arg!($idx);
                        Segment::parse(&s).map_err(|_| Error::ParseArgument(s, "segment".into()))?
                    }};
                    ($idx:expr, u32) => {{
                        let s = arg!($idx);
                        s.parse::<u32>()
                            .map_err(|_| Error::ParseArgument(s, "index".into()))?
                    }};
                    ($idx:expr) => {
                        args.get($idx)
                            .map(|s| s.to_string())
                            .ok_or_else(|| Error::MissingArgument(op.to_string()))?
                    };
                }

                let cmd = match *op {
                    "push" => Command::Push(arg!(0, Segment), arg!(1, u32)),
                    "pop" => Command::Pop(arg!(0, Segment), arg!(1, u32)),
                    "label" => Command::Label(arg!(0)),
                    "goto" => Command::Goto(arg!(0)),
                    "if-goto" => Command::IfGoto(arg!(0)),
                    "function" => Command::Function(arg!(0), arg!(1, u32)),
                    "call" => Command::Call(arg!(0), arg!(1, u32)),
                    "return" => Command::Return,
                    other => match ArithOp::parse(other) {
                        Ok(op) => Command::Arith(op),
                        Err(_) => return Err(Error::UnknownCommand(other.to_string())),
                    },
                };
                Ok(cmd)
            }
            None => Err(Error::Empty),
        }
    }

    pub fn cformat(&self) -> String {
        macro_rules! mem {
            ($name:expr, $seg:expr, $idx:expr) => {
                cformat!("<r>{:<9}</><b>{:<9}</><y>{}</>", $name, $seg, $idx)
            };
        }

        macro_rules! jmp {
            ($name:expr, $label:expr) => {
                cformat!("<r>{:<9}</><g>{}</>", $name, $label)
            };
        }

        match self {
            Command::Push(seg, idx) => mem!("push", seg, idx),
            Command::Pop(seg, idx) => mem!("pop", seg, idx),
            Command::Arith(op) => cformat!("<m>{}</>", op),
            Command::Label(name) => cformat!("<g,s>{}:</>", name),
            Command::Goto(name) => jmp!("goto", name),
            Command::IfGoto(name) => jmp!("if-goto", name),
            Command::Function(name, locals) => {
                cformat!("<c,s>function</> <u>{}</> <y>{}</>", name, locals)
            }
            Command::Call(name, args) => cformat!("<r>{:<9}</><c>{}</> <y>{}</>", "call", name, args),
            Command::Return => cformat!("<r>return</>"),
        }
    }
}

/// Render a command sequence as text, one command per line, each ending in a
/// newline. No commands render as an empty string.
pub fn render(commands: &[Command]) -> String {
    let mut out = String::new();
    for cmd in commands {
        out.push_str(&cmd.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form() {
        assert_eq!(Command::Push(Segment::Constant, 7).to_string(), "push constant 7");
        assert_eq!(Command::Pop(Segment::That, 0).to_string(), "pop that 0");
        assert_eq!(Command::Arith(ArithOp::Not).to_string(), "not");
        assert_eq!(Command::IfGoto("IF_FALSE_0".into()).to_string(), "if-goto IF_FALSE_0");
        assert_eq!(
            Command::Function("Main.main".into(), 2).to_string(),
            "function Main.main 2"
        );
        assert_eq!(Command::Call("Math.multiply".into(), 2).to_string(), "call Math.multiply 2");
        assert_eq!(Command::Return.to_string(), "return");
    }

    #[test]
    fn parse_line() {
        assert_eq!(
            Command::parse("  push local 3 ").unwrap(),
            Command::Push(Segment::Local, 3)
        );
        assert_eq!(
            Command::parse("if-goto WHILE_END_1").unwrap(),
            Command::IfGoto("WHILE_END_1".into())
        );
        assert_eq!(Command::parse("gt").unwrap(), Command::Arith(ArithOp::Gt));
        assert!(matches!(Command::parse("push"), Err(Error::MissingArgument(_))));
        assert!(matches!(Command::parse("push heap 1"), Err(Error::ParseArgument(..))));
        assert!(matches!(Command::parse("pop local x"), Err(Error::ParseArgument(..))));
        assert!(matches!(Command::parse("jump L"), Err(Error::UnknownCommand(_))));
        assert!(matches!(Command::parse("   "), Err(Error::Empty)));
    }

    #[test]
    fn render_trailing_newline() {
        let cmds = vec![
            Command::Function("Main.main".into(), 0),
            Command::Push(Segment::Constant, 0),
            Command::Return,
        ];
        assert_eq!(render(&cmds), "function Main.main 0\npush constant 0\nreturn\n");
        assert_eq!(render(&[]), "");
    }
}

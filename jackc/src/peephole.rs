//! Peephole pass over a finished command list.
//!
//! One forward scan with a two-command window. A matched pair is dropped and
//! the scan resumes after it, so pairs never overlap and a pair brought
//! together by an earlier removal is left alone. The pass is not repeated.
//!
//! - `not, not` and `neg, neg`: double negation
//! - `push X, pop X` for a writable segment: store of what was just loaded
//! - `push constant 0, add`: additive identity

use vm::{ArithOp, Command, Segment};

pub fn optimize(commands: &[Command]) -> Vec<Command> {
    let mut out = Vec::with_capacity(commands.len());
    let mut i = 0;
    while i < commands.len() {
        if let Some(next) = commands.get(i + 1) {
            if is_redundant_pair(&commands[i], next) {
                i += 2;
                continue;
            }
        }
        out.push(commands[i].clone());
        i += 1;
    }
    out
}

/// Same pass over the text form, one command per line
pub fn optimize_text(text: &str) -> Result<String, vm::Error> {
    let commands = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Command::parse)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(vm::render(&optimize(&commands)))
}

fn is_redundant_pair(first: &Command, second: &Command) -> bool {
    use Command::*;
    match (first, second) {
        (Arith(ArithOp::Not), Arith(ArithOp::Not)) => true,
        (Arith(ArithOp::Neg), Arith(ArithOp::Neg)) => true,
        (Push(Segment::Constant, 0), Arith(ArithOp::Add)) => true,
        (Push(pushed, i), Pop(popped, j)) => pushed == popped && i == j && pushed.is_writable(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> String {
        optimize_text(text).unwrap()
    }

    #[test]
    fn removes_each_rule() {
        assert_eq!(run("push local 0\nnot\nnot\n"), "push local 0\n");
        assert_eq!(run("push local 0\nneg\nneg\n"), "push local 0\n");
        assert_eq!(run("push local 1\npop local 1\nreturn\n"), "return\n");
        assert_eq!(
            run("push argument 0\npush constant 0\nadd\n"),
            "push argument 0\n"
        );
    }

    #[test]
    fn keeps_non_matching_pairs() {
        let text = "push constant 5\npop constant 5\npush local 0\npop local 1\npush constant 1\nadd\nnot\nneg\n";
        assert_eq!(run(text), text);
    }

    #[test]
    fn single_pass_does_not_rescan() {
        // Removing the inner pair joins the outer `not`s, which stay
        assert_eq!(run("not\nneg\nneg\nnot\n"), "not\nnot\n");
        assert_eq!(run("not\nnot\nnot\n"), "not\n");
        assert_eq!(run("not\nnot\nnot\nnot\n"), "");
    }

    #[test]
    fn rejects_malformed_line() {
        assert!(matches!(
            optimize_text("push local\n"),
            Err(vm::Error::MissingArgument(_))
        ));
    }
}

use jackc::peephole::{optimize, optimize_text};
use proptest::prelude::*;
use vm::{ArithOp, Command, Segment};

fn assert(input: &str, expect: &str) {
    let output = optimize_text(input).unwrap();
    println!("{input}---\n{output}");
    assert_eq!(output, expect);
}

macro_rules! case {
    ($name:ident, $input:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert($input, $expect);
        }
    };
}

case!(load_then_store_same_slot, "push local 0\npop local 0\n", "");
case!(load_then_store_other_slot, "push local 0\npop local 1\n", "push local 0\npop local 1\n");
case!(load_then_store_other_segment, "push this 2\npop that 2\n", "push this 2\npop that 2\n");
case!(constant_is_not_a_store, "push constant 3\npop constant 3\n", "push constant 3\npop constant 3\n");
case!(double_not, "push argument 1\nnot\nnot\nreturn\n", "push argument 1\nreturn\n");
case!(double_neg, "neg\nneg\n", "");
case!(add_zero, "push static 4\npush constant 0\nadd\n", "push static 4\n");
case!(sub_zero_kept, "push constant 0\nsub\n", "push constant 0\nsub\n");
case!(add_one_kept, "push constant 1\nadd\n", "push constant 1\nadd\n");
case!(mixed_negations_kept, "not\nneg\n", "not\nneg\n");
case!(pairs_do_not_overlap, "not\nnot\nnot\n", "not\n");
case!(nothing_in_nothing_out, "", "");
case!(uncovered_pair_stays, "push local 0\nnot\nnot\npop local 0\n", "push local 0\npop local 0\n");
case!(blank_lines_ignored, "\npush temp 0\n\npop temp 0\n\n", "");
case!(
    labels_and_calls_pass_through,
    "label L\ngoto L\nif-goto L\nfunction F.f 2\ncall F.f 1\nreturn\n",
    "label L\ngoto L\nif-goto L\nfunction F.f 2\ncall F.f 1\nreturn\n"
);

fn command() -> impl Strategy<Value = Command> {
    let segment = prop_oneof![
        Just(Segment::Constant),
        Just(Segment::Local),
        Just(Segment::Temp),
        Just(Segment::That),
    ];
    let arith = prop_oneof![
        Just(ArithOp::Add),
        Just(ArithOp::Sub),
        Just(ArithOp::Neg),
        Just(ArithOp::Not),
    ];
    prop_oneof![
        (segment.clone(), 0u32..2).prop_map(|(s, i)| Command::Push(s, i)),
        (segment, 0u32..2).prop_map(|(s, i)| Command::Pop(s, i)),
        arith.prop_map(Command::Arith),
        Just(Command::Label("L".into())),
    ]
}

proptest! {
    #[test]
    fn never_grows(commands in prop::collection::vec(command(), 0..64)) {
        let output = optimize(&commands);
        prop_assert!(output.len() <= commands.len());
        // Only whole pairs are removed
        prop_assert_eq!((commands.len() - output.len()) % 2, 0);
    }

    #[test]
    fn deterministic(commands in prop::collection::vec(command(), 0..64)) {
        prop_assert_eq!(optimize(&commands), optimize(&commands));
    }

    #[test]
    fn text_and_commands_agree(commands in prop::collection::vec(command(), 0..64)) {
        let text = vm::render(&commands);
        prop_assert_eq!(optimize_text(&text).unwrap(), vm::render(&optimize(&commands)));
    }
}

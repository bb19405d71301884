use vm::{ArithOp, Command, Segment};

/// Append-only sink for emitted commands.
#[derive(Debug, Default)]
pub struct Writer {
    commands: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, seg: Segment, idx: u32) {
        self.commands.push(Command::Push(seg, idx));
    }

    pub fn pop(&mut self, seg: Segment, idx: u32) {
        self.commands.push(Command::Pop(seg, idx));
    }

    pub fn arith(&mut self, op: ArithOp) {
        self.commands.push(Command::Arith(op));
    }

    pub fn label(&mut self, name: &str) {
        self.commands.push(Command::Label(name.to_string()));
    }

    pub fn goto(&mut self, name: &str) {
        self.commands.push(Command::Goto(name.to_string()));
    }

    pub fn if_goto(&mut self, name: &str) {
        self.commands.push(Command::IfGoto(name.to_string()));
    }

    pub fn function(&mut self, name: &str, locals: u32) {
        self.commands.push(Command::Function(name.to_string(), locals));
    }

    pub fn call(&mut self, name: &str, args: u32) {
        self.commands.push(Command::Call(name.to_string(), args));
    }

    pub fn ret(&mut self) {
        self.commands.push(Command::Return);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn finish(self) -> Vec<Command> {
        self.commands
    }
}

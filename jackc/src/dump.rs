use color_print::cformat;
use vm::Command;

/// Print the colored listing of one compiled file.
///
/// Function entries and labels are flush left, everything else is indented
/// beneath them.
pub fn print_dump(file: &str, commands: &[Command]) {
    println!(
        "{}+------[{}]{}",
        "-".repeat(7),
        file,
        "-".repeat(57usize.saturating_sub(file.len()))
    );
    for (idx, cmd) in commands.iter().enumerate() {
        let body = match cmd {
            Command::Function(..) | Command::Label(_) => cmd.cformat(),
            _ => format!("    {}", cmd.cformat()),
        };
        println!("{} | {}", cformat!("<dim>{:>5}</>", idx), body);
    }
    println!("-------+-----------------------------------------------------------------");
}

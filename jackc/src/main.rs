use clap::Parser;
use color_print::cprintln;
use jackc::{CompileOptions, Error};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::filter::EnvFilter;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input .jack file or directory of .jack files
    input: PathBuf,

    /// Output directory [default: next to the sources]
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Disable constant folding and the peephole pass
    #[clap(long)]
    no_optimize: bool,

    /// Multiply by powers of two with repeated doubling
    #[clap(long)]
    strength_reduce: bool,

    /// Dump generated commands
    #[clap(short, long)]
    dump: bool,

    /// Enable debug logging
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = CompileOptions {
        optimize: !args.no_optimize,
        strength_reduce: args.strength_reduce,
    };

    let sources = match jackc::collect_sources(&args.input) {
        Ok(sources) => sources,
        Err(e) => {
            e.print_diag(&args.input.display().to_string(), None);
            return ExitCode::from(2);
        }
    };

    let output_dir = args.output.as_deref().or_else(|| {
        // A directory input is also where its outputs go
        args.input.is_dir().then_some(args.input.as_path())
    });

    for (path, result) in jackc::compile_batch(&sources, options) {
        let file = path.display().to_string();
        let written = result.and_then(|commands| {
            let out = jackc::output_path(&path, output_dir);
            jackc::write_output(&out, &commands)?;
            Ok((out, commands))
        });
        match written {
            Ok((out, commands)) => {
                cprintln!("<g,s>Compiled</> {} -> {}", file, out.display());
                if args.dump {
                    jackc::dump::print_dump(&file, &commands);
                }
            }
            Err(e) => {
                report(&e, &file, &path);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn report(e: &Error, file: &str, path: &Path) {
    let source = std::fs::read_to_string(path).ok();
    e.print_diag(file, source.as_deref());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn help_names_the_author() {
        let cmd = Args::command();
        assert!(cmd.get_author().is_some_and(|author| author.contains("Kanade")));
    }

    #[test]
    fn flags_map_to_options() {
        let args = Args::try_parse_from(["jackc", "src", "--no-optimize", "-o", "out"]).unwrap();
        assert!(args.no_optimize);
        assert!(!args.strength_reduce);
        assert_eq!(args.output.as_deref(), Some(Path::new("out")));
    }
}

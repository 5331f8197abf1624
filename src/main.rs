use argh::FromArgs;
use lsh::{EditorReader, Interpreter, LineSource, ShellError, Shutdown, StreamReader};
use std::io;
use std::process::ExitCode;

#[derive(FromArgs)]
/// a minimal interactive command interpreter.
struct Options {
    #[argh(switch, short = 'e')]
    /// read lines with an interactive editor that keeps a history.
    edit: bool,
}

fn run(options: &Options) -> Result<Shutdown, ShellError> {
    let mut source: Box<dyn LineSource> = if options.edit {
        Box::new(EditorReader::new()?)
    } else {
        Box::new(StreamReader::stdin())
    };
    Interpreter::default().repl(source.as_mut())
}

fn main() -> ExitCode {
    let options: Options = argh::from_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let outcome = run(&options);
    ExitCode::from(lsh::exit_status(outcome, &mut io::stderr()))
}

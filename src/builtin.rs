use crate::command::{Builtin, Context, LoopStatus};
use crate::lexer::ArgVector;
use anyhow::{Context as _, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
///
/// Builtins run directly in the shell process. An operand is taken verbatim
/// from the argument vector: a leading `-` has no special meaning.
pub(crate) trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "pwd" or "cd".
    fn name() -> &'static str;

    /// Build the command from the full argument vector (index 0 is the name).
    fn parse(argv: &ArgVector<'_>) -> Self;

    /// Executes the command.
    ///
    /// Errors are reported by the caller on stderr; the loop continues.
    fn execute(self, ctx: &mut Context<'_>) -> Result<LoopStatus>;
}

/// Factory allows turning a builtin command type into a [`Builtin`].
///
/// Only supports commands defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T: BuiltinCommand> Builtin for Factory<T> {
    fn name(&self) -> &'static str {
        T::name()
    }

    fn invoke(&self, argv: &ArgVector<'_>, ctx: &mut Context<'_>) -> LoopStatus {
        match T::parse(argv).execute(ctx) {
            Ok(status) => status,
            Err(e) => {
                log::debug!("builtin {} failed: {e:?}", T::name());
                let _ = writeln!(ctx.stderr, "lsh: {e:#}");
                LoopStatus::Continue
            }
        }
    }
}

/// Change the current working directory to the first operand.
///
/// Further operands are ignored.
pub struct Cd {
    pub target: Option<PathBuf>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn parse(argv: &ArgVector<'_>) -> Self {
        Cd {
            target: argv.get(1).map(PathBuf::from),
        }
    }

    fn execute(self, ctx: &mut Context<'_>) -> Result<LoopStatus> {
        let Some(target) = self.target else {
            writeln!(ctx.stderr, "lsh: expected argument to \"cd\"")?;
            return Ok(LoopStatus::Continue);
        };
        env::set_current_dir(&target).with_context(|| format!("cd: {}", target.display()))?;
        log::debug!("working directory changed to {}", target.display());
        Ok(LoopStatus::Continue)
    }
}

/// Print a short usage note and the builtin names.
pub struct Help;

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn parse(_argv: &ArgVector<'_>) -> Self {
        Help
    }

    fn execute(self, ctx: &mut Context<'_>) -> Result<LoopStatus> {
        writeln!(ctx.stdout, "LSH")?;
        writeln!(ctx.stdout, "Type program names and arguments, and hit enter.")?;
        writeln!(ctx.stdout, "The following are built in:")?;
        for name in ctx.builtins {
            writeln!(ctx.stdout, "  {name}")?;
        }
        writeln!(
            ctx.stdout,
            "Use the man command for information on other programs."
        )?;
        Ok(LoopStatus::Continue)
    }
}

/// Stop the shell. Operands are ignored.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn parse(_argv: &ArgVector<'_>) -> Self {
        Exit
    }

    fn execute(self, _ctx: &mut Context<'_>) -> Result<LoopStatus> {
        Ok(LoopStatus::Stop)
    }
}

/// Permission bits for directories made by `mkdir`.
pub const MKDIR_MODE: u32 = 0o700;

/// Create a directory accessible only to its owner.
///
/// Only the first operand is used.
pub struct Mkdir {
    pub dir: Option<PathBuf>,
}

impl BuiltinCommand for Mkdir {
    fn name() -> &'static str {
        "mkdir"
    }

    fn parse(argv: &ArgVector<'_>) -> Self {
        Mkdir {
            dir: argv.get(1).map(PathBuf::from),
        }
    }

    fn execute(self, ctx: &mut Context<'_>) -> Result<LoopStatus> {
        let Some(dir) = self.dir else {
            writeln!(ctx.stderr, "lsh: expected argument to \"mkdir\"")?;
            return Ok(LoopStatus::Continue);
        };
        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(MKDIR_MODE);
        }
        builder
            .create(&dir)
            .with_context(|| format!("mkdir: {}", dir.display()))?;
        Ok(LoopStatus::Continue)
    }
}

/// Escape sequence that homes the cursor and erases the display.
pub const CLEAR_SEQUENCE: &str = "\x1b[H\x1b[J";

pub struct Clear;

impl BuiltinCommand for Clear {
    fn name() -> &'static str {
        "clear"
    }

    fn parse(_argv: &ArgVector<'_>) -> Self {
        Clear
    }

    fn execute(self, ctx: &mut Context<'_>) -> Result<LoopStatus> {
        write!(ctx.stdout, "{CLEAR_SEQUENCE}")?;
        Ok(LoopStatus::Continue)
    }
}

/// Print the current working directory to standard output.
pub struct Pwd;

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn parse(_argv: &ArgVector<'_>) -> Self {
        Pwd
    }

    fn execute(self, ctx: &mut Context<'_>) -> Result<LoopStatus> {
        let cwd = env::current_dir().context("pwd")?;
        writeln!(ctx.stdout, "{}", cwd.display())?;
        Ok(LoopStatus::Continue)
    }
}

/// List every entry of the current directory, one name per line.
///
/// Like `readdir`, the listing includes `.` and `..` and is not sorted.
pub struct Ls;

impl BuiltinCommand for Ls {
    fn name() -> &'static str {
        "ls"
    }

    fn parse(_argv: &ArgVector<'_>) -> Self {
        Ls
    }

    fn execute(self, ctx: &mut Context<'_>) -> Result<LoopStatus> {
        let entries = fs::read_dir(".").context("ls: could not open current directory")?;
        writeln!(ctx.stdout, ".")?;
        writeln!(ctx.stdout, "..")?;
        for entry in entries {
            let entry = entry.context("ls")?;
            writeln!(ctx.stdout, "{}", entry.file_name().to_string_lossy())?;
        }
        Ok(LoopStatus::Continue)
    }
}

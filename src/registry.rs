use crate::builtin::{Cd, Clear, Exit, Factory, Help, Ls, Mkdir, Pwd};
use crate::command::Builtin;
use crate::error::ShellError;
use std::ffi::OsStr;

/// Ordered table of the commands the shell runs in-process.
///
/// The order of registration is the order `help` lists them in. Names are
/// unique, so a lookup can stop at the first match.
pub struct BuiltinTable {
    entries: Vec<Box<dyn Builtin>>,
}

impl BuiltinTable {
    /// A table without any builtins; every command is launched externally.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The seven builtins of the shell: `cd`, `help`, `exit`, `mkdir`, `clear`,
    /// `pwd` and `ls`.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Help>::default()),
                Box::new(Factory::<Exit>::default()),
                Box::new(Factory::<Mkdir>::default()),
                Box::new(Factory::<Clear>::default()),
                Box::new(Factory::<Pwd>::default()),
                Box::new(Factory::<Ls>::default()),
            ],
        }
    }

    /// Append a builtin, refusing a name that is already taken.
    pub fn register(&mut self, builtin: Box<dyn Builtin>) -> Result<(), ShellError> {
        let name = builtin.name();
        if self.lookup(name).is_some() {
            return Err(ShellError::DuplicateBuiltin(name));
        }
        self.entries.push(builtin);
        Ok(())
    }

    /// Find the builtin called exactly `name`.
    pub fn lookup<S: AsRef<OsStr> + ?Sized>(&self, name: &S) -> Option<&dyn Builtin> {
        let name = name.as_ref();
        self.entries
            .iter()
            .find(|entry| name == entry.name())
            .map(|entry| &**entry)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BuiltinTable {
    fn default() -> Self {
        Self::standard()
    }
}

//! Read-only system variables.
//!
//! The system set is seeded from a `SystemVariableSource`. The OS source reads
//! the process environment; the static table is a fixed fixture used by the
//! demo mode and by tests.

use super::variable::{Variable, VariableId};

/// Source of the read-only system variable set.
pub trait SystemVariableSource {
    /// Name/value pairs in the order they should be listed.
    fn pairs(&self) -> Vec<(String, String)>;

    /// The pairs as enabled variables with `sys:` ids.
    fn variables(&self) -> Vec<Variable> {
        self.pairs()
            .into_iter()
            .map(|(name, value)| Variable::new(system_id(&name), name, value))
            .collect()
    }
}

pub fn system_id(name: &str) -> VariableId {
    VariableId::new(format!("sys:{name}"))
}

/// Process environment, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct OsEnvironment;

impl SystemVariableSource for OsEnvironment {
    fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = std::env::vars().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
    }
}

/// Fixed table of name/value pairs.
#[derive(Debug, Clone)]
pub struct StaticTable {
    entries: &'static [(&'static str, &'static str)],
}

impl StaticTable {
    pub fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn demo() -> Self {
        Self::new(DEMO_SYSTEM_VARIABLES)
    }
}

impl SystemVariableSource for StaticTable {
    fn pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}

/// Demo snapshot of a desktop session environment.
pub const DEMO_SYSTEM_VARIABLES: &[(&str, &str)] = &[
    ("COLORTERM", "truecolor"),
    ("DESKTOP_SESSION", "ubuntu"),
    ("EDITOR", "vi"),
    ("GPG_TTY", "/dev/pts/0"),
    ("GTK_IM_MODULE", "ibus"),
    ("HOME", "/home/demo"),
    ("LANG", "en_GB.UTF-8"),
    ("LANGUAGE", "en_GB:en"),
    ("LC_MONETARY", "en_US.UTF-8"),
    ("LC_NUMERIC", "en_US.UTF-8"),
    ("LC_TIME", "en_US.UTF-8"),
    ("LESSOPEN", "| /usr/bin/lesspipe %s"),
    ("LOGNAME", "demo"),
    ("OLDPWD", "/home/demo"),
    ("PAGER", "less"),
    ("PAPERSIZE", "letter"),
    ("PATH", "/usr/local/bin:/usr/bin:/bin"),
    ("SHELL", "/bin/bash"),
    ("TERM", "xterm-256color"),
    ("USER", "demo"),
    ("XDG_RUNTIME_DIR", "/run/user/1000"),
    ("XDG_SESSION_TYPE", "x11"),
];

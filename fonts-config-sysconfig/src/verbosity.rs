//! Output verbosity passed explicitly through a run.

use std::fmt;

/// How much a run reports.
///
/// The sysconfig `VERBOSITY` variable stores these as `0`, `1` and `256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Verbosity {
    /// Only warnings and errors.
    #[default]
    Quiet,
    /// Progress messages.
    Verbose,
    /// Everything, including per-font charset details.
    Debug,
}

impl Verbosity {
    /// Value written to the sysconfig file.
    pub fn as_sysconfig(self) -> i64 {
        match self {
            Verbosity::Quiet => 0,
            Verbosity::Verbose => 1,
            Verbosity::Debug => 256,
        }
    }

    /// Interpret a sysconfig value; anything at or above a level selects it.
    pub fn from_sysconfig(value: i64) -> Self {
        if value >= 256 {
            Verbosity::Debug
        } else if value >= 1 {
            Verbosity::Verbose
        } else {
            Verbosity::Quiet
        }
    }

    /// Log level the logging bridge should let through.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Warn,
            Verbosity::Verbose => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
        }
    }

    pub fn is_debug(self) -> bool {
        self >= Verbosity::Debug
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Verbose => "verbose",
            Verbosity::Debug => "debug",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sysconfig_values() {
        for v in [Verbosity::Quiet, Verbosity::Verbose, Verbosity::Debug] {
            assert_eq!(Verbosity::from_sysconfig(v.as_sysconfig()), v);
        }
        assert_eq!(Verbosity::from_sysconfig(-3), Verbosity::Quiet);
        assert_eq!(Verbosity::from_sysconfig(42), Verbosity::Verbose);
        assert_eq!(Verbosity::from_sysconfig(1000), Verbosity::Debug);
    }

    #[test]
    fn test_ordering_and_levels() {
        assert!(Verbosity::Quiet < Verbosity::Verbose);
        assert!(Verbosity::Debug.is_debug());
        assert!(!Verbosity::Verbose.is_debug());
        assert_eq!(Verbosity::Quiet.to_level_filter(), log::LevelFilter::Warn);
    }
}

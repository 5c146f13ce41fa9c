//! How much the commands print.

/// Output verbosity, chosen with `--verbose` or `--quiet`.
///
/// Report lines and errors are printed in every mode. Quiet mode drops
/// the decoration around them so the output can be read by scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Decorations plus where data comes from.
    Verbose,
    /// Headers, status lines and the fetch spinner.
    #[default]
    Normal,
    /// Report lines, warnings and errors only.
    Quiet,
}

impl OutputMode {
    /// Pick the mode for the global `--verbose` / `--quiet` flags.
    /// The flags conflict at parse time; quiet wins if both get through.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    /// Headers, success lines and spinners.
    pub fn shows_decorations(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Extra lines naming the manifest source.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}

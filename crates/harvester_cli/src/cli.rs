use clap::{Parser, ValueEnum};
use harvester_core::Mode;

use crate::output::OutputKind;

#[derive(Debug, Parser)]
#[command(name = "docs-harvester")]
#[command(
    about = "Harvest facts from the Python documentation and the PEP index",
    long_about = None
)]
pub struct Cli {
    /// Harvester to run
    #[arg(value_enum)]
    pub mode: ModeArg,

    /// Clear the HTTP cache before fetching
    #[arg(short = 'c', long)]
    pub clear_cache: bool,

    /// Report sink; rows are printed plainly when omitted
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<OutputKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::WhatsNew => Mode::WhatsNew,
            ModeArg::LatestVersions => Mode::LatestVersions,
            ModeArg::Download => Mode::Download,
            ModeArg::Pep => Mode::Pep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, ModeArg};
    use crate::output::OutputKind;
    use clap::Parser;
    use harvester_core::Mode;

    #[test]
    fn mode_names_match_core_modes() {
        for mode in Mode::ALL {
            let cli = Cli::try_parse_from(["docs-harvester", mode.as_str()]).unwrap();
            assert_eq!(Mode::from(cli.mode), mode);
        }
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from(["docs-harvester", "pep", "-c", "-o", "file"]).unwrap();
        assert_eq!(cli.mode, ModeArg::Pep);
        assert!(cli.clear_cache);
        assert_eq!(cli.output, Some(OutputKind::File));

        let cli =
            Cli::try_parse_from(["docs-harvester", "download", "--output", "pretty"]).unwrap();
        assert!(!cli.clear_cache);
        assert_eq!(cli.output, Some(OutputKind::Pretty));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["docs-harvester", "crawl"]).is_err());
    }
}

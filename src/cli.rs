use clap::Parser;
use std::path::PathBuf;

use crate::config::OutputFormat;
use crate::series::FieldLocation;

/// Plot groundwater storage (or another output variable) of a PIHM run:
/// a map of the time-averaged field and the domain average over time.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Project name, used for input/<project>/<project>.mesh
    #[arg(default_value = "ShaleHills")]
    pub project: String,

    /// Run directory under output/
    #[arg(default_value = "ShaleHillsTestRun")]
    pub run: String,

    /// Output variable key
    #[arg(default_value = "gw")]
    pub var: String,

    /// Where the variable's values live, overriding the built-in table
    #[arg(short, long, value_enum)]
    pub location: Option<FieldLocation>,

    /// Simulator root holding input/ and output/
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Directory for rendered figures
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// YAML file overriding plot settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also write the domain-averaged series to this CSV file
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Render only, do not open a viewer
    #[arg(long)]
    pub no_show: bool,
}

pub fn get_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn no_arguments_runs_the_shale_hills_example() {
        let args = Args::try_parse_from(["pihm_plot"]).unwrap();
        assert_eq!(args.project, "ShaleHills");
        assert_eq!(args.run, "ShaleHillsTestRun");
        assert_eq!(args.var, "gw");
        assert_eq!(args.format, OutputFormat::Svg);
        assert!(!args.no_show);
        assert!(args.export_csv.is_none());
        assert!(args.location.is_none());
    }

    #[test]
    fn positional_and_flags() {
        let args = Args::try_parse_from([
            "pihm_plot", "Vcat", "VcatRun", "unsat", "--root", "/sim", "-f", "png", "--no-show",
            "--location", "node",
        ])
        .unwrap();
        assert_eq!(args.project, "Vcat");
        assert_eq!(args.var, "unsat");
        assert_eq!(args.root, PathBuf::from("/sim"));
        assert_eq!(args.format, OutputFormat::Png);
        assert!(args.no_show);
        assert_eq!(args.location, Some(FieldLocation::Node));
    }

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }
}

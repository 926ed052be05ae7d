use super::VERSION;
use crate::chart::{self, ChartConfig};
use crate::fetch::LoaderConfig;
use crate::{ColumnNames, DataSource};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::time::Duration;

/// Everything the app needs for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub loader: LoaderConfig,
    pub chart: ChartConfig,
    pub output: PathBuf,
    pub show: bool,
    pub verbose: bool,
}

pub fn command() -> Command {
    let arg_url = Arg::new("url")
        .help("url of the csv file with the daily steps")
        .short('u')
        .long("url")
        .num_args(1)
        .default_value(crate::DEFAULT_URL)
        .conflicts_with("csvfile");
    let arg_csvin = Arg::new("csvfile")
        .help("read the csv from a local file instead of the url")
        .short('f')
        .long("csvfile")
        .num_args(1)
        .value_parser(value_parser!(PathBuf));
    let arg_htmlout = Arg::new("output")
        .help("name of the output html file")
        .short('o')
        .long("output")
        .num_args(1)
        .value_parser(value_parser!(PathBuf))
        .default_value("steps.html");
    let arg_show = Arg::new("show")
        .help("also open the chart in the browser")
        .long("show")
        .action(ArgAction::SetTrue);
    let arg_date_column = Arg::new("date_column")
        .help("name of the date column")
        .long("date-column")
        .num_args(1)
        .default_value(crate::DEFAULT_DATE_COLUMN);
    let arg_steps_column = Arg::new("steps_column")
        .help("name of the steps column")
        .long("steps-column")
        .num_args(1)
        .default_value(crate::DEFAULT_STEPS_COLUMN);
    let arg_timeout = Arg::new("timeout")
        .help(format!(
            "timeout for the download, in seconds [default: {}]",
            crate::DEFAULT_TIMEOUT_SECS
        ))
        .long("timeout")
        .num_args(1)
        .value_parser(value_parser!(u64).range(1..));
    let arg_width = Arg::new("width")
        .help(format!("chart width in pixels [default: {}]", chart::DEFAULT_WIDTH))
        .long("width")
        .num_args(1)
        .value_parser(value_parser!(usize));
    let arg_height = Arg::new("height")
        .help(format!("chart height in pixels [default: {}]", chart::DEFAULT_HEIGHT))
        .long("height")
        .num_args(1)
        .value_parser(value_parser!(usize));
    let arg_marker_size = Arg::new("marker_size")
        .help(format!(
            "size of the point markers [default: {}]",
            chart::DEFAULT_MARKER_SIZE
        ))
        .long("marker-size")
        .num_args(1)
        .value_parser(value_parser!(usize));
    let arg_color = Arg::new("color")
        .help("color of the point markers, css name or #RRGGBB")
        .long("color")
        .num_args(1)
        .default_value(chart::DEFAULT_COLOR);
    let arg_title = Arg::new("title")
        .help("chart title")
        .long("title")
        .num_args(1)
        .default_value(chart::DEFAULT_TITLE);
    let arg_banded = Arg::new("banded")
        .help("shade the points by 5000-step bands")
        .long("banded")
        .action(ArgAction::SetTrue);
    let arg_no_zero = Arg::new("no_zero")
        .help("drop the zero-inclusive hint on the date axis (no visible effect)")
        .long("no-zero")
        .action(ArgAction::SetTrue);
    let arg_verbose = Arg::new("verbose")
        .help("print verbose information")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue);
    Command::new("Steps_plot")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to download the daily steps and plot them as an interactive scatter chart")
        .arg(arg_url)
        .arg(arg_csvin)
        .arg(arg_htmlout)
        .arg(arg_show)
        .arg(arg_date_column)
        .arg(arg_steps_column)
        .arg(arg_timeout)
        .arg(arg_width)
        .arg(arg_height)
        .arg(arg_marker_size)
        .arg(arg_color)
        .arg(arg_title)
        .arg(arg_banded)
        .arg(arg_no_zero)
        .arg(arg_verbose)
}

/// Build the run config from the matches.
/// It is safe to unwrap get_one for the arguments with a default,
/// clap always fills them in. Numeric defaults come from the library constants.
pub fn config_from_matches(cli_args: &ArgMatches) -> Config {
    let source = match cli_args.get_one::<PathBuf>("csvfile") {
        Some(p) => DataSource::File(p.to_owned()),
        None => DataSource::Url(cli_args.get_one::<String>("url").unwrap().to_owned()),
    };
    let columns = ColumnNames {
        date: cli_args.get_one::<String>("date_column").unwrap().to_owned(),
        steps: cli_args.get_one::<String>("steps_column").unwrap().to_owned(),
    };
    let timeout = Duration::from_secs(
        cli_args
            .get_one::<u64>("timeout")
            .copied()
            .unwrap_or(crate::DEFAULT_TIMEOUT_SECS),
    );
    let chart = ChartConfig {
        width: cli_args
            .get_one::<usize>("width")
            .copied()
            .unwrap_or(chart::DEFAULT_WIDTH),
        height: cli_args
            .get_one::<usize>("height")
            .copied()
            .unwrap_or(chart::DEFAULT_HEIGHT),
        marker_size: cli_args
            .get_one::<usize>("marker_size")
            .copied()
            .unwrap_or(chart::DEFAULT_MARKER_SIZE),
        color: cli_args.get_one::<String>("color").unwrap().to_owned(),
        title: cli_args.get_one::<String>("title").unwrap().to_owned(),
        banded: cli_args.get_flag("banded"),
        include_zero: !cli_args.get_flag("no_zero"),
    };
    Config {
        loader: LoaderConfig {
            source,
            columns,
            timeout,
        },
        chart,
        output: cli_args.get_one::<PathBuf>("output").unwrap().to_owned(),
        show: cli_args.get_flag("show"),
        verbose: cli_args.get_flag("verbose"),
    }
}

/// Takes the CLI arguments that control the download and the chart.
pub fn parse_cli() -> Config {
    config_from_matches(&command().get_matches())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let matches = command()
            .try_get_matches_from(std::iter::once("steps_plot").chain(args.iter().copied()))
            .unwrap();
        config_from_matches(&matches)
    }

    #[test]
    fn cli_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cfg = parse(&[]);
        assert_eq!(cfg.loader.source, DataSource::Url(crate::DEFAULT_URL.to_string()));
        assert_eq!(cfg.loader.columns, ColumnNames::default());
        assert_eq!(
            cfg.loader.timeout,
            Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(cfg.chart, ChartConfig::default());
        assert_eq!(cfg.output, PathBuf::from("steps.html"));
        assert!(!cfg.show);
        assert!(!cfg.verbose);
    }

    #[test]
    fn overrides() {
        let cfg = parse(&[
            "-f", "mine.csv", "-o", "out.html", "--width", "1200", "--color", "#336699",
            "--banded", "--no-zero", "--steps-column", "Count", "--timeout", "5", "-v",
        ]);
        assert_eq!(cfg.loader.source, DataSource::File(PathBuf::from("mine.csv")));
        assert_eq!(cfg.loader.columns.steps, "Count");
        assert_eq!(cfg.loader.timeout, Duration::from_secs(5));
        assert_eq!(cfg.chart.width, 1200);
        assert_eq!(cfg.chart.height, 500);
        assert_eq!(cfg.chart.color, "#336699");
        assert!(cfg.chart.banded);
        assert!(!cfg.chart.include_zero);
        assert_eq!(cfg.output, PathBuf::from("out.html"));
        assert!(cfg.verbose);
    }

    #[test]
    fn help_shows_the_library_defaults() {
        let help = command().render_help().to_string();
        assert!(help.contains(&format!("[default: {}]", chart::DEFAULT_WIDTH)));
        assert!(help.contains(&format!("[default: {}]", chart::DEFAULT_HEIGHT)));
        assert!(help.contains(&format!("[default: {}]", crate::DEFAULT_TIMEOUT_SECS)));
    }

    #[test]
    fn url_and_csvfile_conflict() {
        let res = command().try_get_matches_from(["steps_plot", "-u", "http://x/s.csv", "-f", "s.csv"]);
        assert!(res.is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let res = command().try_get_matches_from(["steps_plot", "--timeout", "0"]);
        assert!(res.is_err());
    }
}

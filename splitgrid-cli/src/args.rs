use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

/// Render a grid from a JSON data file and print its markup and CSS.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Data file shaped `{"Head": [[..]], "Body": [[..]], "Foot": [[..]]}`
    pub data: PathBuf,

    /// JSON file with option overrides (camelCase keys)
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Sort on a column, optionally with a direction; repeatable
    #[arg(long = "sort", value_name = "COL[:asc|:desc]")]
    pub sorts: Vec<SortArg>,

    /// Rows to select after sorting
    #[arg(long, value_name = "N,...", value_delimiter = ',')]
    pub select: Vec<usize>,

    /// Log file
    #[arg(long, value_name = "FILE", default_value = "splitgrid-cli.log")]
    pub log: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

/// A `--sort` argument: rendered column index plus optional direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortArg {
    pub column: usize,
    pub ascending: Option<bool>,
}

impl FromStr for SortArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.split_once(':') {
            Some((column, direction)) => (column, Some(direction)),
            None => (s, None),
        };
        let column = column
            .trim()
            .parse()
            .map_err(|_| format!("invalid column '{column}'"))?;
        let ascending = match direction.map(|d| d.trim().to_ascii_lowercase()) {
            None => None,
            Some(d) if d == "asc" => Some(true),
            Some(d) if d == "desc" => Some(false),
            Some(d) => return Err(format!("invalid direction '{d}', expected asc or desc")),
        };
        Ok(Self { column, ascending })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_arg_forms() {
        assert_eq!(
            "2".parse::<SortArg>(),
            Ok(SortArg {
                column: 2,
                ascending: None
            })
        );
        assert_eq!(
            "0:DESC".parse::<SortArg>(),
            Ok(SortArg {
                column: 0,
                ascending: Some(false)
            })
        );
        assert!("x:asc".parse::<SortArg>().is_err());
        assert!("1:up".parse::<SortArg>().is_err());
    }

    #[test]
    fn test_parse_command_line() {
        let args = Args::try_parse_from([
            "splitgrid-cli",
            "data.json",
            "--sort",
            "1:asc",
            "--sort",
            "0",
            "--select",
            "0,2",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.data, PathBuf::from("data.json"));
        assert_eq!(args.sorts.len(), 2);
        assert_eq!(args.select, vec![0, 2]);
        assert!(args.verbose);
        assert_eq!(args.log, PathBuf::from("splitgrid-cli.log"));
    }
}

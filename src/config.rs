use std::path::PathBuf;

use clap::Parser;

use crate::data::views::DEFAULT_TOP_N;

/// Export file read when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "All_Topic_Clusters_Cleaned.csv";

/// Interactive dashboard for SciVal topic cluster exports.
#[derive(Debug, Clone, Parser)]
#[command(name = "scival-dashboard", version, about)]
pub struct DashboardConfig {
    /// Topic cluster export to load (.csv, .json or .parquet)
    #[arg(short, long, env = "SCIVAL_DATA", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Number of bars in each top-N chart
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N, value_parser = parse_top_n)]
    pub top_n: usize,
}

fn parse_top_n(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config =
            DashboardConfig::try_parse_from(["scival-dashboard", "--data", "export.parquet", "-n", "5"])
                .unwrap();
        assert_eq!(config.data, PathBuf::from("export.parquet"));
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn top_n_defaults_to_ten() {
        let config = DashboardConfig::try_parse_from(["scival-dashboard", "-d", "x.csv"]).unwrap();
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn zero_top_n_is_rejected() {
        assert!(DashboardConfig::try_parse_from(["scival-dashboard", "--top-n", "0"]).is_err());
        assert!(DashboardConfig::try_parse_from(["scival-dashboard", "--top-n", "ten"]).is_err());
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{self, Config};

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,
    #[clap(subcommand)]
    pub subcmd: SubCommands,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// directory holding the cached categories and names
    #[clap(short, long, global = true)]
    pub data_path: Option<PathBuf>,
    #[clap(long, env = "CAT_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,
    #[clap(long, default_value = config::DEFAULT_BASE_URL, global = true)]
    pub base_url: String,
    #[clap(short, long, default_value_t = config::DEFAULT_LIMIT, global = true)]
    pub limit: u32,
    /// where the rendered page is written
    #[clap(short, long, default_value = "cat-gallery.html", global = true)]
    pub output: PathBuf,
    /// skip the cosmetic pauses around a search
    #[clap(long, global = true)]
    pub no_delay: bool,
}

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    /// list the categories
    Categories,
    /// search one category by id
    Search { category: String },
    /// read selections from stdin, one per line
    Browse,
}

impl From<CommonArgs> for Config {
    fn from(args: CommonArgs) -> Self {
        let config = Config {
            base_url: args.base_url,
            api_key: args.api_key.filter(|k| !k.is_empty()),
            limit: args.limit,
            data_path: args.data_path.unwrap_or_else(config::default_data_path),
            output: args.output,
            ..Config::default()
        };
        if args.no_delay {
            config.without_delays()
        } else {
            config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["cat_gallery", "search", "5", "--limit", "10", "--no-delay"]);
        assert!(matches!(cli.subcmd, SubCommands::Search { ref category } if category == "5"));
        let config = Config::from(cli.common);
        assert_eq!(config.limit, 10);
        assert!(config.parse_delay.is_zero());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["cat_gallery", "-d", "/tmp/cats", "categories"]);
        let config = Config::from(cli.common);
        assert_eq!(config.base_url, config::DEFAULT_BASE_URL);
        assert_eq!(config.data_path, PathBuf::from("/tmp/cats"));
        assert_eq!(config.output, PathBuf::from("cat-gallery.html"));
        assert_eq!(config.parse_delay.as_millis(), 1000);
    }
}

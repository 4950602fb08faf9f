use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

/// How `--tree` prints the parsed program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TreeFormat {
    /// Canonical source text
    #[default]
    Source,
    /// The `{:#?}` form of the tree
    Debug,
}

/// Driver configuration, read from the command line.
#[derive(Debug, Parser)]
#[command(name = "frontc", version, about = "Parses and type checks a source file")]
pub struct Config {
    /// Source file to check
    pub file: PathBuf,

    /// Print every token before parsing
    #[arg(long)]
    pub tokens: bool,

    /// Print the parsed program
    #[arg(long, value_enum, num_args = 0..=1, require_equals = true, default_missing_value = "source")]
    pub tree: Option<TreeFormat>,

    /// Log level used when `RUST_LOG` is not set
    #[arg(long, default_value_t = Level::WARN)]
    pub log_level: Level,
}

impl Config {
    /// The file name used in positions and diagnostics.
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tracing::Level;

    use super::{Config, TreeFormat};

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["frontc", "src/main.c"]);

        assert!(!config.tokens);
        assert_eq!(config.tree, None);
        assert_eq!(config.log_level, Level::WARN);
        assert_eq!(config.file_name(), "main.c");
    }

    #[test]
    fn test_tree_formats() {
        let config = Config::parse_from(["frontc", "--tree", "main.c"]);
        assert_eq!(config.tree, Some(TreeFormat::Source));

        let config = Config::parse_from(["frontc", "--tree=debug", "--tokens", "main.c"]);
        assert_eq!(config.tree, Some(TreeFormat::Debug));
        assert!(config.tokens);
    }

    #[test]
    fn test_log_level() {
        let config = Config::parse_from(["frontc", "--log-level", "debug", "main.c"]);
        assert_eq!(config.log_level, Level::DEBUG);

        assert!(Config::try_parse_from(["frontc", "--log-level", "loud", "main.c"]).is_err());
    }
}

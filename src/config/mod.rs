pub mod cli;
pub mod toml_config;

/// Locations used by the original generator script.
pub const DEFAULT_INPUT_PATH: &str = "./src/config/gen_json/makes_data.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "./src/config/make_model.json";

#[cfg(feature = "cli")]
pub use self::cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use super::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
    use crate::core::ConfigProvider;
    use crate::domain::model::{OutputFormat, ParseMode};
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_distinct_paths, validate_path, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "make-model-index")]
    #[command(about = "Group '<model>, <make>' lines into a make -> models JSON index")]
    pub struct CliConfig {
        /// Text file with one '<model>, <make>' pair per line
        #[arg(short, long = "input", default_value = DEFAULT_INPUT_PATH)]
        pub input_path: String,

        /// Destination file; replaced atomically on success
        #[arg(short, long = "output", default_value = DEFAULT_OUTPUT_PATH)]
        pub output_path: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        pub format: OutputFormat,

        #[arg(long, value_enum, default_value_t = ParseMode::FailFast)]
        pub mode: ParseMode,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log memory and timing per phase")]
        pub monitor: bool,
    }

    impl ConfigProvider for CliConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn parse_mode(&self) -> ParseMode {
            self.mode
        }

        fn output_format(&self) -> OutputFormat {
            self.format
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("input_path", &self.input_path)?;
            validate_path("output_path", &self.output_path)?;
            validate_distinct_paths(&self.input_path, &self.output_path)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults_match_generator_paths() {
            let config = CliConfig::parse_from(["make-model-index"]);

            assert_eq!(config.input_path, DEFAULT_INPUT_PATH);
            assert_eq!(config.output_path, DEFAULT_OUTPUT_PATH);
            assert_eq!(config.format, OutputFormat::Json);
            assert_eq!(config.mode, ParseMode::FailFast);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_flags() {
            let config = CliConfig::parse_from([
                "make-model-index",
                "--input",
                "in.txt",
                "-o",
                "out.csv",
                "--format",
                "csv",
                "--mode",
                "collect",
                "-v",
            ]);

            assert_eq!(config.input_path(), "in.txt");
            assert_eq!(config.output_path(), "out.csv");
            assert_eq!(config.output_format(), OutputFormat::Csv);
            assert_eq!(config.parse_mode(), ParseMode::Collect);
            assert!(config.verbose);
        }

        #[test]
        fn test_same_input_and_output_rejected() {
            let config = CliConfig::parse_from(["make-model-index", "-i", "a.txt", "-o", "a.txt"]);
            assert!(config.validate().is_err());
        }
    }
}

use atomscope::core::classify::FileKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "atomscope contributors",
    version,
    about = "atomscope - Browse a directory of atomic-structure data, classify its files and open them in the right viewer.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Read settings from this TOML file instead of the default config location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a directory as a tree with the kind of every file.
    Tree(TreeArgs),
    /// Print the kind and deciding rule of one or more files.
    Classify(ClassifyArgs),
    /// Open a workspace and route one file to the matching viewer.
    Open(OpenArgs),
}

/// Options shared by every command that classifies files.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Rule-override file extending the built-in classification tables
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S sniff.max-lines=20
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `tree` subcommand.
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// The workspace directory.
    #[arg(required = true, value_name = "DIR")]
    pub dir: PathBuf,

    /// Number of directory levels to list (1 lists only the top level).
    #[arg(short, long, value_name = "N")]
    pub depth: Option<usize>,

    /// Only show files of these kinds (structure, trajectory, volumetric, text-input, unknown).
    #[arg(short, long = "kind", value_name = "KIND")]
    pub kinds: Vec<FileKind>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Arguments for the `classify` subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Files to classify.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Arguments for the `open` subcommand.
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// The workspace directory.
    #[arg(required = true, value_name = "DIR")]
    pub dir: PathBuf,

    /// The file to open, absolute or relative to the workspace directory.
    #[arg(required = true, value_name = "FILE")]
    pub file: PathBuf,

    /// Structure viewer command; the file path is appended as the last argument.
    #[arg(long, value_name = "CMD", num_args(1..), allow_hyphen_values = true)]
    pub viewer: Option<Vec<String>>,

    /// Wait for the structure viewer to exit before closing the workspace.
    #[arg(short, long)]
    pub wait: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tree_with_kind_filters() {
        let cli = Cli::parse_from([
            "atomscope", "tree", "runs", "--depth", "3", "-k", "structure", "--kind", "text-input",
        ]);

        let Commands::Tree(args) = cli.command else {
            panic!("expected tree command");
        };
        assert_eq!(args.dir, PathBuf::from("runs"));
        assert_eq!(args.depth, Some(3));
        assert_eq!(args.kinds, vec![FileKind::Structure, FileKind::TextInput]);
    }

    #[test]
    fn rejects_unknown_kinds() {
        let result = Cli::try_parse_from(["atomscope", "tree", "runs", "--kind", "mesh"]);

        assert!(result.is_err());
    }

    #[test]
    fn parses_open_with_viewer_command_and_global_flags() {
        let cli = Cli::parse_from([
            "atomscope", "-vv", "open", "runs", "relax/CONTCAR", "-S", "text.display-limit-bytes=1024",
            "--viewer", "ovito", "--no-gui",
        ]);

        assert_eq!(cli.verbose, 2);
        let Commands::Open(args) = cli.command else {
            panic!("expected open command");
        };
        assert_eq!(args.file, PathBuf::from("relax/CONTCAR"));
        assert_eq!(
            args.viewer,
            Some(vec!["ovito".to_string(), "--no-gui".to_string()])
        );
        assert_eq!(args.settings.set_values, vec!["text.display-limit-bytes=1024"]);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["atomscope", "-q", "-v", "classify", "POSCAR"]);

        assert!(result.is_err());
    }
}

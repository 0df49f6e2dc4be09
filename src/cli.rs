// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

use cu::pre::*;

use crate::{Action, BlockSpec, Config, Style};

/// Show, remove, uncomment and apply license boilerplate in source files
#[derive(Debug, Clone, PartialEq, clap::Parser)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,

    #[clap(flatten)]
    pub common: cu::cli::Flags,
}

#[derive(Debug, Clone, PartialEq, clap::Subcommand)]
pub enum Command {
    /// Show the comment blocks at the top of files, or remove them
    Boilerplate(BoilerplateArgs),
    /// Print files with the comment delimiters of their boilerplate removed
    Uncomment(UncommentArgs),
    /// Print the content of files as one comment
    Comment(CommentArgs),
    /// Insert text at the top of a file, after the hashbang
    Prepend(PrependArgs),
    /// Print the working boilerplate from the config file
    Preview(PreviewArgs),
    /// Insert the working boilerplate at the top of files
    Apply(ApplyArgs),
    /// Count the comment blocks and lines at the top of files
    Count(CountArgs),
    /// Print the detected comment style of files
    Detect(DetectArgs),
    /// List the comment styles in detection order
    Styles,
}

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct BoilerplateArgs {
    /// Blocks to show or remove, for example `1,3-5`. All blocks by default
    #[clap(short, long = "blocks", value_name = "LIST")]
    pub blocks: Option<String>,
    /// Remove the blocks instead of showing them
    #[clap(short, long)]
    pub remove: bool,
    /// Remove blocks even if they contain copyright notices
    #[clap(short, long)]
    pub force: bool,
    /// Do not keep a `.bak` copy of modified files
    #[clap(short, long)]
    pub no_backup: bool,
    /// Comment style to use instead of auto-detection
    #[clap(short, long)]
    pub style: Option<Style>,
    /// Files to process, `-` or nothing for standard input
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct UncommentArgs {
    /// Strip the whitespace around the uncommented lines
    #[clap(long)]
    pub trim: bool,
    /// Comment style to use instead of auto-detection
    #[clap(short, long)]
    pub style: Option<Style>,
    /// Files to process, `-` or nothing for standard input
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct CommentArgs {
    /// Comment style of the output
    #[clap(short, long, default_value_t)]
    pub style: Style,
    /// Files to comment, `-` or nothing for standard input
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct PrependArgs {
    /// Insert after the existing boilerplate
    #[clap(short, long)]
    pub after: bool,
    /// Do not keep a `.bak` copy of the modified file
    #[clap(short, long)]
    pub no_backup: bool,
    /// Comment style of the existing boilerplate, with `--after`
    #[clap(short, long)]
    pub style: Option<Style>,
    /// The text to insert, or the file to modify if DEST is not given.
    /// The text is read from standard input in that case.
    #[clap(value_name = "SOURCE")]
    pub first: String,
    /// The file to modify
    #[clap(value_name = "DEST")]
    pub second: Option<String>,
}

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct PreviewArgs {
    /// Print the boilerplate as plain text
    #[clap(long)]
    pub no_style: bool,
    /// Comment style, overrides the config file
    #[clap(short, long)]
    pub style: Option<Style>,
    /// Path to the config file. Blurb.toml in the current directory by default
    #[clap(long)]
    pub config: Option<String>,
}

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct ApplyArgs {
    /// Insert after the existing boilerplate
    #[clap(short, long)]
    pub after: bool,
    /// Do not keep a `.bak` copy of modified files
    #[clap(short, long)]
    pub no_backup: bool,
    /// Comment style, overrides the config file and auto-detection
    #[clap(short, long)]
    pub style: Option<Style>,
    /// Path to the config file. Blurb.toml in the current directory by default
    #[clap(long)]
    pub config: Option<String>,
    /// Files to modify
    #[clap(required = true)]
    pub files: Vec<String>,
}

/// Prints `BLOCKS LINES FILE` per file, without the file name for
/// standard input. Both counts are printed unless one is selected.
#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct CountArgs {
    /// Print the number of lines in the blocks
    #[clap(short, long)]
    pub lines: bool,
    /// Print the number of blocks
    #[clap(short, long)]
    pub blocks: bool,
    /// Comment style to use instead of auto-detection
    #[clap(short, long)]
    pub style: Option<Style>,
    /// Files to inspect, `-` or nothing for standard input
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct DetectArgs {
    /// Only try this comment style
    #[clap(short, long)]
    pub style: Option<Style>,
    /// Files to inspect, `-` or nothing for standard input
    pub files: Vec<String>,
}

fn inputs_or_stdin(files: Vec<String>) -> Vec<String> {
    if files.is_empty() {
        vec!["-".to_string()]
    } else {
        files
    }
}

fn load_config(path: Option<String>) -> cu::Result<Config> {
    match path {
        Some(path) => Config::build(&path),
        None => {
            let Some(config_path) = crate::try_find_default_config_file() else {
                cu::bail!(
                    "cannot find Blurb.toml, and no config file is specified on the command line."
                );
            };
            Config::build(config_path)
        }
    }
}

/// Convert the CLI args into the action to run
pub fn action_from_cli(args: Cli) -> cu::Result<Action> {
    let action = match args.command {
        Command::Boilerplate(args) => {
            let blocks = args.blocks.as_deref().map(BlockSpec::parse).transpose()?;
            let inputs = inputs_or_stdin(args.files);
            if args.remove {
                Action::Remove {
                    inputs,
                    style: args.style,
                    blocks,
                    force: args.force,
                    backup: !args.no_backup,
                }
            } else {
                if args.force || args.no_backup {
                    cu::bail!("--force and --no-backup can only be used with --remove");
                }
                Action::Show {
                    inputs,
                    style: args.style,
                    blocks,
                }
            }
        }
        Command::Uncomment(args) => Action::Uncomment {
            inputs: inputs_or_stdin(args.files),
            style: args.style,
            trim: args.trim,
        },
        Command::Comment(args) => Action::Comment {
            inputs: inputs_or_stdin(args.files),
            style: args.style,
        },
        Command::Prepend(args) => {
            if args.style.is_some() && !args.after {
                cu::bail!(
                    "--style only selects how the existing boilerplate is found, did you mean to use --after?"
                );
            }
            let (source, dest) = match args.second {
                Some(dest) => (Some(args.first), dest),
                None => (None, args.first),
            };
            if dest == "-" {
                cu::bail!("cannot prepend to standard input, a destination file is required");
            }
            Action::Prepend {
                source,
                dest,
                after: args.after,
                style: args.style,
                backup: !args.no_backup,
            }
        }
        Command::Preview(args) => {
            let config = load_config(args.config)?;
            let style = if args.no_style {
                if args.style.is_some() {
                    cu::bail!("--style cannot be used with --no-style");
                }
                None
            } else {
                Some(args.style.or(config.style).unwrap_or_default())
            };
            Action::Preview { config, style }
        }
        Command::Apply(args) => {
            if args.files.iter().any(|x| x == "-") {
                cu::bail!("cannot apply to standard input");
            }
            let config = load_config(args.config)?;
            Action::Apply {
                files: args.files,
                style: args.style.or(config.style),
                config,
                after: args.after,
                backup: !args.no_backup,
            }
        }
        Command::Count(args) => Action::Count {
            inputs: inputs_or_stdin(args.files),
            style: args.style,
            blocks: args.blocks,
            lines: args.lines,
        },
        Command::Detect(args) => Action::Detect {
            inputs: inputs_or_stdin(args.files),
            style: args.style,
        },
        Command::Styles => Action::Styles,
    };
    Ok(action)
}

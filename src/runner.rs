// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

use std::io::{Read as _, Write};
use std::path::Path;

use cu::pre::*;

use crate::{BlockSpec, Config, Style, boilerplate, detect_or_use, replace_file};

/// What to do, with everything already resolved from the command line
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Print the comment blocks at the top of each input
    Show {
        inputs: Vec<String>,
        style: Option<Style>,
        blocks: Option<BlockSpec>,
    },
    /// Remove the comment blocks at the top of each input
    Remove {
        inputs: Vec<String>,
        style: Option<Style>,
        blocks: Option<BlockSpec>,
        force: bool,
        backup: bool,
    },
    /// Print each input with its comment blocks uncommented
    Uncomment {
        inputs: Vec<String>,
        style: Option<Style>,
        trim: bool,
    },
    /// Print the inputs as one comment
    Comment { inputs: Vec<String>, style: Style },
    /// Insert the source (stdin if `None`) at the top of `dest`
    Prepend {
        source: Option<String>,
        dest: String,
        after: bool,
        style: Option<Style>,
        backup: bool,
    },
    /// Print the working boilerplate, commented in `style` or plain
    Preview {
        config: Config,
        style: Option<Style>,
    },
    /// Insert the commented working boilerplate at the top of each file
    Apply {
        files: Vec<String>,
        config: Config,
        style: Option<Style>,
        after: bool,
        backup: bool,
    },
    /// Print the number of comment blocks and lines at the top of each input
    Count {
        inputs: Vec<String>,
        style: Option<Style>,
        blocks: bool,
        lines: bool,
    },
    /// Print the detected style of each input
    Detect {
        inputs: Vec<String>,
        style: Option<Style>,
    },
    /// List the comment styles in detection order
    Styles,
}

/// Issues found
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Failure {
    pub errors: Vec<String>,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for e in &self.errors {
            e.fmt(f)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A file, or standard input when the name is `-`
struct Input {
    name: String,
    data: Vec<u8>,
    from_stdin: bool,
}

impl Input {
    fn read(name: &str) -> cu::Result<Self> {
        if name == "-" {
            let mut data = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut data)
                .context("cannot read standard input")?;
            return Ok(Self {
                name: name.to_string(),
                data,
                from_stdin: true,
            });
        }
        let path = Path::new(name);
        if path.is_dir() {
            cu::bail!("is a directory");
        }
        let data = cu::fs::read(path)?;
        Ok(Self {
            name: name.to_string(),
            data,
            from_stdin: false,
        })
    }

    fn path(&self) -> &Path {
        Path::new(&self.name)
    }

    fn display_name(&self) -> &str {
        if self.from_stdin {
            "standard input"
        } else {
            &self.name
        }
    }
}

/// Run the action, writing its output to stdout.
///
/// - `Ok(Ok(())` means successful.
/// - `Ok(Err(failure))` means the run was successful, but some inputs could not be processed.
/// - `Err(e)` means the run itself was not successful.
pub fn run(action: Action) -> cu::Result<Result<(), Failure>> {
    let mut out = std::io::stdout().lock();
    run_with_output(action, &mut out)
}

/// Like [`run`], but writes the output to `out`
pub fn run_with_output<W: Write>(action: Action, out: &mut W) -> cu::Result<Result<(), Failure>> {
    let mut errors = Vec::new();
    let total = match action {
        Action::Show {
            inputs,
            style,
            blocks,
        } => for_each_input(&inputs, &mut errors, |input| {
            let text = boilerplate::show(&input.data, input.path(), style, blocks.as_ref())?;
            match text {
                Some(text) => out.write_all(&text)?,
                None => {
                    cu::info!("no boilerplate found in '{}'", input.display_name());
                }
            }
            Ok(())
        }),
        Action::Remove {
            inputs,
            style,
            blocks,
            force,
            backup,
        } => for_each_input(&inputs, &mut errors, |input| {
            let result =
                boilerplate::remove(&input.data, input.path(), style, blocks.as_ref(), force)?;
            let Some(data) = result else {
                cu::info!("no boilerplate found in '{}'", input.display_name());
                if input.from_stdin {
                    out.write_all(&input.data)?;
                }
                return Ok(());
            };
            if input.from_stdin {
                out.write_all(&data)?;
            } else {
                replace_file(input.path(), &data, backup)?;
                cu::debug!("removed boilerplate from '{}'", input.name);
            }
            Ok(())
        }),
        Action::Uncomment {
            inputs,
            style,
            trim,
        } => for_each_input(&inputs, &mut errors, |input| {
            let data = boilerplate::uncomment(&input.data, input.path(), style, trim);
            if data == input.data {
                cu::info!("no boilerplate found in '{}'", input.display_name());
            }
            out.write_all(&data)?;
            Ok(())
        }),
        Action::Comment { inputs, style } => {
            let mut text = String::new();
            let total = for_each_input(&inputs, &mut errors, |input| {
                text.push_str(&String::from_utf8_lossy(&input.data));
                Ok(())
            });
            let mut comment = style.comment(Some(text.as_str()));
            if !comment.ends_with('\n') {
                comment.push('\n');
            }
            out.write_all(comment.as_bytes())?;
            total
        }
        Action::Prepend {
            source,
            dest,
            after,
            style,
            backup,
        } => {
            let source = source.unwrap_or_else(|| "-".to_string());
            let source = Input::read(&source)
                .context(format!("cannot read source '{source}'"))?;
            for_each_input(&[dest], &mut errors, |input| {
                let data =
                    boilerplate::prepend(&input.data, input.path(), &source.data, after, style);
                replace_file(input.path(), &data, backup)
            })
        }
        Action::Preview { config, style } => {
            let text = config.compose();
            if text.is_empty() {
                cu::warn!("the working boilerplate is empty.");
            }
            let mut text = match style {
                Some(style) => style.comment(Some(text.as_str())),
                None => text,
            };
            if !text.ends_with('\n') {
                text.push('\n');
            }
            out.write_all(text.as_bytes())?;
            0
        }
        Action::Apply {
            files,
            config,
            style,
            after,
            backup,
        } => {
            config.check_can_apply()?;
            let text = config.compose();
            for_each_input(&files, &mut errors, |input| {
                let style = match style {
                    Some(x) => x,
                    None => boilerplate::find_blocks(&input.data, input.path(), None)
                        .style
                        .unwrap_or_default(),
                };
                cu::debug!("applying boilerplate to '{}' in {style} style", input.name);
                let mut source = style.comment(Some(text.as_str()));
                source.push('\n');
                let data =
                    boilerplate::prepend(&input.data, input.path(), source.as_bytes(), after, None);
                replace_file(input.path(), &data, backup)
            })
        }
        Action::Count {
            inputs,
            style,
            blocks,
            lines,
        } => for_each_input(&inputs, &mut errors, |input| {
            let (block_count, line_count) = boilerplate::count(&input.data, input.path(), style);
            let show_all = !blocks && !lines;
            let mut line = String::new();
            if blocks || show_all {
                line.push_str(&block_count.to_string());
            }
            if lines || show_all {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&line_count.to_string());
            }
            if !input.from_stdin {
                line.push(' ');
                line.push_str(&input.name);
            }
            writeln!(out, "{line}")?;
            Ok(())
        }),
        Action::Detect { inputs, style } => for_each_input(&inputs, &mut errors, |input| {
            let mut reader = std::io::Cursor::new(&input.data[..]);
            let detection = detect_or_use(style, input.path(), &mut reader);
            match detection.style {
                Some(style) => writeln!(
                    out,
                    "{}: {style}, {} block(s)",
                    input.display_name(),
                    detection.extraction.blocks.len()
                )?,
                None => writeln!(out, "{}: no comment style matched", input.display_name())?,
            }
            Ok(())
        }),
        Action::Styles => {
            for style in Style::ALL {
                writeln!(out, "{:<12}{}", style.name(), style.example())?;
            }
            0
        }
    };
    out.flush()?;

    if !errors.is_empty() {
        let failed = errors.len();
        cu::error!("processed {total} input(s), {failed} failed.");
        return Ok(Err(Failure { errors }));
    }
    Ok(Ok(()))
}

/// Read each input and process it with `f`, collecting the errors.
/// Returns the number of inputs.
fn for_each_input<F>(inputs: &[String], errors: &mut Vec<String>, mut f: F) -> usize
where
    F: FnMut(Input) -> cu::Result<()>,
{
    for name in inputs {
        if let Err(e) = Input::read(name).and_then(&mut f) {
            let name = if name == "-" { "standard input" } else { name.as_str() };
            cu::error!("'{name}': {e}");
            errors.push(format!("'{name}': {e}"));
        }
    }
    inputs.len()
}

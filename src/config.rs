// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Blurb Developers

use std::path::Path;

use cu::pre::*;

use crate::Style;

/// Try finding the default config files according to the order
/// specified in the documentation (see repo README)
pub fn try_find_default_config_file() -> Option<&'static str> {
    ["Blurb.toml", "blurb.toml"]
        .into_iter()
        .find(|x| Path::new(x).exists())
}

/// The working boilerplate
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Style used to comment the boilerplate
    pub style: Option<Style>,
    pub top_line: Option<String>,
    /// One line per copyright holder
    pub copyright: Vec<String>,
    pub project_line: Option<String>,
    pub license_notice: Option<String>,
    pub extra_line: Option<String>,
}

/// Raw config read from a toml config file
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TomlConfig {
    style: Option<String>,
    top_line: Option<String>,
    #[serde(default)]
    copyright: Vec<String>,
    project_line: Option<String>,
    license_notice: Option<String>,
    license_notice_file: Option<String>,
    extra_line: Option<String>,
}

impl Config {
    /// Build the config by reading the file specified
    ///
    /// `license-notice-file` is relative to the parent directory of `path`.
    pub fn build(path: &str) -> cu::Result<Self> {
        let raw = toml::parse::<TomlConfig>(&cu::fs::read_string(path)?)?;
        let style = match raw.style {
            None => None,
            Some(name) => {
                let style = Style::from_name(&name);
                Some(cu::check!(style, "unknown comment style '{name}' in '{path}'")?)
            }
        };
        let license_notice = match (raw.license_notice, raw.license_notice_file) {
            (Some(_), Some(_)) => {
                cu::bail!(
                    "license-notice and license-notice-file cannot both be specified in '{path}'"
                );
            }
            (Some(notice), None) => Some(notice),
            (None, Some(file)) => {
                let parent = Path::new(path)
                    .parent()
                    .context("failed to get parent path for config")?;
                // resolved relative to the directory where the config file is in
                let file = parent.join(file).into_utf8()?;
                cu::debug!("reading license notice from '{file}'");
                Some(cu::fs::read_string(&file)?)
            }
            (None, None) => None,
        };
        Ok(Self {
            style,
            top_line: raw.top_line,
            copyright: raw.copyright,
            project_line: raw.project_line,
            license_notice,
            extra_line: raw.extra_line,
        })
    }

    /// Error if there is not enough to make a boilerplate
    pub fn check_can_apply(&self) -> cu::Result<()> {
        if self.copyright.is_empty() {
            cu::bail!("no copyright lines are configured.");
        }
        if self.license_notice.is_none() {
            cu::bail!("no license notice is configured.");
        }
        Ok(())
    }

    /// Put the boilerplate together as plain text, paragraphs separated
    /// by a blank line
    pub fn compose(&self) -> String {
        let mut parts = Vec::new();
        if let Some(line) = &self.top_line {
            parts.push(line.trim_end().to_string());
        }
        if !self.copyright.is_empty() {
            parts.push(self.copyright.join("\n"));
        }
        if let Some(line) = &self.project_line {
            parts.push(line.trim_end().to_string());
        }
        if let Some(notice) = &self.license_notice {
            let notice: Vec<&str> = notice.trim_matches('\n').lines().map(str::trim_start).collect();
            parts.push(notice.join("\n"));
        }
        if let Some(line) = &self.extra_line {
            parts.push(line.trim_end().to_string());
        }
        parts.join("\n\n")
    }
}

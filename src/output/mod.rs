//
//  tonicpow
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the `tpow` command-line tool:
//!
//! - **Table format**: Human-readable output for interactive terminal use
//! - **JSON format**: Machine-readable JSON output for scripting and automation
//!
//! ## Architecture
//!
//! - [`table`]: Table formatting utilities using `comfy_table`
//! - [`json`]: JSON serialization utilities using `serde_json`
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: Enum representing the available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TableOutput`]: Trait for types that can be rendered for a terminal
//!
//! ## Example
//!
//! ```rust,ignore
//! use tonicpow::output::{OutputWriter, OutputFormat};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&campaign_detail)?;
//! writer.write_success("Configuration saved");
//! ```

pub mod json;
pub mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tables and labelled fields for a terminal.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Picks JSON when `json` is set, tables otherwise.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes command results in the selected format.
///
/// Color is enabled when the terminal supports it (see
/// [`console::colors_enabled`]).
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single value.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value),
            OutputFormat::Table => {
                value.print_table(self.color);
                Ok(())
            }
        }
    }

    /// Writes a list of values.
    ///
    /// In table mode, rows are rendered by [`TableOutput::print_rows`].
    pub fn write_list<T: Serialize + TableOutput>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(values),
            OutputFormat::Table => {
                if values.is_empty() {
                    self.write_info("No results");
                } else {
                    T::print_rows(values, self.color);
                }
                Ok(())
            }
        }
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Terminal rendering for a command result.
pub trait TableOutput {
    /// Prints one value, usually as labelled fields.
    fn print_table(&self, color: bool);

    /// Prints several values. Defaults to printing each one in turn.
    fn print_rows(values: &[Self], color: bool)
    where
        Self: Sized,
    {
        for value in values {
            value.print_table(color);
        }
    }
}

/// Prints a bold header followed by an underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line, dimming the key when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

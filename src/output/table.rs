//
//  tonicpow
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Utilities for tabular terminal output, built on `comfy_table`.
//!
//! ## Features
//!
//! - Builder pattern for constructing tables with headers and rows
//! - Automatic color detection and application
//! - Status-aware formatting with semantic colors
//! - Satoshi amounts rendered as BSV
//!
//! ## Example
//!
//! ```rust
//! use tonicpow::output::TableBuilder;
//!
//! let table = TableBuilder::new()
//!     .color(false)
//!     .headers(["ID", "Title", "Balance"])
//!     .row(["23", "TonicPow", "13.37"])
//!     .build();
//! assert!(table.to_string().contains("TonicPow"));
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Satoshis in one BSV.
pub const SATOSHIS_PER_BSV: i64 = 100_000_000;

/// Creates an empty table with the default preset.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub struct TableBuilder {
    table: Table,
    headers: Vec<String>,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            headers: Vec::new(),
            color: console::colors_enabled(),
        }
    }

    /// Overrides color detection. Call before [`headers`](Self::headers).
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(|s| s.into()).collect();
        if self.color {
            let header_cells: Vec<Cell> = self
                .headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect();
            self.table.set_header(header_cells);
        } else {
            self.table.set_header(&self.headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(|s| s.into()).collect();
        self.table.add_row(row);
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            let row: Vec<String> = row.into_iter().map(|s| s.into()).collect();
            self.table.add_row(row);
        }
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a campaign, conversion or user status.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_lowercase().as_str() {
        "active" | "success" | "paid" | "running" => style(status).green().to_string(),
        "completed" | "processed" => style(status).blue().to_string(),
        "canceled" | "cancelled" | "failed" | "expired" | "paused" => {
            style(status).red().to_string()
        }
        "pending" | "delayed" | "queued" => style(status).yellow().to_string(),
        _ => status.to_string(),
    }
}

pub fn format_bool(value: bool, color: bool) -> String {
    if color {
        use console::style;
        if value {
            style("Yes").green().to_string()
        } else {
            style("No").dim().to_string()
        }
    } else if value {
        "Yes".to_string()
    } else {
        "No".to_string()
    }
}

/// Renders a satoshi amount as BSV with eight decimals.
pub fn format_satoshis(satoshis: i64) -> String {
    let sign = if satoshis < 0 { "-" } else { "" };
    let abs = satoshis.unsigned_abs();
    let per = SATOSHIS_PER_BSV as u64;
    format!("{sign}{}.{:08} BSV", abs / per, abs % per)
}

/// Shortens `s` to at most `max_len` characters, marking the cut with `...`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Shows `-` for empty values.
pub fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("TonicPow", 20), "TonicPow");
        assert_eq!(truncate("This is a test campaign", 10), "This is...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_format_satoshis() {
        assert_eq!(format_satoshis(11_333_377), "0.11333377 BSV");
        assert_eq!(format_satoshis(SATOSHIS_PER_BSV * 2 + 5), "2.00000005 BSV");
        assert_eq!(format_satoshis(-1), "-0.00000001 BSV");
        assert_eq!(format_satoshis(0), "0.00000000 BSV");
    }

    #[test]
    fn test_format_without_color() {
        assert_eq!(format_status("pending", false), "pending");
        assert_eq!(format_bool(true, false), "Yes");
        assert_eq!(format_bool(false, false), "No");
        assert_eq!(or_dash(""), "-");
        assert_eq!(or_dash("usd"), "usd");
    }

    #[test]
    fn test_table_builder() {
        let table = TableBuilder::new()
            .color(false)
            .headers(["ID", "Title"])
            .rows([["1", "one"], ["2", "two"]])
            .build();
        let rendered = table.to_string();
        assert!(rendered.contains("Title"));
        assert!(rendered.contains("two"));
    }
}

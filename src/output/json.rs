//
//  tonicpow
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! Serializes command results for scripting. `--json` output is always
//! pretty-printed; [`write_json_to`] exists so the same rendering can be
//! captured in tests or written to files.
//!
//! ```rust
//! use tonicpow::output::write_json_to;
//!
//! let mut buffer = Vec::new();
//! write_json_to(&mut buffer, &serde_json::json!({"id": 23})).unwrap();
//! assert_eq!(String::from_utf8(buffer).unwrap(), "{\n  \"id\": 23\n}\n");
//! ```

use serde::Serialize;
use std::io::{self, Write};

/// Writes `value` as pretty-printed JSON to stdout.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json_to(&mut handle, value)
}

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes raw text, such as a campaign feed, unchanged.
pub fn write_raw(text: &str) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(handle)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        id: u64,
        name: String,
    }

    #[test]
    fn test_write_json_to_buffer() {
        let mut buffer = Vec::new();
        let sample = Sample {
            id: 23,
            name: "TonicPow".to_string(),
        };
        write_json_to(&mut buffer, &sample).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["name"], "TonicPow");
    }

    #[test]
    fn test_write_json_slice() {
        let mut buffer = Vec::new();
        write_json_to(&mut buffer, &[1, 2, 3][..]).unwrap();
        let value: Vec<u32> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value, vec![1, 2, 3]);
    }
}

//! Pretty JSON with short string arrays kept on one line.
//!
//! `serde_json`'s pretty printer puts every photo name on its own line, which
//! makes a template with hundreds of photos hard to merge by hand. This writer
//! produces the same layout except that an array made only of strings is
//! printed inline when its whole line fits within `max_width` columns:
//! indentation, the `"key": ` prefix and any trailing comma included.

use serde_json::Value;
use std::io::{self, Write};

const INDENT: &[u8] = b"  ";

/// Write `value` as indented JSON, collapsing short string arrays
pub fn write_compact<W: Write>(writer: &mut W, value: &Value, max_width: usize) -> io::Result<()> {
    write_value(writer, value, 0, 0, max_width)?;
    writer.write_all(b"\n")
}

/// Render `value` into a string
pub fn to_compact_string(value: &Value, max_width: usize) -> io::Result<String> {
    let mut buffer = Vec::new();
    write_compact(&mut buffer, value, max_width)?;
    String::from_utf8(buffer).map_err(io::Error::other)
}

/// `reserved` counts the columns already taken on the current line besides
/// indentation (key prefix and trailing comma).
fn write_value<W: Write>(
    writer: &mut W,
    value: &Value,
    depth: usize,
    reserved: usize,
    max_width: usize,
) -> io::Result<()> {
    match value {
        Value::Array(items) if items.is_empty() => writer.write_all(b"[]"),
        Value::Array(items) => {
            let available = max_width.saturating_sub(depth * INDENT.len() + reserved);
            if let Some(line) = inline_strings(items, available)? {
                return writer.write_all(line.as_bytes());
            }

            writer.write_all(b"[\n")?;
            for (position, item) in items.iter().enumerate() {
                let comma = usize::from(position + 1 < items.len());
                indent(writer, depth + 1)?;
                write_value(writer, item, depth + 1, comma, max_width)?;
                if position + 1 < items.len() {
                    writer.write_all(b",")?;
                }
                writer.write_all(b"\n")?;
            }
            indent(writer, depth)?;
            writer.write_all(b"]")
        }
        Value::Object(map) if map.is_empty() => writer.write_all(b"{}"),
        Value::Object(map) => {
            writer.write_all(b"{\n")?;
            for (position, (key, item)) in map.iter().enumerate() {
                let key = serde_json::to_string(key)?;
                let comma = usize::from(position + 1 < map.len());
                indent(writer, depth + 1)?;
                writer.write_all(key.as_bytes())?;
                writer.write_all(b": ")?;
                let reserved = key.chars().count() + 2 + comma;
                write_value(writer, item, depth + 1, reserved, max_width)?;
                if position + 1 < map.len() {
                    writer.write_all(b",")?;
                }
                writer.write_all(b"\n")?;
            }
            indent(writer, depth)?;
            writer.write_all(b"}")
        }
        scalar => serde_json::to_writer(&mut *writer, scalar).map_err(io::Error::from),
    }
}

/// `["a", "b"]` when every item is a string and the line fits
fn inline_strings(items: &[Value], available: usize) -> io::Result<Option<String>> {
    if !items.iter().all(Value::is_string) {
        return Ok(None);
    }

    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        parts.push(serde_json::to_string(item)?);
    }
    let line = format!("[{}]", parts.join(", "));

    if line.chars().count() <= available {
        Ok(Some(line))
    } else {
        Ok(None)
    }
}

fn indent<W: Write>(writer: &mut W, depth: usize) -> io::Result<()> {
    for _ in 0..depth {
        writer.write_all(INDENT)?;
    }
    Ok(())
}

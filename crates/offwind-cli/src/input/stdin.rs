use serde_json::Value;
use std::io::{self, Read};

/// Attempt to read JSON from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive).
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let Some(buffer) = read_piped()? else {
        return Ok(None);
    };
    let value: Value = serde_json::from_str(buffer.trim())?;
    Ok(Some(value))
}

/// Attempt to read raw text from stdin if data is being piped.
pub fn read_stdin_text() -> Result<Option<String>, Box<dyn std::error::Error>> {
    read_piped()
}

fn read_piped() -> Result<Option<String>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    if buffer.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(buffer))
}

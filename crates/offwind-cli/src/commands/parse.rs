use clap::Args;
use serde_json::Value;

use offwind_core::extraction;

use crate::input;

/// Arguments for report text extraction
#[derive(Args)]
pub struct ParseArgs {
    /// Path to a plain text file to extract from
    #[arg(long)]
    pub input: Option<String>,

    /// Text to extract from, passed inline
    #[arg(long)]
    pub text: Option<String>,
}

pub fn run_parse(args: ParseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let text: String = if let Some(ref path) = args.input {
        input::file::read_text(path)?
    } else if let Some(text) = args.text {
        text
    } else if let Some(piped) = input::stdin::read_stdin_text()? {
        piped
    } else {
        return Err("--input, --text or piped stdin is required".into());
    };

    let response = extraction::parse_financial_text(&text);
    Ok(serde_json::to_value(response)?)
}

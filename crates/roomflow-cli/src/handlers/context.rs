use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use serde::Serialize;
use std::fmt::Display;

/// Output settings shared by every handler.
pub struct HandlerContext {
    pub format: OutputFormat,
    /// Colored output; only when stdout is a terminal.
    pub color: bool,
}

impl HandlerContext {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: format == OutputFormat::Plain && std::io::stdout().is_terminal(),
        }
    }

    /// Print `data` as JSON, or `view` as text.
    pub fn render<T, V>(&self, data: &T, view: V) -> Result<()>
    where
        T: Serialize + ?Sized,
        V: Display,
    {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
            OutputFormat::Plain => print!("{}", view),
        }
        Ok(())
    }

    /// A one-line acknowledgement. JSON output wraps it as `{"message": ..}`.
    pub fn message(&self, message: &str) -> Result<()> {
        self.render(
            &serde_json::json!({ "message": message }),
            format_args!("{}\n", message),
        )
    }
}

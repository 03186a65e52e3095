//! Output mode routing logic.

/// Output mode determines how results are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON output only
    Json,
    /// Plain text, stable for logs and scripts
    #[default]
    Plain,
    /// Human-friendly table output (TTY only)
    Pretty,
}

impl OutputMode {
    /// Resolve output mode from flags and environment.
    ///
    /// Routing rules:
    /// 1. `--json` overrides everything
    /// 2. `--format plain|table` forces that format
    /// 3. `TERM=dumb` forces plain
    /// 4. Pretty only when stdout is a TTY
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> anyhow::Result<Self> {
        if json_flag {
            return Ok(Self::Json);
        }

        match format_flag {
            Some("plain") => return Ok(Self::Plain),
            Some("table") => return Ok(Self::Pretty),
            Some(other) => {
                return Err(anyhow::anyhow!(
                    "Unsupported format: {} (use table or plain)",
                    other
                ))
            }
            None => {}
        }

        if term_is_dumb {
            return Ok(Self::Plain);
        }

        if is_tty {
            Ok(Self::Pretty)
        } else {
            Ok(Self::Plain)
        }
    }

    /// Resolve using the real terminal state.
    pub fn detect(json_flag: bool, format_flag: Option<&str>) -> anyhow::Result<Self> {
        use std::io::IsTerminal;

        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false);
        Self::resolve(json_flag, format_flag, is_tty, term_is_dumb)
    }
}

use tracing::{debug, info, warn};

/// Which pipe a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stream {
    Stdout,
    Stderr,
}

/// Configuration for engine output logging.
///
/// Only affects what is logged; captured output is never truncated.
#[derive(Debug, Clone, Copy)]
pub struct OutputLogConfig {
    /// Max line length before truncation.
    pub max_line_length: usize,
    /// Log stdout at INFO level (false = DEBUG).
    pub stdout_info: bool,
    /// Log stderr at WARN level (false = DEBUG).
    pub stderr_warn: bool,
}

impl Default for OutputLogConfig {
    fn default() -> Self {
        Self {
            max_line_length: 4096,
            stdout_info: false,
            stderr_warn: false,
        }
    }
}

impl OutputLogConfig {
    pub(crate) fn emit(&self, step: &str, stream: Stream, line: &str) {
        let line = truncate(line.trim_end_matches(['\r', '\n']), self.max_line_length);
        match stream {
            Stream::Stdout if self.stdout_info => info!(step, "{line}"),
            Stream::Stderr if self.stderr_warn => warn!(step, "{line}"),
            Stream::Stdout => debug!(step, stream = "stdout", "{line}"),
            Stream::Stderr => debug!(step, stream = "stderr", "{line}"),
        }
    }
}

/// Cut `s` to at most `max` bytes on a char boundary.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("héllo", 2), "h");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn emit_never_panics() {
        let cfg = OutputLogConfig {
            max_line_length: 1,
            stdout_info: true,
            stderr_warn: true,
        };
        cfg.emit("build", Stream::Stdout, "ünïcode line\n");
        cfg.emit("build", Stream::Stderr, "\r\n");
        OutputLogConfig::default().emit("push", Stream::Stderr, "x");
    }
}

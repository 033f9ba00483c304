use std::{
    backtrace::{Backtrace, BacktraceStatus},
    error::Error,
    fmt::{self, Write as _},
};

/// One captured stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    function: String,
    location: Option<String>,
}

impl StackFrame {
    pub fn new(function: impl Into<String>, location: Option<String>) -> Self {
        Self {
            function: function.into(),
            location,
        }
    }

    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{} ({})", self.function, loc),
            None => f.write_str(&self.function),
        }
    }
}

/// A failure attached to a warn or error record: a one-line description,
/// the frames captured where it was observed (innermost first) and the
/// descriptions of its underlying causes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    description: String,
    frames: Vec<StackFrame>,
    causes: Vec<String>,
}

impl Failure {
    /// A failure with no frames.
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_frames(description, Vec::new())
    }

    pub fn with_frames(description: impl Into<String>, frames: Vec<StackFrame>) -> Self {
        Self {
            description: description.into(),
            frames,
            causes: Vec::new(),
        }
    }

    /// Describes `error` and its `source()` chain, capturing the current stack
    /// regardless of `RUST_BACKTRACE`.
    pub fn capture<E: Error + ?Sized>(error: &E) -> Self {
        Self::from_backtrace(error, &Backtrace::force_capture())
    }

    /// Describes `error` using an already captured backtrace. A backtrace that
    /// is disabled or unsupported contributes no frames.
    pub fn from_backtrace<E: Error + ?Sized>(error: &E, backtrace: &Backtrace) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            description: error.to_string(),
            frames: parse_backtrace(backtrace),
            causes,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    #[must_use]
    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    /// Renders the trace block appended to a record:
    ///
    /// ```text
    /// <description>
    /// \tat <function> (<location>)
    /// Caused by: <cause>
    /// ```
    ///
    /// Every line ends with `\n`. Frames keep capture order and are neither
    /// truncated nor de-duplicated.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64 + self.frames.len() * 48);
        let _ = writeln!(out, "{}", self.description);
        for frame in &self.frames {
            let _ = writeln!(out, "\tat {frame}");
        }
        for cause in &self.causes {
            let _ = writeln!(out, "Caused by: {cause}");
        }
        out
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Splits std's backtrace text into frames.
///
/// The std format numbers each frame (`  3: symbol`) and puts the source
/// location on a following `at file:line:col` line. Extra unnumbered symbol
/// lines are inlined frames and become frames of their own.
fn parse_backtrace(backtrace: &Backtrace) -> Vec<StackFrame> {
    if backtrace.status() != BacktraceStatus::Captured {
        return Vec::new();
    }
    parse_backtrace_text(&backtrace.to_string())
}

fn parse_backtrace_text(text: &str) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(loc) = line.strip_prefix("at ") {
            if let Some(last) = frames.last_mut() {
                if last.location.is_none() {
                    last.location = Some(loc.to_string());
                    continue;
                }
            }
            frames.push(StackFrame::new(line, None));
            continue;
        }
        let symbol = match line.split_once(": ") {
            Some((idx, rest)) if idx.chars().all(|c| c.is_ascii_digit()) => rest,
            _ => line,
        };
        frames.push(StackFrame::new(symbol, None));
    }
    frames
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::io;

    #[test]
    fn render_lists_description_frames_and_causes() {
        let f = Failure::with_frames(
            "io error: disk full",
            vec![
                StackFrame::new("store::flush", Some("src/store.rs:10:5".into())),
                StackFrame::new("main", None),
            ],
        )
        .with_cause("no space left on device");
        assert_eq!(
            f.render(),
            "io error: disk full\n\
             \tat store::flush (src/store.rs:10:5)\n\
             \tat main\n\
             Caused by: no space left on device\n"
        );
    }

    #[test]
    fn render_keeps_every_frame_including_repeats() {
        let recursing = StackFrame::new("walk", Some("src/tree.rs:40:9".into()));
        let mut frames = vec![recursing.clone(), recursing];
        frames.extend((0..300).map(|i| StackFrame::new(format!("depth_{i}"), None)));
        let f = Failure::with_frames("stack overflow", frames);

        let rendered = f.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 1 + 302);
        assert_eq!(lines[1], "\tat walk (src/tree.rs:40:9)");
        assert_eq!(lines[2], "\tat walk (src/tree.rs:40:9)");
        assert_eq!(lines[3], "\tat depth_0");
        assert_eq!(lines[302], "\tat depth_299");
        assert!(rendered.ends_with("\tat depth_299\n"));
    }

    #[test]
    fn failure_without_frames_renders_single_line() {
        assert_eq!(Failure::new("boom").render(), "boom\n");
    }

    #[test]
    fn disabled_backtrace_yields_no_frames() {
        let err = io::Error::other("nope");
        let f = Failure::from_backtrace(&err, &Backtrace::disabled());
        assert_eq!(f.description(), "nope");
        assert!(f.frames().is_empty());
    }

    #[test]
    fn source_chain_becomes_causes() {
        #[derive(Debug)]
        struct Outer(io::Error);
        impl fmt::Display for Outer {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("config unreadable")
            }
        }
        impl Error for Outer {
            fn source(&self) -> Option<&(dyn Error + 'static)> {
                Some(&self.0)
            }
        }

        let f = Failure::from_backtrace(
            &Outer(io::Error::other("permission denied")),
            &Backtrace::disabled(),
        );
        assert_eq!(f.description(), "config unreadable");
        assert_eq!(f.causes(), ["permission denied".to_string()]);
    }

    #[test]
    fn parses_std_backtrace_layout() {
        let text = "   0: app::inner\n             at ./src/inner.rs:4:9\n      app::inlined\n   1: app::outer\n             at ./src/outer.rs:12:5\n   2: __libc_start_main\n";
        let frames = parse_backtrace_text(text);
        assert_eq!(
            frames,
            vec![
                StackFrame::new("app::inner", Some("./src/inner.rs:4:9".into())),
                StackFrame::new("app::inlined", None),
                StackFrame::new("app::outer", Some("./src/outer.rs:12:5".into())),
                StackFrame::new("__libc_start_main", None),
            ]
        );
    }

    #[test]
    fn captured_failure_keeps_description() {
        let err = io::Error::other("captured");
        let f = Failure::capture(&err);
        assert_eq!(f.description(), "captured");
        assert!(f.render().starts_with("captured\n"));
    }
}

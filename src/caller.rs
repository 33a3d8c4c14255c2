//! Source location of the code that invoked a logging operation.
//!
//! File and line come from `#[track_caller]`, so every public logging entry
//! point must carry that attribute or the reported site shifts into this crate.
//! The enclosing function name is looked up in a backtrace of the current
//! thread by matching that file and line.

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::path::Path;

/// Lines after the call site still attributed to it.
/// Debug line tables may place a multi-line call on a later line.
const LINE_SLACK: u32 = 3;

/// File and line of a logging call site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller<'a> {
    file: &'a str,
    line: u32,
}

impl Caller<'static> {
    /// Location of the closest caller not annotated with `#[track_caller]`
    #[track_caller]
    pub fn resolve() -> Self {
        Self::from(Location::caller())
    }

    /// Placeholder for a call site that could not be determined
    pub const fn unknown() -> Self {
        Caller { file: "", line: 0 }
    }
}

impl<'a> Caller<'a> {
    pub fn new(file: &'a str, line: u32) -> Self {
        Caller { file, line }
    }

    pub fn file(&self) -> &'a str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn is_known(&self) -> bool {
        !self.file.is_empty()
    }

    /// Qualified name of the function containing this call site.
    ///
    /// Only works while that function is still on the current thread's stack,
    /// and only when the binary carries symbols and line tables.
    pub fn function_name(&self) -> Option<String> {
        if !self.is_known() {
            return None;
        }
        let backtrace = Backtrace::force_capture().to_string();
        find_function(&backtrace, self).map(str::to_string)
    }

    /// Function name when it resolves, `file:line` otherwise
    pub fn identifier(&self) -> String {
        self.function_name().unwrap_or_else(|| self.to_string())
    }
}

impl From<&'static Location<'static>> for Caller<'static> {
    fn from(location: &'static Location<'static>) -> Self {
        Caller {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Caller<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}", self.file, self.line)
        } else {
            Ok(())
        }
    }
}

/// One resolved symbol of a rendered backtrace
#[derive(Debug, PartialEq, Eq)]
struct Frame<'a> {
    function: &'a str,
    file: &'a str,
    line: u32,
}

impl Frame<'_> {
    fn matches(&self, caller: &Caller<'_>, slack: u32) -> bool {
        Path::new(self.file).ends_with(caller.file)
            && self.line >= caller.line
            && self.line <= caller.line.saturating_add(slack)
    }
}

/// Innermost frame at the call site, an exact line match winning over a near one
fn find_function<'b>(backtrace: &'b str, caller: &Caller<'_>) -> Option<&'b str> {
    let frames = parse_frames(backtrace);
    frames
        .iter()
        .find(|frame| frame.matches(caller, 0))
        .or_else(|| frames.iter().find(|frame| frame.matches(caller, LINE_SLACK)))
        .map(|frame| frame.function)
}

/// Parse the `Display` form of a backtrace:
///
/// ```text
///    3: app::worker::run
///              at ./src/worker.rs:42:9
///       app::worker::step
///              at ./src/worker.rs:17:5
/// ```
///
/// An indented symbol without an index is an inlined frame.
fn parse_frames(backtrace: &str) -> Vec<Frame<'_>> {
    let mut frames = Vec::new();
    let mut function = None;

    for line in backtrace.lines().map(str::trim) {
        if let Some(location) = line.strip_prefix("at ") {
            if let (Some(function), Some((file, line))) = (function, split_location(location)) {
                frames.push(Frame { function, file, line });
            }
        } else if !line.is_empty() {
            let symbol = match line.split_once(": ") {
                Some((index, symbol)) if index.bytes().all(|b| b.is_ascii_digit()) => symbol,
                _ => line,
            };
            function = Some(strip_hash(symbol));
        }
    }
    frames
}

/// `path:line:column` into path and line
fn split_location(location: &str) -> Option<(&str, u32)> {
    let mut parts = location.rsplitn(3, ':');
    let _column = parts.next()?;
    let line = parts.next()?.parse().ok()?;
    let file = parts.next()?;
    Some((file, line))
}

/// Drop a trailing `::h<16 hex digits>` symbol hash
fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::h") {
        Some((name, hash)) if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) => {
            name
        }
        _ => symbol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RENDERED: &str = "   0: std::backtrace::Backtrace::force_capture
             at /rustc/abc/library/std/src/backtrace.rs:312:13
   1: sl::caller::Caller::function_name
             at ./src/caller.rs:61:25
   2: app::worker::step::h0123456789abcdef
             at ./src/worker.rs:17:5
      app::worker::run
             at ./src/worker.rs:42:9
   3: app::main
             at ./src/main.rs:8:5
   4: <unknown>
";

    #[track_caller]
    fn wrapper() -> Caller<'static> {
        Caller::resolve()
    }

    fn reporting_site() -> Option<String> {
        Caller::resolve().function_name()
    }

    #[test]
    fn test_resolve_points_here() {
        let expected_line = line!() + 1;
        let caller = Caller::resolve();
        assert_eq!(caller.file(), file!());
        assert_eq!(caller.line(), expected_line);
    }

    #[test]
    fn test_resolve_through_wrapper() {
        let expected_line = line!() + 1;
        let caller = wrapper();
        assert_eq!(caller.file(), file!());
        assert_eq!(caller.line(), expected_line);
    }

    #[test]
    fn test_display() {
        assert_eq!(Caller::new("src/main.rs", 42).to_string(), "src/main.rs:42");
        assert_eq!(Caller::unknown().to_string(), "");
        assert!(!Caller::unknown().is_known());
    }

    #[test]
    fn test_parse_frames() {
        let frames = parse_frames(RENDERED);
        assert_eq!(frames.len(), 5);
        assert_eq!(
            frames[2],
            Frame {
                function: "app::worker::step",
                file: "./src/worker.rs",
                line: 17
            }
        );
        assert_eq!(frames[3].function, "app::worker::run");
    }

    #[test]
    fn test_find_function_by_file_and_line() {
        assert_eq!(
            find_function(RENDERED, &Caller::new("src/worker.rs", 42)),
            Some("app::worker::run")
        );
        assert_eq!(
            find_function(RENDERED, &Caller::new("src/main.rs", 8)),
            Some("app::main")
        );
    }

    #[test]
    fn test_find_function_near_line() {
        assert_eq!(
            find_function(RENDERED, &Caller::new("src/worker.rs", 15)),
            Some("app::worker::step")
        );
        assert_eq!(find_function(RENDERED, &Caller::new("src/worker.rs", 30)), None);
        assert_eq!(find_function(RENDERED, &Caller::new("src/other.rs", 17)), None);
    }

    #[test]
    fn test_function_name_of_live_caller() {
        let name = reporting_site().expect("test binaries carry debug info");
        assert!(name.ends_with("reporting_site"), "unexpected name: {}", name);
    }

    #[test]
    fn test_identifier_falls_back_to_location() {
        assert_eq!(Caller::new("src/worker.rs", 88).identifier(), "src/worker.rs:88");
        assert_eq!(Caller::unknown().function_name(), None);
    }
}

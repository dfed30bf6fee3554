//! The run context handed to every suite, and the console sink the runner
//! and suites write through.
//!
//! The context bundles the two helper surfaces every test callable receives:
//! `t`, a [`Reporter`] that records check outcomes and emits their console
//! markers, and `u`, a [`Toolbox`] of shared utility state. Whether one
//! context serves a whole run or each suite gets a fresh one is decided by
//! [`ContextPolicy`], not by hidden globals.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// ============================================================================
// CONSOLE SINKS
// ============================================================================

/// Destination for line-oriented harness output.
pub trait ConsoleSink {
    fn emit(&mut self, line: &str);
}

/// StdoutSink: writes each line to stdout for CLI and default runner use.
pub struct StdoutSink;

impl ConsoleSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// BufferSink: collects lines for testing or programmatic capture.
#[derive(Default)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl ConsoleSink for BufferSink {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Shared handle to a sink.
///
/// The runner and every reporter write through the same handle, so suite
/// headers and check markers interleave in run order.
#[derive(Clone)]
pub struct SharedSink(pub Rc<RefCell<dyn ConsoleSink>>);

impl SharedSink {
    pub fn stdout() -> Self {
        SharedSink(Rc::new(RefCell::new(StdoutSink)))
    }

    pub fn emit(&self, line: &str) {
        self.0.borrow_mut().emit(line);
    }
}

// ============================================================================
// REPORTER (the `t` surface)
// ============================================================================

/// Records check outcomes and emits their console markers.
///
/// `ok` emits the bare success marker; `fail` is its explicit counterpart.
/// A suite whose reporter recorded any failure is treated as failed by the
/// runner even when its test callable returned `Ok`.
pub struct Reporter {
    sink: SharedSink,
    oks: usize,
    failures: Vec<String>,
}

impl Reporter {
    pub(crate) fn new(sink: SharedSink) -> Self {
        Self {
            sink,
            oks: 0,
            failures: Vec::new(),
        }
    }

    /// Records a successful check and prints its marker.
    pub fn ok(&mut self) {
        self.sink.emit("ok");
        self.oks += 1;
    }

    /// Records a failed check and prints its marker.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.sink.emit(&format!("not ok: {}", message));
        self.failures.push(message);
    }

    /// Total checks recorded so far, successful or not.
    pub fn checks(&self) -> usize {
        self.oks + self.failures.len()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Marks the current tallies so per-suite deltas can be computed under a
    /// shared context.
    pub fn snapshot(&self) -> ReporterSnapshot {
        ReporterSnapshot {
            oks: self.oks,
            failures: self.failures.len(),
        }
    }

    /// Successful checks recorded since the snapshot was taken.
    pub fn oks_since(&self, mark: &ReporterSnapshot) -> usize {
        self.oks - mark.oks
    }

    /// Failure messages recorded since the snapshot was taken.
    pub fn failures_since(&self, mark: &ReporterSnapshot) -> &[String] {
        &self.failures[mark.failures..]
    }
}

/// Tally marker taken before a suite runs.
#[derive(Debug, Clone, Copy)]
pub struct ReporterSnapshot {
    oks: usize,
    failures: usize,
}

// ============================================================================
// TOOLBOX (the `u` surface)
// ============================================================================

/// Typed key-value store for utility and cleanup state.
///
/// Empty by default; populated by whoever extends the harness. Values are
/// stored type-erased and recovered with the type they were inserted as.
#[derive(Default)]
pub struct Toolbox {
    entries: HashMap<String, Box<dyn Any>>,
}

impl Toolbox {
    pub fn insert<T: Any>(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(key.into(), Box::new(value));
    }

    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.entries.get(key)?.downcast_ref()
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key)?.downcast_mut()
    }

    /// Removes and returns an entry, if it exists with the requested type.
    pub fn remove<T: Any>(&mut self, key: &str) -> Option<T> {
        let boxed = self.entries.remove(key)?.downcast::<T>().ok()?;
        Some(*boxed)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Explicit run context passed by reference into every suite invocation.
pub struct TestContext {
    pub t: Reporter,
    pub u: Toolbox,
}

impl TestContext {
    pub fn new(sink: SharedSink) -> Self {
        Self {
            t: Reporter::new(sink),
            u: Toolbox::default(),
        }
    }
}

/// Whether one context serves the whole run or each suite gets a fresh one.
///
/// `Shared` means toolbox state written by one suite is visible to the next;
/// `PerSuite` rebuilds the context (over the same sink) for every suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextPolicy {
    #[default]
    Shared,
    PerSuite,
}

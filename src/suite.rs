//! Suite records: the unit of registered work.

use std::fmt;

use crate::context::TestContext;

/// Explicit failure value returned by hooks and tests.
///
/// `expected`/`actual` are optional; when both are present the report renders
/// a line diff alongside the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteFailure {
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl SuiteFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// A failure carrying the expected/actual pair that powers diff output.
    pub fn mismatch(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            expected: Some(expected.into()),
            actual: Some(actual.into()),
        }
    }
}

impl fmt::Display for SuiteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A zero-argument lifecycle hook.
///
/// Hooks share state with their test by capturing it at construction time.
pub type Hook = Box<dyn Fn() -> Result<(), SuiteFailure>>;

/// The mandatory test callable.
pub type TestFn = Box<dyn Fn(&mut TestContext) -> Result<(), SuiteFailure>>;

/// A named test suite with its lifecycle callables.
///
/// The test callable is required by construction; `before` and `after` are
/// optional and bracket it. A suite is immutable once registered and runs at
/// most once per run.
pub struct Suite {
    pub(crate) name: String,
    pub(crate) before: Option<Hook>,
    pub(crate) test: TestFn,
    pub(crate) after: Option<Hook>,
}

impl Suite {
    pub fn new(
        name: impl Into<String>,
        test: impl Fn(&mut TestContext) -> Result<(), SuiteFailure> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            before: None,
            test: Box::new(test),
            after: None,
        }
    }

    /// Attaches the hook run immediately before the test callable.
    pub fn before(mut self, hook: impl Fn() -> Result<(), SuiteFailure> + 'static) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    /// Attaches the hook run immediately after a successful test callable.
    pub fn after(mut self, hook: impl Fn() -> Result<(), SuiteFailure> + 'static) -> Self {
        self.after = Some(Box::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_before(&self) -> bool {
        self.before.is_some()
    }

    pub fn has_after(&self) -> bool {
        self.after.is_some()
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_attaches_optional_hooks() {
        let bare = Suite::new("bare", |_ctx| Ok(()));
        assert!(!bare.has_before());
        assert!(!bare.has_after());

        let bracketed = Suite::new("bracketed", |_ctx| Ok(()))
            .before(|| Ok(()))
            .after(|| Ok(()));
        assert!(bracketed.has_before());
        assert!(bracketed.has_after());
        assert_eq!(bracketed.name(), "bracketed");
    }

    #[test]
    fn mismatch_carries_expected_and_actual() {
        let failure = SuiteFailure::mismatch("readback", "Some(3)", "None");
        assert_eq!(failure.expected.as_deref(), Some("Some(3)"));
        assert_eq!(failure.actual.as_deref(), Some("None"));
        assert_eq!(failure.to_string(), "readback");
    }
}

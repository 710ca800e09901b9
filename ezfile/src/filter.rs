//! Line filter hook

/// Predicate deciding whether a line is of interest
///
/// A stream stores at most one filter and reports whether it has one, but
/// never applies it: every line of the source is still yielded. Callers that
/// want filtered output combine the hook with iteration themselves.
///
/// Closures implement the trait:
///
/// ```rust
/// use ezfile::LineFilter;
///
/// let non_blank = |line: &str| !line.trim().is_empty();
/// assert!(non_blank.accept("text"));
/// assert!(!non_blank.accept("   "));
/// ```
pub trait LineFilter: Send {
    /// Return `true` to keep the line
    fn accept(&self, line: &str) -> bool;
}

impl<F> LineFilter for F
where
    F: Fn(&str) -> bool + Send,
{
    fn accept(&self, line: &str) -> bool {
        self(line)
    }
}

//! Utility macros used across the crate.

/// Early-returns `Err($error)` unless `$predicate` holds.
///
/// Like `assert!`, but for conditions that are the peer's fault rather than a bug.
///
/// ```ignore
/// ensure!(tokens.next().is_none(), ParseError::malformed_request_line(line));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

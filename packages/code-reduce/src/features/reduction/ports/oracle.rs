//! Oracle port
//!
//! The single source of truth for acceptability. Implementations see the
//! program only through what has been flushed to disk under `workdir`.

use std::path::Path;

use crate::errors::OracleError;

pub trait Oracle {
    /// `Ok(true)` when the property of interest still holds.
    ///
    /// Errors are never fatal to a run; the search treats them as `false`.
    fn check(&mut self, workdir: &Path) -> Result<bool, OracleError>;
}

impl<F> Oracle for F
where
    F: FnMut(&Path) -> Result<bool, OracleError>,
{
    fn check(&mut self, workdir: &Path) -> Result<bool, OracleError> {
        self(workdir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_an_oracle() {
        let mut calls = 0;
        let mut oracle = |_: &Path| -> Result<bool, OracleError> {
            calls += 1;
            Ok(calls % 2 == 1)
        };
        assert!(oracle.check(Path::new(".")).unwrap());
        assert!(!oracle.check(Path::new(".")).unwrap());
    }
}

//! The tri-state result spec §7 uses throughout the external-collaborator
//! boundary: `cancel` (a user dismissed a dialog) is not an error and must
//! not be folded into `Result`'s single failure channel, since callers
//! need to tell "the user said no" apart from "the operation broke."

use crate::error::IoError;

#[derive(Debug)]
pub enum Outcome<T> {
    Ok(T),
    Cancel,
    Error(IoError),
}

impl<T> Outcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn is_cancel(&self) -> bool {
        matches!(self, Outcome::Cancel)
    }

    /// Converts to `Result`, folding `Cancel` into `Ok(None)` for callers
    /// that only care whether the operation completed.
    pub fn into_option(self) -> Result<Option<T>, IoError> {
        match self {
            Outcome::Ok(v) => Ok(Some(v)),
            Outcome::Cancel => Ok(None),
            Outcome::Error(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_becomes_ok_none() {
        let o: Outcome<()> = Outcome::Cancel;
        assert_eq!(o.into_option().unwrap(), None);
    }

    #[test]
    fn ok_becomes_ok_some() {
        let o = Outcome::Ok(42);
        assert_eq!(o.into_option().unwrap(), Some(42));
    }

    #[test]
    fn error_propagates() {
        let o: Outcome<()> = Outcome::Error(IoError::NotFound("x.sch".into()));
        assert!(o.into_option().is_err());
    }
}

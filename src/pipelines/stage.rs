//! Stages of one `encrypt` call.

use crate::infra::error::ErrorKind;
use std::fmt;

/// Strictly sequential pipeline state.
///
/// `Idle -> Encoding -> Signing -> Normalizing -> Encrypting -> Wrapping -> Done`,
/// with `Failed` reachable from any non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Encoding,
    Signing,
    Normalizing,
    Encrypting,
    Wrapping,
    Done,
    Failed(ErrorKind),
}

impl PipelineStage {
    /// The stage that follows a successful run of this one.
    /// Terminal stages map to themselves.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            PipelineStage::Idle => PipelineStage::Encoding,
            PipelineStage::Encoding => PipelineStage::Signing,
            PipelineStage::Signing => PipelineStage::Normalizing,
            PipelineStage::Normalizing => PipelineStage::Encrypting,
            PipelineStage::Encrypting => PipelineStage::Wrapping,
            PipelineStage::Wrapping | PipelineStage::Done => PipelineStage::Done,
            PipelineStage::Failed(kind) => PipelineStage::Failed(kind),
        }
    }

    /// Transition taken when the current stage fails.
    #[must_use]
    pub fn fail(self, kind: ErrorKind) -> Self {
        if self.is_terminal() {
            self
        } else {
            PipelineStage::Failed(kind)
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed(_))
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Idle => f.write_str("idle"),
            PipelineStage::Encoding => f.write_str("encoding"),
            PipelineStage::Signing => f.write_str("signing"),
            PipelineStage::Normalizing => f.write_str("normalizing"),
            PipelineStage::Encrypting => f.write_str("encrypting"),
            PipelineStage::Wrapping => f.write_str("wrapping"),
            PipelineStage::Done => f.write_str("done"),
            PipelineStage::Failed(kind) => write!(f, "failed ({kind})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_order() {
        let mut stage = PipelineStage::Idle;
        let mut seen = vec![stage];
        while !stage.is_terminal() {
            stage = stage.next();
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![
                PipelineStage::Idle,
                PipelineStage::Encoding,
                PipelineStage::Signing,
                PipelineStage::Normalizing,
                PipelineStage::Encrypting,
                PipelineStage::Wrapping,
                PipelineStage::Done,
            ]
        );
    }

    #[test]
    fn test_failure_is_terminal() {
        let failed = PipelineStage::Signing.fail(ErrorKind::SigningFailed);
        assert_eq!(failed, PipelineStage::Failed(ErrorKind::SigningFailed));
        assert_eq!(failed.next(), failed);
        assert_eq!(failed.fail(ErrorKind::Io), failed);
        assert_eq!(PipelineStage::Done.fail(ErrorKind::Io), PipelineStage::Done);
        assert_eq!(failed.to_string(), "failed (signing failed)");
    }
}

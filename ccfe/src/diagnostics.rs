// SPDX-License-Identifier: GPL-3.0-or-later

//! Diagnostics produced during switch processing.
//!
//! Command-line problems are never fatal. Every diagnostic is accumulated
//! and processing continues with the offending token skipped, so the pass
//! always completes and always produces a configuration. The caller decides
//! whether the accumulated diagnostics warrant aborting the compilation.

use serde::Serialize;

/// The kind of a recoverable command-line problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
pub enum DiagnosticKind {
    /// No entry of the top-level switch table matched.
    #[error("invalid switch")]
    InvalidSwitch,
    /// No entry of a nested sub-switch table matched.
    #[error("invalid {family} sub-switch")]
    InvalidSubSwitch { family: &'static str },
    /// A second bare file name was supplied; the earlier one is discarded.
    #[error("only one source file may be compiled")]
    DuplicateSourceFile,
    /// An `@name` reference named neither an environment variable nor a
    /// readable file.
    #[error("no environment variable or file for indirection")]
    MissingExpansion,
}

/// A recorded problem together with the source text it was reported against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub offending: String,
}

/// Accumulator threaded through parsing and resolution.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn report(&mut self, kind: DiagnosticKind, offending: &str) {
        log::debug!("diagnostic: {kind} at {offending:?}");
        self.items.push(Diagnostic {
            kind,
            offending: offending.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_accumulates_in_order() {
        let mut diags = Diagnostics::default();
        diags.report(DiagnosticKind::InvalidSwitch, "-frobnicate");
        diags.report(DiagnosticKind::DuplicateSourceFile, "b.c");

        assert_eq!(diags.len(), 2);
        let items: Vec<_> = diags.iter().collect();
        assert_eq!(items[0].kind, DiagnosticKind::InvalidSwitch);
        assert_eq!(items[0].offending, "-frobnicate");
        assert_eq!(items[1].kind, DiagnosticKind::DuplicateSourceFile);
    }

    #[test]
    fn test_sub_switch_kind_names_the_family() {
        let kind = DiagnosticKind::InvalidSubSwitch {
            family: "optimization",
        };
        assert_eq!(kind.to_string(), "invalid optimization sub-switch");
    }
}

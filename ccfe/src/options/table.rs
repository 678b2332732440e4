// SPDX-License-Identifier: GPL-3.0-or-later

//! Switch table representation and the prefix matcher.
//!
//! A table entry is written as a compact pattern string, the same notation
//! throughout:
//!
//! - the leading literal matches case-insensitively, except that an
//!   upper-case pattern letter requires the exact character;
//! - `=` after the literal consumes one optional equals-like character;
//! - `#` collects a decimal number into the entry's payload;
//! - `$` collects an identifier;
//! - `@` collects a (possibly quoted) file name;
//! - `*` leaves the rest of the switch to the handler.
//!
//! Patterns are parsed once when a table is built. Entries are tried in
//! table order and the first structural match wins, so order encodes
//! precedence: more specific prefixes must precede their shorter
//! sub-strings.

use super::actions::{self, Action};
use super::scan::{is_option_delimiter, Scanner};
use super::ParseContext;
use crate::diagnostics::DiagnosticKind;

/// The declared shape of a switch argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgShape {
    None,
    Decimal,
    Identifier,
    Filename,
    /// The handler scans the remaining characters itself.
    Rest,
}

/// A parsed switch pattern.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub literal: &'static str,
    pub opt_eq: bool,
    pub shape: ArgShape,
}

impl OptionSpec {
    /// Split a compact pattern into its literal prefix and argument shape.
    /// The first character is always literal; marker characters are only
    /// recognized after it, so a table can bind `=` or `#` themselves.
    fn parse(pattern: &'static str) -> Self {
        let bytes = pattern.as_bytes();
        let mut lit_end = bytes.len();
        let mut opt_eq = false;
        let mut shape = ArgShape::None;
        let mut i = 1;
        while i < bytes.len() {
            match bytes[i] {
                b'=' => {
                    lit_end = lit_end.min(i);
                    opt_eq = true;
                }
                b'#' => {
                    lit_end = lit_end.min(i);
                    shape = ArgShape::Decimal;
                }
                b'$' => {
                    lit_end = lit_end.min(i);
                    shape = ArgShape::Identifier;
                }
                b'@' => {
                    lit_end = lit_end.min(i);
                    shape = ArgShape::Filename;
                }
                b'*' => {
                    lit_end = lit_end.min(i);
                    shape = ArgShape::Rest;
                }
                _ => {}
            }
            i += 1;
        }
        Self {
            literal: &pattern[..lit_end],
            opt_eq,
            shape,
        }
    }
}

/// One switch table entry: pattern, numeric payload, handler identifier.
/// The payload is either delivered to the handler as-is or overwritten by
/// a parsed decimal argument.
#[derive(Debug, Clone, Copy)]
pub struct OptionRule {
    pub spec: OptionSpec,
    pub value: u32,
    pub action: Action,
}

impl OptionRule {
    pub fn new(pattern: &'static str, value: u32, action: Action) -> Self {
        Self {
            spec: OptionSpec::parse(pattern),
            value,
            action,
        }
    }
}

/// An ordered switch table. `family` is `None` for the top-level table and
/// names the sub-switch family otherwise, for diagnostics.
#[derive(Debug)]
pub struct OptionTable {
    pub family: Option<&'static str>,
    pub rules: Vec<OptionRule>,
}

/// The argument carved out for a matched entry.
#[derive(Debug, Clone, Copy)]
pub struct Matched<'a> {
    pub value: u32,
    pub parm: &'a str,
}

/// Try one entry at the scanner's position. Returns the cursor position
/// after the consumed argument and the extracted argument on success.
fn try_match<'a>(
    rule: &OptionRule,
    sc: &Scanner<'a>,
    first_in_switch: bool,
) -> Option<(usize, Matched<'a>)> {
    let mut probe = sc.clone();
    for pc in rule.spec.literal.bytes() {
        let ic = probe.peek()?;
        let matches = if pc.is_ascii_uppercase() {
            ic == pc
        } else {
            ic.to_ascii_lowercase() == pc
        };
        if !matches {
            return None;
        }
        probe.bump();
    }
    if rule.spec.opt_eq {
        probe.accept_equal();
    }
    let mut value = rule.value;
    let mut parm = "";
    match rule.spec.shape {
        ArgShape::None => {}
        ArgShape::Decimal => {
            let start = probe.pos();
            if let Some(v) = probe.scan_decimal() {
                value = v;
            }
            parm = probe.slice_from(start);
        }
        ArgShape::Identifier => parm = probe.scan_identifier(),
        ArgShape::Filename => parm = probe.scan_filename(),
        ArgShape::Rest => {}
    }
    // A switch matched directly behind its introducer must end at a
    // delimiter, so a short entry cannot swallow the head of a longer,
    // unrelated switch. Greedy entries validate their own tail.
    if rule.spec.shape != ArgShape::Rest && first_in_switch && !is_option_delimiter(probe.peek()) {
        return None;
    }
    Some((probe.pos(), Matched { value, parm }))
}

/// Advance past the unmatchable text, up to the next structural delimiter.
fn resync(sc: &mut Scanner<'_>) {
    while !is_option_delimiter(sc.peek()) {
        sc.bump();
    }
}

/// Dispatch one switch at the scanner's position against a table.
///
/// `switch_start` is the position of the switch introducer, used both for
/// the delimiter rule above and for diagnostics. A failed lookup reports
/// an invalid switch (or sub-switch) and resynchronizes to the next
/// delimiter.
pub(crate) fn process_option(
    table: &OptionTable,
    sc: &mut Scanner<'_>,
    switch_start: usize,
    ctx: &mut ParseContext<'_>,
) {
    let first_in_switch = sc.pos() == switch_start + 1;
    for rule in &table.rules {
        if let Some((end, matched)) = try_match(rule, sc, first_in_switch) {
            sc.set_pos(end);
            actions::apply(rule.action, matched, sc, switch_start, ctx);
            return;
        }
    }
    match table.family {
        Some(family) => {
            let from = sc.pos();
            resync(sc);
            ctx.diags
                .report(DiagnosticKind::InvalidSubSwitch { family }, sc.slice_from(from));
        }
        None => {
            resync(sc);
            ctx.diags
                .report(DiagnosticKind::InvalidSwitch, sc.slice_from(switch_start));
        }
    }
}

/// Re-enter a sub-table until the cursor reaches a delimiter; this is what
/// lets one switch chain several sub-switch codes.
pub(crate) fn process_sub_option(
    table: &OptionTable,
    sc: &mut Scanner<'_>,
    switch_start: usize,
    ctx: &mut ParseContext<'_>,
) {
    loop {
        process_option(table, sc, switch_start, ctx);
        if is_option_delimiter(sc.peek()) {
            break;
        }
    }
}

/// Used by handlers that consume trailing characters themselves: anything
/// left before the next delimiter makes the whole switch invalid.
pub(crate) fn ensure_end_of_switch(
    sc: &mut Scanner<'_>,
    switch_start: usize,
    ctx: &mut ParseContext<'_>,
) {
    if !is_option_delimiter(sc.peek()) {
        resync(sc);
        ctx.diags
            .report(DiagnosticKind::InvalidSwitch, sc.slice_from(switch_start));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_parse_plain_literal() {
        let spec = OptionSpec::parse("zq");
        assert_eq!(spec.literal, "zq");
        assert!(!spec.opt_eq);
        assert_eq!(spec.shape, ArgShape::None);
    }

    #[test]
    fn test_spec_parse_markers_after_literal() {
        let spec = OptionSpec::parse("zku=#");
        assert_eq!(spec.literal, "zku");
        assert!(spec.opt_eq);
        assert_eq!(spec.shape, ArgShape::Decimal);

        let spec = OptionSpec::parse("bt=$");
        assert_eq!(spec.literal, "bt");
        assert_eq!(spec.shape, ArgShape::Identifier);

        let spec = OptionSpec::parse("fi=@");
        assert_eq!(spec.literal, "fi");
        assert_eq!(spec.shape, ArgShape::Filename);

        let spec = OptionSpec::parse("u$");
        assert_eq!(spec.literal, "u");
        assert!(!spec.opt_eq);
        assert_eq!(spec.shape, ArgShape::Identifier);
    }

    #[test]
    fn test_spec_parse_first_char_is_always_literal() {
        // a table can bind the equals-like characters themselves
        let spec = OptionSpec::parse("=");
        assert_eq!(spec.literal, "=");
        assert_eq!(spec.shape, ArgShape::None);
        let spec = OptionSpec::parse("#");
        assert_eq!(spec.literal, "#");
    }

    #[test]
    fn test_spec_parse_plus_is_literal() {
        let spec = OptionSpec::parse("l+");
        assert_eq!(spec.literal, "l+");
        let spec = OptionSpec::parse("d+*");
        assert_eq!(spec.literal, "d+");
        assert_eq!(spec.shape, ArgShape::Rest);
    }

    fn rule(pattern: &'static str) -> OptionRule {
        OptionRule::new(pattern, 7, Action::Quiet)
    }

    #[test]
    fn test_match_case_insensitive_by_default() {
        let sc = Scanner::new("ZQ");
        let (end, m) = try_match(&rule("zq"), &sc, true).expect("must match");
        assert_eq!(end, 2);
        assert_eq!(m.value, 7);
    }

    #[test]
    fn test_match_upper_case_pattern_requires_exact_case() {
        // `zA` and `za` can share a table as distinct families
        let strict = rule("zA");
        assert!(try_match(&strict, &Scanner::new("zA"), true).is_some());
        assert!(try_match(&strict, &Scanner::new("za"), true).is_none());
        assert!(try_match(&strict, &Scanner::new("ZA"), true).is_some());
    }

    #[test]
    fn test_single_letter_requires_delimiter() {
        let single = rule("d");
        assert!(try_match(&single, &Scanner::new("debug"), true).is_none());
        assert!(try_match(&single, &Scanner::new("d "), true).is_some());
        assert!(try_match(&single, &Scanner::new("d-x"), true).is_some());
        assert!(try_match(&single, &Scanner::new("d"), true).is_some());
    }

    #[test]
    fn test_chained_sub_switch_position_skips_delimiter_rule() {
        // not the first option in the switch: "x" inside "-oax" chains
        let single = rule("a");
        assert!(try_match(&single, &Scanner::new("ax"), false).is_some());
    }

    #[test]
    fn test_decimal_overwrites_payload_only_when_present() {
        let r = rule("e=#");
        let (_, m) = try_match(&r, &Scanner::new("e=25"), true).expect("must match");
        assert_eq!(m.value, 25);
        let (_, m) = try_match(&r, &Scanner::new("e"), true).expect("must match");
        assert_eq!(m.value, 7);
    }

    #[test]
    fn test_identifier_and_filename_spans() {
        let r = rule("bt=$");
        let (_, m) = try_match(&r, &Scanner::new("bt=LINUX -od"), true).expect("must match");
        assert_eq!(m.parm, "LINUX");

        let r = rule("fo=@");
        let (_, m) = try_match(&r, &Scanner::new("fo=\"a b.obj\" next"), true).expect("must match");
        assert_eq!(m.parm, "\"a b.obj\"");
    }

    #[test]
    fn test_trailing_garbage_rejects_the_entry() {
        let r = rule("e=#");
        assert!(try_match(&r, &Scanner::new("e=25x"), true).is_none());
    }
}

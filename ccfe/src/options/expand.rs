// SPDX-License-Identifier: GPL-3.0-or-later

//! The outer driver over one command-line source.
//!
//! A source string is split left to right into switches and bare file
//! names. An `@name` token is substituted transparently: the name is
//! looked up as an environment variable first, then read as a file, and
//! scanning continues inside the replacement text. Replacements nest up to
//! a fixed depth on an explicit bounded stack; when a pushed source is
//! exhausted its buffer is dropped and scanning resumes in the parent
//! exactly where it left off.

use super::scan::{strip_quotes, Scanner};
use super::table::process_option;
use super::tables::cfe_options;
use super::ParseContext;
use crate::diagnostics::DiagnosticKind;
use std::io;

/// Depth bound for nested indirection. A deeper chain is not an error:
/// the reference stays un-expanded and processing carries on, which keeps
/// the worst-case memory of the pass constant.
pub const MAX_NESTING: usize = 32;

/// Where the expander finds environment variables and indirect files.
/// A seam for tests; production code uses [`SystemSource`].
pub trait SourceProvider {
    fn env(&self, name: &str) -> Option<String>;
    fn read_file(&self, path: &str) -> io::Result<String>;
}

/// [`SourceProvider`] over the real process environment and file system.
pub struct SystemSource;

impl SourceProvider for SystemSource {
    fn env(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn read_file(&self, path: &str) -> io::Result<String> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Line endings become blanks so the scanner never sees one, and an
/// explicit end-of-text marker truncates the rest of the file.
fn normalize_indirect(text: &str) -> String {
    let cut = text.find('\x1a').unwrap_or(text.len());
    text[..cut]
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect()
}

/// Collect the token after an `@`: up to a blank, a switch introducer, or
/// the end of input.
fn collect_env_or_file<'a>(sc: &mut Scanner<'a>) -> &'a str {
    sc.skip_blanks();
    let start = sc.pos();
    while let Some(b) = sc.peek() {
        if matches!(b, b' ' | b'\t' | b'-' | b'/') {
            break;
        }
        sc.bump();
    }
    sc.slice_from(start)
}

/// One pending source: its text and the cursor to resume at.
struct Frame {
    text: String,
    pos: usize,
}

enum Step {
    Exhausted,
    Token,
    FileName(String),
    Indirect(String),
}

/// Run one source string (an environment default or one command-line
/// argument) through switch dispatch, with `@` expansion.
pub(crate) fn process_source(
    ctx: &mut ParseContext<'_>,
    provider: &dyn SourceProvider,
    input: &str,
) {
    let mut stack = vec![Frame {
        text: input.to_string(),
        pos: 0,
    }];
    while let Some(mut frame) = stack.pop() {
        let step = {
            let mut sc = Scanner::new(&frame.text);
            sc.set_pos(frame.pos);
            sc.skip_blanks();
            let step = match sc.peek() {
                None => Step::Exhausted,
                Some(b'@') => {
                    sc.bump();
                    Step::Indirect(collect_env_or_file(&mut sc).to_string())
                }
                Some(b'-') | Some(b'/') => {
                    let switch_start = sc.pos();
                    sc.bump();
                    process_option(cfe_options(ctx.state.arch), &mut sc, switch_start, ctx);
                    Step::Token
                }
                Some(_) => Step::FileName(sc.scan_filename().to_string()),
            };
            frame.pos = sc.pos();
            step
        };
        match step {
            // buffer of the finished source is released here; the parent
            // frame below it resumes at its saved cursor
            Step::Exhausted => {}
            Step::Token => stack.push(frame),
            Step::FileName(raw) => {
                let name = strip_quotes(&raw);
                if ctx.state.source_file.is_some() {
                    ctx.diags.report(DiagnosticKind::DuplicateSourceFile, &name);
                }
                ctx.state.source_file = Some(name);
                stack.push(frame);
            }
            Step::Indirect(token) => {
                stack.push(frame);
                if stack.len() > MAX_NESTING {
                    log::warn!("indirection deeper than {MAX_NESTING}, '@{token}' not expanded");
                } else if let Some(value) = provider.env(&token) {
                    log::debug!("expanding '@{token}' from the environment");
                    stack.push(Frame {
                        text: value,
                        pos: 0,
                    });
                } else {
                    match provider.read_file(&token) {
                        Ok(content) => {
                            log::debug!("expanding '@{token}' from a file");
                            stack.push(Frame {
                                text: normalize_indirect(&content),
                                pos: 0,
                            });
                        }
                        Err(error) => {
                            log::debug!("cannot expand '@{token}': {error}");
                            ctx.diags.report(DiagnosticKind::MissingExpansion, &token);
                        }
                    }
                }
            }
        }
    }
}

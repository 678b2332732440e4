// SPDX-License-Identifier: GPL-3.0-or-later

//! The command line interface of the driver binary.
//!
//! Only the driver's own surface lives here (verbosity, architecture,
//! output location); the compiler switch grammar itself is implemented by
//! [`crate::options`] and receives the trailing arguments untouched.

use crate::target::TargetArch;
use anyhow::anyhow;
use clap::{arg, command, ArgAction, ArgMatches, Command};

/// Structured form of the driver invocation.
#[derive(Debug, PartialEq)]
pub struct Arguments {
    pub verbose: u8,
    pub arch: TargetArch,
    /// Fallback target-system name; defaults to the build host.
    pub system: Option<String>,
    /// Where the resolved configuration goes; stdout when absent.
    pub output: Option<String>,
    /// The compiler command line to interpret.
    pub command: Vec<String>,
}

impl TryFrom<ArgMatches> for Arguments {
    type Error = anyhow::Error;

    fn try_from(matches: ArgMatches) -> Result<Self, Self::Error> {
        let verbose = matches.get_count("verbose");
        let arch = match matches.get_one::<String>("arch").map(String::as_str) {
            None | Some("i386") | Some("386") => TargetArch::I386,
            Some("i86") | Some("86") => TargetArch::I86,
            Some(other) => return Err(anyhow!("unrecognized architecture '{other}'")),
        };
        let system = matches.get_one::<String>("system").map(String::to_string);
        let output = matches.get_one::<String>("output").map(String::to_string);
        let command = matches
            .get_many::<String>("COMMAND")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        Ok(Arguments {
            verbose,
            arch,
            system,
            output,
            command,
        })
    }
}

/// Describes how the user interacts with the driver.
pub fn cli() -> Command {
    command!().args(&[
        arg!(-v --verbose ... "Sets the level of verbosity").action(ArgAction::Count),
        arg!(-a --arch <ARCH> "Target architecture, i86 or i386").default_value("i386"),
        arg!(-b --system <NAME> "Target system used when no bt switch is given"),
        arg!(-o --output <FILE> "Write the resolved configuration to FILE"),
        arg!([COMMAND] "Compiler switches and the source file")
            .action(ArgAction::Append)
            .num_args(0..)
            .last(true),
    ])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let matches = cli().get_matches_from(vec!["ccfe"]);
        let arguments = Arguments::try_from(matches).unwrap();

        assert_eq!(
            arguments,
            Arguments {
                verbose: 0,
                arch: TargetArch::I386,
                system: None,
                output: None,
                command: vec![],
            }
        );
    }

    #[test]
    fn test_full_invocation() {
        let matches = cli().get_matches_from(vec![
            "ccfe", "-a", "i86", "-b", "DOS", "-o", "out.json", "--", "-zq", "-ml", "main.c",
        ]);
        let arguments = Arguments::try_from(matches).unwrap();

        assert_eq!(
            arguments,
            Arguments {
                verbose: 0,
                arch: TargetArch::I86,
                system: Some("DOS".into()),
                output: Some("out.json".into()),
                command: vec!["-zq", "-ml", "main.c"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            }
        );
    }

    #[test]
    fn test_unknown_architecture_is_rejected() {
        let matches = cli().get_matches_from(vec!["ccfe", "-a", "sparc"]);
        assert!(Arguments::try_from(matches).is_err());
    }

    #[test]
    fn test_verbosity_accumulates() {
        let matches = cli().get_matches_from(vec!["ccfe", "-v", "-v"]);
        let arguments = Arguments::try_from(matches).unwrap();
        assert_eq!(arguments.verbose, 2);
    }
}

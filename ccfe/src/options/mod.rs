// SPDX-License-Identifier: GPL-3.0-or-later

//! Switch processing: the micro-grammar scanner, the table matcher, the
//! source expander, and the entry point that runs a whole invocation
//! through them.
//!
//! Input is consumed strictly left to right: first the builtin environment
//! variable with default switches, then each command-line argument in
//! order. Handlers mutate one [`crate::state::OptionState`]; when all
//! sources are exhausted the resolver derives the final configuration
//! exactly once.

pub mod actions;
pub mod expand;
pub mod scan;
pub mod table;
pub mod tables;

#[cfg(test)]
pub(crate) mod testing;

use crate::diagnostics::Diagnostics;
use crate::resolution::Resolution;
use crate::state::OptionState;
use crate::target::TargetArch;
use expand::SourceProvider;

/// Everything the pass needs besides the provider: the architecture, the
/// target-system name to fall back to, and the raw command-line arguments.
#[derive(Debug)]
pub struct Invocation {
    pub arch: TargetArch,
    /// Used when no `bt` switch names a target system; the driver derives
    /// it from the build host.
    pub default_system: String,
    pub arguments: Vec<String>,
}

/// Mutable context threaded through the matcher and the handlers.
pub(crate) struct ParseContext<'p> {
    pub state: &'p mut OptionState,
    pub diags: &'p mut Diagnostics,
}

/// Run switch processing and resolution for one compilation invocation.
pub fn interpret(invocation: &Invocation, provider: &dyn SourceProvider) -> Resolution {
    let mut state = OptionState::new(invocation.arch);
    let mut diags = Diagnostics::default();
    {
        let mut ctx = ParseContext {
            state: &mut state,
            diags: &mut diags,
        };
        let env_var = invocation.arch.builtin_env_var();
        if let Some(defaults) = provider.env(env_var) {
            log::debug!("processing default switches from {env_var}");
            expand::process_source(&mut ctx, provider, &defaults);
        }
        for argument in &invocation.arguments {
            expand::process_source(&mut ctx, provider, argument);
        }
    }
    crate::resolve::resolve(state, diags, &invocation.default_system)
}

#[cfg(test)]
mod tests {
    use super::testing::FakeSource;
    use super::*;
    use crate::target::{GenFlags, TargetSystem};

    fn invocation(args: &[&str]) -> Invocation {
        Invocation {
            arch: TargetArch::I386,
            default_system: "DOS".to_string(),
            arguments: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let resolution = interpret(
            &invocation(&["-od", "-zq", "-bt=LINUX", "main.c"]),
            &FakeSource::default(),
        );

        assert!(resolution.config.quiet);
        assert!(resolution
            .config
            .gen_switches
            .contains(GenFlags::NO_OPTIMIZATION));
        assert_eq!(resolution.config.system, TargetSystem::Linux);
        assert_eq!(resolution.config.system_name, "LINUX");
        assert!(resolution.macros.iter().any(|m| m.name == "__LINUX__"));
        assert!(resolution.macros.iter().any(|m| m.name == "__UNIX__"));
        assert!(resolution.macros.iter().any(|m| m.name == "__SW_OD"));
        assert_eq!(resolution.source_file.as_deref(), Some("main.c"));
        assert!(resolution.diagnostics.is_empty());
    }

    #[test]
    fn test_builtin_environment_runs_before_the_command_line() {
        let provider = FakeSource::default().with_env("CCFE386", "-w=3");
        let resolution = interpret(&invocation(&["-w=0"]), &provider);
        // the explicit command line overrides the environment default
        assert_eq!(resolution.config.warning_level, 0);
        let resolution = interpret(&invocation(&[]), &provider);
        assert_eq!(resolution.config.warning_level, 3);
    }

    #[test]
    fn test_invalid_switch_is_recoverable() {
        let resolution = interpret(&invocation(&["-frobnicate", "-zq"]), &FakeSource::default());
        assert!(resolution.config.quiet);
        assert_eq!(resolution.diagnostics.len(), 1);
        assert_eq!(resolution.diagnostics[0].offending, "-frobnicate");
    }

    #[test]
    fn test_chained_optimization_sub_switches() {
        let resolution = interpret(&invocation(&["-oxatl"]), &FakeSource::default());
        let r#gen = resolution.config.gen_switches;
        // x implies loop optimization and scheduling; a, t, l chain after
        assert!(r#gen.contains(GenFlags::LOOP_OPTIMIZATION));
        assert!(r#gen.contains(GenFlags::INS_SCHEDULING));
        assert!(r#gen.contains(GenFlags::RELAX_ALIAS));
        assert_eq!(resolution.config.opt_size, 0);
        assert!(resolution.diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_sub_switch_names_the_family() {
        let resolution = interpret(&invocation(&["-oq"]), &FakeSource::default());
        assert_eq!(resolution.diagnostics.len(), 1);
        assert_eq!(
            resolution.diagnostics[0].kind.to_string(),
            "invalid optimization sub-switch"
        );
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later

//! The resolved, read-only output of the pass.
//!
//! Downstream stages (code generator, preprocessor, linker driver) consume
//! these records; nothing mutates them after resolution. The macro list is
//! ordered and stable across runs with the same input, so builds are
//! reproducible.

use crate::diagnostics::Diagnostic;
use crate::options::expand::SourceProvider;
use crate::state::{CStd, MacroDef, WarningControl};
use crate::target::{
    AbbrevLinkage, CallConv, ConvFlags, CpuLevel, DebugFormat, FpuCalls, FpuLevel, GenFlags,
    MemModel, SegRegs, TargetArch, TargetFlags, TargetSystem,
};
use serde::Serialize;

/// Character handling selected for the compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DoubleByte {
    /// A numbered double-byte translation table.
    Table(u8),
    /// The host's local double-byte convention.
    HostDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharEncoding {
    pub use_unicode: bool,
    pub double_byte: Option<DoubleByte>,
    pub translate_to_unicode: bool,
    /// Set only when a unicode translation table is to be loaded.
    pub unicode_code_page: Option<u32>,
}

/// Runtime and math library name tokens handed to the linker driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibNames {
    pub clib: String,
    pub mathlib: String,
    pub emulib: Option<String>,
}

/// The fully resolved target configuration.
#[derive(Debug, Serialize)]
pub struct TargetConfig {
    pub arch: TargetArch,
    pub system_name: String,
    pub system: TargetSystem,
    pub cpu: CpuLevel,
    /// `None` when floating point goes through library calls.
    pub fpu: Option<FpuLevel>,
    pub fpu_emulated: bool,
    pub fpu_calls: FpuCalls,
    pub memory_model: MemModel,
    pub code_ptr_size: u8,
    pub data_ptr_size: u8,
    pub debug_format: DebugFormat,
    pub dwarf_abbrev: Option<AbbrevLinkage>,
    pub gen_switches: GenFlags,
    pub target_switches: TargetFlags,
    pub call_conv: CallConv,
    pub register_conventions: bool,
    /// The default convention was switched to its stack-based variant.
    pub aux_stack_conventions: bool,
    pub conv_flags: ConvFlags,
    pub saved_segregs: SegRegs,
    pub stack87: u8,
    pub pack_amount: u32,
    pub opt_size: u8,
    pub inline_threshold: u32,
    pub data_threshold: u32,
    pub error_limit: u32,
    pub warning_level: u32,
    pub warning_controls: Vec<WarningControl>,
    pub preproc_width: u32,
    pub preproc_char: char,
    pub proepi_data_size: u32,
    pub c_std: Option<CStd>,
    pub encoding: CharEncoding,
    pub libs: LibNames,
    pub quiet: bool,
    pub check_syntax_only: bool,
    pub preprocess_only: bool,
    pub ignore_env: bool,
    pub include_paths: Vec<String>,
    pub read_only_dirs: Vec<String>,
    pub module_name: Option<String>,
    pub code_class: Option<String>,
    pub text_seg_name: Option<String>,
    pub data_seg_name: Option<String>,
    pub code_group: Option<String>,
    pub pch_file: Option<String>,
    pub force_include: Option<String>,
    pub force_pre_include: Option<String>,
    pub object_file: Option<String>,
    pub error_file: Option<String>,
    pub depend_file: Option<String>,
    pub depend_target: Option<String>,
    pub src_dep_name: Option<String>,
    pub depend_header_path: Option<String>,
    pub depend_force_slash: Option<char>,
    pub toggles_set: Vec<String>,
    pub undef_macros: Vec<String>,
}

/// Everything the pass produces for one compilation invocation.
#[derive(Debug, Serialize)]
pub struct Resolution {
    pub config: TargetConfig,
    pub macros: Vec<MacroDef>,
    pub source_file: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// Append the `<SYSTEM>_INCLUDE` and `INCLUDE` environment paths to
    /// the include search list, unless the user asked to ignore the
    /// environment. Must run after resolution, which fixes the system
    /// name the variable is derived from.
    pub fn merge_include_env(&mut self, provider: &dyn SourceProvider) {
        if self.config.ignore_env {
            return;
        }
        let system_var = format!("{}_INCLUDE", self.config.system_name);
        if let Some(paths) = provider.env(&system_var) {
            add_path_list(&mut self.config.include_paths, &paths);
        }
        let generic = match self.config.arch {
            TargetArch::I386 => provider
                .env("INC386")
                .or_else(|| provider.env("INCLUDE")),
            TargetArch::I86 => provider.env("INCLUDE"),
        };
        if let Some(paths) = generic {
            add_path_list(&mut self.config.include_paths, &paths);
        }
    }
}

fn add_path_list(into: &mut Vec<String>, paths: &str) {
    for element in paths.split(';') {
        if !element.is_empty() {
            into.push(element.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::testing::FakeSource;
    use crate::options::{interpret, Invocation};

    fn resolved(args: &[&str], provider: &FakeSource) -> Resolution {
        let invocation = Invocation {
            arch: TargetArch::I386,
            default_system: "LINUX".to_string(),
            arguments: args.iter().map(|a| a.to_string()).collect(),
        };
        interpret(&invocation, provider)
    }

    #[test]
    fn test_merge_include_env_prefers_system_specific_paths_first() {
        let provider = FakeSource::default()
            .with_env("LINUX_INCLUDE", "/sys/one;/sys/two")
            .with_env("INC386", "/generic");
        let mut resolution = resolved(&["-i=explicit"], &provider);
        resolution.merge_include_env(&provider);

        assert_eq!(
            resolution.config.include_paths,
            vec!["explicit", "/sys/one", "/sys/two", "/generic"]
        );
    }

    #[test]
    fn test_merge_include_env_falls_back_to_the_generic_variable() {
        let provider = FakeSource::default().with_env("INCLUDE", "/fallback");
        let mut resolution = resolved(&[], &provider);
        resolution.merge_include_env(&provider);
        assert_eq!(resolution.config.include_paths, vec!["/fallback"]);
    }

    #[test]
    fn test_merge_include_env_honors_the_ignore_switch() {
        let provider = FakeSource::default().with_env("INCLUDE", "/fallback");
        let mut resolution = resolved(&["-x"], &provider);
        resolution.merge_include_env(&provider);
        assert!(resolution.config.include_paths.is_empty());
    }
}

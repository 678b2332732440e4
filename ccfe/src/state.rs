// SPDX-License-Identifier: GPL-3.0-or-later

//! The mutable configuration state threaded through switch processing.
//!
//! Exactly one [`OptionState`] exists per compilation invocation. It starts
//! from a known baseline, is mutated exclusively by switch handlers while
//! the command-line sources are consumed, and is then handed to the
//! resolver, which reads it once and produces the final immutable
//! configuration. Handlers never write the derived fields (library names,
//! pointer sizes, calling-convention save set); those belong to the
//! resolver alone.

use crate::target::{
    CallConv, ConvFlags, CpuLevel, DebugFormat, FpuCalls, FpuLevel, GenFlags, MemModel, TargetArch,
    TargetFlags,
};
use serde::Serialize;

/// A boolean switch with a separate "explicitly set by the user" bit.
///
/// `used` guards the deferred-default mechanism: defaulting logic must
/// never override an explicit user choice, so it only writes `on` while
/// `used` is still false. Before resolution only `used` may be trusted;
/// `on` becomes meaningful once the resolver has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pegged {
    pub used: bool,
    pub on: bool,
}

impl Pegged {
    /// Explicit user setting; wins over any later defaulting.
    pub fn set(&mut self, on: bool) {
        self.used = true;
        self.on = on;
    }

    /// System-specific default, applied only when the user said nothing.
    pub fn set_default(&mut self, on: bool) {
        if !self.used {
            self.set(on);
        }
    }

    /// Memory-model default: peg the register unless the user spoke.
    pub fn default_on(&mut self) {
        if !self.used {
            self.used = true;
            self.on = true;
        }
    }
}

/// Target-selection switches accumulated during parsing. `None` means the
/// user did not choose and the resolver fills the architecture default.
#[derive(Debug, Default)]
pub struct SwitchData {
    pub system_name: Option<String>,
    pub cpu: Option<CpuLevel>,
    pub fpu: Option<FpuLevel>,
    pub fpt: Option<FpuCalls>,
    pub mem: Option<MemModel>,
    pub dbg_fmt: Option<DebugFormat>,
    pub peg_ds: Pegged,
    pub peg_es: Pegged,
    pub peg_fs: Pegged,
    pub peg_gs: Pegged,
    /// A near data segment name was given (`nd`); emitted as a macro later.
    pub near_data_named: bool,
}

/// C language standard selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CStd {
    C89,
    C99,
    C23,
}

/// Character encoding selection of the `zk` switch family. The last
/// selection on the command line wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingChoice {
    /// Double-byte characters via a numbered translation table.
    DoubleByte(u8),
    /// Double-byte characters per the host's local convention.
    DoubleByteHost,
    /// Wide characters through a loaded unicode translation table.
    UnicodeTable,
    /// Double-byte table 0 with translation to unicode.
    DoubleByteTranslate,
}

/// An explicit enable/disable request for a numbered warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarningControl {
    pub number: u32,
    pub enabled: bool,
}

/// A preprocessor macro definition, optionally with a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroDef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Ordered macro-definition list. User macros land here during parsing,
/// resolver-emitted feature macros during resolution; the order is stable
/// so that repeated runs produce identical output. Redefinition replaces
/// the value in place and keeps the original position.
#[derive(Debug, Default)]
pub struct MacroList {
    defs: Vec<MacroDef>,
}

impl MacroList {
    /// Define from a `NAME` or `NAME=VALUE` string.
    pub fn define(&mut self, def: &str) {
        match def.split_once('=') {
            Some((name, value)) => self.insert(name, Some(value.to_string())),
            None => self.insert(def, None),
        }
    }

    /// Define a switch-derived feature macro (`__SW_` prefix).
    pub fn define_switch(&mut self, suffix: &str) {
        self.insert(&format!("__SW_{suffix}"), None);
    }

    pub fn insert(&mut self, name: &str, value: Option<String>) {
        if let Some(existing) = self.defs.iter_mut().find(|d| d.name == name) {
            existing.value = value;
        } else {
            self.defs.push(MacroDef {
                name: name.to_string(),
                value,
            });
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.iter().any(|d| d.name == name)
    }

    pub fn into_vec(self) -> Vec<MacroDef> {
        self.defs
    }
}

/// Independent feature toggles, each written by exactly one switch handler
/// and read only by the resolver or the macro emission pass.
#[derive(Debug)]
pub struct CompFlags {
    pub quiet_mode: bool,
    pub check_syntax: bool,
    pub extensions_enabled: bool,
    pub non_iso_compliant_names_enabled: bool,
    pub strict_ansi: bool,
    pub unique_functions: bool,
    pub inline_functions: bool,
    pub make_enums_an_int: bool,
    pub original_enum_setting: bool,
    pub signed_char: bool,
    pub use_long_double: bool,
    pub use_unicode: bool,
    pub emit_browser_info: bool,
    pub emit_names: bool,
    pub generate_prototypes: bool,
    pub dump_prototypes: bool,
    pub extra_stats_wanted: bool,
    pub strings_in_code_segment: bool,
    pub multiple_code_segments: bool,
    pub save_restore_segregs: bool,
    pub register_conventions: bool,
    pub use_stdcall_at_number: bool,
    pub returns_promoted: bool,
    pub rent: bool,
    pub unaligned_segs: bool,
    pub emit_library_names: bool,
    pub emit_all_default_libs: bool,
    pub emit_dependencies: bool,
    pub emit_targimp_symbols: bool,
    pub unix_ext: bool,
    pub slack_byte_warning: bool,
    pub auto_agg_inits: bool,
    pub no_check_inits: bool,
    pub no_check_qualifiers: bool,
    pub warnings_cause_bad_exit: bool,
    pub using_overlays: bool,
    pub check_global_prototypes: bool,
    pub debug_info_some: bool,
    pub no_debug_type_names: bool,
    pub dump_types_with_names: bool,
    pub use_full_codegen_od: bool,
    pub no_pch_warnings: bool,
    pub extended_defines: bool,
    pub track_includes: bool,
    pub check_truncated_fnames: bool,
    pub generate_auto_depend: bool,
    pub cpp_mode: bool,
    pub cpp_output: bool,
    pub cpp_output_to_file: bool,
    pub cpp_line_wanted: bool,
    pub cpp_ignore_line: bool,
    pub cpp_keep_comments: bool,
    pub cpp_ignore_env: bool,
    pub ignore_default_dirs: bool,
    pub op_switch_used: bool,
    pub zc_switch_used: bool,
    pub zm_switch_used: bool,
    pub zu_switch_used: bool,
    pub sg_switch_used: bool,
    pub st_switch_used: bool,
    pub bm_switch_used: bool,
    pub bd_switch_used: bool,
    pub bc_switch_used: bool,
    pub bg_switch_used: bool,
    pub br_switch_used: bool,
    pub bw_switch_used: bool,
    pub ep_switch_used: bool,
    pub ee_switch_used: bool,
    pub ef_switch_used: bool,
    pub ec_switch_used: bool,
    pub eq_switch_used: bool,
}

impl Default for CompFlags {
    fn default() -> Self {
        Self {
            quiet_mode: false,
            check_syntax: false,
            extensions_enabled: true,
            non_iso_compliant_names_enabled: true,
            strict_ansi: false,
            unique_functions: false,
            inline_functions: false,
            make_enums_an_int: true,
            original_enum_setting: true,
            signed_char: false,
            use_long_double: false,
            use_unicode: true,
            emit_browser_info: false,
            emit_names: false,
            generate_prototypes: false,
            dump_prototypes: false,
            extra_stats_wanted: false,
            strings_in_code_segment: false,
            multiple_code_segments: false,
            save_restore_segregs: false,
            register_conventions: true,
            use_stdcall_at_number: true,
            returns_promoted: false,
            rent: false,
            unaligned_segs: false,
            emit_library_names: true,
            emit_all_default_libs: false,
            emit_dependencies: true,
            emit_targimp_symbols: true,
            unix_ext: false,
            slack_byte_warning: false,
            auto_agg_inits: false,
            no_check_inits: false,
            no_check_qualifiers: false,
            warnings_cause_bad_exit: false,
            using_overlays: false,
            check_global_prototypes: false,
            debug_info_some: false,
            no_debug_type_names: false,
            dump_types_with_names: false,
            use_full_codegen_od: false,
            no_pch_warnings: false,
            extended_defines: false,
            track_includes: false,
            check_truncated_fnames: false,
            generate_auto_depend: false,
            cpp_mode: false,
            cpp_output: false,
            cpp_output_to_file: false,
            cpp_line_wanted: false,
            cpp_ignore_line: false,
            cpp_keep_comments: false,
            cpp_ignore_env: false,
            ignore_default_dirs: false,
            op_switch_used: false,
            zc_switch_used: false,
            zm_switch_used: false,
            zu_switch_used: false,
            sg_switch_used: false,
            st_switch_used: false,
            bm_switch_used: false,
            bd_switch_used: false,
            bc_switch_used: false,
            bg_switch_used: false,
            br_switch_used: false,
            bw_switch_used: false,
            ep_switch_used: false,
            ee_switch_used: false,
            ef_switch_used: false,
            ec_switch_used: false,
            eq_switch_used: false,
        }
    }
}

/// Pragma-style toggles that switches may flip.
#[derive(Debug)]
pub struct Toggles {
    pub check_stack: bool,
    pub inline_enabled: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            check_stack: true,
            inline_enabled: false,
        }
    }
}

/// The whole configuration state for one compilation invocation.
#[derive(Debug)]
pub struct OptionState {
    pub arch: TargetArch,
    pub swdata: SwitchData,
    pub flags: CompFlags,
    pub toggles: Toggles,
    pub gen_switches: GenFlags,
    pub target_switches: TargetFlags,
    pub conv_flags: ConvFlags,
    pub call_conv: CallConv,
    pub macros: MacroList,

    pub c_std: Option<CStd>,
    pub encoding: Option<EncodingChoice>,
    pub unicode_code_page: u32,

    /// `d2`-style debug levels downgrade optimization during resolution.
    pub debug_optimization_change: bool,

    /// FPU stack depth available to the register allocator.
    pub stack87: u8,
    pub error_limit: u32,
    /// Clamped to the documented maximum by the handler.
    pub warning_level: u32,
    /// Structure packing; rounded down to a power of two, at most 16.
    pub pack_amount: u32,
    /// Objects larger than this leave the default data segment. Values
    /// above the target's `int` range fall back to 256.
    pub data_threshold: u32,
    pub inline_threshold: u32,
    pub proepi_data_size: u32,
    /// 0 optimizes for time, 100 for size.
    pub opt_size: u8,
    /// Preprocessor output width; 0 keeps lines unwrapped.
    pub preproc_width: u32,
    pub preproc_char: char,

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

    pub include_paths: Vec<String>,
    pub read_only_dirs: Vec<String>,
    pub toggles_set: Vec<String>,
    pub undef_macros: Vec<String>,
    pub warning_controls: Vec<WarningControl>,

    /// The one source file selected for compilation.
    pub source_file: Option<String>,
}

impl OptionState {
    /// The known-zero baseline every invocation starts from.
    pub fn new(arch: TargetArch) -> Self {
        Self {
            arch,
            swdata: SwitchData::default(),
            flags: CompFlags::default(),
            toggles: Toggles::default(),
            gen_switches: GenFlags::MEMORY_LOW_FAILS,
            target_switches: TargetFlags::empty(),
            conv_flags: ConvFlags::empty(),
            call_conv: CallConv::Register,
            macros: MacroList::default(),
            c_std: None,
            encoding: None,
            unicode_code_page: 0,
            debug_optimization_change: false,
            stack87: 8,
            error_limit: 20,
            warning_level: 1,
            pack_amount: 8,
            data_threshold: 32767,
            inline_threshold: 20,
            proepi_data_size: 0,
            opt_size: 50,
            preproc_width: 0,
            preproc_char: '#',
            module_name: None,
            code_class: None,
            text_seg_name: None,
            data_seg_name: None,
            code_group: None,
            pch_file: None,
            force_include: None,
            force_pre_include: None,
            object_file: None,
            error_file: None,
            depend_file: None,
            depend_target: None,
            src_dep_name: None,
            depend_header_path: None,
            depend_force_slash: None,
            include_paths: Vec::new(),
            read_only_dirs: Vec::new(),
            toggles_set: Vec::new(),
            undef_macros: Vec::new(),
            warning_controls: Vec::new(),
            source_file: None,
        }
    }

    /// Append a `;`-separated path list to the include search path.
    pub fn add_include_list(&mut self, path_list: &str) {
        for element in path_list.split(';') {
            if !element.is_empty() {
                self.include_paths.push(element.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pegged_defaulting_never_overrides_user_choice() {
        let mut peg = Pegged::default();
        peg.set(false);
        peg.default_on();
        assert!(peg.used);
        assert!(!peg.on);

        let mut peg = Pegged::default();
        peg.default_on();
        assert!(peg.used);
        assert!(peg.on);
    }

    #[test]
    fn test_pegged_system_default_applies_only_once() {
        let mut peg = Pegged::default();
        peg.set_default(false);
        assert!(peg.used);
        assert!(!peg.on);
        peg.set_default(true);
        assert!(!peg.on);
    }

    #[test]
    fn test_macro_list_keeps_order_and_replaces_in_place() {
        let mut list = MacroList::default();
        list.define("FIRST=1");
        list.define("SECOND");
        list.define("FIRST=2");

        let defs = list.into_vec();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name, "FIRST");
        assert_eq!(defs[0].value.as_deref(), Some("2"));
        assert_eq!(defs[1].name, "SECOND");
        assert_eq!(defs[1].value, None);
    }

    #[test]
    fn test_switch_macro_prefix() {
        let mut list = MacroList::default();
        list.define_switch("OD");
        assert!(list.contains("__SW_OD"));
    }

    #[test]
    fn test_include_list_splits_path_elements() {
        let mut state = OptionState::new(TargetArch::I386);
        state.add_include_list("a;b;;c");
        assert_eq!(state.include_paths, vec!["a", "b", "c"]);
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later

//! The configuration resolver.
//!
//! Runs exactly once, after every source is exhausted, and never re-enters
//! switch processing. The stages run in a fixed order; each one may depend
//! on an earlier stage's output:
//!
//! 1. target-system resolution (name defaulting, alias canonicalization),
//! 2. system-specific final adjustment (model defaults, calling-convention
//!    corrections, target and architecture macros),
//! 3. generation-switch synthesis (CPU/FPU/model defaults, pegged-register
//!    defaulting with memory-model fallthrough, debug-format words),
//! 4. character-encoding resolution,
//! 5. pointer sizes and library naming from the final memory model,
//! 6. ordered feature-macro emission.

mod macros;
mod memory_model;

use crate::diagnostics::Diagnostics;
use crate::resolution::{CharEncoding, DoubleByte, Resolution, TargetConfig};
use crate::state::{EncodingChoice, OptionState};
use crate::target::{
    AbbrevLinkage, CpuLevel, DebugFormat, FpuCalls, FpuLevel, GenFlags, MemModel, SegRegs,
    TargetArch, TargetFlags, TargetSystem,
};

/// Values synthesized by stage 3; later stages and the macro walk read
/// them instead of the raw, possibly-unset switch data.
pub(crate) struct Synthesis {
    pub cpu: CpuLevel,
    pub fpu: Option<FpuLevel>,
    pub fpu_emulated: bool,
    pub fpt: FpuCalls,
    pub mem: MemModel,
    pub debug_format: DebugFormat,
    pub dwarf_abbrev: Option<AbbrevLinkage>,
}

/// Transform the accumulated state into the final configuration.
pub(crate) fn resolve(
    mut state: OptionState,
    diags: Diagnostics,
    default_system: &str,
) -> Resolution {
    // preprocess-only mode implies output and silence
    if state.flags.cpp_mode {
        state.flags.cpp_output = true;
        state.flags.quiet_mode = true;
    }
    set_debug(&mut state);
    let system = resolve_target_system(&mut state, default_system);
    final_target_adjust(&mut state, system);
    let synth = set_gen_switches(&mut state);
    let encoding = resolve_encoding(&mut state);
    let (code_ptr_size, data_ptr_size, libs) = memory_model::apply(&mut state, system, &synth);

    // segment registers that float cannot stay in the convention save set
    if synth.cpu < CpuLevel::Cpu386 {
        state
            .target_switches
            .remove(TargetFlags::FLOATING_FS | TargetFlags::FLOATING_GS);
    }
    let mut saved_segregs = SegRegs::all();
    if !state.flags.save_restore_segregs {
        for (bit, seg) in [
            (TargetFlags::FLOATING_DS, SegRegs::DS),
            (TargetFlags::FLOATING_ES, SegRegs::ES),
            (TargetFlags::FLOATING_FS, SegRegs::FS),
            (TargetFlags::FLOATING_GS, SegRegs::GS),
        ] {
            if state.target_switches.contains(bit) {
                saved_segregs.remove(seg);
            }
        }
    }
    let aux_stack_conventions =
        state.arch == TargetArch::I386 && !state.flags.register_conventions;

    macros::emit(&mut state, &synth);
    state.macros.define("__CCFE__=200");
    state.macros.define("_PUSHPOP_SUPPORTED");
    if !state.flags.extensions_enabled {
        state.macros.define("NO_EXT_KEYS");
    }

    let config = TargetConfig {
        arch: state.arch,
        system_name: state.swdata.system_name.take().unwrap_or_default(),
        system,
        cpu: synth.cpu,
        fpu: synth.fpu,
        fpu_emulated: synth.fpu_emulated,
        fpu_calls: synth.fpt,
        memory_model: synth.mem,
        code_ptr_size,
        data_ptr_size,
        debug_format: synth.debug_format,
        dwarf_abbrev: synth.dwarf_abbrev,
        gen_switches: state.gen_switches,
        target_switches: state.target_switches,
        call_conv: state.call_conv,
        register_conventions: state.flags.register_conventions,
        aux_stack_conventions,
        conv_flags: state.conv_flags,
        saved_segregs,
        stack87: state.stack87,
        pack_amount: state.pack_amount,
        opt_size: state.opt_size,
        inline_threshold: state.inline_threshold,
        data_threshold: state.data_threshold,
        error_limit: state.error_limit,
        warning_level: state.warning_level,
        warning_controls: state.warning_controls,
        preproc_width: state.preproc_width,
        preproc_char: state.preproc_char,
        proepi_data_size: state.proepi_data_size,
        c_std: state.c_std,
        encoding,
        libs,
        quiet: state.flags.quiet_mode,
        check_syntax_only: state.flags.check_syntax,
        preprocess_only: state.flags.cpp_output,
        ignore_env: state.flags.cpp_ignore_env,
        include_paths: state.include_paths,
        read_only_dirs: state.read_only_dirs,
        module_name: state.module_name,
        code_class: state.code_class,
        text_seg_name: state.text_seg_name,
        data_seg_name: state.data_seg_name,
        code_group: state.code_group,
        pch_file: state.pch_file,
        force_include: state.force_include,
        force_pre_include: state.force_pre_include,
        object_file: state.object_file,
        error_file: state.error_file,
        depend_file: state.depend_file,
        depend_target: state.depend_target,
        src_dep_name: state.src_dep_name,
        depend_header_path: state.depend_header_path,
        depend_force_slash: state.depend_force_slash,
        toggles_set: state.toggles_set,
        undef_macros: state.undef_macros,
    };
    Resolution {
        config,
        macros: state.macros.into_vec(),
        source_file: state.source_file,
        diagnostics: diags.into_vec(),
    }
}

/// Full debug information turns optimization off again.
fn set_debug(state: &mut OptionState) {
    if state.debug_optimization_change {
        state.gen_switches |= GenFlags::NO_OPTIMIZATION;
        state.flags.inline_functions = false;
    }
}

/// Stage 1: canonicalize the target-system name and map it to a category.
fn resolve_target_system(state: &mut OptionState, default_system: &str) -> TargetSystem {
    let mut name = state
        .swdata
        .system_name
        .take()
        .unwrap_or_else(|| default_system.to_string())
        .to_ascii_uppercase();
    let system = match name.as_str() {
        "DOS" => TargetSystem::Dos,
        "NETWARE" => TargetSystem::Netware,
        "NETWARE5" => TargetSystem::Netware5,
        "WINDOWS" => TargetSystem::Windows,
        "CHEAP_WINDOWS" => {
            if state.arch == TargetArch::I86 {
                TargetSystem::CheapWindows
            } else {
                TargetSystem::Windows
            }
        }
        "NT" => TargetSystem::Nt,
        "LINUX" => TargetSystem::Linux,
        "QNX" => TargetSystem::Qnx,
        "OS2" => TargetSystem::Os2,
        "RDOS" => TargetSystem::Rdos,
        "HAIKU" | "OSX" | "SOLARIS" | "BSD" => TargetSystem::Unix,
        _ => TargetSystem::Other,
    };
    // versioned and cosmetic aliases resolve to their base name; the
    // distinguishing variant lives on in the category
    if name == "NETWARE5" {
        name = "NETWARE".to_string();
    } else if name == "CHEAP_WINDOWS" {
        name = "WINDOWS".to_string();
    }
    state.swdata.system_name = Some(name);
    system
}

/// Stage 2: per-system corrections and the identifying macros.
fn final_target_adjust(state: &mut OptionState, system: TargetSystem) {
    let arch = state.arch;
    if state.flags.non_iso_compliant_names_enabled {
        state.macros.define(match arch {
            TargetArch::I86 => "M_I86",
            TargetArch::I386 => "M_I386",
        });
    }
    match arch {
        TargetArch::I86 => {
            for name in ["_M_I86", "__I86__", "__X86__", "_X86_"] {
                state.macros.define(name);
            }
        }
        TargetArch::I386 => {
            for name in ["_M_I386", "__386__", "__X86__", "_X86_", "_STDCALL_SUPPORTED"] {
                state.macros.define(name);
            }
        }
    }
    state.macros.define("_INTEGRAL_MAX_BITS=64");
    if let Some(name) = &state.swdata.system_name {
        let identifying = format!("__{name}__");
        state.macros.define(&identifying);
    }
    match system {
        TargetSystem::Dos => {
            if state.flags.non_iso_compliant_names_enabled {
                state.macros.define("MSDOS");
            }
            state.macros.define("_DOS");
        }
        TargetSystem::Netware5 | TargetSystem::Netware if arch == TargetArch::I386 => {
            if system == TargetSystem::Netware5 {
                state.macros.define("__NETWARE5__");
            }
            state.macros.define("__NETWARE_386__");
            // NetWare before version 5 cannot spill the whole FPU stack
            if system == TargetSystem::Netware {
                state.stack87 = 4;
            }
            if state.swdata.mem.is_none() {
                state.swdata.mem = Some(MemModel::Small);
            }
            // NetWare links against stack-based calling conventions
            state.flags.register_conventions = false;
        }
        TargetSystem::Netware5 | TargetSystem::Netware => {}
        TargetSystem::Rdos => state.macros.define("_RDOS"),
        TargetSystem::Qnx => state.macros.define("__UNIX__"),
        TargetSystem::CheapWindows | TargetSystem::Windows => {
            if system == TargetSystem::CheapWindows {
                state.macros.define("__CHEAP_WINDOWS__");
            }
            match arch {
                TargetArch::I86 => {
                    state.macros.define("_WINDOWS");
                    state.target_switches |=
                        TargetFlags::WINDOWS | TargetFlags::CHEAP_WINDOWS;
                    state.swdata.peg_ds.set_default(true);
                }
                TargetArch::I386 => {
                    state.macros.define("__WINDOWS_386__");
                    state.swdata.peg_fs.set_default(false);
                    match state.swdata.fpt {
                        None | Some(FpuCalls::Emulated) => {
                            state.swdata.fpt = Some(FpuCalls::Inline);
                        }
                        _ => {}
                    }
                }
            }
        }
        TargetSystem::Nt => state.macros.define("_WIN32"),
        TargetSystem::Linux | TargetSystem::Unix => state.macros.define("__UNIX__"),
        TargetSystem::Os2 | TargetSystem::Other => {}
    }
}

/// Stage 3: fill CPU/FPU/model defaults, encode the FPU call strategy,
/// translate the memory model into addressing bits, and default every
/// pegged register the user left alone.
fn set_gen_switches(state: &mut OptionState) -> Synthesis {
    let arch = state.arch;
    let cpu;
    let fpu;
    let mem;
    match arch {
        TargetArch::I86 => {
            cpu = state.swdata.cpu.unwrap_or(CpuLevel::Cpu86);
            fpu = state.swdata.fpu.unwrap_or(FpuLevel::Fpu87);
            mem = state.swdata.mem.unwrap_or(MemModel::Small);
            state.swdata.peg_fs.default_on();
            state.swdata.peg_gs.default_on();
        }
        TargetArch::I386 => {
            cpu = state.swdata.cpu.unwrap_or(CpuLevel::Cpu686);
            fpu = state.swdata.fpu.unwrap_or(FpuLevel::Fpu387);
            mem = state.swdata.mem.unwrap_or(MemModel::Flat);
            state.target_switches |= TargetFlags::USE_32;
        }
    }
    let (fpu_level, fpu_emulated, fpt) = match state.swdata.fpt {
        None | Some(FpuCalls::Emulated) => (Some(fpu), true, FpuCalls::Emulated),
        Some(FpuCalls::Inline) => (Some(fpu), false, FpuCalls::Inline),
        Some(FpuCalls::Library) => (None, false, FpuCalls::Library),
    };
    match mem {
        // the flat model implies every small-model default as well
        MemModel::Flat | MemModel::Small => {
            if mem == MemModel::Flat {
                state.target_switches |= TargetFlags::FLAT_MODEL;
                state.swdata.peg_es.default_on();
                state.swdata.peg_fs.default_on();
            }
            state.target_switches |= TargetFlags::CHEAP_POINTER;
            state.swdata.peg_ds.default_on();
        }
        MemModel::Medium => {
            state.target_switches |= TargetFlags::BIG_CODE | TargetFlags::CHEAP_POINTER;
            state.swdata.peg_ds.default_on();
        }
        MemModel::Compact => {
            state.target_switches |= TargetFlags::BIG_DATA | TargetFlags::CHEAP_POINTER;
        }
        MemModel::Large => {
            state.target_switches |=
                TargetFlags::BIG_CODE | TargetFlags::BIG_DATA | TargetFlags::CHEAP_POINTER;
        }
        MemModel::Huge => {
            state.target_switches |= TargetFlags::BIG_CODE | TargetFlags::BIG_DATA;
        }
    }
    if !state.swdata.peg_ds.on {
        state.target_switches |= TargetFlags::FLOATING_DS;
    }
    if !state.swdata.peg_es.on {
        state.target_switches |= TargetFlags::FLOATING_ES;
    }
    if !state.swdata.peg_fs.on {
        state.target_switches |= TargetFlags::FLOATING_FS;
    }
    if !state.swdata.peg_gs.on {
        state.target_switches |= TargetFlags::FLOATING_GS;
    }
    // from here on every pegged flag is final
    state.swdata.peg_ds.used = true;
    state.swdata.peg_es.used = true;
    state.swdata.peg_fs.used = true;
    state.swdata.peg_gs.used = true;

    let mut dwarf_abbrev = None;
    let debug_format = match state.swdata.dbg_fmt {
        Some(DebugFormat::Native) => DebugFormat::Native,
        Some(DebugFormat::CodeView) => {
            state.gen_switches |= GenFlags::DBG_CV;
            DebugFormat::CodeView
        }
        None | Some(DebugFormat::Dwarf) => {
            state.gen_switches |= GenFlags::DBG_DF;
            DebugFormat::Dwarf
        }
        Some(DebugFormat::DwarfA) => {
            state.gen_switches |= GenFlags::DBG_DF | GenFlags::DBG_PREDEF;
            dwarf_abbrev = Some(AbbrevLinkage::Extern);
            DebugFormat::DwarfA
        }
        Some(DebugFormat::DwarfG) => {
            state.gen_switches |= GenFlags::DBG_DF | GenFlags::DBG_PREDEF;
            dwarf_abbrev = Some(AbbrevLinkage::Static);
            DebugFormat::DwarfG
        }
    };
    Synthesis {
        cpu,
        fpu: fpu_level,
        fpu_emulated,
        fpt,
        mem,
        debug_format,
        dwarf_abbrev,
    }
}

/// Stage 4: apply the last `zk` selection. Only the unicode-table variant
/// records a code page to load.
fn resolve_encoding(state: &mut OptionState) -> CharEncoding {
    let mut double_byte = None;
    let mut translate = false;
    let mut code_page = None;
    match state.encoding {
        None => {}
        Some(EncodingChoice::UnicodeTable) => code_page = Some(state.unicode_code_page),
        Some(EncodingChoice::DoubleByteTranslate) => {
            state.flags.use_unicode = false;
            double_byte = Some(DoubleByte::Table(0));
            translate = true;
        }
        Some(EncodingChoice::DoubleByte(table)) => {
            state.flags.use_unicode = false;
            double_byte = Some(DoubleByte::Table(table));
        }
        Some(EncodingChoice::DoubleByteHost) => {
            state.flags.use_unicode = false;
            double_byte = Some(DoubleByte::HostDefault);
        }
    }
    CharEncoding {
        use_unicode: state.flags.use_unicode,
        double_byte,
        translate_to_unicode: translate,
        unicode_code_page: code_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::testing::FakeSource;
    use crate::options::{interpret, Invocation};
    use crate::target::CallConv;

    fn run(arch: TargetArch, args: &[&str]) -> Resolution {
        let invocation = Invocation {
            arch,
            default_system: "DOS".to_string(),
            arguments: args.iter().map(|a| a.to_string()).collect(),
        };
        interpret(&invocation, &FakeSource::default())
    }

    #[test]
    fn test_architecture_defaults() {
        let config = run(TargetArch::I86, &[]).config;
        assert_eq!(config.cpu, CpuLevel::Cpu86);
        assert_eq!(config.fpu, Some(FpuLevel::Fpu87));
        assert_eq!(config.memory_model, MemModel::Small);
        assert!(config.fpu_emulated);

        let config = run(TargetArch::I386, &[]).config;
        assert_eq!(config.cpu, CpuLevel::Cpu686);
        assert_eq!(config.fpu, Some(FpuLevel::Fpu387));
        assert_eq!(config.memory_model, MemModel::Flat);
        assert!(config.target_switches.contains(TargetFlags::USE_32));
    }

    #[test]
    fn test_flat_model_pegs_every_coarser_model_register() {
        let resolution = run(TargetArch::I386, &["-mf"]);
        let flags = resolution.config.target_switches;
        // ds comes from the small-model fallthrough, es and fs from flat
        assert!(!flags.contains(TargetFlags::FLOATING_DS));
        assert!(!flags.contains(TargetFlags::FLOATING_ES));
        assert!(!flags.contains(TargetFlags::FLOATING_FS));
        // no model rule pegs gs
        assert!(flags.contains(TargetFlags::FLOATING_GS));
        assert!(flags.contains(TargetFlags::FLAT_MODEL));
        assert!(flags.contains(TargetFlags::CHEAP_POINTER));
    }

    #[test]
    fn test_explicit_pegging_survives_model_defaults() {
        let resolution = run(TargetArch::I386, &["-zdf", "-mf"]);
        assert!(resolution
            .config
            .target_switches
            .contains(TargetFlags::FLOATING_DS));
        assert!(resolution.macros.iter().any(|m| m.name == "__SW_ZDF"));
    }

    #[test]
    fn test_compact_model_floats_the_data_segment() {
        let resolution = run(TargetArch::I86, &["-mc"]);
        let flags = resolution.config.target_switches;
        assert!(flags.contains(TargetFlags::FLOATING_DS));
        assert!(flags.contains(TargetFlags::BIG_DATA));
        assert_eq!(resolution.config.data_ptr_size, 4);
        assert_eq!(resolution.config.code_ptr_size, 2);
    }

    #[test]
    fn test_large_model_uses_far_pointers_both_ways() {
        let config = run(TargetArch::I86, &["-ml"]).config;
        assert_eq!(config.code_ptr_size, 4);
        assert_eq!(config.data_ptr_size, 4);
        assert!(config.conv_flags.contains(crate::target::ConvFlags::FAR_CALL));
    }

    #[test]
    fn test_fpu_call_strategies() {
        let config = run(TargetArch::I386, &["-fpc"]).config;
        assert_eq!(config.fpu, None);
        assert!(!config.fpu_emulated);
        assert_eq!(config.fpu_calls, FpuCalls::Library);

        let config = run(TargetArch::I386, &["-fpi87"]).config;
        assert_eq!(config.fpu, Some(FpuLevel::Fpu387));
        assert!(!config.fpu_emulated);

        let config = run(TargetArch::I386, &["-fp5", "-fpi"]).config;
        assert_eq!(config.fpu, Some(FpuLevel::Fpu586));
        assert!(config.fpu_emulated);
    }

    #[test]
    fn test_netware_forces_stack_conventions_and_small_model() {
        let config = run(TargetArch::I386, &["-bt=netware"]).config;
        assert_eq!(config.system, TargetSystem::Netware);
        assert_eq!(config.system_name, "NETWARE");
        assert!(!config.register_conventions);
        assert!(config.aux_stack_conventions);
        assert_eq!(config.memory_model, MemModel::Small);
        assert_eq!(config.stack87, 4);
    }

    #[test]
    fn test_netware5_alias_keeps_its_category_but_not_its_name() {
        let resolution = run(TargetArch::I386, &["-bt=NETWARE5"]);
        assert_eq!(resolution.config.system, TargetSystem::Netware5);
        assert_eq!(resolution.config.system_name, "NETWARE");
        // version 5 runtime handles the full FPU stack
        assert_eq!(resolution.config.stack87, 8);
        assert!(resolution.macros.iter().any(|m| m.name == "__NETWARE5__"));
        assert!(resolution.macros.iter().any(|m| m.name == "__NETWARE_386__"));
    }

    #[test]
    fn test_windows_386_forces_inline_fpu_unless_library_calls() {
        let config = run(TargetArch::I386, &["-bt=windows"]).config;
        assert_eq!(config.fpu_calls, FpuCalls::Inline);
        assert!(!config.fpu_emulated);

        let config = run(TargetArch::I386, &["-bt=windows", "-fpc"]).config;
        assert_eq!(config.fpu_calls, FpuCalls::Library);
    }

    #[test]
    fn test_cheap_windows_is_a_16_bit_category() {
        let resolution = run(TargetArch::I86, &["-bt=CHEAP_WINDOWS"]);
        assert_eq!(resolution.config.system, TargetSystem::CheapWindows);
        assert_eq!(resolution.config.system_name, "WINDOWS");
        assert!(resolution
            .macros
            .iter()
            .any(|m| m.name == "__CHEAP_WINDOWS__"));
        assert!(resolution
            .config
            .target_switches
            .contains(TargetFlags::WINDOWS));

        let resolution = run(TargetArch::I386, &["-bt=CHEAP_WINDOWS"]);
        assert_eq!(resolution.config.system, TargetSystem::Windows);
    }

    #[test]
    fn test_unknown_target_maps_to_other() {
        let resolution = run(TargetArch::I386, &["-bt=exotic"]);
        assert_eq!(resolution.config.system, TargetSystem::Other);
        assert_eq!(resolution.config.system_name, "EXOTIC");
        assert!(resolution.macros.iter().any(|m| m.name == "__EXOTIC__"));
    }

    #[test]
    fn test_pre_386_cpus_cannot_float_fs_and_gs() {
        let config = run(TargetArch::I86, &["-2", "-zff", "-zgf"]).config;
        assert!(!config.target_switches.contains(TargetFlags::FLOATING_FS));
        assert!(!config.target_switches.contains(TargetFlags::FLOATING_GS));
    }

    #[test]
    fn test_floating_registers_leave_the_save_set() {
        // compact model floats ds; without -r it is not saved
        let config = run(TargetArch::I86, &["-mc"]).config;
        assert!(!config.saved_segregs.contains(SegRegs::DS));

        let config = run(TargetArch::I86, &["-mc", "-r"]).config;
        assert!(config.saved_segregs.contains(SegRegs::DS));
    }

    #[test]
    fn test_debug_format_resolution() {
        let config = run(TargetArch::I386, &[]).config;
        assert_eq!(config.debug_format, DebugFormat::Dwarf);
        assert!(config.gen_switches.contains(GenFlags::DBG_DF));

        let config = run(TargetArch::I386, &["-hc"]).config;
        assert_eq!(config.debug_format, DebugFormat::CodeView);
        assert!(config.gen_switches.contains(GenFlags::DBG_CV));

        let config = run(TargetArch::I386, &["-hda"]).config;
        assert_eq!(config.dwarf_abbrev, Some(AbbrevLinkage::Extern));
        assert!(config.gen_switches.contains(GenFlags::DBG_PREDEF));
    }

    #[test]
    fn test_full_debug_turns_optimization_back_off() {
        let config = run(TargetArch::I386, &["-ox", "-d2"]).config;
        assert!(config.gen_switches.contains(GenFlags::NO_OPTIMIZATION));
    }

    #[test]
    fn test_debug_level_downgrade_is_reversible() {
        let config = run(TargetArch::I386, &["-d2", "-d0"]).config;
        assert!(!config.gen_switches.contains(GenFlags::NO_OPTIMIZATION));
        assert!(!config.gen_switches.contains(GenFlags::DBG_NUMBERS));
    }

    #[test]
    fn test_encoding_code_page_only_for_the_unicode_variant() {
        let config = run(TargetArch::I386, &["-zku=950"]).config;
        assert_eq!(config.encoding.unicode_code_page, Some(950));
        assert!(config.encoding.use_unicode);

        // the last selection wins and drops the table load
        let config = run(TargetArch::I386, &["-zku=950", "-zk1"]).config;
        assert_eq!(config.encoding.unicode_code_page, None);
        assert_eq!(config.encoding.double_byte, Some(DoubleByte::Table(1)));
        assert!(!config.encoding.use_unicode);

        let config = run(TargetArch::I386, &["-zk0u"]).config;
        assert!(config.encoding.translate_to_unicode);
    }

    #[test]
    fn test_preprocess_mode_implies_quiet_output() {
        let config = run(TargetArch::I386, &["-plc"]).config;
        assert!(config.preprocess_only);
        assert!(config.quiet);
    }

    #[test]
    fn test_register_calling_convention_suffix_switches() {
        let config = run(TargetArch::I386, &["-5s"]).config;
        assert_eq!(config.cpu, CpuLevel::Cpu586);
        assert!(!config.register_conventions);
        assert!(config.aux_stack_conventions);

        let config = run(TargetArch::I386, &["-bt=netware", "-3r"]).config;
        // the user's explicit choice came first; NetWare still overrides
        assert!(!config.register_conventions);
    }

    #[test]
    fn test_default_call_conv_is_register_based() {
        let config = run(TargetArch::I386, &[]).config;
        assert_eq!(config.call_conv, CallConv::Register);
        let config = run(TargetArch::I386, &["-ecd"]).config;
        assert_eq!(config.call_conv, CallConv::Stdcall);
    }

    #[test]
    fn test_pegged_flags_become_final_during_synthesis() {
        let mut state = OptionState::new(TargetArch::I386);
        assert!(!state.swdata.peg_ds.used);
        assert!(!state.swdata.peg_gs.used);

        set_gen_switches(&mut state);
        for peg in [
            state.swdata.peg_ds,
            state.swdata.peg_es,
            state.swdata.peg_fs,
            state.swdata.peg_gs,
        ] {
            assert!(peg.used);
        }
        // flat default pegs ds, es and fs; nothing speaks for gs
        assert!(state.swdata.peg_ds.on);
        assert!(state.swdata.peg_es.on);
        assert!(state.swdata.peg_fs.on);
        assert!(!state.swdata.peg_gs.on);
    }

    #[test]
    fn test_resolution_is_stable_across_runs() {
        let first = run(TargetArch::I386, &["-od", "-zq", "-bt=LINUX"]);
        let second = run(TargetArch::I386, &["-od", "-zq", "-bt=LINUX"]);
        assert_eq!(first.macros, second.macros);
    }
}

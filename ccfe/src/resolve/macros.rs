// SPDX-License-Identifier: GPL-3.0-or-later

//! Stage 6: the ordered feature-macro walk.
//!
//! Every resolved feature bit and boolean is visited in one fixed
//! sequence. Reordering anything here changes the emitted macro list and
//! with it the preprocessor's view of the compilation, so additions go at
//! the position their feature belongs to, not at the end.

use super::Synthesis;
use crate::state::OptionState;
use crate::target::{CpuLevel, FpuCalls, FpuLevel, GenFlags, MemModel, TargetArch, TargetFlags};

pub(super) fn emit(state: &mut OptionState, synth: &Synthesis) {
    if state.gen_switches.contains(GenFlags::I_MATH_INLINE) {
        state.macros.define_switch("OM");
    }
    let non_iso_prefix = match state.arch {
        TargetArch::I86 => "M_I86",
        TargetArch::I386 => "M_386",
    };
    let (model_switch, model_suffix, model_name) = match synth.mem {
        MemModel::Small => ("MS", "SM", "__SMALL__"),
        MemModel::Medium => ("MM", "MM", "__MEDIUM__"),
        MemModel::Compact => ("MC", "CM", "__COMPACT__"),
        MemModel::Large => ("ML", "LM", "__LARGE__"),
        MemModel::Huge => ("MH", "HM", "__HUGE__"),
        MemModel::Flat => ("MF", "FM", "__FLAT__"),
    };
    if state.flags.non_iso_compliant_names_enabled {
        let legacy = format!("{non_iso_prefix}{model_suffix}");
        state.macros.define(&legacy);
    }
    state.macros.define_switch(model_switch);
    let iso_prefix = match state.arch {
        TargetArch::I86 => "_M_I86",
        TargetArch::I386 => "_M_386",
    };
    let sized = format!("{iso_prefix}{model_suffix}");
    state.macros.define(&sized);
    state.macros.define(model_name);

    if state.target_switches.contains(TargetFlags::FLOATING_FS) {
        state.macros.define_switch("ZFF");
    } else {
        state.macros.define_switch("ZFP");
    }
    if state.target_switches.contains(TargetFlags::FLOATING_GS) {
        state.macros.define_switch("ZGF");
    } else {
        state.macros.define_switch("ZGP");
    }
    if state.target_switches.contains(TargetFlags::FLOATING_DS) {
        state.macros.define_switch("ZDF");
    } else {
        state.macros.define_switch("ZDP");
    }
    if state.target_switches.contains(TargetFlags::FLOATING_SS) {
        state.macros.define_switch("ZU");
    }
    if state.target_switches.contains(TargetFlags::INDEXED_GLOBALS) {
        state.macros.define_switch("XGV");
    }
    if state.target_switches.contains(TargetFlags::WINDOWS) {
        state.macros.define_switch("ZW");
    }
    if state.target_switches.contains(TargetFlags::NEED_STACK_FRAME) {
        state.macros.define_switch("OF");
    }
    if state.target_switches.contains(TargetFlags::GEN_FWAIT_386) {
        state.macros.define_switch("ZFW");
    }
    if state
        .gen_switches
        .contains(GenFlags::NO_CALL_RET_TRANSFORM)
    {
        state.macros.define_switch("OC");
    }
    if state.gen_switches.contains(GenFlags::SUPER_OPTIMAL) {
        state.macros.define_switch("OH");
    }
    if state.gen_switches.contains(GenFlags::FLOW_REG_SAVES) {
        state.macros.define_switch("OK");
    }
    if state.gen_switches.contains(GenFlags::NO_OPTIMIZATION) {
        state.macros.define_switch("OD");
    }
    if state.gen_switches.contains(GenFlags::RELAX_ALIAS) {
        state.macros.define_switch("OA");
    }
    if state.gen_switches.contains(GenFlags::LOOP_OPTIMIZATION) {
        state.macros.define_switch("OL");
    }
    if state.gen_switches.contains(GenFlags::INS_SCHEDULING) {
        state.macros.define_switch("OR");
    }
    if state
        .gen_switches
        .contains(GenFlags::FP_UNSTABLE_OPTIMIZATION)
    {
        state.macros.define_switch("ON");
    }
    if state.gen_switches.contains(GenFlags::FPU_ROUNDING_OMIT) {
        state.macros.define_switch("ZRO");
    }
    if state.gen_switches.contains(GenFlags::FPU_ROUNDING_INLINE) {
        state.macros.define_switch("ZRI");
    }
    if state.flags.use_long_double {
        state.macros.define_switch("FLD");
    }
    if state.flags.signed_char {
        state.macros.define_switch("J");
    }
    if state.pch_file.is_some() {
        state.macros.define_switch("FH");
    }
    if state.flags.no_pch_warnings {
        state.macros.define_switch("FHQ");
    }
    if state.flags.inline_functions {
        state.macros.define_switch("OI");
    }
    if state.flags.unique_functions {
        state.macros.define_switch("OU");
    }
    if state.arch == TargetArch::I386 {
        if state.flags.register_conventions {
            state.macros.define_switch("3R");
        } else {
            state.macros.define_switch("3S");
        }
    }
    if state.flags.emit_names {
        state.macros.define_switch("EN");
    }
    if state.flags.make_enums_an_int {
        state.macros.define_switch("EI");
    }
    if state.flags.zc_switch_used {
        state.macros.define_switch("ZC");
    }
    if !state.flags.use_unicode {
        state.macros.define_switch("ZK");
    }
    if state.flags.save_restore_segregs {
        state.macros.define_switch("R");
    }
    if state.flags.sg_switch_used {
        state.macros.define_switch("SG");
    }
    if state.flags.st_switch_used {
        state.macros.define_switch("ST");
    }
    if state.flags.zu_switch_used {
        state.macros.define_switch("ZU");
    }
    if state.flags.bm_switch_used {
        state.macros.define_switch("BM");
        state.macros.define("_MT");
    }
    if state.flags.bd_switch_used {
        state.macros.define_switch("BD");
    }
    if state.flags.bc_switch_used {
        state.macros.define_switch("BC");
    }
    if state.flags.bg_switch_used {
        state.macros.define_switch("BG");
    }
    if state.flags.br_switch_used {
        state.macros.define_switch("BR");
        state.macros.define("_DLL");
    }
    if state.flags.bw_switch_used {
        state.macros.define_switch("BW");
    }
    if state.flags.zm_switch_used {
        state.macros.define_switch("ZM");
    }
    if state.flags.ep_switch_used {
        state.macros.define_switch("EP");
    }
    if state.flags.ee_switch_used {
        state.macros.define_switch("EE");
    }
    if state.flags.ec_switch_used {
        state.macros.define_switch("EC");
    }
    let (cpu_digit, cpu_value) = match synth.cpu {
        CpuLevel::Cpu86 => ("0", "0"),
        CpuLevel::Cpu186 => ("1", "100"),
        CpuLevel::Cpu286 => ("2", "200"),
        CpuLevel::Cpu386 => ("3", "300"),
        CpuLevel::Cpu486 => ("4", "400"),
        CpuLevel::Cpu586 => ("5", "500"),
        CpuLevel::Cpu686 => ("6", "600"),
    };
    state.macros.define_switch(cpu_digit);
    state
        .macros
        .insert("_M_IX86", Some(cpu_value.to_string()));
    match synth.fpt {
        FpuCalls::Library => {
            // floats-to-memory is pointless without inline FPU code
            state.flags.op_switch_used = false;
            state.macros.define_switch("FPC");
        }
        FpuCalls::Emulated => {
            state.macros.define_switch("FPI");
            state.macros.define("__FPI__");
        }
        FpuCalls::Inline => {
            state.macros.define_switch("FPI87");
            state.macros.define("__FPI__");
        }
    }
    match synth.fpu {
        None => {}
        Some(FpuLevel::Fpu87) => state.macros.define_switch("FP2"),
        Some(FpuLevel::Fpu387) => state.macros.define_switch("FP3"),
        Some(FpuLevel::Fpu586) => state.macros.define_switch("FP5"),
        Some(FpuLevel::Fpu686) => state.macros.define_switch("FP6"),
    }
    if state.swdata.near_data_named {
        state.macros.define_switch("ND");
    }
    if state.flags.op_switch_used {
        state.macros.define_switch("OP");
    }
    if !state.toggles.check_stack {
        state.macros.define_switch("S");
    }
}

#[cfg(test)]
mod tests {
    use crate::options::testing::FakeSource;
    use crate::options::{interpret, Invocation};
    use crate::state::MacroDef;
    use crate::target::TargetArch;

    fn macros(arch: TargetArch, args: &[&str]) -> Vec<MacroDef> {
        let invocation = Invocation {
            arch,
            default_system: "DOS".to_string(),
            arguments: args.iter().map(|a| a.to_string()).collect(),
        };
        interpret(&invocation, &FakeSource::default()).macros
    }

    fn macro_names(defs: &[MacroDef]) -> Vec<&str> {
        defs.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_memory_model_macro_family() {
        let defs = macros(TargetArch::I86, &["-ml"]);
        let names = macro_names(&defs);
        assert!(names.contains(&"M_I86LM"));
        assert!(names.contains(&"__SW_ML"));
        assert!(names.contains(&"_M_I86LM"));
        assert!(names.contains(&"__LARGE__"));

        let defs = macros(TargetArch::I386, &[]);
        let names = macro_names(&defs);
        assert!(names.contains(&"M_386FM"));
        assert!(names.contains(&"_M_386FM"));
        assert!(names.contains(&"__FLAT__"));
    }

    #[test]
    fn test_iso_mode_drops_the_legacy_names() {
        let defs = macros(TargetArch::I86, &["-za", "-ml"]);
        let names = macro_names(&defs);
        assert!(!names.contains(&"M_I86LM"));
        assert!(names.contains(&"_M_I86LM"));
        assert!(!names.contains(&"M_I86"));
        assert!(names.contains(&"NO_EXT_KEYS"));
    }

    #[test]
    fn test_cpu_revision_macro_carries_a_value() {
        let defs = macros(TargetArch::I386, &["-4r"]);
        let revision = defs
            .iter()
            .find(|d| d.name == "_M_IX86")
            .expect("cpu macro");
        assert_eq!(revision.value.as_deref(), Some("400"));
        assert!(defs.iter().any(|d| d.name == "__SW_4"));
    }

    #[test]
    fn test_fpu_strategy_macros() {
        let defs = macros(TargetArch::I386, &[]);
        let names = macro_names(&defs);
        assert!(names.contains(&"__SW_FPI"));
        assert!(names.contains(&"__FPI__"));
        assert!(names.contains(&"__SW_FP3"));

        let defs = macros(TargetArch::I386, &["-fpc"]);
        let names = macro_names(&defs);
        assert!(names.contains(&"__SW_FPC"));
        assert!(!names.contains(&"__FPI__"));
        assert!(!names.contains(&"__SW_FP3"));
    }

    #[test]
    fn test_library_fpu_calls_cancel_floats_to_memory() {
        let defs = macros(TargetArch::I386, &["-op", "-fpc"]);
        assert!(!macro_names(&defs).contains(&"__SW_OP"));
        let defs = macros(TargetArch::I386, &["-op"]);
        assert!(macro_names(&defs).contains(&"__SW_OP"));
    }

    #[test]
    fn test_pegging_macros_reflect_the_resolved_state() {
        // 32-bit flat: ds, es, fs pegged, gs floating
        let defs = macros(TargetArch::I386, &[]);
        let names = macro_names(&defs);
        assert!(names.contains(&"__SW_ZDP"));
        assert!(names.contains(&"__SW_ZFP"));
        assert!(names.contains(&"__SW_ZGF"));
    }

    #[test]
    fn test_build_flavor_macros() {
        let defs = macros(TargetArch::I386, &["-bm", "-br"]);
        let names = macro_names(&defs);
        assert!(names.contains(&"__SW_BM"));
        assert!(names.contains(&"_MT"));
        assert!(names.contains(&"__SW_BR"));
        assert!(names.contains(&"_DLL"));
    }

    #[test]
    fn test_stack_checking_macro_appears_when_disabled() {
        let defs = macros(TargetArch::I386, &["-s"]);
        assert!(macro_names(&defs).contains(&"__SW_S"));
        let defs = macros(TargetArch::I386, &[]);
        assert!(!macro_names(&defs).contains(&"__SW_S"));
    }

    #[test]
    fn test_calling_convention_macro_per_architecture() {
        let defs = macros(TargetArch::I386, &[]);
        assert!(macro_names(&defs).contains(&"__SW_3R"));
        let defs = macros(TargetArch::I386, &["-3s"]);
        assert!(macro_names(&defs).contains(&"__SW_3S"));
        let defs = macros(TargetArch::I86, &[]);
        let names = macro_names(&defs);
        assert!(!names.contains(&"__SW_3R"));
        assert!(!names.contains(&"__SW_3S"));
    }

    #[test]
    fn test_always_present_macros() {
        let defs = macros(TargetArch::I386, &[]);
        let names = macro_names(&defs);
        assert!(names.contains(&"__CCFE__"));
        assert!(names.contains(&"_PUSHPOP_SUPPORTED"));
        assert!(names.contains(&"_STDCALL_SUPPORTED"));
        assert!(names.contains(&"__X86__"));
        assert!(names.contains(&"_M_I386"));
    }
}

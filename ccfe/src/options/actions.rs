// SPDX-License-Identifier: GPL-3.0-or-later

//! Switch handlers.
//!
//! Every table entry names one [`Action`]; [`apply`] is the single
//! dispatch point, so an unhandled action is a compile error. Handlers
//! mutate the shared [`crate::state::OptionState`] and nothing else;
//! derived fields are left to the resolver. A handler bound to a greedy
//! pattern consumes its trailing characters from the scanner directly and
//! validates the switch end itself.

use super::scan::{is_option_delimiter, strip_quotes, Scanner};
use super::table::{ensure_end_of_switch, process_sub_option, Matched};
use super::tables::{OPTIMIZATION_OPTIONS, PREPROCESS_OPTIONS};
use super::ParseContext;
use crate::diagnostics::DiagnosticKind;
use crate::state::{CStd, EncodingChoice, WarningControl};
use crate::target::{
    CallConv, ConvFlags, CpuLevel, DebugFormat, FpuCalls, FpuLevel, GenFlags, MemModel, TargetArch,
    TargetFlags,
};

const DEFAULT_PCH_NAME: &str = "ccfe.pch";
const WLEVEL_MAX: u32 = 4;

/// Handler identifiers bound by the switch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // sub-option families
    OptimizationFamily,
    PreprocessFamily,

    // optimization sub-switches
    RelaxAlias,
    BranchPrediction,
    NoOptimization,
    InlineThreshold,
    NoCallRetTransform,
    StackFrame,
    MathInline,
    FloatsToMemory,
    SuperOptimal,
    InlineFunctions,
    FlowRegSaves,
    LoopOptimization,
    LoopUnrolling,
    FpUnstableOpt,
    MemoryLowOk,
    InsScheduling,
    OptimizeSize,
    OptimizeTime,
    UniqueFunctions,
    MaxOptimization,
    NullDerefOk,

    // preprocessor sub-switches
    KeepComments,
    LineDirectives,
    IgnoreLineDirectives,
    PreprocWidth,
    PreprocChar,

    // target selection
    Cpu(CpuLevel),
    CpuRegisterCalls(CpuLevel),
    CpuStackCalls(CpuLevel),
    Fpu(FpuLevel),
    FpuInline,
    FpuEmulated,
    FpuLibrary,
    FpuReduceStack,
    FpuDivideCheck,
    MemModel(MemModel),
    DebugFormat(DebugFormat),
    TargetName,
    Windows,
    CheapWindows,

    // build flavor
    DllCode,
    ConsoleApp,
    GuiApp,
    Multithread,
    DllRuntime,
    WindowedApp,

    // debug levels
    DebugLevel0,
    DebugLevel1,
    DebugLevel2,
    DebugLevel3,
    DebugLevel9,

    // macros and defines
    DefineMacro,
    UndefMacro,
    ExtendedDefines,

    // diagnostics and listing
    ErrorLimit,
    QuietErrors,
    FullErrorPaths,
    WarnFatal,
    WarnLevelMax,
    WarningLevel,
    WarnDisable,
    WarnEnable,
    BrowserInfo,
    ApiLogging,
    ExtraStats,

    // conventions and segments
    CallConv(CallConv),
    EcSwitch,
    PrologueHook,
    EpilogueHook,
    EmitNames,
    SaveSegRegs,
    Rent,
    ReturnsPromoted,
    StackGrowth,
    StackTouch,
    StackCheckOff,
    PegDs(bool),
    PegFs(bool),
    PegGs(bool),
    LoadDsDirect,
    Fwait386,
    StackSegFloat,
    IndexedGlobals,
    UnalignedSegs,
    NoStdcallAtNumber,
    Profiling,
    NewProfiling,
    StatementCounting,
    EasyOmf,
    PlainOmf,

    // language and conformance
    CStd(CStd),
    NoExtensions,
    StrictAnsi,
    NonIsoNamesOff,
    Extensions,
    UnixExt,
    EnumsInt,
    EnumsMinimal,
    SignedChar,
    LongDouble,
    StringsInCode,
    Prototypes,
    PrototypesDump,
    CheckSyntax,
    AutoAggInits,
    NoCheckInits,
    NoCheckQualifiers,
    Overlays,
    GlobalPrototypes,

    // encoding
    Encoding(EncodingChoice),
    EncodingUnicode,

    // libraries and output control
    NoLibNames,
    AllDefaultLibs,
    NoDepends,
    NoTargImpSymbols,
    MultipleCodeSegs,
    SlackByteWarn,
    PackAmount,
    RoundingOmit,
    RoundingInline,
    Quiet,
    DataThreshold,

    // files and paths
    AddInclude,
    PchFile,
    PchFileQuiet,
    ForceInclude,
    ForcePreInclude,
    ObjectFile,
    ErrorFile,
    TruncatedNamesOn,
    TruncatedNamesOff,
    TrackIncludes,
    AutoDepend,
    AutoDependTarget,
    AutoDependSource,
    AutoDependHeaderPath,
    AutoDependBackSlash,
    AutoDependForwardSlash,
    ReadOnlyDir,
    ModuleName,
    CodeClass,
    DataSegName,
    TextSegName,
    SegGroup,
    TogglePragma,
    IgnoreEnv,
    IgnoreDefaultDirs,
}

fn file_name(m: &Matched<'_>) -> String {
    strip_quotes(m.parm)
}

fn non_empty(name: String) -> Option<String> {
    if name.is_empty() { None } else { Some(name) }
}

/// `-zw` and `-zW` may carry a trailing `s` selecting smart callbacks.
fn check_smart_windows(sc: &mut Scanner<'_>, switch_start: usize, ctx: &mut ParseContext<'_>) {
    if sc.peek().map(|b| b.to_ascii_lowercase()) == Some(b's') {
        ctx.state.target_switches |= TargetFlags::SMART_WINDOWS;
        sc.bump();
    }
    ensure_end_of_switch(sc, switch_start, ctx);
}

/// Shared tail of the `d2`/`d3` handlers.
fn set_debug_level_2(sc: &mut Scanner<'_>, switch_start: usize, ctx: &mut ParseContext<'_>) {
    ctx.state.debug_optimization_change = true;
    ctx.state.gen_switches |= GenFlags::DBG_NUMBERS | GenFlags::DBG_TYPES | GenFlags::DBG_LOCALS;
    if sc.peek() == Some(b'~') {
        sc.bump();
        ctx.state.flags.no_debug_type_names = true;
    }
    ensure_end_of_switch(sc, switch_start, ctx);
}

/// Shared body of `za` and `zA`.
fn set_iso_only(ctx: &mut ParseContext<'_>) {
    ctx.state.flags.extensions_enabled = false;
    ctx.state.flags.non_iso_compliant_names_enabled = false;
    ctx.state.flags.unique_functions = true;
    ctx.state.gen_switches.remove(GenFlags::I_MATH_INLINE);
}

/// Consume a `NAME` or `NAME=VALUE` macro definition after `-d`.
fn define_user_macro(sc: &mut Scanner<'_>, switch_start: usize, ctx: &mut ParseContext<'_>) {
    let start = sc.pos();
    while let Some(b) = sc.peek() {
        if b == b'_' || b.is_ascii_alphanumeric() {
            sc.bump();
        } else {
            break;
        }
    }
    let name = sc.slice_from(start).to_string();
    if name.is_empty() || name.as_bytes()[0].is_ascii_digit() {
        while !is_option_delimiter(sc.peek()) {
            sc.bump();
        }
        ctx.diags
            .report(DiagnosticKind::InvalidSwitch, sc.slice_from(switch_start));
        return;
    }
    let value = if sc.peek() == Some(b'=') {
        sc.bump();
        let vstart = sc.pos();
        while let Some(b) = sc.peek() {
            if matches!(b, b' ' | b'\t') {
                break;
            }
            sc.bump();
        }
        Some(sc.slice_from(vstart).to_string())
    } else {
        None
    };
    ctx.state.macros.insert(&name, value);
}

/// Dispatch one matched table entry.
pub(crate) fn apply(
    action: Action,
    m: Matched<'_>,
    sc: &mut Scanner<'_>,
    switch_start: usize,
    ctx: &mut ParseContext<'_>,
) {
    let st = &mut *ctx.state;
    match action {
        Action::OptimizationFamily => {
            process_sub_option(&OPTIMIZATION_OPTIONS, sc, switch_start, ctx);
        }
        Action::PreprocessFamily => {
            st.flags.cpp_mode = true;
            if !is_option_delimiter(sc.peek()) {
                process_sub_option(&PREPROCESS_OPTIONS, sc, switch_start, ctx);
            }
        }

        Action::RelaxAlias => st.gen_switches |= GenFlags::RELAX_ALIAS,
        Action::BranchPrediction => st.gen_switches |= GenFlags::BRANCH_PREDICTION,
        Action::NoOptimization => st.gen_switches |= GenFlags::NO_OPTIMIZATION,
        Action::InlineThreshold => {
            st.inline_threshold = m.value;
            st.toggles.inline_enabled = true;
        }
        Action::NoCallRetTransform => st.gen_switches |= GenFlags::NO_CALL_RET_TRANSFORM,
        Action::StackFrame => {
            st.target_switches |= TargetFlags::NEED_STACK_FRAME;
            if m.value != 0 {
                st.conv_flags |= ConvFlags::GENERATE_STACK_FRAME;
            }
        }
        Action::MathInline => st.gen_switches |= GenFlags::I_MATH_INLINE,
        Action::FloatsToMemory => st.flags.op_switch_used = true,
        Action::SuperOptimal => st.gen_switches |= GenFlags::SUPER_OPTIMAL,
        Action::InlineFunctions => st.flags.inline_functions = true,
        Action::FlowRegSaves => st.gen_switches |= GenFlags::FLOW_REG_SAVES,
        Action::LoopOptimization => st.gen_switches |= GenFlags::LOOP_OPTIMIZATION,
        Action::LoopUnrolling => {
            st.gen_switches |= GenFlags::LOOP_OPTIMIZATION | GenFlags::LOOP_UNROLLING;
        }
        Action::FpUnstableOpt => st.gen_switches |= GenFlags::FP_UNSTABLE_OPTIMIZATION,
        Action::MemoryLowOk => st.gen_switches.remove(GenFlags::MEMORY_LOW_FAILS),
        Action::InsScheduling => st.gen_switches |= GenFlags::INS_SCHEDULING,
        Action::OptimizeSize => {
            st.gen_switches.remove(GenFlags::NO_OPTIMIZATION);
            st.opt_size = 100;
        }
        Action::OptimizeTime => {
            st.gen_switches.remove(GenFlags::NO_OPTIMIZATION);
            st.opt_size = 0;
        }
        Action::UniqueFunctions => st.flags.unique_functions = true,
        Action::MaxOptimization => {
            st.toggles.check_stack = false;
            st.gen_switches.remove(GenFlags::NO_OPTIMIZATION);
            st.gen_switches |= GenFlags::LOOP_OPTIMIZATION
                | GenFlags::INS_SCHEDULING
                | GenFlags::BRANCH_PREDICTION
                | GenFlags::I_MATH_INLINE;
            st.flags.inline_functions = true;
            // without a threshold inlining would stay effectively disabled
            st.inline_threshold = 20;
            st.toggles.inline_enabled = true;
        }
        Action::NullDerefOk => st.gen_switches |= GenFlags::NULL_DEREF_OK,

        Action::KeepComments => st.flags.cpp_keep_comments = true,
        Action::LineDirectives => st.flags.cpp_line_wanted = true,
        Action::IgnoreLineDirectives => st.flags.cpp_ignore_line = true,
        Action::PreprocWidth => {
            let mut width = m.value;
            if width != 0 && width < 20 {
                width = 20;
            }
            if width > 10000 {
                width = 10000;
            }
            st.preproc_width = width;
        }
        Action::PreprocChar => {
            if let Some(b) = sc.peek() {
                if b.is_ascii() {
                    st.preproc_char = b as char;
                }
                sc.bump();
            }
        }

        Action::Cpu(level) => st.swdata.cpu = Some(level),
        Action::CpuRegisterCalls(level) => {
            st.swdata.cpu = Some(level);
            st.flags.register_conventions = true;
        }
        Action::CpuStackCalls(level) => {
            st.swdata.cpu = Some(level);
            st.flags.register_conventions = false;
        }
        Action::Fpu(level) => st.swdata.fpu = Some(level),
        Action::FpuInline => st.swdata.fpt = Some(FpuCalls::Inline),
        Action::FpuEmulated => st.swdata.fpt = Some(FpuCalls::Emulated),
        Action::FpuLibrary => st.swdata.fpt = Some(FpuCalls::Library),
        Action::FpuReduceStack => st.stack87 = 4,
        Action::FpuDivideCheck => st.target_switches |= TargetFlags::P5_DIVIDE_CHECK,
        Action::MemModel(model) => st.swdata.mem = Some(model),
        Action::DebugFormat(format) => st.swdata.dbg_fmt = Some(format),
        Action::TargetName => st.swdata.system_name = Some(m.parm.to_ascii_uppercase()),
        Action::Windows => {
            st.swdata.system_name = Some("WINDOWS".to_string());
            if st.arch == TargetArch::I86 {
                check_smart_windows(sc, switch_start, ctx);
            }
        }
        Action::CheapWindows => {
            st.swdata.system_name = Some("CHEAP_WINDOWS".to_string());
            check_smart_windows(sc, switch_start, ctx);
        }

        Action::DllCode => {
            st.flags.bd_switch_used = true;
            st.gen_switches |= GenFlags::DLL_RESIDENT_CODE;
        }
        Action::ConsoleApp => st.flags.bc_switch_used = true,
        Action::GuiApp => st.flags.bg_switch_used = true,
        Action::Multithread => st.flags.bm_switch_used = true,
        Action::DllRuntime => st.flags.br_switch_used = true,
        Action::WindowedApp => st.flags.bw_switch_used = true,

        Action::DebugLevel0 => {
            st.debug_optimization_change = false;
            st.gen_switches
                .remove(GenFlags::DBG_NUMBERS | GenFlags::DBG_TYPES | GenFlags::DBG_LOCALS);
            st.flags.debug_info_some = false;
            st.flags.no_debug_type_names = false;
            ensure_end_of_switch(sc, switch_start, ctx);
        }
        Action::DebugLevel1 => {
            st.gen_switches |= GenFlags::DBG_NUMBERS;
            if sc.peek() == Some(b'+') {
                sc.bump();
                st.flags.debug_info_some = true;
                st.gen_switches |= GenFlags::DBG_TYPES | GenFlags::DBG_LOCALS;
            }
            ensure_end_of_switch(sc, switch_start, ctx);
        }
        Action::DebugLevel2 => set_debug_level_2(sc, switch_start, ctx),
        Action::DebugLevel3 => {
            st.flags.dump_types_with_names = true;
            set_debug_level_2(sc, switch_start, ctx);
        }
        Action::DebugLevel9 => st.flags.use_full_codegen_od = true,

        Action::DefineMacro => define_user_macro(sc, switch_start, ctx),
        Action::UndefMacro => st.undef_macros.push(m.parm.to_string()),
        Action::ExtendedDefines => {
            st.flags.extended_defines = true;
            ensure_end_of_switch(sc, switch_start, ctx);
        }

        Action::ErrorLimit => st.error_limit = m.value,
        Action::QuietErrors => st.flags.eq_switch_used = true,
        Action::FullErrorPaths => st.flags.ef_switch_used = true,
        Action::WarnFatal => st.flags.warnings_cause_bad_exit = true,
        Action::WarnLevelMax => st.warning_level = WLEVEL_MAX,
        Action::WarningLevel => st.warning_level = m.value.min(WLEVEL_MAX),
        Action::WarnDisable => st.warning_controls.push(WarningControl {
            number: m.value,
            enabled: false,
        }),
        Action::WarnEnable => st.warning_controls.push(WarningControl {
            number: m.value,
            enabled: true,
        }),
        Action::BrowserInfo => st.flags.emit_browser_info = true,
        Action::ApiLogging => st.gen_switches |= GenFlags::ECHO_API_CALLS,
        Action::ExtraStats => st.flags.extra_stats_wanted = true,

        Action::CallConv(conv) => st.call_conv = conv,
        Action::EcSwitch => st.flags.ec_switch_used = true,
        Action::PrologueHook => {
            st.flags.ep_switch_used = true;
            st.proepi_data_size = m.value;
        }
        Action::EpilogueHook => st.flags.ee_switch_used = true,
        Action::EmitNames => st.flags.emit_names = true,
        Action::SaveSegRegs => st.flags.save_restore_segregs = true,
        Action::Rent => st.flags.rent = true,
        Action::ReturnsPromoted => st.flags.returns_promoted = true,
        Action::StackGrowth => st.flags.sg_switch_used = true,
        Action::StackTouch => st.flags.st_switch_used = true,
        Action::StackCheckOff => st.toggles.check_stack = false,
        Action::PegDs(on) => st.swdata.peg_ds.set(on),
        Action::PegFs(on) => st.swdata.peg_fs.set(on),
        Action::PegGs(on) => st.swdata.peg_gs.set(on),
        Action::LoadDsDirect => st.target_switches |= TargetFlags::LOAD_DS_DIRECTLY,
        Action::Fwait386 => st.target_switches |= TargetFlags::GEN_FWAIT_386,
        Action::StackSegFloat => {
            st.flags.zu_switch_used = true;
            st.target_switches |= TargetFlags::FLOATING_SS;
        }
        Action::IndexedGlobals => st.target_switches |= TargetFlags::INDEXED_GLOBALS,
        Action::UnalignedSegs => st.flags.unaligned_segs = true,
        Action::NoStdcallAtNumber => st.flags.use_stdcall_at_number = false,
        Action::Profiling => st.target_switches |= TargetFlags::P5_PROFILING,
        Action::NewProfiling => st.target_switches |= TargetFlags::NEW_P5_PROFILING,
        Action::StatementCounting => st.target_switches |= TargetFlags::STATEMENT_COUNTING,
        Action::EasyOmf => st.target_switches |= TargetFlags::EZ_OMF,
        Action::PlainOmf => {
            st.gen_switches.remove(GenFlags::OBJ_ELF | GenFlags::OBJ_COFF);
        }

        Action::CStd(standard) => st.c_std = Some(standard),
        Action::NoExtensions => set_iso_only(ctx),
        Action::StrictAnsi => {
            st.flags.strict_ansi = true;
            set_iso_only(ctx);
        }
        Action::NonIsoNamesOff => st.flags.non_iso_compliant_names_enabled = false,
        Action::Extensions => {
            st.flags.extensions_enabled = true;
            st.flags.non_iso_compliant_names_enabled = true;
        }
        Action::UnixExt => st.flags.unix_ext = true,
        Action::EnumsInt => {
            st.flags.make_enums_an_int = true;
            st.flags.original_enum_setting = true;
        }
        Action::EnumsMinimal => {
            st.flags.make_enums_an_int = false;
            st.flags.original_enum_setting = false;
        }
        Action::SignedChar => st.flags.signed_char = true,
        Action::LongDouble => st.flags.use_long_double = true,
        Action::StringsInCode => {
            st.flags.strings_in_code_segment = true;
            st.flags.zc_switch_used = true;
            st.target_switches |= TargetFlags::CONST_IN_CODE;
        }
        Action::Prototypes => st.flags.generate_prototypes = true,
        Action::PrototypesDump => {
            st.flags.generate_prototypes = true;
            st.flags.dump_prototypes = true;
        }
        Action::CheckSyntax => st.flags.check_syntax = true,
        Action::AutoAggInits => st.flags.auto_agg_inits = true,
        Action::NoCheckInits => st.flags.no_check_inits = true,
        Action::NoCheckQualifiers => st.flags.no_check_qualifiers = true,
        Action::Overlays => st.flags.using_overlays = true,
        Action::GlobalPrototypes => st.flags.check_global_prototypes = true,

        Action::Encoding(choice) => st.encoding = Some(choice),
        Action::EncodingUnicode => {
            st.encoding = Some(EncodingChoice::UnicodeTable);
            st.unicode_code_page = m.value;
        }

        Action::NoLibNames => st.flags.emit_library_names = false,
        Action::AllDefaultLibs => st.flags.emit_all_default_libs = true,
        Action::NoDepends => st.flags.emit_dependencies = false,
        Action::NoTargImpSymbols => st.flags.emit_targimp_symbols = false,
        Action::MultipleCodeSegs => {
            st.flags.multiple_code_segments = true;
            st.flags.zm_switch_used = true;
        }
        Action::SlackByteWarn => st.flags.slack_byte_warning = true,
        Action::PackAmount => {
            let bounded = m.value.clamp(1, 16);
            let mut amount = 1;
            while amount * 2 <= bounded {
                amount *= 2;
            }
            st.pack_amount = amount;
        }
        Action::RoundingOmit => {
            st.gen_switches |= GenFlags::FPU_ROUNDING_OMIT;
            st.gen_switches.remove(GenFlags::FPU_ROUNDING_INLINE);
        }
        Action::RoundingInline => {
            st.gen_switches |= GenFlags::FPU_ROUNDING_INLINE;
            st.gen_switches.remove(GenFlags::FPU_ROUNDING_OMIT);
        }
        Action::Quiet => st.flags.quiet_mode = true,
        Action::DataThreshold => {
            st.data_threshold = if m.value > st.arch.int_max() {
                256
            } else {
                m.value
            };
        }

        Action::AddInclude => {
            let list = file_name(&m);
            st.add_include_list(&list);
        }
        Action::PchFile => {
            st.pch_file = Some(if m.parm.is_empty() {
                DEFAULT_PCH_NAME.to_string()
            } else {
                file_name(&m)
            });
        }
        Action::PchFileQuiet => {
            st.flags.no_pch_warnings = true;
            st.pch_file = Some(if m.parm.is_empty() {
                DEFAULT_PCH_NAME.to_string()
            } else {
                file_name(&m)
            });
        }
        Action::ForceInclude => st.force_include = Some(file_name(&m)),
        Action::ForcePreInclude => st.force_pre_include = non_empty(file_name(&m)),
        Action::ObjectFile => {
            st.object_file = Some(file_name(&m));
            // in case preprocessor output was requested as well
            st.flags.cpp_output_to_file = true;
        }
        Action::ErrorFile => st.error_file = non_empty(file_name(&m)),
        Action::TruncatedNamesOn => st.flags.check_truncated_fnames = true,
        Action::TruncatedNamesOff => st.flags.check_truncated_fnames = false,
        Action::TrackIncludes => st.flags.track_includes = true,
        Action::AutoDepend => {
            st.flags.generate_auto_depend = true;
            st.depend_file = non_empty(file_name(&m));
        }
        Action::AutoDependTarget => {
            st.flags.generate_auto_depend = true;
            st.depend_target = Some(file_name(&m));
        }
        Action::AutoDependSource => {
            st.flags.generate_auto_depend = true;
            st.src_dep_name = Some(file_name(&m));
        }
        Action::AutoDependHeaderPath => {
            st.flags.generate_auto_depend = true;
            st.depend_header_path = Some(file_name(&m));
        }
        Action::AutoDependBackSlash => st.depend_force_slash = Some('\\'),
        Action::AutoDependForwardSlash => st.depend_force_slash = Some('/'),
        Action::ReadOnlyDir => st.read_only_dirs.push(file_name(&m)),
        Action::ModuleName => st.module_name = Some(m.parm.to_string()),
        Action::CodeClass => st.code_class = Some(m.parm.to_string()),
        Action::DataSegName => {
            st.swdata.near_data_named = true;
            st.data_seg_name = non_empty(m.parm.to_string());
        }
        Action::TextSegName => st.text_seg_name = Some(m.parm.to_string()),
        Action::SegGroup => st.code_group = Some(m.parm.to_string()),
        Action::TogglePragma => st.toggles_set.push(m.parm.to_string()),
        Action::IgnoreEnv => st.flags.cpp_ignore_env = true,
        Action::IgnoreDefaultDirs => st.flags.ignore_default_dirs = true,
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later

//! The shipped switch vocabulary.
//!
//! Tables are data, not mechanism: the matcher in [`super::table`] works
//! for any rule list. Order is significant — more specific prefixes come
//! before their shorter sub-strings, so `fhq` must precede `fh`, `zku`
//! must precede `zk`, and so on.

use super::actions::Action;
use super::table::{OptionRule, OptionTable};
use crate::state::{CStd, EncodingChoice};
use crate::target::{CallConv, CpuLevel, DebugFormat, FpuLevel, MemModel, TargetArch};
use std::sync::LazyLock;

/// The `-o` sub-switch family.
pub static OPTIMIZATION_OPTIONS: LazyLock<OptionTable> = LazyLock::new(|| OptionTable {
    family: Some("optimization"),
    rules: vec![
        OptionRule::new("a", 0, Action::RelaxAlias),
        OptionRule::new("b", 0, Action::BranchPrediction),
        OptionRule::new("d", 0, Action::NoOptimization),
        OptionRule::new("e=#", 20, Action::InlineThreshold),
        OptionRule::new("c", 0, Action::NoCallRetTransform),
        OptionRule::new("f+", 1, Action::StackFrame),
        OptionRule::new("f", 0, Action::StackFrame),
        OptionRule::new("m", 0, Action::MathInline),
        OptionRule::new("p", 0, Action::FloatsToMemory),
        OptionRule::new("h", 0, Action::SuperOptimal),
        OptionRule::new("i", 0, Action::InlineFunctions),
        OptionRule::new("k", 0, Action::FlowRegSaves),
        OptionRule::new("l+", 0, Action::LoopUnrolling),
        OptionRule::new("l", 0, Action::LoopOptimization),
        OptionRule::new("n", 0, Action::FpUnstableOpt),
        OptionRule::new("o", 0, Action::MemoryLowOk),
        OptionRule::new("r", 0, Action::InsScheduling),
        OptionRule::new("s", 0, Action::OptimizeSize),
        OptionRule::new("t", 0, Action::OptimizeTime),
        OptionRule::new("u", 0, Action::UniqueFunctions),
        OptionRule::new("x", 0, Action::MaxOptimization),
        OptionRule::new("z", 0, Action::NullDerefOk),
    ],
});

/// The `-p` sub-switch family. The `=` and `#` entries rebind the
/// preprocessor directive character.
pub static PREPROCESS_OPTIONS: LazyLock<OptionTable> = LazyLock::new(|| OptionTable {
    family: Some("preprocessor"),
    rules: vec![
        OptionRule::new("c", 0, Action::KeepComments),
        OptionRule::new("l", 0, Action::LineDirectives),
        OptionRule::new("w=#", 0, Action::PreprocWidth),
        OptionRule::new("=", 0, Action::PreprocChar),
        OptionRule::new("#", 0, Action::PreprocChar),
    ],
});

static CFE_OPTIONS_I86: LazyLock<OptionTable> = LazyLock::new(|| build_cfe(TargetArch::I86));
static CFE_OPTIONS_I386: LazyLock<OptionTable> = LazyLock::new(|| build_cfe(TargetArch::I386));

/// The top-level switch table for one architecture.
pub fn cfe_options(arch: TargetArch) -> &'static OptionTable {
    match arch {
        TargetArch::I86 => &CFE_OPTIONS_I86,
        TargetArch::I386 => &CFE_OPTIONS_I386,
    }
}

fn build_cfe(arch: TargetArch) -> OptionTable {
    let mut rules = vec![
        OptionRule::new("o*", 0, Action::OptimizationFamily),
        OptionRule::new("i=@", 0, Action::AddInclude),
        OptionRule::new("zq", 0, Action::Quiet),
        OptionRule::new("q", 0, Action::Quiet),
    ];
    match arch {
        TargetArch::I86 => {
            rules.extend([
                OptionRule::new("0", 0, Action::Cpu(CpuLevel::Cpu86)),
                OptionRule::new("1", 0, Action::Cpu(CpuLevel::Cpu186)),
                OptionRule::new("2", 0, Action::Cpu(CpuLevel::Cpu286)),
                OptionRule::new("3", 0, Action::Cpu(CpuLevel::Cpu386)),
                OptionRule::new("4", 0, Action::Cpu(CpuLevel::Cpu486)),
                OptionRule::new("5", 0, Action::Cpu(CpuLevel::Cpu586)),
                OptionRule::new("6", 0, Action::Cpu(CpuLevel::Cpu686)),
            ]);
        }
        TargetArch::I386 => {
            rules.extend([
                OptionRule::new("6r", 0, Action::CpuRegisterCalls(CpuLevel::Cpu686)),
                OptionRule::new("6s", 0, Action::CpuStackCalls(CpuLevel::Cpu686)),
                OptionRule::new("6", 0, Action::Cpu(CpuLevel::Cpu686)),
                OptionRule::new("5r", 0, Action::CpuRegisterCalls(CpuLevel::Cpu586)),
                OptionRule::new("5s", 0, Action::CpuStackCalls(CpuLevel::Cpu586)),
                OptionRule::new("5", 0, Action::Cpu(CpuLevel::Cpu586)),
                OptionRule::new("4r", 0, Action::CpuRegisterCalls(CpuLevel::Cpu486)),
                OptionRule::new("4s", 0, Action::CpuStackCalls(CpuLevel::Cpu486)),
                OptionRule::new("4", 0, Action::Cpu(CpuLevel::Cpu486)),
                OptionRule::new("3r", 0, Action::CpuRegisterCalls(CpuLevel::Cpu386)),
                OptionRule::new("3s", 0, Action::CpuStackCalls(CpuLevel::Cpu386)),
                OptionRule::new("3", 0, Action::Cpu(CpuLevel::Cpu386)),
            ]);
        }
    }
    rules.push(OptionRule::new("aa", 0, Action::AutoAggInits));
    // more specific auto-depend prefixes first, or the short `ad` entry
    // would capture them
    rules.extend([
        OptionRule::new("adt=@", 0, Action::AutoDependTarget),
        OptionRule::new("adbs", 0, Action::AutoDependBackSlash),
        OptionRule::new("add=@", 0, Action::AutoDependSource),
        OptionRule::new("adfs", 0, Action::AutoDependForwardSlash),
        OptionRule::new("adhp=@", 0, Action::AutoDependHeaderPath),
        OptionRule::new("ad=@", 0, Action::AutoDepend),
        OptionRule::new("ai", 0, Action::NoCheckInits),
        OptionRule::new("aq", 0, Action::NoCheckQualifiers),
        OptionRule::new("d0*", 0, Action::DebugLevel0),
        OptionRule::new("d1*", 0, Action::DebugLevel1),
        OptionRule::new("d2*", 0, Action::DebugLevel2),
        OptionRule::new("d3*", 0, Action::DebugLevel3),
        OptionRule::new("d9*", 0, Action::DebugLevel9),
        OptionRule::new("d+*", 0, Action::ExtendedDefines),
        OptionRule::new("db", 0, Action::BrowserInfo),
        OptionRule::new("d*", 0, Action::DefineMacro),
        OptionRule::new("en", 0, Action::EmitNames),
        OptionRule::new("ep=#", 0, Action::PrologueHook),
        OptionRule::new("ee", 0, Action::EpilogueHook),
        OptionRule::new("ef", 0, Action::FullErrorPaths),
        OptionRule::new("ei", 0, Action::EnumsInt),
        OptionRule::new("em", 0, Action::EnumsMinimal),
        OptionRule::new("ecc", 0, Action::CallConv(CallConv::Cdecl)),
        OptionRule::new("ecd", 0, Action::CallConv(CallConv::Stdcall)),
        OptionRule::new("ecf", 0, Action::CallConv(CallConv::Fastcall)),
        OptionRule::new("eco", 0, Action::CallConv(CallConv::Optlink)),
        OptionRule::new("ecp", 0, Action::CallConv(CallConv::Pascal)),
        OptionRule::new("ecs", 0, Action::CallConv(CallConv::Syscall)),
        OptionRule::new("ecr", 0, Action::CallConv(CallConv::Fortran)),
        OptionRule::new("ecw", 0, Action::CallConv(CallConv::Register)),
        OptionRule::new("ec", 0, Action::EcSwitch),
        OptionRule::new("et", 0, Action::Profiling),
        OptionRule::new("eq", 0, Action::QuietErrors),
        OptionRule::new("etp", 0, Action::NewProfiling),
        OptionRule::new("esp", 0, Action::StatementCounting),
    ]);
    if arch == TargetArch::I386 {
        rules.push(OptionRule::new("eoo", 0, Action::PlainOmf));
        rules.push(OptionRule::new("ez", 0, Action::EasyOmf));
    }
    rules.extend([
        OptionRule::new("e=#", 0, Action::ErrorLimit),
        OptionRule::new("hw", 0, Action::DebugFormat(DebugFormat::Native)),
        OptionRule::new("hda", 0, Action::DebugFormat(DebugFormat::DwarfA)),
        OptionRule::new("hdg", 0, Action::DebugFormat(DebugFormat::DwarfG)),
        OptionRule::new("hd", 0, Action::DebugFormat(DebugFormat::Dwarf)),
        OptionRule::new("hc", 0, Action::DebugFormat(DebugFormat::CodeView)),
        OptionRule::new("g=$", 0, Action::SegGroup),
        OptionRule::new("lc", 0, Action::ApiLogging),
        OptionRule::new("ms", 0, Action::MemModel(MemModel::Small)),
        OptionRule::new("mm", 0, Action::MemModel(MemModel::Medium)),
        OptionRule::new("mc", 0, Action::MemModel(MemModel::Compact)),
        OptionRule::new("ml", 0, Action::MemModel(MemModel::Large)),
    ]);
    match arch {
        TargetArch::I86 => rules.push(OptionRule::new("mh", 0, Action::MemModel(MemModel::Huge))),
        TargetArch::I386 => rules.push(OptionRule::new("mf", 0, Action::MemModel(MemModel::Flat))),
    }
    rules.extend([
        OptionRule::new("nc=$", 0, Action::CodeClass),
        OptionRule::new("nd=$", 0, Action::DataSegName),
        OptionRule::new("nm=$", 0, Action::ModuleName),
        OptionRule::new("nt=$", 0, Action::TextSegName),
        OptionRule::new("pil", 0, Action::IgnoreLineDirectives),
        OptionRule::new("p*", 0, Action::PreprocessFamily),
        OptionRule::new("rod=@", 0, Action::ReadOnlyDir),
        OptionRule::new("re", 0, Action::Rent),
        OptionRule::new("ri", 0, Action::ReturnsPromoted),
        OptionRule::new("r", 0, Action::SaveSegRegs),
        OptionRule::new("sg", 0, Action::StackGrowth),
        OptionRule::new("st", 0, Action::StackTouch),
        OptionRule::new("s", 0, Action::StackCheckOff),
        OptionRule::new("bd", 0, Action::DllCode),
        OptionRule::new("bc", 0, Action::ConsoleApp),
        OptionRule::new("bg", 0, Action::GuiApp),
        OptionRule::new("bm", 0, Action::Multithread),
    ]);
    if arch != TargetArch::I86 {
        rules.push(OptionRule::new("br", 0, Action::DllRuntime));
    }
    rules.extend([
        OptionRule::new("bw", 0, Action::WindowedApp),
        OptionRule::new("bt=$", 0, Action::TargetName),
        OptionRule::new("fhq=@", 0, Action::PchFileQuiet),
        OptionRule::new("fh=@", 0, Action::PchFile),
        OptionRule::new("fip=@", 0, Action::ForcePreInclude),
        OptionRule::new("fi=@", 0, Action::ForceInclude),
        OptionRule::new("fld", 0, Action::LongDouble),
        OptionRule::new("fo=@", 0, Action::ObjectFile),
        OptionRule::new("fr=@", 0, Action::ErrorFile),
        OptionRule::new("ft", 0, Action::TruncatedNamesOn),
        OptionRule::new("fti", 0, Action::TrackIncludes),
        OptionRule::new("fx", 0, Action::TruncatedNamesOff),
        OptionRule::new("fp2", 0, Action::Fpu(FpuLevel::Fpu87)),
        OptionRule::new("fp3", 0, Action::Fpu(FpuLevel::Fpu387)),
        OptionRule::new("fp5", 0, Action::Fpu(FpuLevel::Fpu586)),
        OptionRule::new("fp6", 0, Action::Fpu(FpuLevel::Fpu686)),
        OptionRule::new("fpr", 0, Action::FpuReduceStack),
        OptionRule::new("fpi87", 0, Action::FpuInline),
        OptionRule::new("fpi", 0, Action::FpuEmulated),
        OptionRule::new("fpc", 0, Action::FpuLibrary),
        OptionRule::new("fpd", 0, Action::FpuDivideCheck),
        OptionRule::new("j", 0, Action::SignedChar),
        OptionRule::new("tp=$", 0, Action::TogglePragma),
        OptionRule::new("u$", 0, Action::UndefMacro),
        OptionRule::new("v", 0, Action::Prototypes),
        OptionRule::new("wcd=#", 0, Action::WarnDisable),
        OptionRule::new("wce=#", 0, Action::WarnEnable),
        OptionRule::new("we", 0, Action::WarnFatal),
        OptionRule::new("wo", 0, Action::Overlays),
        OptionRule::new("wpx", 0, Action::GlobalPrototypes),
        OptionRule::new("wx", 0, Action::WarnLevelMax),
        OptionRule::new("w=#", 0, Action::WarningLevel),
        OptionRule::new("x", 0, Action::IgnoreEnv),
    ]);
    if arch == TargetArch::I386 {
        rules.push(OptionRule::new("xgv", 0, Action::IndexedGlobals));
    }
    rules.extend([
        OptionRule::new("xbsa", 0, Action::UnalignedSegs),
        OptionRule::new("xx", 0, Action::IgnoreDefaultDirs),
        OptionRule::new("za89", 0, Action::CStd(CStd::C89)),
        OptionRule::new("za99", 0, Action::CStd(CStd::C99)),
        OptionRule::new("za23", 0, Action::CStd(CStd::C23)),
        OptionRule::new("zam", 0, Action::NonIsoNamesOff),
        OptionRule::new("zA", 0, Action::StrictAnsi),
        OptionRule::new("za", 0, Action::NoExtensions),
        OptionRule::new("zc", 0, Action::StringsInCode),
        OptionRule::new("zdf", 0, Action::PegDs(false)),
        OptionRule::new("zdp", 0, Action::PegDs(true)),
        OptionRule::new("zdl", 0, Action::LoadDsDirect),
        OptionRule::new("zff", 0, Action::PegFs(false)),
        OptionRule::new("zfp", 0, Action::PegFs(true)),
        OptionRule::new("zgf", 0, Action::PegGs(false)),
        OptionRule::new("zgp", 0, Action::PegGs(true)),
        OptionRule::new("ze", 0, Action::Extensions),
        OptionRule::new("zfw", 0, Action::Fwait386),
        OptionRule::new("zg", 0, Action::PrototypesDump),
        OptionRule::new("zi", 0, Action::ExtraStats),
        OptionRule::new(
            "zk0u",
            0,
            Action::Encoding(EncodingChoice::DoubleByteTranslate),
        ),
        OptionRule::new("zk0", 0, Action::Encoding(EncodingChoice::DoubleByte(0))),
        OptionRule::new("zk1", 0, Action::Encoding(EncodingChoice::DoubleByte(1))),
        OptionRule::new("zk2", 0, Action::Encoding(EncodingChoice::DoubleByte(2))),
        OptionRule::new("zk3", 0, Action::Encoding(EncodingChoice::DoubleByte(3))),
        OptionRule::new("zkl", 0, Action::Encoding(EncodingChoice::DoubleByteHost)),
        OptionRule::new("zku=#", 0, Action::EncodingUnicode),
        OptionRule::new("zk", 0, Action::Encoding(EncodingChoice::DoubleByte(0))),
        OptionRule::new("zld", 0, Action::NoDepends),
        OptionRule::new("zlf", 0, Action::AllDefaultLibs),
        OptionRule::new("zls", 0, Action::NoTargImpSymbols),
        OptionRule::new("zl", 0, Action::NoLibNames),
        OptionRule::new("zm", 0, Action::MultipleCodeSegs),
        OptionRule::new("zpw", 0, Action::SlackByteWarn),
        OptionRule::new("zp=#", 1, Action::PackAmount),
        OptionRule::new("zro", 0, Action::RoundingOmit),
        OptionRule::new("zri", 0, Action::RoundingInline),
        OptionRule::new("zs", 0, Action::CheckSyntax),
        OptionRule::new("zt=#", 256, Action::DataThreshold),
        OptionRule::new("zu", 0, Action::StackSegFloat),
        OptionRule::new("zev", 0, Action::UnixExt),
    ]);
    match arch {
        TargetArch::I86 => {
            rules.push(OptionRule::new("zW*", 0, Action::CheapWindows));
            rules.push(OptionRule::new("zw*", 0, Action::Windows));
        }
        TargetArch::I386 => {
            rules.push(OptionRule::new("zw", 0, Action::Windows));
            rules.push(OptionRule::new("zz", 0, Action::NoStdcallAtNumber));
        }
    }
    OptionTable {
        family: None,
        rules,
    }
}

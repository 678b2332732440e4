// SPDX-License-Identifier: GPL-3.0-or-later

//! Target description types shared by the switch handlers and the resolver.
//!
//! The switch handlers only record choices into these types; deriving the
//! final, internally consistent combination (defaults, per-system
//! corrections, pointer sizes, calling convention) is the resolver's job.

use serde::Serialize;

/// The processor family a compilation targets. Selects the switch
/// vocabulary, the architecture defaults and the pointer sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetArch {
    /// 16-bit x86 (8086 .. Pentium Pro in 16-bit mode).
    I86,
    /// 32-bit x86 (80386 and up).
    I386,
}

impl TargetArch {
    pub fn near_pointer_size(self) -> u8 {
        match self {
            TargetArch::I86 => 2,
            TargetArch::I386 => 4,
        }
    }

    pub fn far_pointer_size(self) -> u8 {
        self.near_pointer_size() + 2
    }

    /// Largest value representable in the target's `int` type.
    pub fn int_max(self) -> u32 {
        match self {
            TargetArch::I86 => 0x7fff,
            TargetArch::I386 => 0x7fff_ffff,
        }
    }

    /// Name of the builtin environment variable holding default switches.
    pub fn builtin_env_var(self) -> &'static str {
        match self {
            TargetArch::I86 => "CCFE",
            TargetArch::I386 => "CCFE386",
        }
    }
}

/// CPU revision selected with the numeric switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CpuLevel {
    Cpu86,
    Cpu186,
    Cpu286,
    Cpu386,
    Cpu486,
    Cpu586,
    Cpu686,
}

/// FPU revision selected with the `fp2`..`fp6` switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum FpuLevel {
    Fpu87,
    Fpu387,
    Fpu586,
    Fpu686,
}

/// How floating-point operations reach the FPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FpuCalls {
    /// Library calls, no FPU instructions in generated code.
    Library,
    /// Inline FPU instructions with emulator fixups.
    Emulated,
    /// Inline FPU instructions, hardware required.
    Inline,
}

/// Code/data addressing combination selected as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemModel {
    Flat,
    Small,
    Medium,
    Compact,
    Large,
    Huge,
}

/// Debug information format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DebugFormat {
    /// The toolchain's own debug format.
    Native,
    CodeView,
    Dwarf,
    /// DWARF with a predefined abbreviation symbol, external linkage.
    DwarfA,
    /// DWARF with a predefined abbreviation symbol, static linkage.
    DwarfG,
}

/// Linkage of the predefined DWARF abbreviation symbol, when one is
/// requested by the debug format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AbbrevLinkage {
    Extern,
    Static,
}

/// Closed set of target operating system categories. Unrecognized names
/// fall into [`TargetSystem::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetSystem {
    Dos,
    Netware,
    Netware5,
    Windows,
    CheapWindows,
    Nt,
    Linux,
    Qnx,
    Os2,
    Rdos,
    Unix,
    Other,
}

/// Default calling convention for functions without an explicit one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CallConv {
    Cdecl,
    Stdcall,
    Fastcall,
    Optlink,
    Pascal,
    Syscall,
    Fortran,
    /// The toolchain's register-based convention; the default.
    Register,
}

bitflags::bitflags! {
    /// Architecture-independent code generator switches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
    pub struct GenFlags: u32 {
        const MEMORY_LOW_FAILS          = 1 << 0;
        const NO_OPTIMIZATION           = 1 << 1;
        const RELAX_ALIAS               = 1 << 2;
        const LOOP_OPTIMIZATION         = 1 << 3;
        const LOOP_UNROLLING            = 1 << 4;
        const INS_SCHEDULING            = 1 << 5;
        const BRANCH_PREDICTION         = 1 << 6;
        const FP_UNSTABLE_OPTIMIZATION  = 1 << 7;
        const NO_CALL_RET_TRANSFORM     = 1 << 8;
        const SUPER_OPTIMAL             = 1 << 9;
        const FLOW_REG_SAVES            = 1 << 10;
        const I_MATH_INLINE             = 1 << 11;
        const NULL_DEREF_OK             = 1 << 12;
        const FPU_ROUNDING_OMIT         = 1 << 13;
        const FPU_ROUNDING_INLINE       = 1 << 14;
        const DBG_CV                    = 1 << 15;
        const DBG_DF                    = 1 << 16;
        const DBG_PREDEF                = 1 << 17;
        const DBG_NUMBERS               = 1 << 18;
        const DBG_TYPES                 = 1 << 19;
        const DBG_LOCALS                = 1 << 20;
        const DLL_RESIDENT_CODE         = 1 << 21;
        const ECHO_API_CALLS            = 1 << 22;
        const OBJ_ELF                   = 1 << 23;
        const OBJ_COFF                  = 1 << 24;
    }
}

bitflags::bitflags! {
    /// x86-specific code generator switches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
    pub struct TargetFlags: u32 {
        const FLAT_MODEL            = 1 << 0;
        const CHEAP_POINTER         = 1 << 1;
        const BIG_CODE              = 1 << 2;
        const BIG_DATA              = 1 << 3;
        const FLOATING_DS           = 1 << 4;
        const FLOATING_ES           = 1 << 5;
        const FLOATING_FS           = 1 << 6;
        const FLOATING_GS           = 1 << 7;
        const FLOATING_SS           = 1 << 8;
        const CONST_IN_CODE         = 1 << 9;
        const INDEXED_GLOBALS       = 1 << 10;
        const WINDOWS               = 1 << 11;
        const CHEAP_WINDOWS         = 1 << 12;
        const SMART_WINDOWS         = 1 << 13;
        const NEED_STACK_FRAME      = 1 << 14;
        const LOAD_DS_DIRECTLY      = 1 << 15;
        const GEN_FWAIT_386         = 1 << 16;
        const P5_DIVIDE_CHECK       = 1 << 17;
        const P5_PROFILING          = 1 << 18;
        const NEW_P5_PROFILING      = 1 << 19;
        const STATEMENT_COUNTING    = 1 << 20;
        const EZ_OMF                = 1 << 21;
        const USE_32                = 1 << 22;
    }
}

bitflags::bitflags! {
    /// Segment registers preserved by the default calling convention.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
    pub struct SegRegs: u8 {
        const DS = 1 << 0;
        const ES = 1 << 1;
        const FS = 1 << 2;
        const GS = 1 << 3;
    }
}

bitflags::bitflags! {
    /// Adjustments applied to the default calling convention.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
    pub struct ConvFlags: u8 {
        const FAR_CALL             = 1 << 0;
        const GENERATE_STACK_FRAME = 1 << 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_sizes_follow_the_architecture() {
        assert_eq!(TargetArch::I86.near_pointer_size(), 2);
        assert_eq!(TargetArch::I86.far_pointer_size(), 4);
        assert_eq!(TargetArch::I386.near_pointer_size(), 4);
        assert_eq!(TargetArch::I386.far_pointer_size(), 6);
    }

    #[test]
    fn test_cpu_levels_are_ordered() {
        assert!(CpuLevel::Cpu286 < CpuLevel::Cpu386);
        assert!(CpuLevel::Cpu686 > CpuLevel::Cpu86);
    }
}

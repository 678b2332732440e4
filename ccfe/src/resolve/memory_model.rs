// SPDX-License-Identifier: GPL-3.0-or-later

//! Stage 5: what the final memory model implies.
//!
//! Pointer sizes and the far-call adjustment fall out of the model; the
//! runtime, math and emulator library name tokens come from fixed-format
//! templates with a single `?` placeholder, substituted from the model
//! letter (16-bit) or the calling convention (32-bit).

use super::Synthesis;
use crate::resolution::LibNames;
use crate::state::OptionState;
use crate::target::{ConvFlags, MemModel, TargetArch, TargetFlags, TargetSystem};

pub(super) fn apply(
    state: &mut OptionState,
    system: TargetSystem,
    synth: &Synthesis,
) -> (u8, u8, LibNames) {
    let arch = state.arch;
    let near = arch.near_pointer_size();
    let far = arch.far_pointer_size();
    let mut code_ptr = near;
    let mut data_ptr = near;
    let mut lib_model = '?';
    match synth.mem {
        MemModel::Flat => {
            lib_model = 's';
            state.target_switches.remove(TargetFlags::CONST_IN_CODE);
        }
        MemModel::Small => {
            lib_model = 's';
            state.flags.strings_in_code_segment = false;
            state.target_switches.remove(TargetFlags::CONST_IN_CODE);
        }
        MemModel::Medium => {
            lib_model = 'm';
            state.conv_flags |= ConvFlags::FAR_CALL;
            state.flags.strings_in_code_segment = false;
            state.target_switches.remove(TargetFlags::CONST_IN_CODE);
            code_ptr = far;
        }
        MemModel::Compact => {
            lib_model = 'c';
            data_ptr = far;
        }
        MemModel::Large => {
            lib_model = 'l';
            state.conv_flags |= ConvFlags::FAR_CALL;
            code_ptr = far;
            data_ptr = far;
        }
        MemModel::Huge => {
            lib_model = 'h';
            state.conv_flags |= ConvFlags::FAR_CALL;
            code_ptr = far;
            data_ptr = far;
        }
    }
    let libs = match arch {
        TargetArch::I86 => {
            let mut clib = "1clib?";
            if state.flags.bm_switch_used {
                clib = "1clibmt?";
            }
            if state.flags.bd_switch_used {
                // the windows runtime is resident already, no DLL variant
                clib = match system {
                    TargetSystem::Windows | TargetSystem::CheapWindows => "1clib?",
                    _ => "1clibdl?",
                };
            }
            let (mathlib, emulib) = if synth.fpu_emulated {
                ("7math87?", Some("8emu87"))
            } else if synth.fpu.is_none() {
                ("5math?", None)
            } else {
                ("7math87?", Some("8noemu87"))
            };
            build(clib, mathlib, emulib, lib_model)
        }
        TargetArch::I386 => {
            let lib_model = if state.flags.register_conventions {
                'r'
            } else {
                's'
            };
            let dll = state.flags.br_switch_used;
            let clib = if dll { "1clb?dll" } else { "1clib3?" };
            let (mathlib, emulib) = if synth.fpu_emulated {
                (if dll { "7mt7?dll" } else { "7math387?" }, Some("8emu387"))
            } else if synth.fpu.is_none() {
                (if dll { "5mth?dll" } else { "5math3?" }, None)
            } else {
                (
                    if dll { "7mt7?dll" } else { "7math387?" },
                    Some("8noemu387"),
                )
            };
            build(clib, mathlib, emulib, lib_model)
        }
    };
    (code_ptr, data_ptr, libs)
}

fn build(clib: &str, mathlib: &str, emulib: Option<&str>, lib_model: char) -> LibNames {
    let model = lib_model.to_string();
    LibNames {
        clib: clib.replace('?', &model),
        mathlib: mathlib.replace('?', &model),
        emulib: emulib.map(str::to_string),
    }
}

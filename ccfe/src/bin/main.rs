// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context;
use ccfe::args;
use ccfe::options::expand::SystemSource;
use ccfe::options::{self, Invocation};
use std::process::ExitCode;

/// Driver function of the application.
fn main() -> anyhow::Result<ExitCode> {
    let matches = args::cli().get_matches();
    let arguments = args::Arguments::try_from(matches)?;

    let mut logging = env_logger::Builder::from_default_env();
    match arguments.verbose {
        0 => {}
        1 => {
            logging.filter_level(log::LevelFilter::Info);
        }
        _ => {
            logging.filter_level(log::LevelFilter::Debug);
        }
    }
    logging.init();
    let pkg_name = env!("CARGO_PKG_NAME");
    let pkg_version = env!("CARGO_PKG_VERSION");
    log::info!("{pkg_name} v{pkg_version}");

    let default_system = arguments
        .system
        .clone()
        .unwrap_or_else(|| host_system().to_string());
    let invocation = Invocation {
        arch: arguments.arch,
        default_system,
        arguments: arguments.command.clone(),
    };
    log::debug!("{invocation:?}");

    let provider = SystemSource;
    let mut resolution = options::interpret(&invocation, &provider);
    resolution.merge_include_env(&provider);

    for diagnostic in &resolution.diagnostics {
        eprintln!("{pkg_name}: {}: '{}'", diagnostic.kind, diagnostic.offending);
    }

    let rendered = serde_json::to_string_pretty(&resolution)
        .context("cannot render the resolved configuration")?;
    match &arguments.output {
        Some(path) => {
            std::fs::write(path, rendered).with_context(|| format!("cannot write {path}"))?;
        }
        None => println!("{rendered}"),
    }

    Ok(if resolution.diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// The target system assumed when neither the command line nor the `-b`
/// option names one.
fn host_system() -> &'static str {
    match std::env::consts::OS {
        "linux" => "LINUX",
        "windows" => "NT",
        "macos" => "OSX",
        "freebsd" | "netbsd" | "openbsd" | "dragonfly" => "BSD",
        "solaris" | "illumos" => "SOLARIS",
        "haiku" => "HAIKU",
        _ => "DOS",
    }
}

//! The monitor and output management core of a tiling window manager

#![allow(unused)]
#![deny(
    clippy::all,
    clippy::complexity,
    clippy::correctness,
    clippy::nursery,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    absolute_paths_not_starting_with_crate,
    anonymous_parameters,
    bad_style,
    ellipsis_inclusive_range_patterns,
    exported_private_dependencies,
    ill_formed_attribute_input,
    improper_ctypes,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_abi,
    no_mangle_generic_items,
    non_shorthand_field_patterns,
    noop_method_call,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    pointer_structural_match,
    private_in_public,
    pub_use_of_private_extern_crate,
    semicolon_in_expressions_from_macros,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unaligned_references,
    unconditional_recursion,
    unreachable_pub,
    unsafe_code,
    variant_size_differences,
    while_true
)]
#![allow(
    clippy::pattern_type_mismatch,
    clippy::redundant_pub_crate,
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cognitive_complexity,
    clippy::doc_markdown,
    clippy::exhaustive_enums,
    clippy::exhaustive_structs,
    clippy::implicit_return,
    clippy::indexing_slicing,
    clippy::integer_arithmetic,
    clippy::module_name_repetitions,
    clippy::multiple_inherent_impl,
    clippy::print_stdout,
    clippy::shadow_reuse,
    clippy::shadow_unrelated,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::upper_case_acronyms
)]
#![cfg_attr(
    any(test),
    allow(
        clippy::expect_fun_call,
        clippy::expect_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::unwrap_used,
        clippy::wildcard_enum_match_arm,
    )
)]

mod cli;
mod command;
mod config;
mod disjoin;
mod error;
mod focus;
mod geometry;
mod hooks;
mod layout;
mod macros;
mod manager;
mod monitor;
mod tag;
mod utils;
mod x;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use cli::Opts;
use config::Config;
use geometry::Dimension;
use hooks::{DisplayServer, EventLog, HeadlessDisplay, HookEvent};
use manager::WindowManager;
use tag::TagPool;
use x::XDisplay;

/// Fall back to a simulated screen when no display connection exists
const HEADLESS_DIMENSIONS: Dimension = Dimension {
    width:  1920,
    height: 1080,
};

fn main() -> Result<()> {
    let args = Opts::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    utils::initialize_logging(&config, &args)?;
    log::debug!("{}: {:#?}", "Configuration options".bright_blue(), config);

    let display: Box<dyn DisplayServer> = if args.headless {
        log::info!(
            "running headless on a simulated {}x{} screen",
            HEADLESS_DIMENSIONS.width,
            HEADLESS_DIMENSIONS.height
        );
        Box::new(HeadlessDisplay::new(HEADLESS_DIMENSIONS))
    } else {
        match XDisplay::connect() {
            Ok(display) => Box::new(display),
            Err(e) => {
                monwm_error!("{:?}", e);
                log::warn!("falling back to a headless display");
                Box::new(HeadlessDisplay::new(HEADLESS_DIMENSIONS))
            },
        }
    };

    let tags = TagPool::from_names(
        &config
            .tags
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>(),
    );

    let mut wm = WindowManager::new(config, tags, display, EventLog::default());
    wm.ensure_monitors_available()?;
    wm.apply_layout_all();
    report_hooks(&mut wm.hooks);

    // Commands arrive one per line, shell-style word splitting
    let stdin = io::stdin();
    let stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let argv = line.split_whitespace().collect::<Vec<_>>();
        if argv.is_empty() {
            continue;
        }

        let mut output = String::new();
        let status = wm.run_command(&argv, &mut output);

        let mut out = stdout.lock();
        out.write_all(output.as_bytes())?;
        out.flush()?;

        if status != error::status::SUCCESS {
            monwm_error!("command failed with status {}", status);
        }

        report_hooks(&mut wm.hooks);
    }

    Ok(())
}

/// Surface buffered hook events to whoever reads the log
fn report_hooks(hooks: &mut EventLog) {
    for event in hooks.drain() {
        match event {
            HookEvent::TagChanged(tag, monitor) => {
                log::info!("hook: tag {:?} now on monitor {}", tag, monitor);
            },
            HookEvent::DesktopChanged => log::info!("hook: desktop state changed"),
        }
    }
}

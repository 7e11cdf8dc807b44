use std::path::Path;

use clap::ArgMatches;
use serde::Serialize;
use tracing::{error, info};

use truely_core::config::TruelyConfig;
use truely_core::events;
use truely_core::hashing::hash_file;
use truely_core::watchlist::{self, Watchlist};
use truely_core::window::{WindowRecord, WindowScope, platform_window_server, windows_owned_by};
use truely_core::{Bridge, ProcessList, WindowProperties};

use crate::table;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let result = match matches.subcommand() {
        Some(("processes", sub_matches)) => handle_processes_command(sub_matches),
        Some(("windows", sub_matches)) => handle_windows_command(sub_matches),
        Some(("hash", sub_matches)) => handle_hash_command(sub_matches),
        Some(("scan", sub_matches)) => handle_scan_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown();
    result
}

fn load_config() -> Result<TruelyConfig, Box<dyn std::error::Error>> {
    match TruelyConfig::load_hierarchy() {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            error!(event = "cli.config_load_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// Run one enumerate + enrich pass on a fresh bridge.
fn enumerate(config: &TruelyConfig) -> Result<ProcessList, Box<dyn std::error::Error>> {
    let bridge = Bridge::from_config(config);
    bridge.initialize()?;

    let result = bridge.enumerate_processes();
    bridge.cleanup();

    match result {
        Ok(list) => Ok(list),
        Err(e) => {
            eprintln!("Failed to enumerate processes: {}", e);
            error!(event = "cli.enumerate_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_processes_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let suspicious_only = matches.get_flag("suspicious");

    info!(
        event = "cli.processes_started",
        json_output = json_output,
        suspicious_only = suspicious_only
    );

    let config = load_config()?;
    let list = enumerate(&config)?;
    let total = list.len();

    let records: Vec<_> = list
        .into_iter()
        .filter(|r| !suspicious_only || r.is_suspicious())
        .collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        if suspicious_only {
            println!("No suspicious processes found.");
        } else {
            println!("No processes found.");
        }
    } else {
        println!("Processes ({} of {}):", records.len(), total);
        table::print_processes_table(&records);
    }

    info!(
        event = "cli.processes_completed",
        total = total,
        shown = records.len()
    );
    Ok(())
}

#[derive(Serialize)]
struct WindowsReport {
    pid: i32,
    properties: WindowProperties,
    windows: Vec<WindowRecord>,
}

fn handle_windows_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let pid = *matches
        .get_one::<i32>("pid")
        .ok_or("PID argument is required")?;
    let json_output = matches.get_flag("json");

    info!(event = "cli.windows_started", pid = pid, json_output = json_output);

    let config = load_config()?;
    let bridge = Bridge::from_config(&config);
    bridge.initialize()?;
    let properties = bridge.window_properties(pid);
    bridge.cleanup();

    let properties = match properties {
        Ok(properties) => properties,
        Err(e) => {
            eprintln!("Failed to inspect windows for PID {}: {}", pid, e);
            error!(event = "cli.windows_failed", pid = pid, error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let server = platform_window_server();
    let windows: Vec<WindowRecord> =
        windows_owned_by(server.as_ref(), WindowScope::All, pid).collect();

    if json_output {
        let report = WindowsReport {
            pid,
            properties,
            windows,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("PID {}:", pid);
        println!("  On-screen windows:      {}", properties.window_count);
        println!("  Capture disabled:       {}", properties.sharing_state_disabled_count);
        println!("  Elevated layers:        {}", properties.elevated_layer_count);
        println!("  Suspicious patterns:    {}", properties.suspicious_pattern_count);
        if !windows.is_empty() {
            table::print_windows_table(&windows);
        }
    }

    info!(
        event = "cli.windows_completed",
        pid = pid,
        window_count = properties.window_count
    );
    Ok(())
}

fn handle_hash_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let path = matches
        .get_one::<String>("path")
        .ok_or("Path argument is required")?;

    info!(event = "cli.hash_started", path = %path);

    match hash_file(Path::new(path)) {
        Ok(digest) => {
            println!("{}  {}", digest, path);
            info!(event = "cli.hash_completed", path = %path, digest = %digest);
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to hash '{}': {}", path, e);
            error!(event = "cli.hash_failed", path = %path, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_scan_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.scan_started", json_output = json_output);

    let config = load_config()?;
    let watchlist = Watchlist::from_config(&config);
    let list = enumerate(&config)?;
    let hits = watchlist::scan(list.records(), &watchlist);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else if hits.is_empty() {
        println!("No watched processes found.");
    } else {
        for hit in &hits {
            println!("[{}] {} (PID: {}) {}", hit.kind, hit.name, hit.pid, hit.detail);
        }
    }

    info!(
        event = "cli.scan_completed",
        processes = list.len(),
        hits = hits.len()
    );
    Ok(())
}

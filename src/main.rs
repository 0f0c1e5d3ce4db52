// IntelRun - Vulnerability intelligence collector
// Copyright (C) 2025 IntelRun Team
// Licensed under GPL-3.0
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

use anyhow::Result;
use clap::Parser;
use intelrun::commands::CommandRouter;
use intelrun::config::IntelConfig;
use intelrun::Args;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging - respect RUST_LOG environment variable
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let args = Args::parse();

    // Handle --config-example (generate config example and exit)
    if let Some(config_path) = &args.config_example {
        IntelConfig::create_example(config_path)?;
        println!(
            "✓ Example configuration saved to: {}",
            config_path.display()
        );
        return Ok(());
    }

    display_banner(&args);

    let command = CommandRouter::route(args)?;
    info!("Executing {}", command.name());
    command.execute().await
}

fn display_banner(args: &Args) {
    if !args.output.quiet {
        println!(
            r#"
    ╔═══════════════════════════════════════════════════════════╗
    ║                      IntelRun v0.1.0                      ║
    ║     Vulnerability Intelligence Collector (NVD, MITRE)     ║
    ╚═══════════════════════════════════════════════════════════╝

    Licensed under GPL-3.0
    "#
        );
    }
}

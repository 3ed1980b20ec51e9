// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use clap::Parser;

use gateway_admin_console::api::AdminClient;
use gateway_admin_console::cli::{self, Cli};
use gateway_admin_console::config::ConsoleConfig;
use gateway_admin_console::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut config = ConsoleConfig::from_env()?;
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url)?;
    }
    config = config.with_api_key(args.api_key.clone());

    logging::init(config.log_format);
    tracing::debug!(base_url = %config.base_url, "console configured");

    let client = AdminClient::new(&config)?;
    let outcome = cli::execute(&client, args.command).await?;
    print!("{}", outcome.output);

    if !outcome.ok {
        std::process::exit(1);
    }
    Ok(())
}

// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Entry point: parse arguments, set up logging, pick a front end.

use clap::Parser;

use kitsune::Args;
use kitsune::config::AppConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    #[cfg(feature = "gui")]
    {
        if !args.export {
            return kitsune::ui::run(args);
        }
    }

    let config = AppConfig::load();
    let runtime = tokio::runtime::Runtime::new()?;
    let path = runtime.block_on(kitsune::cli::run_export(&args, config))?;
    println!("{}", path.display());
    Ok(())
}

//! Prosa - a static blog generator from Markdown to HTML5.

use anyhow::Result;
use clap::Parser;
use prosa::{
    build::build_site,
    cli::{Cli, Commands},
    config::{ConfigError, SiteConfig},
    init::new_site,
    log,
    meta::MetaError,
    serve::serve_site,
};
use std::{path::PathBuf, process};

fn main() {
    if let Err(err) = run() {
        log!("error"; "{err:#}");
        process::exit(exit_code(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));

    match &cli.command {
        Commands::Init { name } => {
            let target = match name {
                Some(name) => root.join(name),
                None => root.clone(),
            };
            new_site(&target, name.is_some())
        }
        Commands::Build => {
            let config = SiteConfig::load(&root, &cli.config)?;
            build_site(&config).map(|_| ())
        }
        Commands::Serve { interface, port } => {
            let mut config = SiteConfig::load(&root, &cli.config)?;
            if let Some(interface) = interface {
                config.serve.interface = interface.clone();
            }
            if let Some(port) = port {
                config.serve.port = *port;
            }
            build_site(&config)?;
            serve_site(&config)
        }
    }
}

/// Distinct exit statuses per failure kind: metadata validation is 2,
/// configuration trouble is 3, everything else is 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.downcast_ref::<MetaError>().is_some() {
            return 2;
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return 3;
        }
    }
    1
}

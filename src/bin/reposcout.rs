// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use reposcout::{
    config::ServerConfig,
    path::{default_config_path, default_store_dir},
    report::{repo_url, Report},
    resolve::{Resolution, Resolver},
    store::RepoStore,
};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use inquire::Confirm;
use std::{path::PathBuf, process::exit};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "\n  reposcout [options] <reposcout-command>",
    subcommand_help_heading = "Commands",
    version
)]
struct Cli {
    /// Path to server configuration file.
    #[arg(short, long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Path to repository store.
    #[arg(short, long, global = true, value_name = "path")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    fn run(self) -> Result<i32> {
        let config_path = match self.config {
            Some(path) => path,
            None => default_config_path()?,
        };
        let config = ServerConfig::load(config_path)?;
        let store_path = match (self.store, &config.store) {
            (Some(path), _) => path,
            (None, Some(path)) => path.as_path().to_path_buf(),
            (None, None) => default_store_dir()?,
        };
        let store = RepoStore::open(store_path)?;
        let ctx = Context { config, store };

        match self.command {
            Command::Find(opts) => run_find(&ctx, opts),
            Command::Create(opts) => run_create(&ctx, opts),
            Command::List => run_list(&ctx),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Find repository by possibly misremembered name.
    #[command(override_usage = "reposcout find [options] <repo_name>")]
    Find(FindOptions),

    /// Create new bare repository in repository store.
    #[command(override_usage = "reposcout create [options] <repo_name>")]
    Create(CreateOptions),

    /// List all repositories in repository store.
    #[command(override_usage = "reposcout list [options]")]
    List,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct FindOptions {
    /// Name of repository to look for.
    #[arg(required = true, value_name = "repo_name")]
    pub repo_name: String,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct CreateOptions {
    /// Name of repository to create.
    #[arg(required = true, value_name = "repo_name")]
    pub repo_name: String,

    /// Brief description of repository.
    #[arg(short, long, value_name = "summary")]
    pub description: Option<String>,

    /// Create repository even if its name differs from another only by case.
    #[arg(short, long)]
    pub force: bool,
}

struct Context {
    config: ServerConfig,
    store: RepoStore,
}

impl Context {
    fn url_prefix(&self) -> String {
        self.config.url_prefix(self.store.path())
    }

    fn resolver(&self) -> Resolver {
        Resolver::new(self.config.suggest)
    }
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    match run() {
        Ok(code) => exit(code),
        Err(error) => {
            error!("{error:?}");
            exit(1);
        }
    }
}

fn run() -> Result<i32> {
    Cli::parse().run()
}

fn run_find(ctx: &Context, opts: FindOptions) -> Result<i32> {
    let names = ctx.store.repo_names()?;
    let resolution = ctx.resolver().resolve(&opts.repo_name, names)?;
    let report = Report::new(&resolution, &opts.repo_name, ctx.url_prefix());

    for warning in &report.warnings {
        warn!("{warning}");
    }

    for line in &report.lines {
        println!("{line}");
    }

    Ok(report.status.exit_code())
}

fn run_create(ctx: &Context, opts: CreateOptions) -> Result<i32> {
    let names = ctx.store.repo_names()?;
    match ctx.resolver().resolve(&opts.repo_name, names)? {
        Resolution::ExactMatch { name, .. } => {
            bail!("repository {name:?} already exists");
        }
        Resolution::UniqueCaseFold { name } => {
            warn!("repository {name:?} differs from {:?} only by case", opts.repo_name);
            if !opts.force && !confirm_create()? {
                info!("no repository created");
                return Ok(1);
            }
        }
        Resolution::MultipleCaseFold { names } => {
            warn!(
                "repositories {} differ from {:?} only by case",
                names.join(", "),
                opts.repo_name
            );
            if !opts.force && !confirm_create()? {
                info!("no repository created");
                return Ok(1);
            }
        }
        _ => {}
    }

    let path = ctx
        .store
        .create(&opts.repo_name, opts.description.as_deref())?;
    info!("created {:?}", path.display());

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("{}", repo_url(ctx.url_prefix(), name));

    Ok(0)
}

fn run_list(ctx: &Context) -> Result<i32> {
    let mut names = ctx.store.repo_names()?;
    names.sort();
    for name in names {
        println!("{name}");
    }

    Ok(0)
}

fn confirm_create() -> Result<bool> {
    Ok(Confirm::new("create it anyway?")
        .with_default(false)
        .prompt()?)
}

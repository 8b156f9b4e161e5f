mod app;
mod commands;
mod effects;
mod logging;
mod persistence;
mod ui;

use anyhow::Context;
use folio_engine::{ensure_state_dir, ApiClient, ClientSettings, Session};
use folio_logging::folio_debug;

use crate::cli::{Cli, Command};
use persistence::RonTokenStore;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    logging::init(&cli);
    folio_debug!("api_url={} state_dir={:?}", cli.api_url, cli.state_dir);

    let api = ApiClient::new(&cli.api_url, ClientSettings::default())
        .with_context(|| format!("configuring backend {}", cli.api_url))?;

    match cli.command {
        Command::Read(args) => app::run_reader(&api, args),
        Command::Magazines { page, limit } => commands::magazines(&runtime()?, &api, page, limit),
        Command::MagazinesLatest => commands::latest_magazines(&runtime()?, &api),
        Command::Blogs { command } => commands::blogs(&runtime()?, &api, command),
        Command::Categories => commands::categories(&runtime()?, &api),
        Command::Admin { command } => {
            ensure_state_dir(&cli.state_dir)
                .with_context(|| format!("preparing state dir {}", cli.state_dir.display()))?;
            let mut session = Session::init(Box::new(RonTokenStore::new(&cli.state_dir)));
            commands::admin(&runtime()?, &api, &mut session, command)
        }
    }
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("starting async runtime")
}

use std::path::PathBuf;

use clap::Parser;

mod access;
mod app;
mod audio;
mod config;
mod cover;
mod library;
mod logging;
mod runtime;
mod seek;
mod ui;

#[derive(Parser)]
#[command(name = "aria")]
#[command(about = "Pick a song from your music folder and play it")]
struct Args {
    /// Music library directory (defaults to the configured root, then the current directory)
    dir: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = runtime::load_settings();
    if let Some(dir) = args.dir {
        settings.library.root = Some(dir);
    }

    if args.dump_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let guard = match logging::init(&settings.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("aria: logging disabled: {e:#}");
            None
        }
    };

    if let Err(e) = runtime::run(&settings) {
        tracing::error!(error = %format!("{e:#}"), "aria stopped with an error");
        drop(guard);
        return Err(e);
    }

    tracing::info!("exiting");
    drop(guard);
    std::process::exit(0);
}

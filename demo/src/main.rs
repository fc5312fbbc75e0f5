//! Terminal demo: a collapsible side menu next to a content pane, with the
//! model editor on `e`.

mod model;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use sidenav_core::{App, AppConfig, Mailbox};
use sidenav_crossterm::CrosstermDriver;
use tracing_subscriber::prelude::*;

use model::DemoModel;

#[derive(Parser, Debug)]
#[command(name = "sidenav-demo", version, about = "Collapsible side menu in the terminal")]
pub struct Cli {
    /// File the log is written to. The terminal itself is used for drawing.
    #[arg(long, default_value = "sidenav-demo.log")]
    log_file: PathBuf,

    /// Start with the menu expanded.
    #[arg(long)]
    expanded: bool,

    /// Menu width while collapsed, in pixels (10 per column).
    #[arg(long, default_value_t = 60)]
    collapsed_width: i32,

    /// Menu width while expanded, in pixels.
    #[arg(long, default_value_t = 250)]
    expanded_width: i32,

    /// Text shown in the header of the expanded menu.
    #[arg(long, default_value = "Sidenav")]
    logo: String,

    /// Do not capture the mouse.
    #[arg(long)]
    no_mouse: bool,
}

fn init_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false),
    );
    tracing::subscriber::set_global_default(subscriber)?;
    // The widget crates log through the `log` facade.
    tracing_log::LogTracer::init()?;
    tracing::info!("logging to {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let (width, height) = CrosstermDriver::size().unwrap_or((80, 24));
    let mailbox = Mailbox::new();
    let model = DemoModel::new(&cli, mailbox.sender(), width, height);
    let driver = CrosstermDriver::new().with_mouse(!cli.no_mouse);

    let mut app = App::new(AppConfig {
        model,
        driver,
        width,
        height,
        mailbox,
    });
    let result = app.run();
    if let Err(e) = &result {
        tracing::error!("app stopped: {e}");
    }
    result
}

// PixelPanel
// copyright PixelPanel developers 2026

/// panelctl, command line front-end of pixel_panel...
///
/// Usage:
/// panelctl list
/// panelctl create hall 10.0.0.211 64 32 --name Hall
/// panelctl fill hall uploads/cat.gif
/// panelctl clear hall
/// panelctl print hall "Back in 5"
/// panelctl --config /etc/pixel_panel.toml list
///
use clap::{Parser, Subcommand};
use log::{error, info};
use pixel_panel::{
    animation::AnimationState, config::ServerConfig, log::init_log, registry::Registry,
    transport::HttpTransport, PanelResult,
};
use std::{path::PathBuf, process::ExitCode, sync::Arc};

#[derive(Parser)]
#[command(name = "panelctl", author = "PixelPanel developers")]
#[command(about = "Drive networked LED-matrix panels")]
struct Cli {
    /// server config, created with defaults when missing
    #[arg(short, long, default_value = "pixel_panel.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List known panels
    #[command(alias = "l")]
    List,
    /// Create a panel record
    #[command(alias = "c")]
    Create {
        id: String,
        address: String,
        width: u8,
        height: u8,
        #[arg(short, long, default_value = "")]
        name: String,
    },
    /// Show an image or gif on a panel
    #[command(alias = "f")]
    Fill { id: String, file: PathBuf },
    /// Clear a panel
    Clear { id: String },
    /// Show a text message, '\n' starts a new line
    #[command(alias = "p")]
    Print { id: String, msg: String },
}

fn run(cli: Cli) -> PanelResult<()> {
    let cfg = ServerConfig::load(&cli.config)?;
    init_log(cfg.level_filter()?, &cfg.log_file)?;
    info!("panelctl start...{:?}", cli.config);

    let transport = Arc::new(HttpTransport::new(cfg.http_timeout())?);
    let mut registry = Registry::load(&cfg, transport)?;

    match cli.command {
        Command::List => {
            for p in registry.panels() {
                println!(
                    "{:<16} {:<20} {:<21} {}x{}",
                    p.id(),
                    p.name(),
                    p.address(),
                    p.width(),
                    p.height()
                );
            }
        }
        Command::Create {
            id,
            address,
            width,
            height,
            name,
        } => {
            let p = registry.create_named(&id, &name, &address, width, height)?;
            println!("🍀 panel {} created at {}", p.id(), p.address());
        }
        Command::Fill { id, file } => {
            let panel = registry.lookup(&id)?;
            panel.fill_with_file(&file)?;
            if panel.animation_state() != AnimationState::Idle {
                println!("🍀 playing {} on {}, ctrl-c to stop", file.display(), id);
                panel.wait_animation();
            } else {
                println!("🍀 showing {} on {}", file.display(), id);
            }
        }
        Command::Clear { id } => {
            registry.lookup(&id)?.clear()?;
        }
        Command::Print { id, msg } => {
            registry.lookup(&id)?.print(&msg.replace("\\n", "\n"))?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("panelctl: {}", e);
            ExitCode::FAILURE
        }
    }
}

// Entry point: load items, run the interactive list, write back the new order.

use clap::Parser;
use rearrange::config::{Config, Overrides};
use rearrange::source;
use rearrange::{logging, ui};
use std::path::PathBuf;
use std::process;
use tracing::info;

/// Reorder the items of a file interactively
#[derive(Parser, Debug)]
#[command(name = "rearrange", version)]
#[command(about = "Reorder a JSON array or a list of lines by dragging", long_about = None)]
struct Cli {
    /// JSON array (.json or leading '[') or one item per line
    file: PathBuf,

    /// Label shown above the list
    #[arg(long)]
    label: Option<String>,

    /// Object field used as item text for JSON object items
    #[arg(long)]
    text_field: Option<String>,

    /// Show at most this many item rows
    #[arg(long)]
    max_height: Option<u16>,

    /// Show the list without allowing changes
    #[arg(long)]
    disabled: bool,

    /// Disable drag and drop, keeping the move buttons
    #[arg(long = "no-drag")]
    no_drag: bool,

    /// Hide the move buttons
    #[arg(long = "no-arrows")]
    no_arrows: bool,

    /// Move-up button text
    #[arg(long)]
    up_icon: Option<String>,

    /// Move-down button text
    #[arg(long)]
    down_icon: Option<String>,

    /// Rewrite FILE instead of printing the result
    #[arg(long)]
    in_place: bool,

    /// Config file (default: <config dir>/rearrange/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            label: self.label.clone(),
            max_height: self.max_height,
            disabled: self.disabled,
            disable_drag_and_drop: self.no_drag,
            remove_arrows: self.no_arrows,
            move_up_icon: self.up_icon.clone(),
            move_down_icon: self.down_icon.clone(),
            text_field: self.text_field.clone(),
        }
    }
}

// Ok(true) when the user confirmed, Ok(false) when they quit.
async fn run(cli: Cli) -> rearrange::Result<bool> {
    let config = Config::load(cli.config.as_deref(), cli.overrides())?;
    let _guard = logging::init(&config.logging)?;

    let src = source::load(&cli.file)?;
    info!(path = %src.path.display(), format = ?src.format, items = src.items.len(), "loaded items");

    let outcome = ui::run(src.items.clone(), config.props, config.text_field).await?;
    if !outcome.confirmed {
        info!("quit without saving");
        return Ok(false);
    }

    if cli.in_place {
        source::save(&src, &outcome.items)?;
        info!(changes = outcome.changes, "rewrote {}", src.path.display());
    } else {
        println!("{}", source::render(&outcome.items, src.format));
    }
    Ok(true)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("rearrange: {e}");
            process::exit(2);
        }
    }
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use card_forge::commands;
use card_forge::config::Config;
use card_forge::domains::card::render_text;
use card_forge::error::Result;
use card_forge::providers::openai::OpenAiProvider;

#[derive(Parser, Debug)]
#[command(name = "card-forge")]
#[command(about = "Generate trading-card concepts with a language model")]
struct Cli {
    /// Config file (JSON). Defaults to the platform config directory.
    #[arg(long, env = "CARD_FORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Chat model name.
    #[arg(long, env = "CARD_FORGE_MODEL")]
    model: Option<String>,

    /// OpenAI-compatible API base URL.
    #[arg(long, env = "CARD_FORGE_BASE_URL")]
    base_url: Option<String>,

    /// Directory generated cards are written to.
    #[arg(long, env = "CARD_FORGE_OUTPUT_DIR")]
    output_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one card, save it and print it
    Generate {
        #[arg(required = true)]
        prompt: Vec<String>,
    },
    /// Print a stored card file
    Show { path: PathBuf },
}

fn main() -> Result<()> {
    card_forge::logging::init_tracing("card_forge_cli");
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(card_forge::runtime_paths::default_config_path);
    let config = Config::load_or_default(&config_path)?
        .resolve_env()
        .with_overrides(cli.model, cli.base_url, cli.output_dir);

    match cli.command {
        None => card_forge::ui::launch_ui(&config),
        Some(Command::Show { path }) => {
            print!("{}", commands::show(&path)?);
            Ok(())
        }
        Some(Command::Generate { prompt }) => {
            let provider = OpenAiProvider::from_config(&config)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let (card, path) =
                runtime.block_on(commands::generate(&config, &provider, &prompt.join(" ")))?;
            print!("{}", render_text(&card));
            println!("saved to {}", path.display());
            Ok(())
        }
    }
}

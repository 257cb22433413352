use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tides_logic::state::validate_setup;
use tides_logic::{request_setup, Frontend, FrontendError, Game, Setup};

mod console;
mod frontend;
mod screens;

use console::{Console, Palette};
use frontend::ConsoleFrontend;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Merchant code (0 - 999); prompted for when missing
    #[arg(long)]
    merchant_id: Option<u16>,

    /// Starting gold coins (1 - 1000000000); prompted for when missing
    #[arg(long)]
    balance: Option<u64>,

    /// Target profit percentage (>= 20); prompted for when missing
    #[arg(long)]
    target: Option<u32>,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Setup fully given on the command line, if it is valid.
    fn preset_setup(&self) -> Option<Setup> {
        let setup = Setup {
            merchant_id: self.merchant_id?,
            initial_balance: self.balance?,
            profit_target: self.target?,
        };
        let errors = validate_setup(&setup);
        if errors.is_empty() {
            Some(setup)
        } else {
            for error in &errors {
                log::warn!("ignoring command-line setup: {}", error);
            }
            None
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn play<F: Frontend>(
    frontend: &mut F,
    preset: Option<Setup>,
    rng: StdRng,
) -> Result<(), FrontendError> {
    let setup = match preset {
        Some(setup) => setup,
        None => request_setup(frontend)?,
    };
    let mut game = Game::new(setup, rng);
    game.run(frontend)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let rng = match args.seed {
        Some(seed) => {
            log::info!("using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let console = Console::new(stdin.lock(), stdout.lock(), Palette::new(!args.no_color));
    let mut frontend = ConsoleFrontend::new(console);
    frontend.console().print(&screens::start_screen())?;

    match play(&mut frontend, args.preset_setup(), rng) {
        Ok(()) => Ok(()),
        Err(FrontendError::InputClosed) => {
            log::warn!("input closed, ending the game");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

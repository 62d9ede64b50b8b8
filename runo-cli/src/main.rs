//! Hot-seat UNO in the terminal. Each invocation loads the game from a JSON
//! snapshot, applies one action and writes the game back.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use runo::random::{BoxedRandomizer, BoxedShuffler};
use runo::{
    CardColor, Game, GameConfig, GameOutcome, GameSnapshot, RandomDealer, RandomShuffler, Round,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "runo", about = "Play UNO from the command line")]
struct Cli {
    /// Where the game is stored between moves
    #[arg(short, long, default_value = "runo.json", global = true)]
    file: PathBuf,

    /// Seed for shuffling and dealer picks
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a new game, overwriting any saved one
    New {
        /// Comma separated player names
        #[arg(long, value_delimiter = ',', required = true)]
        players: Vec<String>,
        /// Score that wins the game
        #[arg(long, default_value_t = runo::constants::DEFAULT_TARGET_SCORE)]
        target: u32,
        /// Cards dealt to each player
        #[arg(long, default_value_t = runo::constants::DEFAULT_CARDS_PER_PLAYER)]
        cards: usize,
    },
    /// Print the table and the hand of the player in turn
    Show,
    /// Play a card from the hand of the player in turn
    Play {
        index: usize,
        /// Color chosen for a wild card
        #[arg(long)]
        color: Option<CardColor>,
    },
    /// Draw a card for the player in turn
    Draw,
    /// Say UNO
    Uno { player: usize },
    /// Accuse a player of not having said UNO
    Catch { accuser: usize, accused: usize },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let game = match cli.command {
        Command::New {
            players,
            target,
            cards,
        } => {
            let config = GameConfig::new(players)
                .with_target_score(target)
                .with_cards_per_player(cards);
            let (randomizer, shuffler) = randomness(cli.seed);
            let game = Game::new(config, randomizer, shuffler).wrap_err("could not start a game")?;
            info!(file = %cli.file.display(), "new game created");
            game
        }
        Command::Show => {
            let game = load(&cli.file, cli.seed)?;
            print_table(&game);
            return Ok(());
        }
        Command::Play { index, color } => {
            let mut game = load(&cli.file, cli.seed)?;
            let outcome = game.play(index, color).wrap_err("could not play that card")?;
            report(&game, outcome);
            game
        }
        Command::Draw => {
            let mut game = load(&cli.file, cli.seed)?;
            let outcome = game.draw().wrap_err("could not draw")?;
            report(&game, outcome);
            game
        }
        Command::Uno { player } => {
            let mut game = load(&cli.file, cli.seed)?;
            game.say_uno(player).wrap_err("could not say UNO")?;
            println!("{} says UNO!", name(&game, player));
            game
        }
        Command::Catch { accuser, accused } => {
            let mut game = load(&cli.file, cli.seed)?;
            if game
                .catch_uno_failure(accuser, accused)
                .wrap_err("could not accuse")?
            {
                println!(
                    "{} caught {}, who draws four cards",
                    name(&game, accuser),
                    name(&game, accused)
                );
            } else {
                println!("Nothing to catch, {} is safe", name(&game, accused));
            }
            game
        }
    };

    save(&cli.file, &game)?;
    print_table(&game);
    Ok(())
}

fn randomness(seed: Option<u64>) -> (BoxedRandomizer, Option<BoxedShuffler>) {
    match seed {
        Some(seed) => (
            Box::new(RandomDealer::seeded(seed)),
            Some(Box::new(RandomShuffler::seeded(seed))),
        ),
        None => (Box::new(RandomDealer::new()), Some(Box::new(RandomShuffler::new()))),
    }
}

fn load(file: &Path, seed: Option<u64>) -> Result<Game> {
    let json = fs::read_to_string(file)
        .wrap_err_with(|| format!("could not read {}, start one with `runo new`", file.display()))?;
    let snapshot: GameSnapshot =
        serde_json::from_str(&json).wrap_err_with(|| format!("{} is not a saved game", file.display()))?;
    debug!(file = %file.display(), "game loaded");

    let (randomizer, shuffler) = randomness(seed);
    let game = Game::from_snapshot(snapshot, randomizer, shuffler)
        .wrap_err_with(|| format!("{} holds an inconsistent game", file.display()))?;
    Ok(game)
}

fn save(file: &Path, game: &Game) -> Result<()> {
    let json = serde_json::to_string_pretty(&game.to_snapshot())?;
    fs::write(file, json).wrap_err_with(|| format!("could not write {}", file.display()))?;
    debug!(file = %file.display(), "game saved");
    Ok(())
}

fn name(game: &Game, player: usize) -> &str {
    game.player(player).unwrap_or("nobody")
}

fn report(game: &Game, outcome: GameOutcome) {
    match outcome {
        GameOutcome::Continues => {}
        GameOutcome::RoundEnded {
            winner,
            score,
            next_dealer,
        } => println!(
            "{} wins the round and scores {score}. {} deals the next round.",
            name(game, winner),
            name(game, next_dealer)
        ),
        GameOutcome::GameEnded {
            winner,
            score,
            total,
        } => println!(
            "{} wins the round for {score} and the game with {total} points!",
            name(game, winner)
        ),
    }
}

fn print_table(game: &Game) {
    println!();
    for (index, score) in game.scores().iter().enumerate() {
        println!("  [{index}] {:<16} {score:>4} points", name(game, index));
    }

    let Some(round) = game.current_round() else {
        if let Some(winner) = game.winner() {
            println!("\nGame over, {} won.", name(game, winner));
        }
        return;
    };

    if let Some(top) = round.top_card() {
        println!(
            "\nTop card: {top} (current color {}), playing {:?}",
            round.current_color(),
            round.direction()
        );
    }
    println!("Draw pile: {} cards", round.draw_pile().len());
    for index in 0..round.player_count() {
        let cards = round.player_hand(index).map_or(0, <[_]>::len);
        println!("  {} holds {cards}", name(game, index));
    }
    if let Some(target) = round.accusation_target() {
        println!("{} is down to one card", name(game, target));
    }

    print_hand(game, round);
}

fn print_hand(game: &Game, round: &Round) {
    let Some(player) = round.player_in_turn() else {
        return;
    };
    println!("\n{}'s turn:", name(game, player));
    for (index, card) in round.player_hand(player).unwrap_or_default().iter().enumerate() {
        let mark = if round.can_play(index) { "*" } else { " " };
        println!("  {mark} {index}: {card}");
    }
    if !round.can_play_any() {
        println!("  nothing to play, draw a card");
    }
}

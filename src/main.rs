use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use flotilla::{
    init_logging, AiPlayer, CliPlayer, GameNode, Outcome, Player, Role, Session, TcpChannel,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Debug)]
enum PlayerType {
    Human,
    Ai,
}

#[derive(Subcommand)]
enum Commands {
    /// Host a game and wait for an opponent to connect.
    Host {
        #[arg(long, default_value = "0.0.0.0:5000")]
        bind: String,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, help = "Fix RNG seed for reproducible AI games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Join a game hosted by an opponent.
    Join {
        #[arg(long, default_value = "127.0.0.1:5000")]
        connect: String,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, help = "Fix RNG seed for reproducible AI games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (channel, role, player_type, seed) = match cli.command {
        Commands::Host { bind, player, seed } => {
            println!("Hosting at {bind}, waiting for an opponent...");
            let channel = TcpChannel::host(&bind).await?;
            println!("Opponent connected. You are player 1 and move first.");
            (channel, Role::Host, player, seed)
        }
        Commands::Join {
            connect,
            player,
            seed,
        } => {
            println!("Connecting to {connect}...");
            let channel = TcpChannel::connect(&connect).await?;
            println!("Connected. You are player 2; the host moves first.");
            (channel, Role::Guest, player, seed)
        }
    };

    let mut rng = if let Some(s) = seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };
    let player: Box<dyn Player> = match player_type {
        PlayerType::Human => Box::new(CliPlayer::new()),
        PlayerType::Ai => Box::new(AiPlayer::new()),
    };

    let mut node = GameNode::new(Session::new(role), Box::new(channel), player);
    match node.run(&mut rng).await {
        Ok(Outcome::Won) => println!("\nVictory! You have sunk the enemy fleet."),
        Ok(Outcome::Lost) => println!("\nDefeat. Your fleet has been destroyed."),
        Err(e) => eprintln!("Game ended with an error: {e}"),
    }
    Ok(())
}

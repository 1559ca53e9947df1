use std::time::Duration;

use flotilla::{AiPlayer, GameNode, InMemoryChannel, Outcome, Role, Session};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let (c1, c2) = InMemoryChannel::pair();

    let f1 = async move {
        let mut node = GameNode::new(
            Session::new(Role::Host),
            Box::new(c1),
            Box::new(AiPlayer::new()),
        )
        .with_tick(Duration::from_millis(1));
        let outcome = node.run(&mut rng1).await?;
        Ok::<(Outcome, usize), anyhow::Error>((outcome, node.shots_fired()))
    };

    let f2 = async move {
        let mut node = GameNode::new(
            Session::new(Role::Guest),
            Box::new(c2),
            Box::new(AiPlayer::new()),
        )
        .with_tick(Duration::from_millis(1));
        let outcome = node.run(&mut rng2).await?;
        Ok::<(Outcome, usize), anyhow::Error>((outcome, node.shots_fired()))
    };

    let (res1, res2) = tokio::try_join!(f1, f2)?;

    let winner = match (res1.0, res2.0) {
        (Outcome::Won, Outcome::Lost) => Some("player1"),
        (Outcome::Lost, Outcome::Won) => Some("player2"),
        _ => None,
    };

    let summary = json!({
        "player1": {"outcome": format!("{:?}", res1.0), "shots": res1.1},
        "player2": {"outcome": format!("{:?}", res2.0), "shots": res2.1},
        "winner": winner,
    });
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

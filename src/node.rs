//! Ties a session, a channel, and a player into the per-tick drive loop.

use std::time::Duration;

use rand::rngs::SmallRng;

use crate::channel::Channel;
use crate::config::FLEET;
use crate::player::Player;
use crate::session::{Action, Cue, Effects, Event, Outcome, Phase, Session};
use crate::view;

/// Tick rate of the cooperative loop, roughly 30 Hz.
const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// Drives one player's session against the remote peer. All board and
/// session mutation happens on this task; there is nothing to lock.
pub struct GameNode {
    session: Session,
    channel: Box<dyn Channel>,
    player: Box<dyn Player>,
    tick: Duration,
}

impl GameNode {
    pub fn new(session: Session, channel: Box<dyn Channel>, player: Box<dyn Player>) -> Self {
        Self {
            session,
            channel,
            player,
            tick: TICK_INTERVAL,
        }
    }

    /// Override the tick interval. Simulations and tests run much faster
    /// than the interactive cadence.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Shots this side has fired so far.
    pub fn shots_fired(&self) -> usize {
        self.session.tracking().shots()
    }

    /// Play the game to its end. Returns how it ended for the local player;
    /// a closed or corrupted connection surfaces as an error instead.
    pub async fn run(&mut self, rng: &mut SmallRng) -> anyhow::Result<Outcome> {
        self.place_fleet(rng).await?;
        log::info!(
            "{}",
            view::status_line(
                self.session.phase(),
                self.session.role(),
                self.session.my_turn(),
                self.session.ships_placed(),
            )
        );

        let mut ticker = tokio::time::interval(self.tick);
        loop {
            ticker.tick().await;

            // one non-blocking poll per tick; an empty result just means
            // nothing has arrived yet
            let incoming = self.channel.poll().await.map_err(|e| anyhow::anyhow!(e))?;
            for msg in incoming {
                let fx = self
                    .session
                    .step(Event::Incoming(msg))
                    .map_err(|e| anyhow::anyhow!(e))?;
                self.dispatch(fx).await?;
            }

            match self.session.phase() {
                Phase::Over(outcome) => return Ok(outcome),
                Phase::Active if self.session.my_turn() => {
                    let (row, col) = self.player.select_target(rng, self.session.tracking());
                    match self.session.step(Event::Local(Action::Fire { row, col })) {
                        Ok(fx) => self.dispatch(fx).await?,
                        // a rejected shot never escapes the tick it happened in
                        Err(e) => log::warn!("shot rejected: {e}"),
                    }
                }
                _ => {}
            }
        }
    }

    /// Placement phase: local-only. The channel is not polled here; peer
    /// messages wait in the transport until we start listening.
    async fn place_fleet(&mut self, rng: &mut SmallRng) -> anyhow::Result<()> {
        while self.session.phase() == Phase::Placement {
            let length = FLEET[self.session.ships_placed()].length();
            let (row, col, orientation) =
                self.player
                    .next_placement(rng, self.session.board(), length);
            if orientation != self.session.orientation() {
                self.session
                    .step(Event::Local(Action::ToggleOrientation))
                    .map_err(|e| anyhow::anyhow!(e))?;
            }
            match self.session.step(Event::Local(Action::PlaceShip { row, col })) {
                Ok(fx) => self.dispatch(fx).await?,
                Err(e) => log::warn!("placement rejected: {e}"),
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, fx: Effects) -> anyhow::Result<()> {
        for cue in fx.cues {
            // audio is an external collaborator; the cue itself is the
            // whole contract
            match cue {
                Cue::Hit => log::info!("cue: hit"),
                Cue::Miss => log::info!("cue: miss"),
                Cue::Sunk => log::info!("cue: sunk"),
            }
        }
        for msg in fx.outgoing {
            self.channel.send(&msg).await.map_err(|e| anyhow::anyhow!(e))?;
        }
        Ok(())
    }
}

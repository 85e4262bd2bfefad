//! Session orchestration for an interactive table.
//!
//! Drives full games by watching whose turn it is, asking the advisor for
//! the computer's moves, and applying them to the engine after the
//! presentation delays. Computer actions are planned as epoch-stamped
//! scheduled tasks: `new_game` bumps the epoch, so an action planned
//! before a reset is discarded instead of firing into the fresh game.
//! At most one decision cycle is in flight per computer turn.

use std::time::Duration;

use tokio::time::sleep;

use crate::advisor::{Action, Advisor};
use crate::engine::Engine;
use crate::game::{GameState, HoldOutcome, Player, RollOutcome};

/// Log line shown before the first roll of the first game.
pub const WELCOME_LOG: &str = "Welcome to Pig! Roll to start.";

/// Log line shown after a reset.
pub const NEW_GAME_LOG: &str = "New Game Started. Good Luck!";

/// Presentation delays for the interactive table.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Die animation time before a roll lands.
    pub roll_animation: Duration,
    /// Pause before the advisor is consulted.
    pub thinking: Duration,
    /// Pause between showing the reasoning and executing the action.
    pub reveal: Duration,
}

impl Timing {
    /// No delays, for headless drivers and tests.
    pub const INSTANT: Timing = Timing {
        roll_animation: Duration::ZERO,
        thinking: Duration::ZERO,
        reveal: Duration::ZERO,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            roll_animation: Duration::from_millis(600),
            thinking: Duration::from_millis(800),
            reveal: Duration::from_millis(1500),
        }
    }
}

/// A computer action planned for a specific game epoch. Executing it
/// after the epoch has moved on is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAction {
    epoch: u64,
    pub action: Action,
}

/// What the engine did when a scheduled action fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    Rolled(RollOutcome),
    Held(HoldOutcome),
}

/// Result of one computer decision cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// The action fired against the engine.
    Applied(TurnEvent),
    /// The action was planned before a reset and was discarded.
    Stale,
    /// Planning declined: not the computer's turn, game over, or a cycle
    /// already in flight.
    Skipped,
}

/// Read model for renderers: the game state plus the presentation
/// transients. Outputs only.
pub struct TableView<'a> {
    pub state: &'a GameState,
    pub rolling: bool,
    pub thinking: bool,
    pub log: &'a str,
    pub reasoning: Option<&'a str>,
}

/// Owns the engine, the advisor, and the presentation transients for one
/// table. All game mutation flows through the engine it owns.
pub struct Session<A> {
    engine: Engine,
    advisor: A,
    timing: Timing,
    epoch: u64,
    in_flight: bool,
    rolling: bool,
    thinking: bool,
    log: String,
    reasoning: Option<String>,
}

impl<A: Advisor> Session<A> {
    /// Creates a session with default presentation delays.
    pub fn new(advisor: A) -> Self {
        Self::with_engine(Engine::new(), advisor, Timing::default())
    }

    /// Creates a session around an existing engine, e.g. one with a fixed
    /// seed or a resumed state.
    pub fn with_engine(engine: Engine, advisor: A, timing: Timing) -> Self {
        Session {
            engine,
            advisor,
            timing,
            epoch: 0,
            in_flight: false,
            rolling: false,
            thinking: false,
            log: WELCOME_LOG.to_string(),
            reasoning: None,
        }
    }

    /// Read-only view of the game state.
    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    /// The renderer-facing snapshot.
    pub fn view(&self) -> TableView<'_> {
        TableView {
            state: self.engine.state(),
            rolling: self.rolling,
            thinking: self.thinking,
            log: &self.log,
            reasoning: self.reasoning.as_deref(),
        }
    }

    /// Starts a fresh game. Bumps the epoch so any still-pending scheduled
    /// action from the previous game is invalidated.
    pub fn new_game(&mut self) {
        self.epoch += 1;
        self.in_flight = false;
        self.rolling = false;
        self.thinking = false;
        self.reasoning = None;
        self.engine.reset();
        self.log = NEW_GAME_LOG.to_string();
    }

    /// Rolls for the human player. Returns `None` without touching the
    /// state when it is not the human's turn, a roll is already in
    /// progress, or the game is finished.
    pub async fn human_roll(&mut self) -> Option<RollOutcome> {
        if self.engine.state().active_player != Player::Human {
            return None;
        }
        self.animate_roll().await
    }

    /// Banks the human's turn score. Returns `None` without touching the
    /// state when it is not the human's turn, the turn score is zero, a
    /// roll is in progress, or the game is finished.
    pub fn human_hold(&mut self) -> Option<HoldOutcome> {
        let state = self.engine.state();
        if state.active_player != Player::Human
            || state.current_turn_score == 0
            || self.rolling
            || state.is_finished()
        {
            return None;
        }
        let outcome = self.engine.hold()?;
        self.reasoning = None;
        self.log = hold_log(Player::Human, outcome);
        Some(outcome)
    }

    /// Starts one computer decision cycle: thinking pause, advisor call,
    /// reasoning recorded for display. Returns the epoch-stamped action to
    /// pass to [`Session::execute`], or `None` when the cycle must not
    /// start (human turn, finished game, roll in progress, or another
    /// cycle already in flight).
    pub async fn plan_computer_action(&mut self) -> Option<ScheduledAction> {
        let state = self.engine.state();
        if state.active_player != Player::Computer
            || state.is_finished()
            || self.rolling
            || self.in_flight
        {
            return None;
        }

        self.in_flight = true;
        self.thinking = true;
        sleep(self.timing.thinking).await;

        let decision = self.advisor.decide(self.engine.state()).await;
        self.thinking = false;
        self.reasoning = Some(decision.reasoning);

        Some(ScheduledAction {
            epoch: self.epoch,
            action: decision.action,
        })
    }

    /// Fires a planned action against the engine after the reveal pause.
    /// An action stamped with an earlier epoch is discarded untouched --
    /// the reset that bumped the epoch already cleared the cycle.
    pub async fn execute(&mut self, action: ScheduledAction) -> Execution {
        if action.epoch != self.epoch {
            return Execution::Stale;
        }

        sleep(self.timing.reveal).await;
        self.in_flight = false;

        match action.action {
            Action::Roll => match self.animate_roll().await {
                Some(outcome) => Execution::Applied(TurnEvent::Rolled(outcome)),
                None => Execution::Skipped,
            },
            Action::Hold => match self.engine.hold() {
                Some(outcome) => {
                    self.reasoning = None;
                    self.log = hold_log(Player::Computer, outcome);
                    Execution::Applied(TurnEvent::Held(outcome))
                }
                None => Execution::Skipped,
            },
        }
    }

    /// Convenience composition of plan + execute for drivers that do not
    /// display anything between the two.
    pub async fn run_computer_turn(&mut self) -> Execution {
        match self.plan_computer_action().await {
            Some(action) => self.execute(action).await,
            None => Execution::Skipped,
        }
    }

    /// Shared roll path: animation pause, then the die lands. The actor is
    /// captured before the roll because a bust toggles the turn.
    async fn animate_roll(&mut self) -> Option<RollOutcome> {
        if self.rolling || self.engine.state().is_finished() {
            return None;
        }

        self.rolling = true;
        self.log.clear();
        sleep(self.timing.roll_animation).await;
        self.rolling = false;

        let actor = self.engine.state().active_player;
        let outcome = self.engine.roll()?;
        self.log = match outcome {
            RollOutcome::Bust => format!("{} rolled a 1! Turn lost.", actor.label()),
            RollOutcome::Gained(die) => format!("{} rolled a {}.", actor.label(), die),
        };
        Some(outcome)
    }
}

/// Log line for a hold, shared by both players.
fn hold_log(actor: Player, outcome: HoldOutcome) -> String {
    match outcome {
        HoldOutcome::Banked(points) => {
            format!("{} held and banked {} points.", actor.label(), points)
        }
        HoldOutcome::Won(_) => match actor {
            Player::Human => "GAME OVER! You win!".to_string(),
            Player::Computer => "GAME OVER! Gemini wins!".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::Decision;
    use crate::game::{GameStatus, WINNING_SCORE};
    use std::collections::VecDeque;

    /// Advisor that plays back a fixed list of actions.
    struct Scripted(VecDeque<Action>);

    impl Scripted {
        fn plays(actions: &[Action]) -> Self {
            Scripted(actions.iter().copied().collect())
        }
    }

    impl Advisor for Scripted {
        async fn decide(&mut self, _state: &GameState) -> Decision {
            Decision {
                action: self.0.pop_front().unwrap_or(Action::Hold),
                reasoning: "scripted".to_string(),
            }
        }
    }

    /// Session with a hand-built state and instant delays.
    fn session_at(state: GameState, advisor: Scripted) -> Session<Scripted> {
        Session::with_engine(Engine::from_state(state), advisor, Timing::INSTANT)
    }

    fn computer_turn(banked: u32, turn_score: u32) -> GameState {
        let mut state = GameState::new();
        state.active_player = Player::Computer;
        state.status = GameStatus::Playing;
        state.scores[Player::Computer as usize] = banked;
        state.current_turn_score = turn_score;
        state
    }

    #[test]
    fn new_session_view() {
        let session = session_at(GameState::new(), Scripted::plays(&[]));
        let view = session.view();
        assert_eq!(view.log, WELCOME_LOG);
        assert!(!view.rolling);
        assert!(!view.thinking);
        assert_eq!(view.reasoning, None);
        assert_eq!(*view.state, GameState::new());
    }

    #[tokio::test]
    async fn human_roll_rejected_on_computer_turn() {
        let mut session = session_at(computer_turn(0, 0), Scripted::plays(&[]));
        let before = session.state().clone();
        assert!(session.human_roll().await.is_none());
        assert_eq!(*session.state(), before);
    }

    #[test]
    fn human_hold_rejected_at_zero_turn_score() {
        let mut session = session_at(GameState::new(), Scripted::plays(&[]));
        assert!(session.human_hold().is_none());
        assert_eq!(*session.state(), GameState::new());
    }

    #[test]
    fn human_hold_banks_and_passes_turn() {
        let mut state = GameState::new();
        state.status = GameStatus::Playing;
        state.current_turn_score = 8;
        let mut session = session_at(state, Scripted::plays(&[]));

        let outcome = session.human_hold();
        assert_eq!(outcome, Some(HoldOutcome::Banked(8)));
        assert_eq!(session.state().score(Player::Human), 8);
        assert_eq!(session.state().active_player, Player::Computer);
        assert_eq!(session.view().log, "You held and banked 8 points.");
    }

    #[tokio::test]
    async fn plan_declines_on_human_turn() {
        let mut session = session_at(GameState::new(), Scripted::plays(&[Action::Roll]));
        assert!(session.plan_computer_action().await.is_none());
    }

    #[tokio::test]
    async fn plan_declines_after_finish() {
        let mut state = computer_turn(WINNING_SCORE + 2, 0);
        state.status = GameStatus::Finished;
        state.winner = Some(Player::Computer);
        let mut session = session_at(state, Scripted::plays(&[Action::Roll]));
        assert!(session.plan_computer_action().await.is_none());
    }

    #[tokio::test]
    async fn no_overlapping_cycles() {
        let script = Scripted::plays(&[Action::Roll, Action::Roll]);
        let mut session = session_at(computer_turn(0, 0), script);
        let first = session.plan_computer_action().await;
        assert!(first.is_some());
        assert!(session.plan_computer_action().await.is_none());
    }

    #[tokio::test]
    async fn plan_records_reasoning() {
        let mut session = session_at(computer_turn(0, 0), Scripted::plays(&[Action::Roll]));
        session.plan_computer_action().await.unwrap();
        assert_eq!(session.view().reasoning, Some("scripted"));
        assert!(!session.view().thinking);
    }

    #[tokio::test]
    async fn executed_hold_banks_for_computer() {
        let mut session = session_at(computer_turn(40, 10), Scripted::plays(&[Action::Hold]));
        let action = session.plan_computer_action().await.unwrap();
        let result = session.execute(action).await;

        assert_eq!(result, Execution::Applied(TurnEvent::Held(HoldOutcome::Banked(10))));
        assert_eq!(session.state().score(Player::Computer), 50);
        assert_eq!(session.state().active_player, Player::Human);
        assert_eq!(session.view().log, "Gemini held and banked 10 points.");
        assert_eq!(session.view().reasoning, None);
    }

    #[tokio::test]
    async fn executed_roll_moves_the_game() {
        let mut session = session_at(computer_turn(0, 0), Scripted::plays(&[Action::Roll]));
        let action = session.plan_computer_action().await.unwrap();
        let result = session.execute(action).await;

        match result {
            Execution::Applied(TurnEvent::Rolled(RollOutcome::Bust)) => {
                assert_eq!(session.state().active_player, Player::Human);
                assert_eq!(session.state().current_turn_score, 0);
            }
            Execution::Applied(TurnEvent::Rolled(RollOutcome::Gained(die))) => {
                assert_eq!(session.state().active_player, Player::Computer);
                assert_eq!(session.state().current_turn_score, u32::from(die));
            }
            other => panic!("unexpected execution result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn winning_hold_sets_game_over_log() {
        let mut session = session_at(computer_turn(95, 6), Scripted::plays(&[Action::Hold]));
        let action = session.plan_computer_action().await.unwrap();
        let result = session.execute(action).await;

        assert_eq!(result, Execution::Applied(TurnEvent::Held(HoldOutcome::Won(101))));
        assert_eq!(session.state().winner, Some(Player::Computer));
        assert_eq!(session.view().log, "GAME OVER! Gemini wins!");
    }

    #[tokio::test]
    async fn stale_action_is_discarded_after_new_game() {
        let mut session = session_at(computer_turn(40, 10), Scripted::plays(&[Action::Hold]));
        let action = session.plan_computer_action().await.unwrap();

        session.new_game();
        let result = session.execute(action).await;

        assert_eq!(result, Execution::Stale);
        assert_eq!(*session.state(), GameState::new());
        assert_eq!(session.view().log, NEW_GAME_LOG);
    }

    #[tokio::test]
    async fn new_game_allows_a_fresh_cycle() {
        let script = Scripted::plays(&[Action::Roll, Action::Roll]);
        let mut session = session_at(computer_turn(0, 0), script);
        session.plan_computer_action().await.unwrap();

        session.new_game();
        // Fresh game starts on the human's turn, so planning declines for
        // the right reason, not because a stale cycle is still in flight.
        assert_eq!(session.state().active_player, Player::Human);
        assert!(session.plan_computer_action().await.is_none());
        assert!(session.human_roll().await.is_some());
    }

    #[tokio::test]
    async fn run_computer_turn_skips_on_human_turn() {
        let mut session = session_at(GameState::new(), Scripted::plays(&[]));
        assert_eq!(session.run_computer_turn().await, Execution::Skipped);
    }
}

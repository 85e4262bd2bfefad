//! Plain-text table renderer.
//!
//! Formats a [`TableView`] for the terminal: the two player panels, the
//! die face, and the status line with the computer's reasoning bubble.
//! Pure string building, no I/O.

use crate::game::Player;
use crate::session::TableView;

/// ASCII die faces indexed by `value - 1`, five rows each. Pip layout
/// follows the usual 3x3 grid.
const FACES: [[&str; 5]; 6] = [
    [
        "+-------+",
        "|       |",
        "|   o   |",
        "|       |",
        "+-------+",
    ],
    [
        "+-------+",
        "| o     |",
        "|       |",
        "|     o |",
        "+-------+",
    ],
    [
        "+-------+",
        "| o     |",
        "|   o   |",
        "|     o |",
        "+-------+",
    ],
    [
        "+-------+",
        "| o   o |",
        "|       |",
        "| o   o |",
        "+-------+",
    ],
    [
        "+-------+",
        "| o   o |",
        "|   o   |",
        "| o   o |",
        "+-------+",
    ],
    [
        "+-------+",
        "| o   o |",
        "| o   o |",
        "| o   o |",
        "+-------+",
    ],
];

/// Returns the five-row face for a die value in [1, 6].
pub fn die_face(value: u8) -> &'static [&'static str; 5] {
    debug_assert!((1..=6).contains(&value), "die out of range: {}", value);
    &FACES[usize::from(value.clamp(1, 6)) - 1]
}

/// Renders the full table: panels, die, status line, reasoning bubble.
pub fn render(view: &TableView) -> String {
    let state = view.state;
    let mut out = String::new();

    for player in [Player::Human, Player::Computer] {
        let active = state.active_player == player && state.winner.is_none();
        let marker = if state.winner == Some(player) {
            '*'
        } else if active {
            '>'
        } else {
            ' '
        };
        out.push_str(&format!("{} {:<7} {:>3}", marker, player.label(), state.score(player)));
        if active {
            out.push_str(&format!("  (turn: {})", state.current_turn_score));
        }
        out.push('\n');
    }
    out.push('\n');

    if view.rolling {
        out.push_str("  ( rolling... )\n");
    } else {
        for row in die_face(state.last_roll) {
            out.push_str(row);
            out.push('\n');
        }
    }
    out.push('\n');

    let status = if let Some(winner) = state.winner {
        match winner {
            Player::Human => "You crushed the AI!",
            Player::Computer => "The AI dominated.",
        }
    } else if view.thinking {
        "Gemini is thinking..."
    } else {
        view.log
    };
    out.push_str(status);
    out.push('\n');

    if let Some(reasoning) = view.reasoning {
        out.push_str(&format!("Gemini: \"{}\"\n", reasoning));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, GameStatus};

    fn view_of(state: &GameState) -> TableView<'_> {
        TableView {
            state,
            rolling: false,
            thinking: false,
            log: "log line",
            reasoning: None,
        }
    }

    #[test]
    fn one_has_a_single_center_pip() {
        let face = die_face(1);
        assert_eq!(face[2], "|   o   |");
        assert_eq!(face[1], "|       |");
    }

    #[test]
    fn six_has_three_pip_rows() {
        let face = die_face(6);
        for row in &face[1..4] {
            assert_eq!(*row, "| o   o |");
        }
    }

    #[test]
    fn render_shows_scores_and_active_turn() {
        let mut state = GameState::new();
        state.scores = [42, 57];
        state.current_turn_score = 8;
        let out = render(&view_of(&state));

        assert!(out.contains("> You      42  (turn: 8)"));
        assert!(out.contains("  Gemini   57\n"));
        assert!(out.contains("log line"));
    }

    #[test]
    fn render_marks_the_winner() {
        let mut state = GameState::new();
        state.scores = [104, 88];
        state.status = GameStatus::Finished;
        state.winner = Some(Player::Human);
        let out = render(&view_of(&state));

        assert!(out.contains("* You     104"));
        assert!(out.contains("You crushed the AI!"));
        // Nobody is shown as on turn once the game is over.
        assert!(!out.contains("(turn:"));
    }

    #[test]
    fn thinking_overrides_the_log_line() {
        let state = GameState::new();
        let mut view = view_of(&state);
        view.thinking = true;
        let out = render(&view);
        assert!(out.contains("Gemini is thinking..."));
        assert!(!out.contains("log line"));
    }

    #[test]
    fn reasoning_renders_as_a_quote() {
        let state = GameState::new();
        let mut view = view_of(&state);
        view.reasoning = Some("Fortune favors the bold.");
        let out = render(&view);
        assert!(out.contains("Gemini: \"Fortune favors the bold.\""));
    }

    #[test]
    fn rolling_hides_the_die_face() {
        let state = GameState::new();
        let mut view = view_of(&state);
        view.rolling = true;
        let out = render(&view);
        assert!(out.contains("( rolling... )"));
        assert!(!out.contains("+-------+"));
    }
}

use crate::game::{Game, GameStatus};
use crate::moves::Move;
use crate::position::Position;
use crate::snapshot::{piece_type_to_string, string_to_piece_type, GameView};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct MoveOutcome {
    #[serde(flatten)]
    view: Option<GameView>,
    status: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct SquareMoveJson {
    to: [i8; 2],
    promotion: Option<String>,
}

fn status_to_string(status: GameStatus) -> String {
    match status {
        GameStatus::Ongoing => "Ongoing".to_string(),
        GameStatus::Check(c) => format!("{c} is in check"),
        GameStatus::Checkmate(c) => format!("{c} is in checkmate"),
        GameStatus::Stalemate(c) => format!("{c} is in stalemate"),
        GameStatus::Ended => "Game over".to_string(),
    }
}

#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { game: Game::new() }
    }

    /// Restore from `to_json` output; `None` (JS `undefined`) if rejected.
    pub fn from_json(json: &str) -> Option<WasmGame> {
        Game::from_json(json).ok().map(|game| WasmGame { game })
    }

    pub fn to_json(&self) -> Option<String> {
        self.game.to_json().ok()
    }

    pub fn state(&self) -> JsValue {
        let view = GameView::from_game(&self.game);
        serde_wasm_bindgen::to_value(&view).unwrap_or(JsValue::NULL)
    }

    pub fn make_move(
        &mut self,
        from_row: i8,
        from_col: i8,
        to_row: i8,
        to_col: i8,
        promotion: Option<String>,
    ) -> JsValue {
        let mv = Move {
            from: Position::new(from_row, from_col),
            to: Position::new(to_row, to_col),
            promotion: promotion.as_deref().and_then(string_to_piece_type),
        };

        let outcome = match self.game.make_move(&mv) {
            Ok(()) => {
                let status = self.game.status();
                MoveOutcome {
                    view: Some(GameView::from_game(&self.game)),
                    status: Some(status_to_string(status)),
                    error: None,
                }
            }
            Err(e) => MoveOutcome {
                view: None,
                status: None,
                error: Some(e.to_string()),
            },
        };
        serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL)
    }

    pub fn moves_for_square(&self, row: i8, col: i8) -> JsValue {
        let square_moves: Vec<SquareMoveJson> = self
            .game
            .valid_moves(Position::new(row, col))
            .unwrap_or_default()
            .iter()
            .map(|m| SquareMoveJson {
                to: [m.to.row(), m.to.column()],
                promotion: m.promotion.map(piece_type_to_string),
            })
            .collect();

        serde_wasm_bindgen::to_value(&square_moves).unwrap_or(JsValue::NULL)
    }

    pub fn resign(&mut self) -> JsValue {
        self.game.end_game();
        self.state()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

//! WebAssembly bindings for the backgammon engine.
//!
//! This module exposes the game engine to JavaScript through wasm-bindgen.
//! Everything crosses the boundary as JSON.

use wasm_bindgen::prelude::*;

use crate::actions::{GameAction, GameEvent};
use crate::config::GameConfig;
use crate::game::{Game, GameError};
use crate::moves::{Destination, Origin};
use crate::player::Player;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game from a JSON config (`"{}"` for defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmGame, JsValue> {
        let config = GameConfig::from_json(config_json).map_err(to_js)?;
        Ok(WasmGame {
            game: Game::with_config(config),
        })
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the current player ("White" or "Black")
    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> String {
        self.game.current_player().to_string()
    }

    /// Moves playable next as a JSON array, empty outside move selection
    #[wasm_bindgen(js_name = getLegalMoves)]
    pub fn get_legal_moves(&self) -> String {
        let moves = self.game.legal_moves().unwrap_or_default();
        serde_json::to_string(&moves).unwrap_or_else(|_| "[]".to_string())
    }

    /// Remaining die values as a JSON array
    #[wasm_bindgen(js_name = getRemainingDice)]
    pub fn get_remaining_dice(&self) -> Vec<u8> {
        self.game.remaining_dice().to_vec()
    }

    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&mut self) -> Result<String, JsValue> {
        events_json(self.game.start_game())
    }

    #[wasm_bindgen(js_name = rollDice)]
    pub fn roll_dice(&mut self) -> Result<String, JsValue> {
        events_json(self.game.roll_dice())
    }

    /// Propose a move from JSON origin and destination, e.g. `"Bar"` and
    /// `{"Point": 20}`
    #[wasm_bindgen(js_name = proposeMove)]
    pub fn propose_move(&mut self, from_json: &str, to_json: &str) -> Result<String, JsValue> {
        let from: Origin = serde_json::from_str(from_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid origin JSON: {}", e)))?;
        let to: Destination = serde_json::from_str(to_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid destination JSON: {}", e)))?;
        events_json(self.game.propose_move(from, to))
    }

    #[wasm_bindgen(js_name = endTurn)]
    pub fn end_turn(&mut self) -> Result<String, JsValue> {
        events_json(self.game.end_turn())
    }

    #[wasm_bindgen(js_name = resetGame)]
    pub fn reset_game(&mut self) -> Result<String, JsValue> {
        events_json(self.game.reset_game())
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;
        events_json(self.game.apply_action(action))
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.game.is_finished()
    }

    /// Get the winner (if game is finished)
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<String> {
        self.game.winner().map(|p: Player| p.to_string())
    }

    /// Get pip counts as `[white, black]`
    #[wasm_bindgen(js_name = getPipCounts)]
    pub fn get_pip_counts(&self) -> Vec<u32> {
        Player::ALL
            .iter()
            .map(|&p| self.game.board().pip_count(p))
            .collect()
    }
}

fn events_json(result: Result<Vec<GameEvent>, GameError>) -> Result<String, JsValue> {
    match result {
        Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
        Err(e) => Err(to_js(e)),
    }
}

fn to_js(error: GameError) -> JsValue {
    JsValue::from_str(&format!("Action failed: {}", error))
}

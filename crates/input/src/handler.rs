//! Key router for terminal environments.
//!
//! The engine owns DAS/ARR, so the router only has to turn key events into
//! press/release actions. Terminals that never emit key-release events get a
//! release synthesized once a held key has not been seen for a while.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_press, handle_key_release, held_key, HeldKey};
use crate::types::GameAction;

// Without release events, a short timeout keeps a single tap from turning
// into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks held keys between frames.
#[derive(Debug, Clone)]
pub struct KeyRouter {
    /// Milliseconds since each held key was last seen (`None` = not held).
    held: [Option<u32>; 3],
    key_release_timeout_ms: u32,
    /// Set once the terminal reports a real release; timeouts stop then.
    release_events: bool,
}

impl KeyRouter {
    pub fn new() -> Self {
        Self {
            held: [None; 3],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_held(&self, key: HeldKey) -> bool {
        self.held[key.index()].is_some()
    }

    /// Translate one terminal key event.
    ///
    /// Repeated presses of a key that is already held only refresh it; the
    /// engine's own auto-repeat produces the extra moves.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<GameAction> {
        match key.kind {
            KeyEventKind::Release => {
                self.release_events = true;
                let held = held_key(key.code)?;
                self.held[held.index()].take()?;
                handle_key_release(key)
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let Some(held) = held_key(key.code) else {
                    return handle_key_press(key);
                };
                let slot = &mut self.held[held.index()];
                let was_held = slot.is_some();
                *slot = Some(0);
                if was_held {
                    None
                } else {
                    Some(held.press_action())
                }
            }
        }
    }

    /// Advance held-key ages and return releases for keys that timed out.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 3> {
        let mut actions = ArrayVec::<GameAction, 3>::new();
        if self.release_events {
            return actions;
        }

        for key in HeldKey::ALL {
            let slot = &mut self.held[key.index()];
            let Some(age) = slot.as_mut() else {
                continue;
            };
            *age = age.saturating_add(elapsed_ms);
            if *age > self.key_release_timeout_ms {
                *slot = None;
                actions.push(key.release_action());
            }
        }

        actions
    }

    /// Forget every held key and return the releases the engine needs.
    pub fn reset(&mut self) -> ArrayVec<GameAction, 3> {
        let mut actions = ArrayVec::<GameAction, 3>::new();
        for key in HeldKey::ALL {
            if self.held[key.index()].take().is_some() {
                actions.push(key.release_action());
            }
        }
        actions
    }
}

impl Default for KeyRouter {
    fn default() -> Self {
        Self::new()
    }
}

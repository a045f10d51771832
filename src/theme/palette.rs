//! Color constants and font size tokens for consistent UI theming.

use bevy::prelude::*;

// === Text Colors ===

/// Header/title text color (white).
pub const HEADER_TEXT: Color = Color::WHITE;

/// Body/subtitle text color (light gray).
pub const BODY_TEXT: Color = Color::srgb(0.7, 0.7, 0.7);

/// Gold/currency display text color (yellow-gold).
pub const GOLD_TEXT: Color = Color::srgb(1.0, 0.85, 0.0);

/// Rejected request flash.
pub const WARNING_TEXT: Color = Color::srgb(1.0, 0.4, 0.3);

// === UI Backgrounds ===

/// Semi-transparent dark overlay for the game-over screen.
pub const OVERLAY_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);

// === Battlefield Colors ===

pub const BACKGROUND: Color = Color::srgb(0.1, 0.1, 0.12);
pub const GROUND: Color = Color::srgb(0.25, 0.2, 0.15);
pub const PLAYER_BASE: Color = Color::srgb(0.2, 0.3, 0.8);
pub const ENEMY_BASE: Color = Color::srgb(0.8, 0.2, 0.2);

// === Unit Colors ===

pub const PLAYER_UNIT: Color = Color::srgb(0.2, 0.8, 0.2);
pub const ENEMY_UNIT: Color = Color::srgb(0.8, 0.2, 0.2);
pub const BLOCKING_UNIT: Color = Color::srgb(0.6, 0.8, 1.0);
pub const DYING_UNIT: Color = Color::srgba(0.5, 0.5, 0.5, 0.5);

// === Outcome Colors ===

pub const VICTORY: Color = Color::srgb(0.1, 0.9, 0.1);
pub const DEFEAT: Color = Color::srgb(0.9, 0.15, 0.15);

// === Font Size Tokens ===

pub const FONT_SIZE_HEADER: f32 = 64.0;
pub const FONT_SIZE_LABEL: f32 = 32.0;
pub const FONT_SIZE_HUD: f32 = 20.0;

//! Shared UI theme: color palette and reusable widget constructors.

pub mod palette;
pub mod widget;

use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(palette::BACKGROUND));
}

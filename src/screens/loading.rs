//! Loading screen. There are no assets to wait for, so it hands straight over.

use bevy::prelude::*;

use super::GameState;
use crate::theme::{palette, widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Loading), setup_loading_screen)
        .add_systems(
            Update,
            check_loading_complete.run_if(in_state(GameState::Loading)),
        );
}

fn setup_loading_screen(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("Loading Screen"),
        DespawnOnExit(GameState::Loading),
        children![widget::header("Loading...", palette::HEADER_TEXT)],
    ));
}

fn check_loading_complete(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_entity_count, create_base_test_app};
    use pretty_assertions::assert_eq;

    #[test]
    fn loading_moves_to_in_game() {
        let mut app = create_base_test_app();
        app.add_plugins(plugin);
        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::InGame
        );
        assert_entity_count::<With<Text>>(&mut app, 0);
    }
}

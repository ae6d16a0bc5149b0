use crate::state::RosterState;
use axum::extract::State;
use maud::Markup;

pub async fn get_index_route(State(state): State<RosterState>) -> Markup {
    let screens = state.screens().render();
    state.render(screens).await
}

use crate::{
    data::{course::Course, student::Student},
    routes::{
        index::get_index_route,
        records::{
            get_delete, get_edit, get_notification, get_screen, post_delete, post_dismiss,
            post_field, post_new, post_refresh, post_submit,
        },
        session::{get_profile, post_logout, post_refresh_profile, post_token},
    },
    screen::ScreenOf,
    state::RosterState,
};
use axum::{
    Router,
    routing::{get, post},
};

pub mod index;
pub mod records;
pub mod session;

fn record_routes<T: ScreenOf>() -> Router<RosterState> {
    let base = format!("/{}", T::KIND.segment());

    Router::new()
        .route(&base, get(get_screen::<T>).post(post_submit::<T>))
        .route(&format!("{base}/field"), post(post_field::<T>))
        .route(&format!("{base}/new"), post(post_new::<T>))
        .route(&format!("{base}/refresh"), post(post_refresh::<T>))
        .route(&format!("{base}/delete"), post(post_delete::<T>))
        .route(&format!("{base}/notification"), get(get_notification::<T>))
        .route(
            &format!("{base}/notification/dismiss"),
            post(post_dismiss::<T>),
        )
        .route(&format!("{base}/{{id}}/edit"), get(get_edit::<T>))
        .route(&format!("{base}/{{id}}/delete"), get(get_delete::<T>))
}

pub fn build_router(state: RosterState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/profile", get(get_profile))
        .route("/session/token", post(post_token))
        .route("/session/refresh", post(post_refresh_profile))
        .route("/session/logout", post(post_logout))
        .merge(record_routes::<Student>())
        .merge(record_routes::<Course>())
        .with_state(state)
}

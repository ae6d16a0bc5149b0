use crate::{
    error::RosterResult,
    maud_conveniences::{form_element, form_submit_button, title},
    state::RosterState,
};
use axum::{Form, extract::State, response::Redirect};
use maud::{Markup, html};
use secrecy::SecretString;
use serde::Deserialize;

pub async fn get_profile(State(state): State<RosterState>) -> Markup {
    let profile = state.session().profile().await;
    let has_token = state.session().has_token().await;

    let content = html! {
        div class="bg-gray-800 shadow-md rounded px-8 pt-6 pb-8 mt-8 w-full max-w-sm" {
            @if let Some(profile) = profile {
                (title(profile.display_name()))
                @if let Some(email) = &profile.email {
                    p class="text-gray-300 mb-4" {(email)}
                }
                form method="post" action="/session/refresh" class="mb-2" {
                    (form_submit_button(Some("Refresh profile")))
                }
            } @else {
                (title("Sign in"))
                @if has_token {
                    div role="alert" class="bg-red-100 border border-red-400 text-red-700 px-4 py-4 rounded relative mb-4" {
                        span class="block sm:inline" {"The stored token was not accepted by the backend."}
                    }
                }
                form method="post" action="/session/token" {
                    (form_element("token", "Access Token", html! {
                        input required type="password" id="token" name="token" class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {}
                    }, None))
                    (form_submit_button(Some("Sign in")))
                }
            }
        }
    };

    state.render(content).await
}

#[derive(Deserialize)]
pub struct TokenForm {
    token: SecretString,
}

pub async fn post_token(
    State(state): State<RosterState>,
    Form(TokenForm { token }): Form<TokenForm>,
) -> RosterResult<Redirect> {
    state.session().save_token(token).await?;
    //whatever we could see before may not be what we can see now
    state.screens().mount().await;
    Ok(Redirect::to("/"))
}

pub async fn post_refresh_profile(State(state): State<RosterState>) -> Redirect {
    state.session().refresh_self().await;
    Redirect::to("/profile")
}

pub async fn post_logout(State(state): State<RosterState>) -> RosterResult<Redirect> {
    state.session().remove_token().await?;
    state.screens().mount().await;
    Ok(Redirect::to("/"))
}

use crate::{
    config::RuntimeConfiguration,
    data::{course::Course, student::Student},
    error::RosterResult,
    gateway::{ApiClient, SharedToken},
    screen::{RecordScreen, Screens},
    session::{FileTokenStore, Session, TokenStore, UserProfile},
};
use maud::{DOCTYPE, Markup, html};
use std::{sync::Arc, time::Duration};

#[derive(Clone, Debug)]
pub struct RosterState {
    screens: Arc<Screens>,
    session: Arc<Session>,
}

impl RosterState {
    pub fn new(config: &RuntimeConfiguration) -> RosterResult<Self> {
        let token = SharedToken::default();
        let api = ApiClient::new(&config.api_config(), token.clone())?;
        let store = Arc::new(FileTokenStore::new(config.token_path.clone()));

        Ok(Self::from_parts(
            &api,
            store,
            token,
            config.notification_timeout,
        ))
    }

    pub fn from_parts(
        api: &ApiClient,
        store: Arc<dyn TokenStore>,
        token: SharedToken,
        notification_timeout: Duration,
    ) -> Self {
        let screens = Screens {
            students: RecordScreen::new(Arc::new(api.records::<Student>()), notification_timeout),
            courses: RecordScreen::new(Arc::new(api.records::<Course>()), notification_timeout),
        };

        Self {
            screens: Arc::new(screens),
            session: Arc::new(Session::new(store, Arc::new(api.clone()), token)),
        }
    }

    /// Session first, so the initial fetches already carry the stored token.
    pub async fn start(&self) {
        self.session.init().await;
        self.screens.mount().await;
    }

    pub fn screens(&self) -> &Screens {
        &self.screens
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn render(&self, markup: Markup) -> Markup {
        let body = if self.session.is_loading().await {
            html! {
                div class="flex justify-center items-center h-screen text-3xl" {"Loading..."}
            }
        } else {
            let nav = render_nav(self.session.profile().await);
            html! {
                (nav)
                (markup)
            }
        };

        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Roster" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center text-white" {
                    (body)
                }
            }
        }
    }

    pub fn sensible_shutdown(&self) {
        self.screens.shutdown();
    }
}

fn render_nav(profile: Option<UserProfile>) -> Markup {
    html! {
        nav class="w-full bg-gray-800 px-8 py-4 flex flex-row items-center justify-between" {
            a href="/" class="text-xl font-bold" {"Roster"}
            div class="flex flex-row items-center space-x-4" {
                @if let Some(profile) = profile {
                    a href="/profile" class="text-gray-300 hover:text-white" {(profile.display_name())}
                    form method="post" action="/session/logout" {
                        button type="submit" class="bg-gray-600 hover:bg-gray-700 font-bold py-1 px-3 rounded" {"Sign out"}
                    }
                } @else {
                    a href="/profile" class="text-gray-300 hover:text-white" {"Sign in"}
                }
            }
        }
    }
}

//! Handlers shared by every record kind. Each one works on whichever screen `T` picks out,
//! and answers with that screen re-rendered so htmx can swap it in place.

use crate::{
    data::RecordId,
    error::{RosterResult, UnknownFieldSnafu},
    screen::{DeleteDecision, ScreenOf, SubmitReport},
    state::RosterState,
};
use axum::{
    Form,
    extract::{Path, State},
};
use maud::Markup;
use serde::Deserialize;
use snafu::OptionExt;
use std::collections::HashMap;
use uuid::Uuid;

pub async fn get_screen<T: ScreenOf>(State(state): State<RosterState>) -> Markup {
    T::screen(state.screens()).render()
}

pub async fn post_submit<T: ScreenOf>(
    State(state): State<RosterState>,
    Form(values): Form<HashMap<String, String>>,
) -> RosterResult<Markup> {
    let screen = T::screen(state.screens());
    for spec in T::schema().fields {
        //locked fields aren't sent at all, and are ignored if they are
        if let Some(value) = values.get(spec.name) {
            screen.set_field(spec.name, value.as_str())?;
        }
    }

    match screen.submit().await? {
        SubmitReport::Updated(id) => info!(kind = %T::KIND, %id, "Record updated"),
        report => debug!(kind = %T::KIND, ?report, "Form submitted"),
    }
    Ok(screen.render())
}

pub async fn post_field<T: ScreenOf>(
    State(state): State<RosterState>,
    Form(values): Form<HashMap<String, String>>,
) -> RosterResult<Markup> {
    let name = values.get("_field").map_or("", String::as_str);
    let spec = T::schema().field(name).context(UnknownFieldSnafu {
        kind: T::KIND,
        name,
    })?;

    let screen = T::screen(state.screens());
    if let Some(value) = values.get(spec.name) {
        screen.set_field(spec.name, value.as_str())?;
    }
    screen.blur_field(spec.name)?;

    Ok(screen.render_field(spec))
}

pub async fn post_new<T: ScreenOf>(State(state): State<RosterState>) -> Markup {
    let screen = T::screen(state.screens());
    screen.new_record();
    screen.render()
}

pub async fn get_edit<T: ScreenOf>(
    State(state): State<RosterState>,
    Path(id): Path<RecordId>,
) -> RosterResult<Markup> {
    let screen = T::screen(state.screens());
    screen.edit(&id)?;
    Ok(screen.render())
}

pub async fn get_delete<T: ScreenOf>(
    State(state): State<RosterState>,
    Path(id): Path<RecordId>,
) -> RosterResult<Markup> {
    let screen = T::screen(state.screens());
    screen.request_delete(&id)?;
    Ok(screen.render())
}

#[derive(Deserialize)]
pub struct DecisionForm {
    decision: String,
}

pub async fn post_delete<T: ScreenOf>(
    State(state): State<RosterState>,
    Form(DecisionForm { decision }): Form<DecisionForm>,
) -> RosterResult<Markup> {
    let decision: DeleteDecision = decision.parse()?;
    let screen = T::screen(state.screens());
    let report = screen.resolve_delete(decision).await?;
    debug!(kind = %T::KIND, ?report, "Delete resolved");
    Ok(screen.render())
}

pub async fn post_refresh<T: ScreenOf>(State(state): State<RosterState>) -> Markup {
    let screen = T::screen(state.screens());
    screen.refetch().await;
    screen.render()
}

pub async fn get_notification<T: ScreenOf>(State(state): State<RosterState>) -> Markup {
    T::screen(state.screens()).render_notification()
}

#[derive(Deserialize)]
pub struct DismissForm {
    id: Option<Uuid>,
}

pub async fn post_dismiss<T: ScreenOf>(
    State(state): State<RosterState>,
    Form(DismissForm { id }): Form<DismissForm>,
) -> Markup {
    let screen = T::screen(state.screens());
    screen.dismiss_notification(id);
    screen.render_notification()
}

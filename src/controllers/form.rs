use crate::{
    data::{FieldValues, Persisted, RecordFields, RecordId},
    error::{GatewayError, GatewayResult, RosterResult, UnknownFieldSnafu},
    validator::ValidationErrors,
};
use snafu::OptionExt;
use std::collections::BTreeSet;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormState {
    Empty,
    Editing,
    Submitting,
}

/// In-progress field values for one record. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormDraft {
    pub values: FieldValues,
    pub touched: BTreeSet<&'static str>,
    pub errors: ValidationErrors,
}

impl FormDraft {
    fn new(values: FieldValues) -> Self {
        Self {
            values,
            touched: BTreeSet::new(),
            errors: ValidationErrors::new(),
        }
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    ///errors only show up once someone has actually touched the field
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        if self.touched.contains(name) {
            self.errors.get(name).map(String::as_str)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitAction<T> {
    Create(T),
    Update(RecordId, T),
}

/// Proof that a submission was started, handed back with the gateway result.
#[derive(Debug)]
pub struct SubmitTicket<T> {
    generation: u64,
    pub action: SubmitAction<T>,
}

#[derive(Debug)]
pub enum BeginSubmit<T> {
    Ready(SubmitTicket<T>),
    Invalid(ValidationErrors),
    AlreadySubmitting,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Created,
    Updated(RecordId),
    Failed(GatewayError),
}

/// Binds a [`FormDraft`] to either nothing (creating) or an existing record (editing).
#[derive(Debug)]
pub struct FormController<T: RecordFields> {
    target: Option<Persisted<T>>,
    draft: FormDraft,
    state: FormState,
    generation: u64,
}

impl<T: RecordFields> Default for FormController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RecordFields> FormController<T> {
    pub fn new() -> Self {
        Self {
            target: None,
            draft: FormDraft::new(T::blank_values()),
            state: FormState::Empty,
            generation: 0,
        }
    }

    pub const fn state(&self) -> FormState {
        self.state
    }

    pub const fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn editing_id(&self) -> Option<&RecordId> {
        self.target.as_ref().map(|t| &t.id)
    }

    /// Throws away whatever is in the draft and starts again from `target`.
    /// No merging, and no asking first.
    pub fn retarget(&mut self, target: Option<Persisted<T>>) {
        self.generation += 1;
        self.draft = FormDraft::new(
            target
                .as_ref()
                .map_or_else(T::blank_values, |t| t.fields.to_values()),
        );
        self.state = if target.is_some() {
            FormState::Editing
        } else {
            FormState::Empty
        };
        self.target = target;
    }

    pub fn is_locked(&self, name: &str) -> bool {
        self.target.is_some() && name == T::key_field()
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> RosterResult<()> {
        let spec = T::schema().field(name).context(UnknownFieldSnafu {
            kind: T::KIND,
            name,
        })?;

        if self.is_locked(spec.name) {
            debug!(kind = %T::KIND, field = spec.name, "Ignoring change to locked key field");
            return Ok(());
        }
        //the draft in flight is what gets kept or cleared once the backend answers
        if self.state == FormState::Submitting {
            debug!(kind = %T::KIND, field = spec.name, "Ignoring change while submitting");
            return Ok(());
        }

        self.draft.values.insert(spec.name, value.into());
        self.draft.touched.insert(spec.name);
        self.revalidate(spec.name);

        if self.state == FormState::Empty {
            self.state = FormState::Editing;
        }
        Ok(())
    }

    pub fn blur_field(&mut self, name: &str) -> RosterResult<()> {
        let spec = T::schema().field(name).context(UnknownFieldSnafu {
            kind: T::KIND,
            name,
        })?;

        self.draft.touched.insert(spec.name);
        self.revalidate(spec.name);
        Ok(())
    }

    fn revalidate(&mut self, name: &'static str) {
        match T::schema().validate_field(name, self.draft.value(name)) {
            Some(message) => self.draft.errors.insert(name, message),
            None => self.draft.errors.remove(name),
        };
    }

    /// Validates everything and, if that passes, moves to `Submitting`.
    /// The gateway must only be called with a [`BeginSubmit::Ready`] ticket.
    pub fn begin_submit(&mut self) -> RosterResult<BeginSubmit<T>> {
        if self.state == FormState::Submitting {
            return Ok(BeginSubmit::AlreadySubmitting);
        }

        let schema = T::schema();
        self.draft.touched = schema.fields.iter().map(|spec| spec.name).collect();
        self.draft.errors = schema.validate(&self.draft.values);

        if !self.draft.errors.is_empty() {
            self.state = FormState::Editing;
            return Ok(BeginSubmit::Invalid(self.draft.errors.clone()));
        }

        let fields = T::from_values(&self.draft.values)?;
        let action = match &self.target {
            None => SubmitAction::Create(fields),
            Some(target) => SubmitAction::Update(target.id.clone(), fields),
        };

        self.state = FormState::Submitting;
        Ok(BeginSubmit::Ready(SubmitTicket {
            generation: self.generation,
            action,
        }))
    }

    /// A ticket from before the last [`retarget`](Self::retarget) still gets its outcome
    /// reported, but can't touch the draft that replaced it.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket<T>,
        result: GatewayResult<()>,
    ) -> SubmitOutcome {
        let current = ticket.generation == self.generation;

        match (result, ticket.action) {
            (Ok(()), SubmitAction::Create(_)) => {
                if current {
                    self.retarget(None);
                }
                SubmitOutcome::Created
            }
            (Ok(()), SubmitAction::Update(id, _)) => {
                if current {
                    self.state = FormState::Editing;
                }
                SubmitOutcome::Updated(id)
            }
            (Err(e), _) => {
                if current {
                    self.state = FormState::Editing;
                }
                SubmitOutcome::Failed(e)
            }
        }
    }
}

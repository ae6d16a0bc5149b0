use crate::{
    data::{Persisted, RecordFields, RecordId},
    error::{GatewayError, GatewayResult},
};
use std::sync::Arc;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug)]
#[must_use]
pub struct FetchTicket {
    seq: u64,
}

#[derive(Debug)]
pub enum FetchOutcome {
    Applied,
    ///a newer response already landed, so this one was dropped
    Stale,
    Failed(GatewayError),
}

/// The last successfully fetched collection for one record kind.
///
/// The snapshot is only ever swapped out whole. Every fetch is numbered, and a response
/// older than the newest one already applied is thrown away.
#[derive(Debug)]
pub struct ListController<T> {
    records: Arc<Vec<Persisted<T>>>,
    state: ListState,
    issued: u64,
    applied: u64,
}

impl<T: RecordFields> Default for ListController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RecordFields> ListController<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Vec::new()),
            state: ListState::Loading,
            issued: 0,
            applied: 0,
        }
    }

    pub const fn state(&self) -> ListState {
        self.state
    }

    pub fn records(&self) -> Arc<Vec<Persisted<T>>> {
        self.records.clone()
    }

    pub fn find(&self, id: &RecordId) -> Option<&Persisted<T>> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.state = ListState::Loading;
        FetchTicket { seq: self.issued }
    }

    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: GatewayResult<Vec<Persisted<T>>>,
    ) -> FetchOutcome {
        if ticket.seq <= self.applied {
            trace!(kind = %T::KIND, seq = ticket.seq, applied = self.applied, "Dropping stale fetch");
            return FetchOutcome::Stale;
        }

        match result {
            Ok(records) => {
                self.applied = ticket.seq;
                self.records = Arc::new(records);
                self.state = ListState::Ready;
                FetchOutcome::Applied
            }
            Err(e) => {
                //keep showing whatever we had
                self.state = ListState::Failed;
                FetchOutcome::Failed(e)
            }
        }
    }
}

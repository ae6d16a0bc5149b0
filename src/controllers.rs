//! The state machines behind one record screen.
//!
//! None of these ever await a network call themselves. Anything asynchronous is split into a
//! `begin_*` that hands out a ticket and a `finish_*` that takes the ticket back together
//! with the gateway's result, so callers never need to hold a lock across a round trip.

pub mod form;
pub mod list;
pub mod notification;

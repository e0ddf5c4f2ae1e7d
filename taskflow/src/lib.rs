//! `TaskFlow` — in-memory task and project management core.
//!
//! The crate is the data-access layer of a task tracker: an injectable
//! [`store::EntityStore`] owning the entity collections, a pure
//! [`query`] layer for list views, a latency-simulating [`client`]
//! standing in for a future REST backend, the optimistic-update
//! [`kanban`] board controller, and the [`report`] aggregator. It never
//! renders and never produces user-facing text; callers get structured
//! results and errors.

pub mod auth;
pub mod client;
pub mod kanban;
pub mod query;
pub mod report;
pub mod seed;
pub mod store;

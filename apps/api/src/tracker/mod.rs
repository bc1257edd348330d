// Skill and event tracking: CRUD over the two SQLite tables plus the
// dashboard aggregates derived from them.

pub mod activity;
pub mod events;
pub mod handlers;
pub mod skills;

//! Request handlers, one module per resource.

pub mod academic_years;
pub mod actions;
pub mod auth;
pub mod catering;
pub mod checklist;
pub mod events;
pub mod expenses;
pub mod flyer;
pub mod reminders;
pub mod room;
pub mod tasks;
pub mod users;

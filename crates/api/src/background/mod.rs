//! In-process background jobs.

pub mod reminders;

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod academic_year_repo;
pub mod action_token_repo;
pub mod catering_repo;
pub mod checklist_repo;
pub mod email_log_repo;
pub mod event_repo;
pub mod expense_repo;
pub mod flyer_repo;
pub mod room_repo;
pub mod user_repo;

pub use academic_year_repo::AcademicYearRepo;
pub use action_token_repo::ActionTokenRepo;
pub use catering_repo::CateringRepo;
pub use checklist_repo::ChecklistRepo;
pub use email_log_repo::EmailLogRepo;
pub use event_repo::EventRepo;
pub use expense_repo::ExpenseRepo;
pub use flyer_repo::FlyerRepo;
pub use room_repo::RoomRepo;
pub use user_repo::UserRepo;

pub mod activities;
pub mod feedback;
pub mod levels;
pub mod registrations;
pub mod users;

pub use activities::{ActivityListRow, ActivityRow, ActivityStatus, ActivityType, ACTIVITY_CAPACITY};
pub use feedback::FeedbackRow;
pub use levels::SkillLevel;
pub use registrations::{RegistrationRow, RegistrationStatus};
pub use users::UserRow;

//! Data model for matching submitted fiches against the electoral roll.
//!
//! A [`CandidateRecord`] is built from each submission, compared against
//! [`ReferenceRow`]s read from the roll, and classified by a [`MatchVerdict`].
//! The surrounding application derives a [`RegistrationStatus`] and a
//! [`Notification`] from the verdict.

pub mod candidate;
pub mod columns;
pub mod error;
pub mod reference;
pub mod registration;
pub mod verdict;

pub use candidate::{BirthDate, CandidateRecord};
pub use error::{ModelError, Result};
pub use reference::ReferenceRow;
pub use registration::RegistrationStatus;
pub use verdict::{MatchVerdict, MatchedVoter, Notification, NotificationLevel};

mod email_address;
mod enums;
mod required_text;

pub use email_address::EmailAddress;
pub use enums::{
    ContactSubject, CourseName, FarmingExperience, RegistrationStatus, SubmissionStatus,
    SubscriberSource, SubscriberStatus,
};
pub use required_text::RequiredText;

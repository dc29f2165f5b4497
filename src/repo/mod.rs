mod contact_submissions;
mod course_registrations;
mod media;
mod newsletter_subscribers;
mod payment_instructions;

pub use contact_submissions::{ContactSubmissionRepo, NewContactSubmission};
pub use course_registrations::{
    CourseRegistrationRecord, CourseRegistrationRepo, NewCourseRegistration,
};
pub use media::{MediaAssetRecord, MediaRepo, NewMediaAsset};
pub use newsletter_subscribers::{
    is_unique_violation, NewNewsletterSubscriber, NewsletterSubscriberRecord,
    NewsletterSubscriberRepo,
};
pub use payment_instructions::{PaymentInstructions, PaymentInstructionsRepo};

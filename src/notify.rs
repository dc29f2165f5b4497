use uuid::Uuid;

use crate::client::{Email, EmailClient};
use crate::domain::EmailAddress;
use crate::repo::{NewContactSubmission, NewCourseRegistration};

/// Wraps the email client with the advisory-send policy: a failed dispatch
/// is logged and reported to the caller, but callers only use the outcome
/// for logging and record-keeping, never to fail the enclosing form action.
#[derive(Debug)]
pub struct Notifier {
    email_client: EmailClient,
    admin_address: EmailAddress,
    intake_address: EmailAddress,
}

impl Notifier {
    pub fn new(
        email_client: EmailClient,
        admin_address: EmailAddress,
        intake_address: EmailAddress,
    ) -> Self {
        Self {
            email_client,
            admin_address,
            intake_address,
        }
    }

    /// Where contact-form notifications go
    pub fn admin_address(&self) -> &EmailAddress {
        &self.admin_address
    }

    /// Where course-registration notifications go
    pub fn intake_address(&self) -> &EmailAddress {
        &self.intake_address
    }

    /// Best-effort send. Returns whether the dispatch succeeded.
    #[tracing::instrument(name = "Send advisory email", skip(self, email))]
    pub async fn send_advisory(&self, recipient: &EmailAddress, email: &Email) -> bool {
        match self.email_client.send(recipient, email).await {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(
                    error.cause_chain = ?error,
                    "Failed to send '{}' to {}",
                    email.subject,
                    recipient,
                );
                false
            }
        }
    }
}

/// Admin-facing notification for a new contact submission. Reply-to is the
/// submitter so staff can answer directly from their mail client.
pub fn contact_notification(submission: &NewContactSubmission) -> Email {
    let subject = format!(
        "New contact form submission: {}",
        submission.subject.as_str()
    );
    let phone = submission
        .phone
        .as_ref()
        .map(|phone| phone.as_ref())
        .unwrap_or("not provided");
    let html_body = format!(
        "<h2>New contact form submission</h2>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Phone:</strong> {phone}</p>\
         <p><strong>Subject:</strong> {topic}</p>\
         <p><strong>Message:</strong></p><p>{message}</p>",
        name = submission.name,
        email = submission.email,
        phone = phone,
        topic = submission.subject.as_str(),
        message = submission.message,
    );
    let text_body = format!(
        "New contact form submission\n\nName: {}\nEmail: {}\nPhone: {}\nSubject: {}\n\n{}",
        submission.name, submission.email, phone, submission.subject.as_str(), submission.message,
    );

    Email {
        subject,
        html_body,
        text_body,
        reply_to: Some(submission.email.clone()),
    }
}

/// Confirmation sent to the registrant after their registration is recorded
pub fn registration_confirmation(registration: &NewCourseRegistration) -> Email {
    let course = registration.course_name.title();
    let subject = format!("Your registration for {}", course);
    let html_body = format!(
        "<h2>Thank you, {name}!</h2>\
         <p>We have received your registration for <strong>{course}</strong>.</p>\
         <p>Our training team will contact you on {phone} to confirm your \
         training date and payment details.</p>",
        name = registration.name,
        course = course,
        phone = registration.phone,
    );
    let text_body = format!(
        "Thank you, {}!\n\nWe have received your registration for {}.\n\
         Our training team will contact you on {} to confirm your training \
         date and payment details.",
        registration.name, course, registration.phone,
    );

    Email {
        subject,
        html_body,
        text_body,
        reply_to: None,
    }
}

/// Intake-facing notification for a new course registration
pub fn registration_admin_notification(
    registration: &NewCourseRegistration,
    registration_id: Uuid,
) -> Email {
    let subject = format!(
        "New course registration: {}",
        registration.course_name.title()
    );
    let receipt = match registration.payment_receipt {
        Some(media_id) => format!("uploaded ({})", media_id),
        None => "not uploaded".to_string(),
    };
    let html_body = format!(
        "<h2>New course registration</h2>\
         <p><strong>Registration:</strong> {id}</p>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Phone:</strong> {phone}</p>\
         <p><strong>District:</strong> {district}</p>\
         <p><strong>Course:</strong> {course}</p>\
         <p><strong>Experience:</strong> {experience}</p>\
         <p><strong>Payment method:</strong> {payment_method}</p>\
         <p><strong>Receipt:</strong> {receipt}</p>",
        id = registration_id,
        name = registration.name,
        email = registration.email,
        phone = registration.phone,
        district = registration.district,
        course = registration.course_name.title(),
        experience = registration.farming_experience.as_str(),
        payment_method = registration.payment_method,
        receipt = receipt,
    );
    let text_body = format!(
        "New course registration {}\n\nName: {}\nEmail: {}\nPhone: {}\n\
         District: {}\nCourse: {}\nExperience: {}\nPayment method: {}\nReceipt: {}",
        registration_id,
        registration.name,
        registration.email,
        registration.phone,
        registration.district,
        registration.course_name.title(),
        registration.farming_experience.as_str(),
        registration.payment_method,
        receipt,
    );

    Email {
        subject,
        html_body,
        text_body,
        reply_to: Some(registration.email.clone()),
    }
}

/// Welcome email for a first-time newsletter subscriber
pub fn newsletter_welcome(name: Option<&str>) -> Email {
    let greeting = match name {
        Some(name) => format!("Welcome, {}!", name),
        None => "Welcome!".to_string(),
    };
    let subject = "Welcome to the cooperative newsletter".to_string();
    let html_body = format!(
        "<h2>{greeting}</h2>\
         <p>Thank you for subscribing to the cashew growers cooperative \
         newsletter. You will receive news, training announcements, event \
         invitations and market updates.</p>",
        greeting = greeting,
    );
    let text_body = format!(
        "{}\n\nThank you for subscribing to the cashew growers cooperative \
         newsletter. You will receive news, training announcements, event \
         invitations and market updates.",
        greeting,
    );

    Email {
        subject,
        html_body,
        text_body,
        reply_to: None,
    }
}

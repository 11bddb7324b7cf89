//! Notification hooks. Delivery is not wired up; each event is logged so an
//! operator can see what would have been sent.

use crate::pkg::internal::{
    adaptors::{contacts::spec::ContactEntry, jobs::spec::JobEntry},
    auth::User,
};

pub fn application_received(candidate: &User, job: &JobEntry) {
    tracing::info!(
        to = %candidate.email,
        job_id = %job.id,
        job_title = %job.title,
        "[EMAIL] application confirmation"
    );
    tracing::info!(
        employer = %job.posted_by,
        candidate = %candidate.name,
        "[EMAIL] new applicant for {}",
        &job.title
    );
}

pub fn contact_received(contact: &ContactEntry) {
    tracing::info!(
        from = %contact.email,
        subject = %contact.subject,
        "[EMAIL] contact form submission"
    );
}

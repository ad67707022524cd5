use chrono::NaiveDate;
use derive_new::new;

/// A plain-text transactional email addressed to the hotel's front desk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub subject: String,
    pub text: String,
    pub reply_to: Option<String>,
}

#[derive(new, Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(new, Debug, Clone)]
pub struct ReservationRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub room_type: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub message: Option<String>,
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or("-")
}

impl From<&ContactMessage> for MailMessage {
    fn from(value: &ContactMessage) -> Self {
        let subject = match value.subject.as_deref().filter(|s| !s.is_empty()) {
            Some(subject) => format!("Contact form: {subject}"),
            None => format!("Contact form: message from {}", value.name),
        };
        let text = format!(
            "Name: {}\nEmail: {}\nPhone: {}\n\n{}",
            value.name,
            value.email,
            or_dash(&value.phone),
            value.message
        );
        Self {
            subject,
            text,
            reply_to: Some(value.email.clone()),
        }
    }
}

impl From<&ReservationRequest> for MailMessage {
    fn from(value: &ReservationRequest) -> Self {
        let text = format!(
            "Name: {}\nEmail: {}\nPhone: {}\nRoom type: {}\nCheck-in: {}\nCheck-out: {}\nGuests: {}\n\n{}",
            value.name,
            value.email,
            or_dash(&value.phone),
            value.room_type,
            value.check_in.format("%Y-%m-%d"),
            value.check_out.format("%Y-%m-%d"),
            value.guests,
            or_dash(&value.message),
        );
        Self {
            subject: format!("Reservation request from {}", value.name),
            text,
            reply_to: Some(value.email.clone()),
        }
    }
}

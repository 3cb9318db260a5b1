use crate::domain::club_member::ClubMember;
use crate::domain::rsvp::{Rsvp, RsvpDecision};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpMessages {
    pub email: RenderedEmail,
    pub sms_body: String,
}

pub struct NotificationTemplates;

impl NotificationTemplates {
    pub fn rsvp(
        rsvp: &Rsvp,
        decision: RsvpDecision,
    ) -> RsvpMessages {
        let event = &rsvp.event;

        match decision {
            RsvpDecision::Approved => {
                let acceptance_code = rsvp.acceptance_code.as_deref().unwrap_or("N/A");

                let body = format!(
                    "Dear {},\n\n\
                     Your RSVP for \"{}\" has been approved!\n\n\
                     Event Details:\n\
                     - Date: {}\n\
                     - Location: {}\n\n\
                     Your Acceptance Code: {}\n\n\
                     Please bring this code with you to the event for verification.\n\n\
                     Best regards,\n\
                     Digital Club Team",
                    rsvp.full_name,
                    event.title,
                    event.event_date.format("%B %d, %Y at %I:%M %p"),
                    event.location.as_deref().filter(|location| !location.trim().is_empty()).unwrap_or("TBA"),
                    acceptance_code,
                );

                RsvpMessages {
                    email: RenderedEmail {
                        subject: format!("RSVP Approved - {}", event.title),
                        body,
                    },
                    sms_body: format!(
                        "RSVP Approved! Event: {} on {}. Your code: {}. Bring this code to the event.",
                        event.title,
                        event.event_date.format("%B %d, %Y"),
                        acceptance_code
                    ),
                }
            },
            RsvpDecision::Rejected => {
                let body = format!(
                    "Dear {},\n\n\
                     Thank you for your interest in \"{}\".\n\n\
                     Unfortunately, we are unable to accommodate your RSVP at this time due to capacity limitations.\n\n\
                     We appreciate your understanding and hope to see you at future events.\n\n\
                     Best regards,\n\
                     Digital Club Team",
                    rsvp.full_name, event.title,
                );

                RsvpMessages {
                    email: RenderedEmail {
                        subject: format!("RSVP Update - {}", event.title),
                        body,
                    },
                    sms_body: format!(
                        "RSVP Update: Unfortunately, we cannot accommodate your RSVP for {} due to capacity limitations. We hope to see you at future events!",
                        event.title
                    ),
                }
            },
        }
    }

    pub fn user_approval(
        member: &ClubMember,
        base_url: &str,
    ) -> RenderedEmail {
        let email = member.contact_email().unwrap_or_default();

        RenderedEmail {
            subject: "Your Digital Club account is approved".to_string(),
            body: format!(
                "Hello {},\n\n\
                 Great news! Your Digital Club account has been approved. You can now log in and explore events, projects, and community resources.\n\n\
                 Login email: {}\n\
                 Dashboard: {}/login\n\n\
                 If you did not request this approval, please contact the club leadership.\n\n\
                 See you inside!\n\
                 Digital Club Team",
                member.display_name().unwrap_or(email),
                email,
                base_url,
            ),
        }
    }

    pub fn admin_promotion(
        member: &ClubMember,
        promoted_by: Option<&ClubMember>,
        base_url: &str,
    ) -> RenderedEmail {
        let promoter = promoted_by.and_then(ClubMember::display_name).unwrap_or("System");

        RenderedEmail {
            subject: "You have been promoted to Digital Club admin".to_string(),
            body: format!(
                "Hello {},\n\n\
                 Congratulations! You have been granted admin access to the Digital Club platform by {}.\n\n\
                 You can now manage members, events, content, and system settings. Please log in and review the admin dashboard to get started.\n\n\
                 Dashboard: {}/admin\n\n\
                 If you believe this was a mistake, contact a super admin immediately.\n\n\
                 Thank you for helping lead the community,\n\
                 Digital Club Team",
                member.display_name().unwrap_or_default(),
                promoter,
                base_url,
            ),
        }
    }
}

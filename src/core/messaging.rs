use crate::core::client::{ChatClient, Request};
use crate::core::error::ClientError;
use crate::core::models::OutgoingMessage;

/// What the UI should do with the composer after a send completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerAction {
    Clear,
    Keep,
}

impl ChatClient {
    /// Submit `text` to the active contact. Blank text or no open
    /// conversation means no request at all.
    pub fn send_message(&mut self, text: &str) -> Vec<Request> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        match (self.current_user(), &self.active) {
            (Some(user), Some(active)) => vec![Request::SendMessage(OutgoingMessage {
                sender_email: user.email.clone(),
                receiver_email: active.contact_email.clone(),
                message: text.to_string(),
            })],
            _ => Vec::new(),
        }
    }

    /// On success the composer is cleared and history reloaded right away.
    /// On failure the text stays so the user can retry.
    pub fn message_sent(
        &mut self,
        contact_email: &str,
        result: Result<(), ClientError>,
    ) -> (ComposerAction, Vec<Request>) {
        match result {
            Ok(()) if self.is_active_contact(contact_email) => {
                (ComposerAction::Clear, self.load_messages())
            }
            // Composer may hold a draft for the newly opened contact
            Ok(()) => (ComposerAction::Keep, Vec::new()),
            Err(e) => {
                log::error!("Failed to send message: {}", e);
                (ComposerAction::Keep, Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ComposerAction;
    use crate::core::client::testing::*;
    use crate::core::client::Request;
    use crate::core::error::ClientError;
    use crate::core::models::OutgoingMessage;

    #[test]
    fn blank_text_makes_no_request() {
        let mut client = logged_in();
        client.select_conversation(bob());
        assert!(client.send_message("").is_empty());
        assert!(client.send_message("   ").is_empty());
        assert!(client.send_message("\n\t").is_empty());
    }

    #[test]
    fn no_active_conversation_makes_no_request() {
        let mut client = logged_in();
        assert!(client.send_message("hello").is_empty());
    }

    #[test]
    fn send_trims_and_addresses_active_contact() {
        let mut client = logged_in();
        client.select_conversation(bob());
        assert_eq!(
            client.send_message("  hello  "),
            vec![Request::SendMessage(OutgoingMessage {
                sender_email: "a@x.com".into(),
                receiver_email: "b@x.com".into(),
                message: "hello".into(),
            })]
        );
    }

    #[test]
    fn success_clears_and_reloads_immediately() {
        let mut client = logged_in();
        client.select_conversation(bob());
        let (action, reqs) = client.message_sent("b@x.com", Ok(()));
        assert_eq!(action, ComposerAction::Clear);
        assert_eq!(
            reqs,
            vec![Request::LoadMessages {
                user_email: "a@x.com".into(),
                contact_email: "b@x.com".into()
            }]
        );
    }

    #[test]
    fn failure_keeps_composer_text() {
        let mut client = logged_in();
        client.select_conversation(bob());
        let (action, reqs) = client.message_sent("b@x.com", Err(ClientError::Network("503".into())));
        assert_eq!(action, ComposerAction::Keep);
        assert!(reqs.is_empty());
    }

    #[test]
    fn success_after_switching_contact_does_not_reload() {
        let mut client = logged_in();
        client.select_conversation(bob());
        client.select_conversation(carol());
        let (action, reqs) = client.message_sent("b@x.com", Ok(()));
        assert_eq!(action, ComposerAction::Keep);
        assert!(reqs.is_empty());
    }
}

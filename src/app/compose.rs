use cosmic::app::Task;

use super::{AppModel, Message};
use crate::core::ComposerAction;

impl AppModel {
    pub(super) fn handle_compose(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ComposerChanged(v) => {
                self.composer = v;
            }
            Message::SendMessage => {
                let requests = self.chat.send_message(&self.composer);
                return self.perform(requests);
            }
            Message::MessageSent { contact, result } => {
                let (action, requests) = self.chat.message_sent(&contact, result);
                if action == ComposerAction::Clear {
                    self.composer.clear();
                }
                return self.perform(requests);
            }
            _ => {}
        }
        Task::none()
    }
}

use cosmic::app::Task;

use super::{AppModel, Message};

impl AppModel {
    pub(super) fn handle_body(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectConversation(summary) => {
                if self.chat.active() != Some(&summary) {
                    self.composer.clear();
                }
                let requests = self.chat.select_conversation(summary);
                return self.perform(requests);
            }
            Message::MessagesLoaded {
                user,
                contact,
                result,
            } => {
                self.chat.messages_loaded(&user, &contact, result);
            }
            _ => {}
        }
        Task::none()
    }
}

use cosmic::app::Task;

use super::{AppModel, Message};

impl AppModel {
    pub(super) fn handle_actions(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BlockUser => self.chat.request_block(),
            Message::ClearChat => self.chat.request_clear_chat(),
            Message::Unblock(email) => {
                let requests = self.chat.unblock_user(&email);
                return self.perform(requests);
            }
            Message::ConfirmAccept => {
                let requests = self.chat.resolve_confirmation(true);
                if self.chat.active().is_none() {
                    self.composer.clear();
                }
                return self.perform(requests);
            }
            Message::ConfirmCancel => {
                self.chat.resolve_confirmation(false);
            }
            Message::ChatCleared { contact, result } => {
                self.chat.chat_cleared(&contact, result);
            }
            _ => {}
        }
        Task::none()
    }
}

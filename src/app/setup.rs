use cosmic::app::Task;

use super::{AppModel, Message};
use crate::core::error::ClientError;

impl AppModel {
    pub(super) fn handle_setup(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LoginEmailChanged(v) => self.login_email = v,
            Message::LoginFirstNameChanged(v) => self.login_first_name = v,
            Message::LoginLastNameChanged(v) => self.login_last_name = v,

            Message::LoginSubmit => {
                if self.is_logging_in {
                    return Task::none();
                }
                match self.chat.login_or_register(
                    &self.login_email,
                    &self.login_first_name,
                    &self.login_last_name,
                ) {
                    Ok(requests) => {
                        self.login_error = None;
                        self.is_logging_in = true;
                        return self.perform(requests);
                    }
                    Err(e) => self.login_error = Some(e.to_string()),
                }
            }

            Message::LoginComplete(result) => {
                self.is_logging_in = false;
                match self.chat.login_complete(result) {
                    Ok(requests) => {
                        self.login_error = None;
                        return self.perform(requests);
                    }
                    Err(e @ ClientError::Registration(_)) => {
                        self.login_error = Some(e.to_string());
                    }
                    Err(e) => {
                        self.login_error = Some(format!("Login error: {e}"));
                    }
                }
            }

            Message::Logout => {
                self.chat.logout();
                self.composer.clear();
                self.search_query.clear();
            }

            _ => {}
        }
        Task::none()
    }
}

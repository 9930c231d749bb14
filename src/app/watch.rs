use std::time::Duration;

use cosmic::app::Task;
use cosmic::iced::Subscription;
use futures::SinkExt;

use super::{AppModel, Message};

/// Timer stream for the live poll handle. Keyed by the handle id, so a new
/// handle replaces the stream and a cancelled one drops it.
pub(super) fn message_poll(handle_id: u64, period: Duration) -> Subscription<Message> {
    Subscription::run_with_id(
        ("message-poll", handle_id),
        cosmic::iced_futures::stream::channel(1, move |mut output| async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // skip immediate first tick
            loop {
                interval.tick().await;
                if output.send(Message::PollTick(handle_id)).await.is_err() {
                    break;
                }
            }
        }),
    )
}

impl AppModel {
    pub(super) fn handle_watch(&mut self, message: Message) -> Task<Message> {
        if let Message::PollTick(handle_id) = message {
            let requests = self.chat.poll_tick(handle_id);
            return self.perform(requests);
        }
        Task::none()
    }
}

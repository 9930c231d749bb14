use cosmic::iced::Length;
use cosmic::widget;
use cosmic::Element;

use crate::app::Message;
use crate::core::models::ConversationSummary;

pub fn view(active: Option<&ConversationSummary>) -> Element<'_, Message> {
    let content: Element<'_, Message> = match active {
        Some(contact) => widget::column()
            .spacing(4)
            .push(widget::text::heading(contact.display_name()))
            .push(widget::text::body(contact.contact_email.as_str()))
            .into(),
        None => widget::text::caption("").into(),
    };

    widget::container(content)
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

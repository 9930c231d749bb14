use cosmic::iced::alignment::Horizontal;
use cosmic::iced::Length;
use cosmic::widget;
use cosmic::Element;

use crate::app::Message;
use crate::core::models::{ChatMessage, ConversationSummary, Direction};

/// Render the open conversation: header with actions, history, composer.
pub fn view<'a>(
    active: Option<&'a ConversationSummary>,
    messages: &'a [ChatMessage],
    me: &'a str,
    composer: &'a str,
    input_enabled: bool,
    show_block: bool,
) -> Element<'a, Message> {
    let header: Element<'a, Message> = match active {
        Some(contact) => {
            let mut row = widget::row()
                .spacing(8)
                .align_y(cosmic::iced::Alignment::Center)
                .push(
                    widget::column()
                        .push(widget::text::heading(contact.display_name()))
                        .push(widget::text::caption(contact.contact_email.as_str()))
                        .width(Length::Fill),
                )
                .push(widget::button::text("Clear chat").on_press(Message::ClearChat));
            if show_block {
                row = row.push(widget::button::destructive("Block").on_press(Message::BlockUser));
            }
            row.into()
        }
        None => widget::text::heading("Select a chat").into(),
    };

    let mut history = widget::column().spacing(8).padding([8, 16]);
    for msg in messages {
        history = history.push(bubble(msg, me));
    }

    let mut input = widget::text_input("Type a message...", composer);
    if input_enabled {
        input = input
            .on_input(Message::ComposerChanged)
            .on_submit(|_| Message::SendMessage);
    }
    let send_btn = if input_enabled {
        widget::button::suggested("Send").on_press(Message::SendMessage)
    } else {
        widget::button::suggested("Send")
    };

    let composer_row = widget::row()
        .spacing(8)
        .align_y(cosmic::iced::Alignment::Center)
        .push(widget::container(input).width(Length::Fill))
        .push(send_btn);

    widget::column()
        .push(widget::container(header).padding([8, 16]).width(Length::Fill))
        .push(
            widget::scrollable(history)
                .anchor_bottom()
                .height(Length::Fill)
                .width(Length::Fill),
        )
        .push(widget::container(composer_row).padding([8, 16]).width(Length::Fill))
        .height(Length::Fill)
        .into()
}

fn bubble<'a>(msg: &'a ChatMessage, me: &str) -> Element<'a, Message> {
    let mut content = widget::column()
        .spacing(2)
        .push(widget::text::body(msg.message.as_str()));
    if let Some(label) = msg.attachment_label() {
        content = content.push(widget::text::caption(label));
    }
    content = content.push(widget::text::caption(msg.timestamp.time_of_day()));

    let align = match msg.direction(me) {
        Direction::Sent => Horizontal::Right,
        Direction::Received => Horizontal::Left,
    };

    widget::container(
        widget::container(content)
            .padding(8)
            .class(cosmic::style::Container::Card),
    )
    .width(Length::Fill)
    .align_x(align)
    .into()
}

use cosmic::widget;
use cosmic::Element;

use crate::app::Message;
use crate::core::client::Confirmation;

pub fn view(confirmation: &Confirmation) -> Element<'_, Message> {
    let (title, confirm_btn) = match confirmation {
        Confirmation::Block { .. } => (
            "Block user",
            widget::button::destructive("Block").on_press(Message::ConfirmAccept),
        ),
        Confirmation::ClearChat { .. } => (
            "Clear chat",
            widget::button::destructive("Clear").on_press(Message::ConfirmAccept),
        ),
    };

    widget::dialog()
        .title(title)
        .body(confirmation.prompt())
        .primary_action(confirm_btn)
        .secondary_action(widget::button::standard("Cancel").on_press(Message::ConfirmCancel))
        .into()
}

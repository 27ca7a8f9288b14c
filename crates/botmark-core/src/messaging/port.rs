use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    menu::CommandMenu,
    messaging::types::OutboundMessage,
    Result,
};

/// Cross-messenger port.
///
/// Network transports implement this in adapter crates; the core only plans
/// the calls and drives them in order.
#[async_trait]
pub trait MessengerPort: Send + Sync {
    async fn send(&self, chat_id: ChatId, message: &OutboundMessage) -> Result<MessageRef>;
    async fn edit(&self, target: MessageRef, message: &OutboundMessage) -> Result<()>;
    async fn set_command_menu(&self, menu: &CommandMenu) -> Result<()>;
}

//! Console adapter for the messenger port: prints every call instead of
//! talking to a platform. Backs the dry-run subcommands.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;

use botmark_core::{
    domain::{ChatId, MessageId, MessageRef},
    menu::CommandMenu,
    messaging::{
        port::MessengerPort,
        types::{OutboundMessage, OutboundPayload},
    },
    Result,
};

pub struct ConsoleMessenger {
    next_id: AtomicI32,
}

impl ConsoleMessenger {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI32::new(1),
        }
    }

    fn alloc(&self, chat_id: ChatId) -> MessageRef {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        MessageRef {
            chat_id,
            message_id: MessageId(id),
        }
    }
}

impl Default for ConsoleMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessengerPort for ConsoleMessenger {
    async fn send(&self, chat_id: ChatId, message: &OutboundMessage) -> Result<MessageRef> {
        let msg = self.alloc(chat_id);
        println!(
            "-> chat {} message {}: {}",
            chat_id.0,
            msg.message_id.0,
            describe(message)
        );
        print_keyboard(message);
        Ok(msg)
    }

    async fn edit(&self, target: MessageRef, message: &OutboundMessage) -> Result<()> {
        println!(
            "~> chat {} message {}: {}",
            target.chat_id.0,
            target.message_id.0,
            describe(message)
        );
        print_keyboard(message);
        Ok(())
    }

    async fn set_command_menu(&self, menu: &CommandMenu) -> Result<()> {
        println!("=> command menu ({} entries)", menu.entries.len());
        for entry in &menu.entries {
            println!("   {} - {}", entry.command, entry.description);
        }
        Ok(())
    }
}

fn describe(message: &OutboundMessage) -> String {
    match &message.payload {
        OutboundPayload::Text { body } => format!("text {body:?}"),
        OutboundPayload::Media { kind, url, caption } => match caption {
            Some(caption) => format!("{kind:?} {url} (caption {caption:?})"),
            None => format!("{kind:?} {url}"),
        },
    }
}

fn print_keyboard(message: &OutboundMessage) {
    let Some(keyboard) = &message.keyboard else {
        return;
    };
    for row in &keyboard.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|b| format!("[{} -> {}]", b.label, b.action))
            .collect();
        println!("   {}", cells.join(" "));
    }
}

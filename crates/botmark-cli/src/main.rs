//! botmark CLI: render replies, inspect dispatch plans, dry-run sends and
//! edits against a console messenger.

mod console;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use botmark_core::{
    domain::{ChatId, MessageId, MessageRef},
    markup::{
        media::Segment,
        pipeline::{RenderedReply, ReplyPipeline},
    },
    menu::CommandMenu,
    messaging::{
        dispatch::{plan_edit, plan_send, ReplyDispatcher},
        port::MessengerPort,
        types::{IncomingUpdate, OutboundMessage, OutboundPayload},
    },
    syntax::MarkupSyntax,
};

use console::ConsoleMessenger;

#[derive(Parser)]
#[command(name = "botmark")]
#[command(about = "Reply markup tokenizer: render, plan, dry-run dispatch", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a reply and print its segments, keyboard, and control tags.
    Render {
        /// Reply text; stdin is read when neither this nor --file is given.
        text: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Emit the rendered reply as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the outbound messages a reply would dispatch.
    Plan {
        text: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Plan a single-message edit instead of a send.
        #[arg(long)]
        edit: bool,
        #[arg(long)]
        json: bool,
    },
    /// Dry-run a send through the console messenger.
    Send {
        text: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long, default_value = "1")]
        chat_id: i64,
    },
    /// Dry-run an edit of an existing message through the console messenger.
    Edit {
        text: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(short, long, default_value = "1")]
        chat_id: i64,
        /// Message id to edit.
        #[arg(short, long)]
        message_id: i32,
    },
    /// Parse one incoming platform update (JSON) into the typed model.
    Update {
        json_text: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Parse a command menu file (`command - description` per line).
    Menu {
        path: PathBuf,
        /// Push the parsed menu through the console messenger.
        #[arg(long)]
        set: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    botmark_core::logging::init("botmark_cli")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { text, file, json } => {
            let raw = read_input(text, file)?;
            let reply = ReplyPipeline::new(MarkupSyntax::default()).render(&raw)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reply)?);
                return Ok(());
            }
            print_rendered(&reply);
            Ok(())
        }
        Commands::Plan {
            text,
            file,
            edit,
            json,
        } => {
            let raw = read_input(text, file)?;
            let reply = ReplyPipeline::new(MarkupSyntax::default()).render(&raw)?;
            if edit {
                let plan = plan_edit(&reply);
                if json {
                    println!("{}", serde_json::to_string_pretty(&plan)?);
                    return Ok(());
                }
                match plan {
                    Some(message) => print_message(0, &message),
                    None => println!("nothing to edit"),
                }
                return Ok(());
            }
            let plan = plan_send(&reply);
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
                return Ok(());
            }
            if plan.is_empty() {
                println!("nothing to send");
                return Ok(());
            }
            for (i, message) in plan.iter().enumerate() {
                print_message(i, message);
            }
            Ok(())
        }
        Commands::Send {
            text,
            file,
            chat_id,
        } => {
            let raw = read_input(text, file)?;
            let dispatcher = ReplyDispatcher::new(MarkupSyntax::default());
            let port = ConsoleMessenger::new();

            let receipt = dispatcher.send_reply(&port, ChatId(chat_id), &raw).await?;
            if receipt.messages.is_empty() {
                println!("nothing sent");
                return Ok(());
            }
            println!("sent {} message(s)", receipt.messages.len());
            for tag in &receipt.tags {
                println!("tag: {:?} {}", tag.kind, tag.name);
            }
            Ok(())
        }
        Commands::Edit {
            text,
            file,
            chat_id,
            message_id,
        } => {
            let raw = read_input(text, file)?;
            let dispatcher = ReplyDispatcher::new(MarkupSyntax::default());
            let port = ConsoleMessenger::new();
            let target = MessageRef {
                chat_id: ChatId(chat_id),
                message_id: MessageId(message_id),
            };

            if dispatcher.edit_reply(&port, target, &raw).await? {
                println!("edited message {message_id}");
            } else {
                println!("nothing to edit");
            }
            Ok(())
        }
        Commands::Update { json_text, file } => {
            let raw = read_input(json_text, file)?;
            match IncomingUpdate::parse(&raw)? {
                IncomingUpdate::Text { chat_id, text } => {
                    println!("text from chat {}: {text}", chat_id.0);
                }
                IncomingUpdate::Callback { chat_id, data } => {
                    println!("callback from chat {}: {data}", chat_id.0);
                }
            }
            Ok(())
        }
        Commands::Menu { path, set } => {
            let menu = CommandMenu::load(&path)
                .with_context(|| format!("load menu from {}", path.display()))?;
            if menu.is_empty() {
                anyhow::bail!("no commands in {}", path.display());
            }
            for entry in &menu.entries {
                println!("{} - {}", entry.command, entry.description);
            }
            if set {
                let port = ConsoleMessenger::new();
                port.set_command_menu(&menu).await?;
            }
            Ok(())
        }
    }
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("read reply from {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("read reply from stdin")?;
    Ok(buf)
}

fn print_rendered(reply: &RenderedReply) {
    for tag in &reply.tags {
        println!("tag: {:?} {}", tag.kind, tag.name);
    }
    for (i, segment) in reply.segments.iter().enumerate() {
        match segment {
            Segment::Text(text) => println!("[{i}] text: {text}"),
            Segment::Media(url) => println!("[{i}] media: {url}"),
        }
    }
    if !reply.keyboard.is_empty() {
        println!("keyboard:");
        for row in &reply.keyboard.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|b| format!("[{} -> {}]", b.label, b.action))
                .collect();
            println!("  {}", cells.join(" "));
        }
    }
}

fn print_message(index: usize, message: &OutboundMessage) {
    match &message.payload {
        OutboundPayload::Text { body } => println!("[{index}] text: {body}"),
        OutboundPayload::Media { kind, url, caption } => match caption {
            Some(caption) => println!("[{index}] {kind:?}: {url} (caption: {caption})"),
            None => println!("[{index}] {kind:?}: {url}"),
        },
    }
    if let Some(keyboard) = &message.keyboard {
        for row in &keyboard.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|b| format!("[{} -> {}]", b.label, b.action))
                .collect();
            println!("    {}", cells.join(" "));
        }
    }
}

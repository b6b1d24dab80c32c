//! The `lessonquiz chat` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use lessonquiz_client::{load_config_from, HttpChatClient};
use lessonquiz_core::chat::ChatWidget;

pub async fn execute(
    message: String,
    course: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let client = HttpChatClient::from_config(&config)?;
    let widget = ChatWidget::new(Arc::new(client), course);

    match widget.send(&message).await {
        Some(outcome) => {
            println!("You: {}", message.trim());
            println!("Assistant: {}", outcome.text());
        }
        None => println!("Nothing to send."),
    }
    Ok(())
}

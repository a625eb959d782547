//! Terminal front end for the PDF chat server.
//!
//! ```text
//! pdfchat ask "Summarize this"
//! pdfchat ask --conversation <id> "What is Alpha?"
//! pdfchat upload --conversation <id> paper.pdf
//! pdfchat show <id>
//! pdfchat list
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use pdfchat::client::api::DEFAULT_SERVER_URL;
use pdfchat::client::upload::extract_text;
use pdfchat::client::{progress, ApiClient, ChatView, ClientError, PdfIndicator, UploadFlow};
use pdfchat::forms::NewMessage;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pdfchat", version, about = "Chat with your PDF documents")]
struct Cli {
    /// Server base URL
    #[arg(long, env = "PDFCHAT_SERVER", default_value = DEFAULT_SERVER_URL, global = true)]
    server: String,
    /// LLM provider API key, sent with every question
    #[arg(long, env = "PDFCHAT_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    /// Session token
    #[arg(long, env = "PDFCHAT_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ask a question, starting a new conversation unless one is given
    Ask {
        #[arg(long, short)]
        conversation: Option<String>,
        message: String,
    },
    /// Attach a PDF to a conversation
    Upload {
        #[arg(long, short)]
        conversation: String,
        file: PathBuf,
    },
    /// Print a conversation
    Show { id: String },
    /// List your conversations
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = ApiClient::new(&cli.server, cli.token.as_deref())?;

    match cli.command {
        Commands::Ask {
            conversation: Some(id),
            message,
        } => reply(&api, &id, &message, cli.api_key.as_deref()).await,
        Commands::Ask {
            conversation: None,
            message,
        } => start(&api, &message, cli.api_key.as_deref()).await,
        Commands::Upload { conversation, file } => upload(&api, &conversation, &file).await,
        Commands::Show { id } => show(&api, &id).await,
        Commands::List => list(&api).await,
    }
}

fn new_message(message: &str, api_key: Option<&str>) -> NewMessage {
    NewMessage {
        message: message.to_string(),
        api_key: api_key.unwrap_or_default().to_string(),
    }
}

async fn start(api: &ApiClient, message: &str, api_key: Option<&str>) -> anyhow::Result<()> {
    let mut view = ChatView::default();
    if view.submit(message, api_key)?.is_none() {
        return Ok(());
    }

    let pb = progress::spinner("Thinking...");
    let id = match api.new_chat(&new_message(message, api_key)).await {
        Ok(id) => id,
        Err(err) => {
            progress::finish_error(&pb, &err.to_string());
            return Err(err.into());
        }
    };
    progress::finish_success(&pb, &format!("Conversation {}", id));

    let page = api.conversation(&id).await?;
    view.reconcile(page.messages);
    print!("{}", view.render());

    Ok(())
}

async fn reply(
    api: &ApiClient,
    id: &str,
    message: &str,
    api_key: Option<&str>,
) -> anyhow::Result<()> {
    let page = api.conversation(id).await?;
    let mut view = ChatView::new(page.messages);
    let pending = match view.submit(message, api_key)? {
        Some(pending) => pending,
        None => return Ok(()),
    };
    print!("{}", view.render());

    let pb = progress::spinner("Thinking...");
    if let Err(err) = api.chat(id, &new_message(message, api_key)).await {
        view.fail(&pending, &err);
        let notice = view.take_notice().unwrap_or_else(|| err.to_string());
        progress::finish_error(&pb, &notice);
        return Err(err.into());
    }
    pb.finish_and_clear();

    let page = api.conversation(id).await?;
    view.reconcile(page.messages);
    print!("{}", view.render());

    Ok(())
}

async fn upload(api: &ApiClient, conversation: &str, file: &PathBuf) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| ClientError::Pdf("not a file".to_string()))?;

    let pb = progress::upload_bar();
    let uploaded = UploadFlow::new()
        .run(
            api,
            conversation,
            &file_name,
            || extract_text(&bytes),
            |status| progress::show_upload_status(&pb, status),
        )
        .await?;

    println!("{}", uploaded.message());
    println!("{}", uploaded.indicator());

    Ok(())
}

async fn show(api: &ApiClient, id: &str) -> anyhow::Result<()> {
    let page = api.conversation(id).await?;
    let indicator = PdfIndicator(api.pdf_name(id).await);

    println!("{}\n{}\n", page.name, indicator);
    print!("{}", ChatView::new(page.messages).render());

    Ok(())
}

async fn list(api: &ApiClient) -> anyhow::Result<()> {
    for conversation in api.list().await? {
        println!(
            "{}  {}  {}",
            conversation.id,
            conversation.updated_at.format("%Y-%m-%d %H:%M"),
            conversation.name
        );
    }

    Ok(())
}

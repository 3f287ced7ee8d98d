//! Executes UI commands against the blog API on the tokio runtime.
//!
//! Every command runs in its own task, so a slow comment fetch never blocks
//! a newer one. Responses carry the ticket they were issued with; the
//! dashboard reducer decides whether they are still relevant.

use std::sync::mpsc as std_mpsc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::ApiClient;
use crate::ui::app::UiCommand;
use crate::ui::events::{ApiEvent, AppEvent};

pub fn spawn_worker(
    runtime: &Handle,
    client: ApiClient,
    mut commands: mpsc::Receiver<UiCommand>,
    events: std_mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        while let Some(command) = commands.recv().await {
            let client = client.clone();
            let events = events.clone();
            tokio::spawn(async move {
                let event = execute(&client, command).await;
                if events.send(AppEvent::Api(event)).is_err() {
                    tracing::trace!("API result dropped (UI gone)");
                }
            });
        }
        tracing::debug!("Command channel closed, worker exiting");
    })
}

/// Run one command to completion and describe the outcome.
pub async fn execute(client: &ApiClient, command: UiCommand) -> ApiEvent {
    match command {
        UiCommand::LoadCatalog => match client.fetch_catalog().await {
            Ok(catalog) => ApiEvent::CatalogLoaded(catalog),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load posts and users");
                ApiEvent::CatalogFailed {
                    message: "Error fetching data. Please try again later.".to_string(),
                }
            }
        },
        UiCommand::FetchComments { ticket } => match client.fetch_comments(ticket.post_id).await {
            Ok(comments) => {
                tracing::debug!(
                    post_id = ticket.post_id,
                    count = comments.len(),
                    "Comments loaded"
                );
                ApiEvent::CommentsLoaded { ticket, comments }
            }
            Err(err) => {
                tracing::warn!(post_id = ticket.post_id, error = %err, "Failed to load comments");
                ApiEvent::CommentsFailed {
                    ticket,
                    message: err.user_message().to_string(),
                }
            }
        },
        UiCommand::CreateComment { ticket, draft } => {
            let request = draft.to_request(ticket.post_id);
            match client.create_comment(&request).await {
                Ok(created) => ApiEvent::CommentCreated {
                    ticket,
                    draft,
                    remote_id: created.id,
                },
                Err(err) => {
                    tracing::error!(post_id = ticket.post_id, error = %err, "Error posting comment");
                    ApiEvent::CommentCreateFailed {
                        ticket,
                        draft,
                        message: err.user_message().to_string(),
                    }
                }
            }
        }
    }
}

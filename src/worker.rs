use crate::api::StudyBackend;
use crate::models::{BackendResponse, Operation, PendingRequest};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// Perform `request` against `backend` and wrap the outcome for
/// `StudyToolsController::apply`.
pub async fn run_request<B>(backend: &B, request: PendingRequest) -> BackendResponse
where
    B: StudyBackend + ?Sized,
{
    let PendingRequest {
        operation,
        request_id,
        text,
    } = request;
    match operation {
        Operation::Notes => BackendResponse::Notes {
            request_id,
            result: backend.summarize(&text).await,
        },
        Operation::Quiz => BackendResponse::Quiz {
            request_id,
            result: backend.generate_quiz(&text).await,
        },
    }
}

/// Run `request` in the background and deliver the response to the UI loop.
/// The UI loop is the only place state is mutated.
pub fn spawn_request(
    backend: Arc<dyn StudyBackend>,
    request: PendingRequest,
    responses: UnboundedSender<BackendResponse>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let operation = request.operation;
        let request_id = request.request_id;
        let response = run_request(backend.as_ref(), request).await;
        if responses.send(response).is_err() {
            // UI loop already gone
            debug!(
                operation = operation.label(),
                request_id, "response receiver closed"
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::MockBackend;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_spawned_requests_report_back() {
        let backend: Arc<dyn StudyBackend> = Arc::new(
            MockBackend::new()
                .push_notes(Ok("notes".to_string()))
                .push_quiz(Ok(Vec::new())),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_request(
            Arc::clone(&backend),
            PendingRequest {
                operation: Operation::Notes,
                request_id: 7,
                text: "text".to_string(),
            },
            tx.clone(),
        )
        .await
        .unwrap();
        spawn_request(
            backend,
            PendingRequest {
                operation: Operation::Quiz,
                request_id: 3,
                text: "text".to_string(),
            },
            tx,
        )
        .await
        .unwrap();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.operation(), Operation::Notes);
        assert_eq!(first.request_id(), 7);
        let second = rx.recv().await.unwrap();
        assert!(matches!(
            second,
            BackendResponse::Quiz { request_id: 3, result: Ok(ref quiz) } if quiz.is_empty()
        ));
    }

    #[tokio::test]
    async fn test_closed_receiver_does_not_panic() {
        let backend: Arc<dyn StudyBackend> =
            Arc::new(MockBackend::new().push_notes(Ok("notes".to_string())));
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let handle = spawn_request(
            backend,
            PendingRequest {
                operation: Operation::Notes,
                request_id: 1,
                text: "text".to_string(),
            },
            tx,
        );
        assert!(handle.await.is_ok());
    }
}

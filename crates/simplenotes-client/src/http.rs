//! reqwest-backed note store talking to the `/api/notes` collection.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use std::time::{Duration, Instant};
use tracing::{debug, field, info, instrument, warn, Span};

use simplenotes_core::{defaults, logging};
use simplenotes_core::{Error, NewNote, Note, NoteId, NoteStore, Result};

use crate::config::ClientConfig;
use crate::retry::{Idempotency, RetryPolicy};

/// Note store backed by the remote REST collection.
pub struct HttpNoteStore {
    client: Client,
    config: ClientConfig,
    notes_url: Url,
    retry: RetryPolicy,
}

impl HttpNoteStore {
    /// Create a store with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        let notes_url = notes_url(&config.base_url)?;
        let retry = RetryPolicy::new(
            config.max_retries,
            Duration::from_millis(config.retry_delay_ms),
        );

        info!(
            url = %notes_url,
            timeout_seconds = config.timeout_seconds,
            max_retries = config.max_retries,
            "Initializing HTTP note store"
        );

        Ok(Self {
            client,
            config,
            notes_url,
            retry,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL of the note collection resource.
    pub fn notes_url(&self) -> &Url {
        &self.notes_url
    }

    fn note_url(&self, id: &NoteId) -> Url {
        let mut url = self.notes_url.clone();
        // notes_url() already proved the URL can carry path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }

    /// Send a request, retrying transient failures per the retry policy.
    /// Non-success statuses are turned into [`Error::Status`].
    async fn send(
        &self,
        op: &'static str,
        idempotency: Idempotency,
        build: impl Fn() -> RequestBuilder,
    ) -> Result<Response> {
        let mut attempt = 1;
        loop {
            let start = Instant::now();
            let outcome = match build().send().await {
                Ok(response) if response.status().is_success() => Ok(response),
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    let message = if body.trim().is_empty() {
                        status.canonical_reason().unwrap_or("unknown").to_string()
                    } else {
                        body
                    };
                    Err(Error::Status {
                        status: status.as_u16(),
                        message,
                    })
                }
                Err(e) => Err(Error::from(e)),
            };
            let elapsed = start.elapsed().as_millis() as u64;

            match outcome {
                Ok(response) => {
                    debug!(
                        op,
                        attempt,
                        status_code = response.status().as_u16(),
                        duration_ms = elapsed,
                        "Request complete"
                    );
                    if elapsed > defaults::SLOW_REQUEST_MS {
                        warn!(op, duration_ms = elapsed, slow = true, "Slow request");
                    }
                    return Ok(response);
                }
                Err(e) if self.retry.should_retry(&e, attempt, idempotency) => {
                    warn!(
                        op,
                        attempt,
                        max_retries = self.retry.max_retries(),
                        error = %e,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(self.retry.delay()).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(op, attempt, duration_ms = elapsed, error = %e, "Request failed");
                    return Err(e);
                }
            }
        }
    }
}

/// `{base_url}/api/notes`, keeping any path prefix on the base URL.
fn notes_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| Error::Config(format!("Invalid base_url {}: {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("base_url cannot carry a path: {}", base_url)))?
        .pop_if_empty()
        .extend(defaults::NOTES_PATH.split('/').filter(|s| !s.is_empty()));
    Ok(url)
}

#[async_trait]
impl NoteStore for HttpNoteStore {
    #[instrument(skip(self), fields(subsystem = "client", component = "http_store", op = "list_notes", result_count = field::Empty))]
    async fn list_notes(&self) -> Result<Vec<Note>> {
        let response = self
            .send("list_notes", Idempotency::Idempotent, || {
                self.client.get(self.notes_url.clone())
            })
            .await?;

        let body = response.bytes().await?;
        let notes: Vec<Note> = serde_json::from_slice(&body)?;

        Span::current().record(logging::RESULT_COUNT, notes.len());
        debug!(result_count = notes.len(), "Fetched notes");
        Ok(notes)
    }

    #[instrument(skip(self, note), fields(subsystem = "client", component = "http_store", op = "create_note", tag = %note.tag(), note_id = field::Empty))]
    async fn create_note(&self, note: &NewNote) -> Result<Option<Note>> {
        let response = self
            .send("create_note", Idempotency::NonIdempotent, || {
                self.client.post(self.notes_url.clone()).json(note)
            })
            .await?;

        // Success is implied by the status; the echoed record is a bonus.
        let body = response.text().await.unwrap_or_default();
        if body.trim().is_empty() {
            info!("Note created");
            return Ok(None);
        }
        match serde_json::from_str::<Note>(&body) {
            Ok(saved) => {
                Span::current().record(logging::NOTE_ID, field::display(&saved.id));
                info!(note_id = %saved.id, "Note created");
                Ok(Some(saved))
            }
            Err(e) => {
                debug!(error = %e, "Create response is not a note, ignoring body");
                info!("Note created");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, id), fields(subsystem = "client", component = "http_store", op = "delete_note", note_id = %id))]
    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let url = self.note_url(id);
        self.send("delete_note", Idempotency::Idempotent, || {
            self.client.delete(url.clone())
        })
        .await?;

        info!("Note deleted");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let response = self
            .client
            .get(self.notes_url.clone())
            .timeout(Duration::from_secs(defaults::HEALTH_TIMEOUT_SECS))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                info!("Note store health check passed");
                true
            }
            Ok(resp) => {
                warn!(status_code = resp.status().as_u16(), "Note store health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Note store unreachable");
                false
            }
        }
    }
}

pub mod models;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, error, info, warn};
use reqwest::Url;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ConfigResult, InteractionError};
use crate::surface::DisplaySurface;
use crate::transport::Transport;
use models::{extract_reply, request_body, Attempt, DisplayState, SkipReason, TranscriptEntry};

/// Sends what the user typed to the configured endpoint and renders the reply.
///
/// One request at a time: while an attempt is running the surface's submit
/// control is disabled and further `submit` calls are skipped.
pub struct InteractionClient {
    config: ClientConfig,
    endpoint: Url,
    transport: Arc<dyn Transport>,
    surface: Arc<dyn DisplaySurface>,
    in_flight: AtomicBool,
}

impl InteractionClient {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        surface: Arc<dyn DisplaySurface>,
    ) -> ConfigResult<Self> {
        config.validate()?;
        let endpoint = config.endpoint_url()?;
        info!(
            "Client ready: POST {} ({} -> {})",
            endpoint, config.request_field, config.response_field
        );

        Ok(Self {
            config,
            endpoint,
            transport,
            surface,
            in_flight: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one ask/respond round trip for `user_text`.
    pub async fn submit(&self, user_text: &str) -> Attempt {
        let text = user_text.trim();
        if text.is_empty() {
            debug!("Ignoring empty submission");
            return Attempt::Skipped(SkipReason::Empty);
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, self.surface.as_ref()) else {
            warn!("Submission ignored, a request is already in flight");
            return Attempt::Skipped(SkipReason::InFlight);
        };

        if self.config.transcript {
            self.surface.append_transcript(&TranscriptEntry::user(text));
        }
        self.surface.show_loading(&self.config.loading_text);

        let body = request_body(&self.config.request_field, text);
        info!(
            "Submitting {} characters to {}",
            text.chars().count(),
            self.endpoint
        );

        let state = match self.exchange(&body).await {
            Ok(reply) => {
                info!("Reply length: {} characters", reply.chars().count());
                if self.config.transcript {
                    self.surface.append_transcript(&TranscriptEntry::assistant(reply.as_str()));
                }
                self.surface.show_result(&reply);
                DisplayState::Shown(reply)
            }
            Err(e) => {
                error!("Ask failed: {}", e);
                let message = e.display_text(&self.config.fallback_text);
                self.surface.show_error(&message);
                DisplayState::Error(message)
            }
        };

        Attempt::Completed(state)
    }

    async fn exchange(&self, body: &Value) -> Result<String, InteractionError> {
        let reply = self.transport.post_json(&self.endpoint, body).await?;
        extract_reply(&reply, &self.config.response_field)
    }
}

/// Holds the submit control disabled; dropping it re-enables the control even if
/// the attempt future is dropped mid-request.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    surface: &'a dyn DisplaySurface,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool, surface: &'a dyn DisplaySurface) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        surface.set_input_enabled(false);
        Some(Self { flag, surface })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.surface.set_input_enabled(true);
    }
}

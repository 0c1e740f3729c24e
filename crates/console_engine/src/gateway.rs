use std::sync::Arc;

use console_logging::{console_debug, console_info, console_warn};
use tokio::sync::Mutex;

use crate::credential::{Credential, CredentialStore};
use crate::transport::Transport;
use crate::{ApiRequest, ApiResponse, TransportError};

/// Interactive credential acquisition. `None` means the user declined.
#[async_trait::async_trait]
pub trait CredentialPrompt: Send + Sync {
    async fn acquire(&self) -> Option<Credential>;
}

/// Prompt for non-interactive use: always declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

#[async_trait::async_trait]
impl CredentialPrompt for NoPrompt {
    async fn acquire(&self) -> Option<Credential> {
        None
    }
}

/// The single path every outbound call takes.
///
/// Attaches the stored credential and, when a request without one is
/// rejected with 401/403, prompts once, stores the answer and replays the
/// request once. A rejection of a request that already carried a
/// credential is returned as-is.
pub struct Gateway {
    transport: Arc<dyn Transport>,
    credentials: Arc<CredentialStore>,
    prompt: Arc<dyn CredentialPrompt>,
    prompt_lock: Mutex<()>,
}

impl Gateway {
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<CredentialStore>,
        prompt: Arc<dyn CredentialPrompt>,
    ) -> Self {
        Self {
            transport,
            credentials,
            prompt,
            prompt_lock: Mutex::new(()),
        }
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let attached = self.credentials.get();
        let response = self.transport.execute(request, attached.as_ref()).await?;
        if !response.is_auth_failure() {
            return Ok(response);
        }
        if attached.is_some() {
            console_warn!(
                "{:?} {} rejected with HTTP {} despite stored credential",
                request.method,
                request.path,
                response.status
            );
            return Ok(response);
        }

        let Some(credential) = self.acquire_credential().await else {
            console_info!(
                "No credential provided for {}; returning HTTP {}",
                request.path,
                response.status
            );
            return Ok(response);
        };

        console_debug!("Retrying {:?} {} with credential", request.method, request.path);
        self.transport.execute(request, Some(&credential)).await
    }

    async fn acquire_credential(&self) -> Option<Credential> {
        let _guard = self.prompt_lock.lock().await;
        // Another call may have stored one while this one waited for the lock.
        if let Some(existing) = self.credentials.get() {
            return Some(existing);
        }

        let credential = self.prompt.acquire().await?;
        if let Err(err) = self.credentials.set(credential.clone()) {
            console_warn!("Failed to persist credential: {}", err);
        }
        Some(credential)
    }
}

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use console_engine::{
    Credential, CredentialPrompt, CredentialStore, Gateway, KeyValueStore, ReqwestTransport,
    TransportSettings,
};
use tempfile::TempDir;

/// Hands out a fixed answer and counts how often it was asked.
pub struct ScriptedPrompt {
    answer: Option<String>,
    calls: AtomicUsize,
}

impl ScriptedPrompt {
    pub fn answering(raw: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Some(raw.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn declining() -> Arc<Self> {
        Arc::new(Self {
            answer: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CredentialPrompt for ScriptedPrompt {
    async fn acquire(&self) -> Option<Credential> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone().map(Credential::new)
    }
}

pub fn transport_for(base_url: &str) -> Arc<ReqwestTransport> {
    let settings = TransportSettings {
        base_url: base_url.to_string(),
        ..TransportSettings::default()
    };
    Arc::new(ReqwestTransport::new(settings).unwrap())
}

pub fn credential_store(temp: &TempDir) -> Arc<CredentialStore> {
    Arc::new(CredentialStore::open(KeyValueStore::new(temp.path())))
}

pub fn gateway(
    base_url: &str,
    credentials: Arc<CredentialStore>,
    prompt: Arc<dyn CredentialPrompt>,
) -> Arc<Gateway> {
    Arc::new(Gateway::new(transport_for(base_url), credentials, prompt))
}

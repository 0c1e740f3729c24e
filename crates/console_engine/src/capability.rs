use std::sync::Arc;

use console_logging::{console_info, console_warn};

use crate::gateway::Gateway;
use crate::{ApiRequest, ApiResponse, Role, TransportError};

/// Manager-only resource read to infer the caller's role.
pub const MANAGER_PROBE_PATH: &str = "/api/manager/positions";

/// Answers "which role is the caller?". Consumers only see this trait, so
/// the probe can be replaced by a real identity call.
#[async_trait::async_trait]
pub trait CapabilityResolver: Send + Sync {
    async fn resolve_role(&self) -> Role;
}

pub struct ProbingResolver {
    gateway: Arc<Gateway>,
}

impl ProbingResolver {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl CapabilityResolver for ProbingResolver {
    async fn resolve_role(&self) -> Role {
        let outcome = self.gateway.send(&ApiRequest::get(MANAGER_PROBE_PATH)).await;
        let role = role_from_probe(&outcome);
        match &outcome {
            Ok(response) => console_info!("Role probe: HTTP {} -> {:?}", response.status, role),
            Err(err) => console_warn!("Role probe failed ({}); treating caller as {:?}", err, role),
        }
        role
    }
}

/// Success means manager, 401/403 means HR, anything else is `Unknown`.
///
/// A 5xx or a network failure cannot be told apart from "not a manager"
/// here; `Unknown` carries the same affordances as HR.
pub fn role_from_probe(outcome: &Result<ApiResponse, TransportError>) -> Role {
    match outcome {
        Ok(response) if response.is_success() => {
            // A manager listing is a JSON array; anything else is not a usable answer.
            match serde_json::from_str::<serde_json::Value>(&response.body) {
                Ok(serde_json::Value::Array(_)) => Role::Manager,
                _ => Role::Unknown,
            }
        }
        Ok(response) if response.is_auth_failure() => Role::Hr,
        Ok(_) | Err(_) => Role::Unknown,
    }
}

use chrono::{DateTime, Utc};

/// Caller role as inferred by the client. Advisory only: the server enforces access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Manager,
    Hr,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affordance {
    Upload,
    Candidates,
    Reports,
    PositionSettings,
}

const MANAGER_AFFORDANCES: &[Affordance] = &[
    Affordance::Upload,
    Affordance::Candidates,
    Affordance::Reports,
    Affordance::PositionSettings,
];

const BASELINE_AFFORDANCES: &[Affordance] = &[Affordance::Upload, Affordance::Candidates];

impl Role {
    /// Unknown falls back to the least-privileged set, same as HR.
    pub fn affordances(self) -> &'static [Affordance] {
        match self {
            Role::Manager => MANAGER_AFFORDANCES,
            Role::Hr | Role::Unknown => BASELINE_AFFORDANCES,
        }
    }

    pub fn allows(self, affordance: Affordance) -> bool {
        self.affordances().contains(&affordance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub role: Role,
    pub resolved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapabilityState {
    #[default]
    Pending,
    Resolved(Capability),
}

impl CapabilityState {
    pub fn capability(&self) -> Option<Capability> {
        match self {
            CapabilityState::Pending => None,
            CapabilityState::Resolved(capability) => Some(*capability),
        }
    }

    /// Nothing role-gated is exposed while the probe is still out.
    pub fn allows(&self, affordance: Affordance) -> bool {
        self.capability()
            .is_some_and(|capability| capability.role.allows(affordance))
    }
}

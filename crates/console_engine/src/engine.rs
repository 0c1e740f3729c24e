use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use console_logging::{console_debug, console_error};
use tokio_util::sync::CancellationToken;

use crate::api::{ApiError, ConsoleApi};
use crate::capability::{CapabilityResolver, ProbingResolver};
use crate::credential::CredentialStore;
use crate::gateway::{CredentialPrompt, Gateway};
use crate::transport::{ReqwestTransport, Transport, TransportSettings};
use crate::{
    EngineEvent, Operation, OperationOutput, TransportError, ViewKind, ViewPayload,
};

enum EngineCommand {
    Load {
        view: ViewKind,
        request_id: u64,
        query: Vec<(String, String)>,
    },
    Cancel {
        view: ViewKind,
        request_id: u64,
    },
    ResolveRole,
    CancelRoleProbe,
    Run {
        op_id: u64,
        op: Operation,
    },
}

/// Owns the background runtime. Dropping the handle stops the worker and
/// abandons whatever is still in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(
        settings: TransportSettings,
        credentials: Arc<CredentialStore>,
        prompt: Arc<dyn CredentialPrompt>,
    ) -> Result<Self, TransportError> {
        let transport = Arc::new(ReqwestTransport::new(settings)?);
        Ok(Self::with_transport(transport, credentials, prompt))
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        credentials: Arc<CredentialStore>,
        prompt: Arc<dyn CredentialPrompt>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let gateway = Arc::new(Gateway::new(transport, credentials, prompt));
        let api = ConsoleApi::new(gateway.clone());
        let resolver: Arc<dyn CapabilityResolver> = Arc::new(ProbingResolver::new(gateway));

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    console_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut worker = Worker {
                api,
                resolver,
                event_tx,
                loads: HashMap::new(),
                role_probe: None,
            };
            while let Ok(command) = cmd_rx.recv() {
                worker.handle(&runtime, command);
            }
            console_debug!("Engine command channel closed");
        });

        Self { cmd_tx, event_rx }
    }

    /// Starts loading `view`. A load already running for the same view is
    /// cancelled and will not report.
    pub fn load(&self, view: ViewKind, request_id: u64, query: Vec<(String, String)>) {
        self.send(EngineCommand::Load {
            view,
            request_id,
            query,
        });
    }

    /// Cancels the load only if it is still the one identified by `request_id`.
    pub fn cancel(&self, view: ViewKind, request_id: u64) {
        self.send(EngineCommand::Cancel { view, request_id });
    }

    pub fn resolve_role(&self) {
        self.send(EngineCommand::ResolveRole);
    }

    pub fn cancel_role_probe(&self) {
        self.send(EngineCommand::CancelRoleProbe);
    }

    pub fn run(&self, op_id: u64, op: Operation) {
        self.send(EngineCommand::Run { op_id, op });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            console_error!("Engine worker is gone; command dropped");
        }
    }
}

struct Worker {
    api: ConsoleApi,
    resolver: Arc<dyn CapabilityResolver>,
    event_tx: mpsc::Sender<EngineEvent>,
    loads: HashMap<ViewKind, (u64, CancellationToken)>,
    role_probe: Option<CancellationToken>,
}

impl Worker {
    fn handle(&mut self, runtime: &tokio::runtime::Runtime, command: EngineCommand) {
        match command {
            EngineCommand::Load {
                view,
                request_id,
                query,
            } => {
                let token = CancellationToken::new();
                if let Some((previous, superseded)) =
                    self.loads.insert(view, (request_id, token.clone()))
                {
                    console_debug!("{:?} load {} superseded by {}", view, previous, request_id);
                    superseded.cancel();
                }
                let api = self.api.clone();
                let event_tx = self.event_tx.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {
                            console_debug!("{:?} load {} cancelled", view, request_id);
                        }
                        result = load_view(&api, view, &query) => {
                            let _ = event_tx.send(EngineEvent::LoadCompleted { view, request_id, result });
                        }
                    }
                });
            }
            EngineCommand::Cancel { view, request_id } => {
                if matches!(self.loads.get(&view), Some((current, _)) if *current == request_id) {
                    if let Some((_, token)) = self.loads.remove(&view) {
                        token.cancel();
                    }
                }
            }
            EngineCommand::ResolveRole => {
                let token = CancellationToken::new();
                if let Some(previous) = self.role_probe.replace(token.clone()) {
                    previous.cancel();
                }
                let resolver = self.resolver.clone();
                let event_tx = self.event_tx.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {
                            console_debug!("Role probe cancelled");
                        }
                        role = resolver.resolve_role() => {
                            let _ = event_tx.send(EngineEvent::RoleResolved { role, resolved_at: Utc::now() });
                        }
                    }
                });
            }
            EngineCommand::CancelRoleProbe => {
                if let Some(token) = self.role_probe.take() {
                    token.cancel();
                }
            }
            EngineCommand::Run { op_id, op } => {
                let api = self.api.clone();
                let event_tx = self.event_tx.clone();
                runtime.spawn(async move {
                    let result = run_operation(&api, op).await;
                    let _ = event_tx.send(EngineEvent::OperationCompleted { op_id, result });
                });
            }
        }
    }
}

async fn load_view(
    api: &ConsoleApi,
    view: ViewKind,
    query: &[(String, String)],
) -> Result<ViewPayload, ApiError> {
    match view {
        ViewKind::CandidateList => {
            let page = api.list_candidates(query).await?;
            let total = page.total.unwrap_or(page.items.len() as u64);
            Ok(ViewPayload::Candidates {
                items: page.items,
                total,
            })
        }
        ViewKind::TopCandidates => {
            let top = api.top_candidates(query).await?;
            let total = top.total_matched.unwrap_or(top.items.len() as u64);
            Ok(ViewPayload::Candidates {
                items: top.items,
                total,
            })
        }
        ViewKind::PipelineStats => {
            let stats = api.pipeline_stats(query).await?;
            Ok(ViewPayload::StatusCounts(stats.counts))
        }
    }
}

async fn run_operation(api: &ConsoleApi, op: Operation) -> Result<OperationOutput, ApiError> {
    match op {
        Operation::LoadCandidate { id, position_id } => api
            .candidate(id, position_id.as_deref())
            .await
            .map(OperationOutput::Candidate),
        Operation::UpdateCandidate {
            id,
            position_id,
            body,
        } => api
            .update_candidate(id, position_id.as_deref(), &body)
            .await
            .map(OperationOutput::Candidate),
        Operation::ListPositions => api.positions().await.map(OperationOutput::Positions),
        Operation::ListManagedPositions => {
            api.managed_positions().await.map(OperationOutput::Positions)
        }
        Operation::SavePosition { id, body } => api
            .save_position(id, &body)
            .await
            .map(OperationOutput::Position),
        Operation::DeletePosition { id } => api
            .delete_position(id)
            .await
            .map(|()| OperationOutput::Deleted),
        Operation::ExportTopCandidatesCsv { query } => api
            .top_candidates_csv(&query)
            .await
            .map(OperationOutput::Csv),
        Operation::UploadResume { file_name, bytes } => api
            .upload_resume(&file_name, bytes)
            .await
            .map(OperationOutput::Uploaded),
    }
}

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use console_core::{
    derive_top_candidates_query, update, validate_candidate_edit, validate_position_draft,
    validate_resume, Affordance, AppState, CandidateEdit, FilterState, Msg, PositionDraft,
};
use console_engine::{
    AtomicFileWriter, CandidateCard, CredentialStore, KeyValueStore, Operation, OperationOutput,
    Position, PositionRequest, UpdateCandidateRequest,
};
use console_logging::{console_info, console_warn};

use super::effects::{query_pairs, EffectRunner, Inbound};
use super::input::{parse_command, CandidateField, Command, PositionField, HELP};
use super::persistence;
use super::render::{render_card, render_positions, render_view};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const REPORTS_LOCKED: &str = "Reports are available to managers only.";
const POSITIONS_LOCKED: &str = "Position settings are available to managers only.";

/// The interactive loop: owns the core state and feeds it engine events.
pub(crate) struct Console {
    state: AppState,
    runner: EffectRunner,
    store: KeyValueStore,
    credentials: Arc<CredentialStore>,
    wait_limit: Duration,
}

impl Console {
    pub(crate) fn new(
        runner: EffectRunner,
        store: KeyValueStore,
        credentials: Arc<CredentialStore>,
        wait_limit: Duration,
    ) -> Self {
        Self {
            state: AppState::new(),
            runner,
            store,
            credentials,
            wait_limit,
        }
    }

    pub(crate) fn run(mut self) -> io::Result<()> {
        println!("Recruiting console. Type `help` for commands.");
        let restored = persistence::load_filters(&self.store);
        self.dispatch(Msg::Mounted { restored });
        self.settle();
        self.render_if_dirty();

        loop {
            print!("> ");
            io::stdout().flush()?;

            // Read line by line so the login prompt can use stdin in between.
            let mut line = String::new();
            if io::stdin().read_line(&mut line)? == 0 {
                break;
            }

            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => {
                    self.execute(command);
                    self.settle();
                    self.render_if_dirty();
                }
                Err(err) => println!("{err}"),
            }
        }

        self.dispatch(Msg::Unmounted);
        console_info!("Console closed");
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn render_if_dirty(&mut self) {
        if self.state.consume_dirty() {
            print!("{}", render_view(&self.state.view()));
        }
    }

    /// Pumps engine events until no load is outstanding and the role is known.
    fn settle(&mut self) {
        let deadline = Instant::now() + self.wait_limit;
        while self.state.loads().any_loading() || self.state.capability().capability().is_none() {
            if Instant::now() >= deadline {
                console_warn!("Gave up waiting for outstanding loads");
                break;
            }
            match self.runner.next_inbound(POLL_INTERVAL) {
                Some(Inbound::Msg(msg)) => self.dispatch(msg),
                Some(Inbound::Operation { op_id, .. }) => {
                    console_warn!("Dropping late result of operation {}", op_id);
                }
                None => {}
            }
        }
    }

    /// Runs one operation to completion, feeding unrelated events to the core.
    fn perform(&mut self, op: Operation) -> Result<OperationOutput, String> {
        let expected = self.runner.start(op);
        let deadline = Instant::now() + self.wait_limit;
        while Instant::now() < deadline {
            match self.runner.next_inbound(POLL_INTERVAL) {
                Some(Inbound::Operation { op_id, result }) if op_id == expected => {
                    return result.map_err(|err| err.user_message());
                }
                Some(Inbound::Operation { op_id, .. }) => {
                    console_warn!("Dropping late result of operation {}", op_id);
                }
                Some(Inbound::Msg(msg)) => self.dispatch(msg),
                None => {}
            }
        }
        Err("No response from the server.".to_string())
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Help => println!("{HELP}"),
            Command::Show => print!("{}", render_view(&self.state.view())),
            Command::Edit(patch) => self.dispatch(Msg::DraftEdited(patch)),
            Command::Apply => self.dispatch(Msg::ApplyClicked),
            Command::Reset => self.dispatch(Msg::ResetClicked),
            Command::Refresh(view) => self.dispatch(Msg::RefreshClicked(view)),
            Command::Report(kind) => self.dispatch(Msg::ReportRequested(kind)),
            Command::Export { path, n } => self.export_top_candidates(&path, n),
            Command::ShowCandidate { id } => {
                if let Some(card) = self.load_candidate(id) {
                    let score_visible = self.selected_position().is_some();
                    print!("{}", render_card(&card, score_visible));
                }
            }
            Command::EditCandidate { id, changes } => self.edit_candidate(id, changes),
            Command::Upload { path } => self.upload_resume(&path),
            Command::Positions => match self.perform(Operation::ListPositions) {
                Ok(OperationOutput::Positions(positions)) => print!("{}", render_positions(&positions)),
                Ok(other) => console_warn!("Unexpected output {:?}", other),
                Err(message) => println!("Could not load positions: {message}"),
            },
            Command::ManagedPositions => {
                if let Some(positions) = self.managed_positions() {
                    print!("{}", render_positions(&positions));
                }
            }
            Command::SavePosition { id, changes } => self.save_position(id, changes),
            Command::DeletePosition { id } => {
                if !self.state.allows(Affordance::PositionSettings) {
                    println!("{POSITIONS_LOCKED}");
                    return;
                }
                match self.perform(Operation::DeletePosition { id }) {
                    Ok(_) => println!("Deleted position #{id}."),
                    Err(message) => println!("Could not delete position: {message}"),
                }
            }
            Command::Logout => match self.credentials.clear() {
                Ok(()) => println!("Logged out. The next request will ask for a login."),
                Err(err) => println!("Could not clear the stored login: {err}"),
            },
            Command::Quit => {}
        }
    }

    fn applied(&self) -> &FilterState {
        self.state.filters().applied()
    }

    fn selected_position(&self) -> Option<String> {
        let position = self.applied().position_id.trim();
        (!position.is_empty()).then(|| position.to_string())
    }

    fn load_candidate(&mut self, id: u64) -> Option<CandidateCard> {
        let position_id = self.selected_position();
        match self.perform(Operation::LoadCandidate { id, position_id }) {
            Ok(OperationOutput::Candidate(card)) => Some(card),
            Ok(other) => {
                console_warn!("Unexpected output {:?}", other);
                None
            }
            Err(message) => {
                println!("Could not load candidate #{id}: {message}");
                None
            }
        }
    }

    fn edit_candidate(&mut self, id: u64, changes: Vec<(CandidateField, String)>) {
        let Some(card) = self.load_candidate(id) else {
            return;
        };
        let edit = candidate_edit(&card, changes);
        let update = match validate_candidate_edit(&edit) {
            Ok(update) => update,
            Err(err) => {
                println!("{err}");
                return;
            }
        };

        let body = UpdateCandidateRequest {
            full_name: update.full_name,
            email: update.email,
            phone: update.phone,
            skills: update.skills,
            years_of_experience: update.years_of_experience,
            status: update.status.as_wire().to_string(),
        };
        let position_id = self.selected_position();
        let score_visible = position_id.is_some();
        match self.perform(Operation::UpdateCandidate {
            id,
            position_id,
            body,
        }) {
            Ok(OperationOutput::Candidate(saved)) => {
                println!("Saved.");
                print!("{}", render_card(&saved, score_visible));
            }
            Ok(other) => console_warn!("Unexpected output {:?}", other),
            Err(message) => println!("Could not save candidate #{id}:\n{message}"),
        }
    }

    fn managed_positions(&mut self) -> Option<Vec<Position>> {
        if !self.state.allows(Affordance::PositionSettings) {
            println!("{POSITIONS_LOCKED}");
            return None;
        }
        match self.perform(Operation::ListManagedPositions) {
            Ok(OperationOutput::Positions(positions)) => Some(positions),
            Ok(other) => {
                console_warn!("Unexpected output {:?}", other);
                None
            }
            Err(message) => {
                println!("Could not load positions: {message}");
                None
            }
        }
    }

    fn save_position(&mut self, id: Option<u64>, changes: Vec<(PositionField, String)>) {
        let mut draft = PositionDraft::default();
        if let Some(id) = id {
            let Some(positions) = self.managed_positions() else {
                return;
            };
            let Some(existing) = positions.into_iter().find(|position| position.id == id) else {
                println!("No position #{id}.");
                return;
            };
            draft = position_draft(&existing);
        } else if !self.state.allows(Affordance::PositionSettings) {
            println!("{POSITIONS_LOCKED}");
            return;
        }

        for (field, value) in changes {
            match field {
                PositionField::Name => draft.name = value,
                PositionField::Skills => draft.required_skills = value,
                PositionField::SkillsWeight => draft.skills_weight = value,
                PositionField::ExperienceWeight => draft.experience_weight = value,
            }
        }
        let input = match validate_position_draft(&draft) {
            Ok(input) => input,
            Err(err) => {
                println!("{err}");
                return;
            }
        };

        let body = PositionRequest {
            name: input.name,
            required_skills: input.required_skills,
            skills_weight: input.skills_weight,
            experience_weight: input.experience_weight,
        };
        match self.perform(Operation::SavePosition { id, body }) {
            Ok(OperationOutput::Position(saved)) => {
                println!("Saved.");
                print!("{}", render_positions(std::slice::from_ref(&saved)));
            }
            Ok(other) => console_warn!("Unexpected output {:?}", other),
            Err(message) => println!("Could not save position: {message}"),
        }
    }

    fn upload_resume(&mut self, path: &Path) {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                println!("Could not read {}: {err}", path.display());
                return;
            }
        };
        let header = &bytes[..bytes.len().min(4)];
        if let Err(err) = validate_resume(&file_name, header, bytes.len() as u64) {
            println!("{err}");
            return;
        }

        match self.perform(Operation::UploadResume { file_name, bytes }) {
            Ok(OperationOutput::Uploaded(uploaded)) => match uploaded.candidate_id {
                Some(id) => println!("Uploaded. Candidate #{id} created; `candidate {id}` to review."),
                None => println!(
                    "Uploaded. {}",
                    uploaded.message.as_deref().unwrap_or("The server did not return an id.")
                ),
            },
            Ok(other) => console_warn!("Unexpected output {:?}", other),
            Err(message) => println!("Upload failed: {message}"),
        }
    }

    fn export_top_candidates(&mut self, path: &Path, n: u32) {
        if !self.state.allows(Affordance::Reports) {
            println!("{REPORTS_LOCKED}");
            return;
        }
        let query = query_pairs(&derive_top_candidates_query(self.applied(), n));
        let csv = match self.perform(Operation::ExportTopCandidatesCsv { query }) {
            Ok(OperationOutput::Csv(csv)) => csv,
            Ok(other) => {
                console_warn!("Unexpected output {:?}", other);
                return;
            }
            Err(message) => {
                println!("Export failed: {message}");
                return;
            }
        };

        let Some(file_name) = path.file_name().map(|name| name.to_string_lossy().into_owned())
        else {
            println!("{} is not a file path.", path.display());
            return;
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };
        match AtomicFileWriter::new(dir).write(&file_name, &csv) {
            Ok(written) => println!("Wrote {}", written.display()),
            Err(err) => println!("Could not write {}: {err}", path.display()),
        }
    }
}

fn candidate_edit(card: &CandidateCard, changes: Vec<(CandidateField, String)>) -> CandidateEdit {
    let fields = &card.fields;
    let mut edit = CandidateEdit {
        full_name: fields.full_name.clone().unwrap_or_default(),
        email: fields.email.clone().unwrap_or_default(),
        phone: fields.phone.clone().unwrap_or_default(),
        skills: fields.skills.clone().unwrap_or_default(),
        years_of_experience: fields
            .years_of_experience
            .map(|years| years.to_string())
            .unwrap_or_default(),
        status: card.status.clone().unwrap_or_default(),
    };
    for (field, value) in changes {
        match field {
            CandidateField::Name => edit.full_name = value,
            CandidateField::Email => edit.email = value,
            CandidateField::Phone => edit.phone = value,
            CandidateField::Skills => edit.skills = value,
            CandidateField::Years => edit.years_of_experience = value,
            CandidateField::Status => edit.status = value,
        }
    }
    edit
}

fn position_draft(position: &Position) -> PositionDraft {
    PositionDraft {
        name: position.name.clone(),
        required_skills: position.required_skills.clone().unwrap_or_default(),
        skills_weight: position.skills_weight.unwrap_or_default().to_string(),
        experience_weight: position.experience_weight.unwrap_or_default().to_string(),
    }
}

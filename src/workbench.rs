//! Interaction state and the single dispatch function that drives it.
//!
//! The GUI turns widget events into [`Input`]s, hands them to
//! [`Workbench::dispatch`] and carries out the returned [`Instruction`].
//! The session is lent out for the duration of a request, and a file-load
//! dialog holds the workbench until it answers. While either is pending the
//! workbench refuses anything that would touch the conversation.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::card_store;
use crate::domains::card::CardRecord;
use crate::services::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine {
    You(String),
    Ai(String),
}

impl fmt::Display for TranscriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptLine::You(text) => write!(f, "You: {text}"),
            TranscriptLine::Ai(text) => write!(f, "AI: {text}"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Input {
    Submit(String),
    Generated {
        session: Session,
        outcome: Result<String, String>,
    },
    LoadRequested,
    LoadFinished(Result<Option<CardRecord>, String>),
    SaveFinished(Result<Option<PathBuf>, String>),
    ExitRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Nothing,
    Generate { session: Session, prompt: String },
    PickCardFile,
    ShowCard(CardRecord),
    Exit,
}

#[derive(Debug)]
pub struct Workbench {
    session: Option<Session>,
    transcript: Vec<TranscriptLine>,
    output_dir: PathBuf,
    load_pending: bool,
    error: Option<String>,
    status: Option<String>,
}

impl Workbench {
    pub fn new(session: Session, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            session: Some(session),
            transcript: Vec::new(),
            output_dir: output_dir.into(),
            load_pending: false,
            error: None,
            status: None,
        }
    }

    pub fn transcript(&self) -> &[TranscriptLine] {
        &self.transcript
    }

    /// `None` while a request holds the session.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.load_pending
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_none() || self.load_pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn dispatch(&mut self, input: Input) -> Instruction {
        match input {
            Input::ExitRequested => Instruction::Exit,
            Input::SaveFinished(result) => {
                match result {
                    Ok(Some(path)) => self.status = Some(format!("Saved {}", path.display())),
                    Ok(None) => {}
                    Err(err) => self.fail(err),
                }
                Instruction::Nothing
            }
            Input::Generated { session, outcome } => {
                self.session = Some(session);
                match outcome {
                    Ok(reply) => {
                        self.transcript.push(TranscriptLine::Ai(reply.clone()));
                        match CardRecord::parse(&reply) {
                            Ok(card) => self.persist_and_show(card),
                            Err(err) => {
                                self.fail(err.to_string());
                                Instruction::Nothing
                            }
                        }
                    }
                    Err(err) => {
                        self.fail(err);
                        Instruction::Nothing
                    }
                }
            }
            Input::LoadFinished(result) => {
                if !self.load_pending {
                    debug!("load result without an open dialog ignored");
                    return Instruction::Nothing;
                }
                self.load_pending = false;
                match result {
                    Ok(None) => Instruction::Nothing,
                    Err(err) => {
                        self.fail(err);
                        Instruction::Nothing
                    }
                    Ok(Some(card)) => self.adopt_loaded(card),
                }
            }
            _ if self.is_busy() => {
                debug!("input ignored while a request or dialog is pending");
                Instruction::Nothing
            }
            Input::Submit(text) => {
                let prompt = text.trim().to_string();
                if prompt.is_empty() {
                    return Instruction::Nothing;
                }
                let Some(session) = self.session.take() else {
                    return Instruction::Nothing;
                };
                self.error = None;
                self.transcript.push(TranscriptLine::You(prompt.clone()));
                Instruction::Generate { session, prompt }
            }
            Input::LoadRequested => {
                self.load_pending = true;
                Instruction::PickCardFile
            }
        }
    }

    fn adopt_loaded(&mut self, card: CardRecord) -> Instruction {
        let encoded = match card.serialize() {
            Ok(encoded) => encoded,
            Err(err) => {
                self.fail(err.to_string());
                return Instruction::Nothing;
            }
        };
        if let Some(session) = self.session.as_mut() {
            session.record_assistant(encoded);
        }
        self.persist_and_show(card)
    }

    fn persist_and_show(&mut self, card: CardRecord) -> Instruction {
        match card_store::save_to_dir(&card, &self.output_dir) {
            Ok(path) => {
                info!(card = %card.name, "showing card");
                self.error = None;
                self.status = Some(format!("Saved {}", path.display()));
                Instruction::ShowCard(card)
            }
            Err(err) => {
                self.fail(err.to_string());
                Instruction::Nothing
            }
        }
    }

    fn fail(&mut self, message: String) {
        error!(error = %message, "interaction failed");
        self.error = Some(message);
    }
}

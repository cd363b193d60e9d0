//! Recording mocks for the router's external collaborators.
//!
//! Every call is recorded so tests can assert on exactly what was sent and
//! which backends were reached, without a real transport or AI service.

#![allow(dead_code)] // not every test binary uses every helper

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ginkgo_bot::application::errors::{BackendError, BotError};
use ginkgo_bot::application::messaging::TriggerConfig;
use ginkgo_bot::application::services::{Backends, ConversationRouter};
use ginkgo_bot::domain::entities::{BotVariant, Contact, IncomingMessage, Room, Target};
use ginkgo_bot::domain::traits::{CompletionBackend, ImageGenerator, Transcriber, Transport};
use ginkgo_bot::infrastructure::storage::InMemoryHistoryStore;

pub const BOT_NAME: &str = "Ginkgo";

/// One outbound action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(Target, String),
    Image(Target, String),
}

/// Transport that records sends and resolves rooms and contacts from fixed tables
#[derive(Default)]
pub struct MockTransport {
    sent: Mutex<Vec<Sent>>,
    topics: HashMap<String, String>,
    contacts: Vec<String>,
    audio_path: Option<PathBuf>,
    fail_sends: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_room(mut self, id: &str, topic: &str) -> Self {
        self.topics.insert(id.to_string(), topic.to_string());
        self
    }

    pub fn with_contact(mut self, name: &str) -> Self {
        self.contacts.push(name.to_string());
        self
    }

    pub fn with_audio(mut self, path: &str) -> Self {
        self.audio_path = Some(PathBuf::from(path));
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts sent to `target`, in order
    pub fn texts_to(&self, target: &Target) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(t, text) if &t == target => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, sent: Sent) -> Result<(), BotError> {
        if self.fail_sends {
            return Err(BotError::Transport("send failed".to_string()));
        }
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn say(&self, target: &Target, text: &str) -> Result<(), BotError> {
        self.record(Sent::Text(target.clone(), text.to_string()))
    }

    async fn send_image(&self, target: &Target, url: &str) -> Result<(), BotError> {
        self.record(Sent::Image(target.clone(), url.to_string()))
    }

    async fn find_contact(&self, name: &str) -> Result<Option<Contact>, BotError> {
        Ok(self.contacts.iter().find(|c| c.as_str() == name).map(|c| Contact::named(c.as_str())))
    }

    async fn room_topic(&self, room: &Room) -> Result<String, BotError> {
        self.topics
            .get(&room.id)
            .cloned()
            .ok_or_else(|| BotError::Transport(format!("unknown room {}", room.id)))
    }

    async fn save_audio(&self, _message: &IncomingMessage, dir: &Path) -> Result<PathBuf, BotError> {
        self.audio_path
            .as_ref()
            .map(|p| dir.join(p))
            .ok_or_else(|| BotError::Transport("no audio".to_string()))
    }
}

/// Completion backend answering from a queue, falling back to a fixed reply
pub struct MockCompletion {
    queued: Mutex<VecDeque<Result<String, BackendError>>>,
    fallback: String,
    calls: Mutex<Vec<(String, String, BotVariant)>>,
}

impl MockCompletion {
    pub fn answering(fallback: &str) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback: fallback.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, reply: Result<String, BackendError>) -> Self {
        self.queued.lock().unwrap().push_back(reply);
        self
    }

    /// (identity, text, variant) per call
    pub fn calls(&self) -> Vec<(String, String, BotVariant)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for MockCompletion {
    async fn complete(&self, identity: &str, text: &str, variant: BotVariant) -> Result<String, BackendError> {
        self.calls.lock().unwrap().push((identity.to_string(), text.to_string(), variant));
        match self.queued.lock().unwrap().pop_front() {
            Some(reply) => reply,
            None => Ok(self.fallback.clone()),
        }
    }
}

/// Transcriber returning a fixed transcript, or failing when given none
#[derive(Default)]
pub struct MockTranscriber {
    transcript: Option<String>,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl MockTranscriber {
    pub fn returning(transcript: &str) -> Self {
        Self {
            transcript: Some(transcript.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, identity: &str, path: &Path) -> Result<String, BackendError> {
        self.calls.lock().unwrap().push((identity.to_string(), path.to_path_buf()));
        self.transcript
            .clone()
            .ok_or_else(|| BackendError::Api("whisper unavailable".to_string()))
    }
}

/// Image generator returning a fixed URL
pub struct MockImages {
    url: String,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockImages {
    pub fn returning(url: &str) -> Self {
        Self {
            url: url.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// (identity, prompt) per call
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImages {
    async fn generate_image(&self, identity: &str, prompt: &str) -> Result<String, BackendError> {
        self.calls.lock().unwrap().push((identity.to_string(), prompt.to_string()));
        Ok(self.url.clone())
    }
}

/// A router wired to mocks, with handles on every mock
pub struct Harness {
    pub router: ConversationRouter,
    pub transport: Arc<MockTransport>,
    pub completion: Arc<MockCompletion>,
    pub transcriber: Arc<MockTranscriber>,
    pub images: Arc<MockImages>,
    pub store: Arc<InMemoryHistoryStore>,
}

pub struct HarnessBuilder {
    variant: BotVariant,
    config: TriggerConfig,
    transport: MockTransport,
    completion: MockCompletion,
    transcriber: MockTranscriber,
    escalation_contact: Option<String>,
}

impl HarnessBuilder {
    pub fn new(variant: BotVariant) -> Self {
        Self {
            variant,
            config: TriggerConfig::default(),
            transport: MockTransport::new().with_room("room-1", "Family"),
            completion: MockCompletion::answering("answer"),
            transcriber: MockTranscriber::failing(),
            escalation_contact: None,
        }
    }

    pub fn config(mut self, config: TriggerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn transport(mut self, transport: MockTransport) -> Self {
        self.transport = transport;
        self
    }

    pub fn completion(mut self, completion: MockCompletion) -> Self {
        self.completion = completion;
        self
    }

    pub fn transcriber(mut self, transcriber: MockTranscriber) -> Self {
        self.transcriber = transcriber;
        self
    }

    pub fn escalation_contact(mut self, name: &str) -> Self {
        self.escalation_contact = Some(name.to_string());
        self
    }

    pub fn build(self) -> Harness {
        let transport = Arc::new(self.transport);
        let completion = Arc::new(self.completion);
        let transcriber = Arc::new(self.transcriber);
        let images = Arc::new(MockImages::returning("https://images.example/cat.png"));
        let store = Arc::new(InMemoryHistoryStore::new());

        let backends = Backends {
            transport: transport.clone(),
            completion: completion.clone(),
            transcriber: transcriber.clone(),
            images: images.clone(),
            store: store.clone(),
        };
        let router = ConversationRouter::new(BOT_NAME, self.variant, Arc::new(self.config), backends)
            .expect("valid router config")
            .with_escalation_contact(self.escalation_contact)
            .with_audio_dir("/tmp/ginkgo-audio");

        Harness {
            router,
            transport,
            completion,
            transcriber,
            images,
            store,
        }
    }
}

pub fn alice() -> Contact {
    Contact::named("alice")
}

pub fn private_text(text: &str) -> IncomingMessage {
    IncomingMessage::from_text(alice(), text)
}

pub fn group_text(text: &str) -> IncomingMessage {
    IncomingMessage::from_text(alice(), text).in_room(Room::new("room-1"))
}

pub fn room_target() -> Target {
    Target::Room(Room::new("room-1"))
}

pub fn alice_target() -> Target {
    Target::Contact(alice())
}

use crate::client::error::ClientError;
use crate::helpers::generate_random_id;
use crate::models::MessageEntry;
use std::fmt::Write;

/// Length of the id given to a question that has not reached the server yet.
pub const PENDING_ID_LEN: usize = 4;

const SKELETON: &str = "░░░░░░░░░░░░░░░░";

#[derive(Debug, Clone, PartialEq)]
pub enum EntryState {
    /// Sent, answer not received yet
    Pending,
    Resolved { answer: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: String,
    pub question: String,
    pub state: EntryState,
}

impl From<MessageEntry> for Entry {
    fn from(message: MessageEntry) -> Self {
        Self {
            id: message.id,
            question: message.question,
            state: EntryState::Resolved {
                answer: message.answer,
            },
        }
    }
}

/// Message list of one conversation as the user sees it.
///
/// A submitted question shows up immediately as a pending entry. Once the
/// server action completes the view is replaced wholesale by the server's
/// messages ([`ChatView::reconcile`]); if it fails the pending entry is
/// dropped and the error becomes the notice ([`ChatView::fail`]).
#[derive(Debug, Default)]
pub struct ChatView {
    entries: Vec<Entry>,
    notice: Option<String>,
}

impl ChatView {
    pub fn new(messages: Vec<MessageEntry>) -> Self {
        let mut view = Self::default();
        view.reconcile(messages);
        view
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn pending(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.state == EntryState::Pending)
    }

    /// Adds `question` as a pending entry and returns its id. A blank
    /// question changes nothing; a missing key is refused.
    pub fn submit(
        &mut self,
        question: &str,
        api_key: Option<&str>,
    ) -> Result<Option<String>, ClientError> {
        if question.is_empty() {
            return Ok(None);
        }

        if api_key.map_or(true, |key| key.trim().is_empty()) {
            self.notice = Some(ClientError::NoApiKey.to_string());
            return Err(ClientError::NoApiKey);
        }

        let id = generate_random_id(PENDING_ID_LEN);
        self.entries.push(Entry {
            id: id.clone(),
            question: question.to_string(),
            state: EntryState::Pending,
        });

        Ok(Some(id))
    }

    pub fn reconcile(&mut self, messages: Vec<MessageEntry>) {
        self.entries = messages.into_iter().map(Entry::from).collect();
    }

    /// Returns `false` if no pending entry has that id.
    pub fn fail(&mut self, pending_id: &str, err: &ClientError) -> bool {
        self.notice = Some(err.to_string());

        let before = self.entries.len();
        self.entries
            .retain(|entry| !(entry.id == pending_id && entry.state == EntryState::Pending));
        self.entries.len() != before
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let answer = match &entry.state {
                EntryState::Pending => SKELETON,
                EntryState::Resolved { answer } => answer.as_str(),
            };
            let _ = writeln!(out, "You: {}\nAI:  {}\n", entry.question, answer);
        }
        out
    }
}

use crate::backend::StudyContext;
use crate::catalog::Unit;
use crate::state::message::ChatMessage;
use crate::state::selection::UnitTopicSelection;

/// Where the conversation is within a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    AwaitingResponse,
}

/// Work the assistant page hands to the backend
#[derive(Debug, Clone, PartialEq)]
pub enum ChatRequest {
    Answer { question: String, context: StudyContext },
    GenerateQuestions { unit: Option<&'static Unit> },
}

/// State of the AI assistant screen
#[derive(Debug, Clone)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    input: String,
    phase: ChatPhase,
    pub selection: UnitTopicSelection,
    topic_cursor: usize,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            phase: ChatPhase::Idle,
            selection: UnitTopicSelection::default(),
            topic_cursor: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    #[cfg(test)]
    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn is_awaiting(&self) -> bool {
        self.phase == ChatPhase::AwaitingResponse
    }

    /// Add a character to the input. The input is locked while waiting.
    pub fn handle_input(&mut self, c: char) {
        if !self.is_awaiting() {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if !self.is_awaiting() {
            self.input.pop();
        }
    }

    /// Send the typed question.
    ///
    /// Blank input, or a turn already in flight, changes nothing and returns
    /// `None`.
    pub fn submit(&mut self) -> Option<ChatRequest> {
        if self.input.trim().is_empty() || self.is_awaiting() {
            return None;
        }

        let question = std::mem::take(&mut self.input);
        self.messages.push(ChatMessage::user(question.clone()));
        self.phase = ChatPhase::AwaitingResponse;

        Some(ChatRequest::Answer {
            question,
            context: self.context(),
        })
    }

    /// Ask for exam questions on the selected unit, or on all units.
    pub fn generate_questions(&mut self) -> Option<ChatRequest> {
        if self.is_awaiting() {
            return None;
        }

        let unit = self.selection.unit();
        let target = unit.map(|u| u.name).unwrap_or("all units");
        self.messages.push(ChatMessage::user(format!(
            "Generate important exam questions for {}",
            target
        )));
        self.phase = ChatPhase::AwaitingResponse;

        Some(ChatRequest::GenerateQuestions { unit })
    }

    /// Append the assistant reply and end the turn.
    pub fn receive_reply(&mut self, content: String) {
        if !self.is_awaiting() {
            tracing::warn!("assistant reply arrived with no turn in flight");
            return;
        }
        self.messages.push(ChatMessage::assistant(content));
        self.phase = ChatPhase::Idle;
    }

    /// End the turn without a reply. The user message stays in place.
    pub fn receive_failure(&mut self) {
        self.phase = ChatPhase::Idle;
    }

    pub fn context(&self) -> StudyContext {
        StudyContext {
            unit: self.selection.unit().map(|u| u.name.to_string()),
            topic: self.selection.topic().map(str::to_string),
        }
    }

    pub fn topic_cursor(&self) -> usize {
        self.topic_cursor
    }

    pub fn cycle_unit(&mut self, forward: bool) {
        self.selection.cycle_unit(forward);
        self.topic_cursor = 0;
    }

    pub fn move_topic_cursor(&mut self, forward: bool) {
        let count = self.selection.topics().len();
        if count == 0 {
            return;
        }
        self.topic_cursor = if forward {
            (self.topic_cursor + 1) % count
        } else {
            (self.topic_cursor + count - 1) % count
        };
    }

    /// Toggle the chip under the cursor.
    pub fn toggle_topic_at_cursor(&mut self) {
        if let Some(topic) = self.selection.topics().get(self.topic_cursor) {
            self.selection.toggle_topic(topic);
        }
    }
}

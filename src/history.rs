pub const GREETING: &str = "Hi! I'm a SQL assistant. Ask me anything about your database.";

/// One message in the conversation, tagged by speaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Human(String),
    Assistant(String),
}

/// Append-only conversation log. Insertion order is meaningful: it is fed
/// verbatim into both model prompts and rendered as the transcript. Entries
/// are never mutated, reordered or dropped while the session lives.
#[derive(Debug, Default)]
pub struct ChatHistory {
    turns: Vec<Turn>,
}

impl ChatHistory {
    /// A fresh history seeded with the assistant's opening greeting.
    pub fn with_greeting() -> Self {
        Self {
            turns: vec![Turn::Assistant(GREETING.to_string())],
        }
    }

    pub fn push_human(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::Human(text.into()));
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::Assistant(text.into()));
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Serializes the transcript for prompt context, one speaker-tagged
    /// line per turn.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|turn| match turn {
                Turn::Human(text) => format!("Human: {text}"),
                Turn::Assistant(text) => format!("AI: {text}"),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

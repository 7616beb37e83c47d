//! Prompt assembly: turns a system prompt, optional RAG context, prior turn
//! history, and the current user utterance into the message list the LLM
//! provider surface expects.

use voice_agent_core::Message;

#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    system_prompt: Option<String>,
    rag_context: Option<String>,
    history: Vec<Message>,
    user_message: Option<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Attach retrieved passages; folded into the system message so every
    /// provider sees it even if it has no separate "context" slot.
    pub fn with_rag_context(mut self, context: impl Into<String>) -> Self {
        self.rag_context = Some(context.into());
        self
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn user_message(mut self, message: impl Into<String>) -> Self {
        self.user_message = Some(message.into());
        self
    }

    pub fn build(self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);

        let system = match (&self.system_prompt, &self.rag_context) {
            (Some(prompt), Some(context)) => {
                Some(format!("{}\n\nRelevant context:\n{}", prompt, context))
            }
            (Some(prompt), None) => Some(prompt.clone()),
            (None, Some(context)) => Some(format!("Relevant context:\n{}", context)),
            (None, None) => None,
        };
        if let Some(system) = system {
            messages.push(Message::system(system));
        }

        messages.extend(self.history);

        if let Some(user_message) = self.user_message {
            messages.push(Message::user(user_message));
        }

        messages
    }

    pub fn message_count(&self) -> usize {
        self.history.len() + usize::from(self.system_prompt.is_some()) + usize::from(self.user_message.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_rag_context_into_system_message() {
        let messages = PromptBuilder::new()
            .with_system_prompt("You are a helpful assistant.")
            .with_rag_context("The capital of France is Paris.")
            .user_message("What is the capital of France?")
            .build();

        assert_eq!(messages.len(), 2);
        assert!(messages[0].content.contains("Paris"));
    }

    #[test]
    fn preserves_history_order_between_system_and_user() {
        let history = vec![Message::user("hi"), Message::assistant("hello")];
        let messages =
            PromptBuilder::new().with_history(history).user_message("how are you?").build();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].content, "how are you?");
    }
}

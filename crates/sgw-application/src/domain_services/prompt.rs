//! Guard-railed prompt construction
//!
//! Turns a conversation and a tone/language policy into the text sent to a
//! provider. The output depends only on its inputs.

use sgw_domain::ports::providers::{ChatMessage, ChatRole};
use sgw_domain::value_objects::{ConversationTurn, PromptPolicy, TurnRole};

/// Rough words-per-token ratio used to phrase the length constraint
const WORDS_PER_100_TOKENS: u32 = 75;

/// Builds prompts that keep suggestions on-topic and factual
pub struct GuardrailedPromptBuilder;

impl GuardrailedPromptBuilder {
    /// Flat prompt for completion-style adapters
    ///
    /// Embeds the guardrail block, the most recent turns in order, and a cue
    /// for the agent reply.
    pub fn build(turns: &[ConversationTurn], policy: &PromptPolicy, max_tokens: u32) -> String {
        let mut prompt = Self::system_instructions(policy, max_tokens);

        prompt.push_str("\n\nConversation:\n");
        for turn in Self::recent_turns(turns, policy) {
            prompt.push_str(turn.role.label());
            prompt.push_str(": ");
            prompt.push_str(&Self::single_line(&turn.text));
            prompt.push('\n');
        }

        prompt.push_str("\nWrite the next Agent reply to the customer's latest message.\nAgent:");
        prompt
    }

    /// Guardrail block on its own, used as the system message for chat adapters
    pub fn system_instructions(policy: &PromptPolicy, max_tokens: u32) -> String {
        let speaker = match policy.business_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("a customer support agent for {name}"),
            _ => "a customer support agent".to_string(),
        };
        let max_words = (max_tokens.saturating_mul(WORDS_PER_100_TOKENS) / 100).max(1);

        let mut rules = vec![
            format!("Reply in {}.", policy.language),
            format!("Use a {} tone.", policy.tone),
            "Answer the customer's latest message directly.".to_string(),
            "Do not invent facts such as prices, dates, stock availability or policies that \
             are not stated in the conversation. If information is missing, say that a team \
             member will confirm it."
                .to_string(),
            format!("Keep the reply under {max_words} words."),
            "Reply with plain text only, without HTML, markdown or code.".to_string(),
        ];
        rules.extend(
            policy
                .extra_rules
                .iter()
                .map(|rule| rule.trim())
                .filter(|rule| !rule.is_empty())
                .map(str::to_string),
        );

        let mut instructions =
            format!("You are drafting a reply suggestion for {speaker}.\nRules:");
        for rule in rules {
            instructions.push_str("\n- ");
            instructions.push_str(&rule);
        }
        instructions
    }

    /// Structured messages for chat adapters, guardrails first
    pub fn messages(
        turns: &[ConversationTurn],
        policy: &PromptPolicy,
        max_tokens: u32,
    ) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::new(
            ChatRole::System,
            Self::system_instructions(policy, max_tokens),
        )];
        messages.extend(Self::recent_turns(turns, policy).iter().map(|turn| {
            let role = match turn.role {
                TurnRole::Customer => ChatRole::User,
                TurnRole::Agent => ChatRole::Assistant,
            };
            ChatMessage::new(role, turn.text.trim())
        }));
        messages
    }

    fn recent_turns<'a>(
        turns: &'a [ConversationTurn],
        policy: &PromptPolicy,
    ) -> &'a [ConversationTurn] {
        let keep = policy.max_context_turns.max(1);
        &turns[turns.len().saturating_sub(keep)..]
    }

    // A turn spanning several lines would break the "Role: text" transcript.
    fn single_line(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

//! Canned-response mentor chat.
//!
//! Two personas answer from fixed keyword tables: Harry the risk mentor and
//! Alex the scenario generator. Replies are not delivered immediately; they
//! sit on a [`DelayQueue`] for a short "thinking" delay and arrive through
//! [`MentorChat::advance`]. Switching persona or clearing the chat bumps the
//! conversation generation, which cancels pending replies and causes any
//! straggler from the old generation to be dropped on delivery.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::clock::{DelayQueue, TaskId};
use crate::config::MentorConfig;
use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Harry,
    Alex,
}

const HARRY_REPLIES: &[(&str, &str)] = &[
    ("risk", "Great question about risk! In the AXiLe framework, we look at risks through multiple lenses: probability, impact, and interconnectedness. What specific aspect would you like to dive deeper into?"),
    ("decision", "Decision-making under uncertainty is a core skill. I recommend using the evidence-based approach: 1) Gather relevant data, 2) Consider historical patterns, 3) Evaluate potential outcomes, 4) Choose with clear reasoning. What decision are you facing?"),
    ("pattern", "Pattern recognition is crucial! Look for Natural Pattern Language indicators - recurring themes across different contexts. Historical data often reveals cycles that help predict future risks. What patterns have you noticed?"),
    ("scenario", "Let me help you analyze this scenario systematically. We should consider the OKRM structure: Objectives at risk, Key Results affected, potential cascade effects, and available mitigations. What's the context?"),
];
const HARRY_DEFAULT: &str = "That's an excellent point to explore! Let's break it down using the AXiLe methodology. Consider how this connects to broader risk patterns and what evidence supports different approaches.";

const ALEX_REPLIES: &[(&str, &str)] = &[
    ("generate", "Perfect! Let me create a scenario tailored to your current skill level. Based on your progress, I'll design a multi-domain risk challenge that builds on your strengths while developing new capabilities. Ready?"),
    ("difficulty", "I'll adapt the complexity based on your performance data. Your current analytics show strong pattern recognition but opportunity for growth in team leadership scenarios. Shall I create something that challenges this area?"),
    ("industry", "Which industry interests you most? I can generate scenarios for: FinTech disruption, Healthcare compliance, Manufacturing automation, Climate tech, or Startup scaling. Each has unique risk profiles!"),
    ("team", "Excellent choice! Team scenarios test collaboration, communication, and distributed decision-making. I'll create a crisis situation requiring coordinated response across multiple stakeholders. Sound challenging enough?"),
];
const ALEX_DEFAULT: &str = "I love the creative thinking! Let me design something that incorporates your idea into a realistic business context with measurable outcomes and branching decision trees.";

const HARRY_FOLLOW_UPS: &[&str] = &["Tell me more", "Show examples", "Quiz me on this", "Related concepts"];
const ALEX_FOLLOW_UPS: &[&str] = &[
    "Create this scenario",
    "Adjust difficulty",
    "Add team element",
    "Different industry",
];

const HARRY_OPENERS: &[&str] = &[
    "Explain a risk concept",
    "Analyze current scenario",
    "Review my decisions",
    "What patterns should I watch?",
];
const ALEX_OPENERS: &[&str] = &[
    "Generate new scenario",
    "Adaptive difficulty",
    "Industry-specific risks",
    "Team collaboration scenario",
];

/// Suggestion buttons offered by the inline mentor.
pub const SUGGESTIONS: &[(&str, &str)] = &[
    ("What should I look for first?", "Great question! Start by examining the probability and impact matrix. Look for high-impact, high-probability risks first. Also, consider any interconnected risks that might create cascading effects."),
    ("Explain this risk category", "Risk categories help us organize and understand different types of threats. Financial risks affect your bottom line, operational risks disrupt processes, strategic risks threaten long-term goals, and compliance risks involve regulatory issues."),
    ("Help me prioritize", "Use the AXiLe framework! Consider the Natural Pattern Language - has this type of risk occurred before in similar contexts? Also evaluate: 1) Immediacy of impact 2) Available resources 3) Stakeholder concerns"),
    ("What would happen if...?", "Excellent forward-thinking! Let's use scenario analysis. Consider both direct and indirect consequences. What systems would be affected? How would stakeholders react? What recovery options would be available?"),
];
const SUGGESTION_FALLBACK: &str = "That's an interesting point. Let me help you think through this systematically. What specific aspect would you like to explore further?";

impl Persona {
    pub fn greeting(self) -> &'static str {
        match self {
            Self::Harry => "Hello! I'm Harry, your Risk Management Mentor. I'm here to guide you through complex scenarios and help you develop evidence-based decision-making skills. What would you like to explore today?",
            Self::Alex => "Hi there! I'm Alex, your Dynamic Scenario Generator. I create personalized risk scenarios based on your learning progress and interests. Ready for a new challenge tailored just for you?",
        }
    }

    /// Quick actions attached to the greeting.
    pub fn openers(self) -> &'static [&'static str] {
        match self {
            Self::Harry => HARRY_OPENERS,
            Self::Alex => ALEX_OPENERS,
        }
    }

    /// Quick actions attached to every reply.
    pub fn follow_ups(self) -> &'static [&'static str] {
        match self {
            Self::Harry => HARRY_FOLLOW_UPS,
            Self::Alex => ALEX_FOLLOW_UPS,
        }
    }

    /// First table key contained in the lowercased input, else the default.
    pub fn reply_to(self, input: &str) -> &'static str {
        let (table, fallback) = match self {
            Self::Harry => (HARRY_REPLIES, HARRY_DEFAULT),
            Self::Alex => (ALEX_REPLIES, ALEX_DEFAULT),
        };
        let lower = input.to_lowercase();
        table
            .iter()
            .find(|(key, _)| lower.contains(key))
            .map_or(fallback, |&(_, reply)| reply)
    }
}

/// Exact-match suggestion answer.
pub fn suggestion_reply(suggestion: &str) -> &'static str {
    SUGGESTIONS
        .iter()
        .find(|(q, _)| *q == suggestion)
        .map_or(SUGGESTION_FALLBACK, |&(_, a)| a)
}

/// Advice for something the player just did, e.g. "identified a supply risk".
pub fn contextual_advice(action: &str) -> String {
    let advice = if action.contains("identified") {
        "Great observation! Now consider: What evidence supports this assessment? What are the potential cascading effects?"
    } else if action.contains("mitigation") {
        "Good mitigation thinking! Make sure your strategy addresses root causes and includes measurable success criteria."
    } else {
        "Keep thinking systematically about the interconnections between risks and objectives."
    };
    format!("I noticed you {}. {}", action, advice)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub persona: Persona,
    pub from_mentor: bool,
    pub content: String,
    #[serde(default)]
    pub quick_actions: Vec<String>,
    /// Virtual time the message was posted.
    pub at_ms: u64,
}

#[derive(Debug, Clone)]
struct PendingReply {
    persona: Persona,
    content: String,
    quick_actions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MentorChat {
    config: MentorConfig,
    persona: Persona,
    messages: Vec<ChatMessage>,
    replies: DelayQueue<PendingReply>,
    generation: u64,
    next_message_id: u64,
    rng: StdRng,
}

impl MentorChat {
    pub fn new(config: MentorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let mut chat = Self {
            config,
            persona: Persona::Harry,
            messages: Vec::new(),
            replies: DelayQueue::new(),
            generation: 0,
            next_message_id: 1,
            rng,
        };
        chat.post_greeting();
        chat
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A reply is on its way.
    pub fn is_typing(&self) -> bool {
        !self.replies.is_empty()
    }

    fn post(&mut self, persona: Persona, from_mentor: bool, content: String, quick_actions: Vec<String>) {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push(ChatMessage {
            id,
            persona,
            from_mentor,
            content,
            quick_actions,
            at_ms: self.replies.now_ms(),
        });
    }

    fn post_greeting(&mut self) {
        let persona = self.persona;
        let openers = persona.openers().iter().map(|s| s.to_string()).collect();
        self.post(persona, true, persona.greeting().to_string(), openers);
    }

    fn start_new_conversation(&mut self) {
        let cancelled = self.replies.cancel_generation(self.generation);
        if cancelled > 0 {
            log::debug!("Mentor: cancelled {} pending replies", cancelled);
        }
        self.generation += 1;
        self.messages.clear();
        self.post_greeting();
    }

    /// Post a free-form message and schedule the persona's reply.
    pub fn send(&mut self, text: &str) -> Result<TaskId, CommandError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CommandError::EmptyMessage);
        }
        let persona = self.persona;
        self.post(persona, false, text.to_string(), Vec::new());

        let jitter = if self.config.jitter_ms > 0 {
            self.rng.gen_range(0..self.config.jitter_ms)
        } else {
            0
        };
        let reply = PendingReply {
            persona,
            content: persona.reply_to(text).to_string(),
            quick_actions: persona.follow_ups().iter().map(|s| s.to_string()).collect(),
        };
        Ok(self
            .replies
            .schedule(self.config.base_delay_ms + jitter, self.generation, reply))
    }

    /// A quick-action button behaves like typing its label.
    pub fn quick_action(&mut self, action: &str) -> Result<TaskId, CommandError> {
        self.send(action)
    }

    /// Ask one of the fixed [`SUGGESTIONS`]; answered after a fixed delay.
    pub fn ask_suggestion(&mut self, suggestion: &str) -> Result<TaskId, CommandError> {
        if suggestion.trim().is_empty() {
            return Err(CommandError::EmptyMessage);
        }
        let persona = self.persona;
        self.post(persona, false, suggestion.to_string(), Vec::new());
        let reply = PendingReply {
            persona,
            content: suggestion_reply(suggestion).to_string(),
            quick_actions: Vec::new(),
        };
        Ok(self
            .replies
            .schedule(self.config.suggestion_delay_ms, self.generation, reply))
    }

    /// React to a player action with immediate contextual advice.
    pub fn observe_action(&mut self, action: &str) {
        if action.trim().is_empty() {
            return;
        }
        self.post(self.persona, true, contextual_advice(action), Vec::new());
    }

    /// Switch persona. Same persona is a no-op.
    pub fn switch_persona(&mut self, persona: Persona) {
        if persona == self.persona {
            return;
        }
        self.persona = persona;
        self.start_new_conversation();
    }

    /// Reset to the current persona's greeting.
    pub fn clear(&mut self) {
        self.start_new_conversation();
    }

    /// Move virtual time forward and post every reply that became due.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<ChatMessage> {
        let first_new = self.messages.len();
        for task in self.replies.advance(elapsed_ms) {
            if task.generation != self.generation {
                log::debug!("Mentor: dropped stale reply {}", task.id);
                continue;
            }
            let reply = task.payload;
            self.post(reply.persona, true, reply.content, reply.quick_actions);
        }
        self.messages[first_new..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_matching() {
        assert!(Persona::Harry.reply_to("How do I weigh a RISK?").starts_with("Great question about risk"));
        // "risk" comes before "decision" in the table.
        assert!(Persona::Harry.reply_to("decision risk").starts_with("Great question about risk"));
        assert_eq!(Persona::Harry.reply_to("hello"), HARRY_DEFAULT);
        assert!(Persona::Alex.reply_to("Add team element").starts_with("Excellent choice!"));
        assert_eq!(Persona::Alex.reply_to("risk"), ALEX_DEFAULT);
    }

    #[test]
    fn test_suggestions_exact_match() {
        assert!(suggestion_reply("Help me prioritize").starts_with("Use the AXiLe framework!"));
        assert_eq!(suggestion_reply("help me prioritize"), SUGGESTION_FALLBACK);
    }

    #[test]
    fn test_contextual_advice() {
        assert!(contextual_advice("identified a supplier risk")
            .starts_with("I noticed you identified a supplier risk. Great observation!"));
        assert!(contextual_advice("added a mitigation").contains("root causes"));
        assert!(contextual_advice("waved").ends_with("risks and objectives."));
    }

    #[test]
    fn test_reply_arrives_after_delay() {
        let mut chat = MentorChat::new(MentorConfig::default());
        assert_eq!(chat.messages().len(), 1);
        chat.send("what is a pattern?").unwrap();
        assert!(chat.is_typing());
        assert!(chat.advance(1_499).is_empty());
        let delivered = chat.advance(1_001);
        assert_eq!(delivered.len(), 1);
        assert!(delivered[0].from_mentor);
        assert!(delivered[0].content.starts_with("Pattern recognition"));
        assert_eq!(delivered[0].quick_actions.len(), 4);
        assert!(!chat.is_typing());
        assert_eq!(chat.messages().len(), 3);
    }

    #[test]
    fn test_switch_drops_pending_reply() {
        let mut chat = MentorChat::new(MentorConfig::default());
        chat.send("risk").unwrap();
        chat.switch_persona(Persona::Alex);
        assert_eq!(chat.generation(), 1);
        assert!(chat.advance(10_000).is_empty());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].content, Persona::Alex.greeting());
    }

    #[test]
    fn test_same_persona_is_noop() {
        let mut chat = MentorChat::new(MentorConfig::default());
        chat.send("risk").unwrap();
        chat.switch_persona(Persona::Harry);
        assert_eq!(chat.generation(), 0);
        assert_eq!(chat.advance(3_000).len(), 1);
    }

    #[test]
    fn test_empty_message_rejected() {
        let mut chat = MentorChat::new(MentorConfig::default());
        assert_eq!(chat.send("   "), Err(CommandError::EmptyMessage));
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn test_seeded_delays_are_reproducible() {
        let run = || {
            let mut chat = MentorChat::new(MentorConfig::default());
            let mut arrivals = Vec::new();
            for _ in 0..5 {
                chat.send("decision").unwrap();
                let mut waited = 0;
                while chat.advance(10).is_empty() {
                    waited += 10;
                }
                arrivals.push(waited);
            }
            arrivals
        };
        let first = run();
        assert_eq!(first, run());
        assert!(first.iter().all(|ms| (1_490..2_500).contains(ms)));
    }

    #[test]
    fn test_suggestion_uses_fixed_delay() {
        let mut chat = MentorChat::new(MentorConfig::default());
        chat.ask_suggestion("What would happen if...?").unwrap();
        assert!(chat.advance(1_999).is_empty());
        assert_eq!(chat.advance(1).len(), 1);
    }
}

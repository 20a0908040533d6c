//! Canned auto-replies for the chat widget.
//!
//! Keyword groups are checked in table order and the first group with any
//! keyword contained in the lower-cased message wins. Table order is the
//! tie-break when a message touches several topics.

use tracing::debug;

pub const PRICING_REPLY: &str = "Our tuition fees vary based on the grade level and session frequency. We offer affordable packages starting from AED 200/month. Would you like to speak with our team for a customized quote? You can reach us on WhatsApp for more details!";
pub const SCHEDULING_REPLY: &str = "We offer flexible timings! Classes are available from 4 PM to 9 PM on weekdays and 10 AM to 6 PM on weekends. We can work around your child's school schedule.";
pub const CURRICULUM_REPLY: &str = "We teach mathematics to students from Grade 1 to Grade 12. Our curriculum covers school syllabus (CBSE, ICSE, British, American) as well as foundation building for competitive exams.";
pub const MODE_REPLY: &str = "We offer both online and offline classes! Online classes are conducted via Zoom with interactive whiteboards. Offline classes are available in select locations.";
pub const TRIAL_REPLY: &str = "Yes! We offer a FREE demo class so your child can experience our teaching style. Would you like to book a trial session? Just share your preferred timing!";
pub const TEACHERS_REPLY: &str = "Our teachers are experienced educators with 5+ years of teaching experience. They specialize in making math fun and easy to understand for kids of all levels.";
pub const CONTACT_REPLY: &str = "You can reach us directly on WhatsApp at +971 54 301 4873. Click the WhatsApp button below to start a conversation with our team!";
pub const GREETING_REPLY: &str = "Hello! Welcome to Math Kidz! 👋 How can I help you today? Feel free to ask about our classes, timings, fees, or anything else!";
pub const THANKS_REPLY: &str = "You're welcome! 😊 If you have any more questions, feel free to ask. We're here to help your child excel in mathematics!";
pub const ENROLLMENT_REPLY: &str = "Great! To enroll your child, please fill out the contact form on our website or reach out to us on WhatsApp. We'll guide you through the simple registration process!";
pub const DEFAULT_REPLY: &str = "Thank you for your message! For detailed information, please connect with us on WhatsApp where our team can assist you personally. Is there anything specific about our math tuition you'd like to know - like fees, timings, or grade levels?";

/// A keyword group and its canned response.
#[derive(Debug, Clone)]
pub struct AutoReplyRule {
    /// Short topic name, used in logs.
    pub topic: String,
    /// Lower-case substrings; any one present triggers the rule.
    pub keywords: Vec<String>,
    pub response: String,
}

impl AutoReplyRule {
    pub fn new(topic: &str, keywords: &[&str], response: &str) -> Self {
        Self {
            topic: topic.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            response: response.to_string(),
        }
    }

    fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }
}

/// Ordered keyword → response table.
#[derive(Debug, Clone)]
pub struct AutoReplyEngine {
    rules: Vec<AutoReplyRule>,
    default_reply: String,
}

impl AutoReplyEngine {
    /// The Math Kidz table, in priority order.
    pub fn default_rules() -> Self {
        let rules = vec![
            AutoReplyRule::new("pricing", &["price", "cost", "fee", "charge"], PRICING_REPLY),
            AutoReplyRule::new(
                "scheduling",
                &["timing", "schedule", "time", "slot"],
                SCHEDULING_REPLY,
            ),
            AutoReplyRule::new(
                "curriculum",
                &["grade", "class", "age", "level"],
                CURRICULUM_REPLY,
            ),
            AutoReplyRule::new("mode", &["online", "offline", "mode"], MODE_REPLY),
            AutoReplyRule::new("trial", &["trial", "demo", "free"], TRIAL_REPLY),
            AutoReplyRule::new("teachers", &["teacher", "tutor", "faculty"], TEACHERS_REPLY),
            AutoReplyRule::new(
                "contact",
                &["contact", "call", "phone", "whatsapp"],
                CONTACT_REPLY,
            ),
            AutoReplyRule::new("greeting", &["hello", "hi", "hey", "good"], GREETING_REPLY),
            AutoReplyRule::new("thanks", &["thank", "thanks"], THANKS_REPLY),
            AutoReplyRule::new(
                "enrollment",
                &["enroll", "register", "join", "admission"],
                ENROLLMENT_REPLY,
            ),
        ];

        Self {
            rules,
            default_reply: DEFAULT_REPLY.to_string(),
        }
    }

    pub fn rules(&self) -> &[AutoReplyRule] {
        &self.rules
    }

    /// First rule matching the message, if any.
    pub fn matching_rule(&self, message: &str) -> Option<&AutoReplyRule> {
        let normalized = message.to_lowercase();
        self.rules.iter().find(|r| r.matches(&normalized))
    }

    /// Canned response for a visitor message.
    pub fn reply(&self, message: &str) -> &str {
        match self.matching_rule(message) {
            Some(rule) => {
                debug!(topic = %rule.topic, "Auto-reply rule matched");
                &rule.response
            }
            None => {
                debug!("No auto-reply rule matched, using default");
                &self.default_reply
            }
        }
    }
}

impl Default for AutoReplyEngine {
    fn default() -> Self {
        Self::default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_question() {
        let engine = AutoReplyEngine::default_rules();
        assert_eq!(engine.reply("What is your price?"), PRICING_REPLY);
    }

    #[test]
    fn greeting() {
        let engine = AutoReplyEngine::default_rules();
        assert_eq!(engine.reply("hello there"), GREETING_REPLY);
    }

    #[test]
    fn unknown_text_gets_default() {
        let engine = AutoReplyEngine::default_rules();
        assert_eq!(engine.reply("asdfasdf"), DEFAULT_REPLY);
        assert_eq!(engine.reply(""), DEFAULT_REPLY);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let engine = AutoReplyEngine::default_rules();
        assert_eq!(engine.reply("HOW MUCH DOES IT COST"), PRICING_REPLY);
        assert_eq!(engine.reply("Do You Offer a DEMO"), TRIAL_REPLY);
    }

    #[test]
    fn later_groups_are_reachable() {
        let engine = AutoReplyEngine::default_rules();
        assert_eq!(engine.reply("thanks a lot"), THANKS_REPLY);
        assert_eq!(engine.reply("admission process?"), ENROLLMENT_REPLY);
        assert_eq!(engine.reply("Can I register today?"), ENROLLMENT_REPLY);
    }

    #[test]
    fn table_order_is_pinned() {
        let engine = AutoReplyEngine::default_rules();
        let topics: Vec<&str> = engine.rules().iter().map(|r| r.topic.as_str()).collect();
        assert_eq!(
            topics,
            vec![
                "pricing",
                "scheduling",
                "curriculum",
                "mode",
                "trial",
                "teachers",
                "contact",
                "greeting",
                "thanks",
                "enrollment",
            ]
        );
    }

    #[test]
    fn first_keyword_of_each_group_selects_that_group() {
        let engine = AutoReplyEngine::default_rules();
        for rule in engine.rules() {
            let hit = engine.matching_rule(&rule.keywords[0]).unwrap();
            assert_eq!(hit.topic, rule.topic, "keyword {}", rule.keywords[0]);
        }
    }

    #[test]
    fn earlier_group_wins_on_overlap() {
        let engine = AutoReplyEngine::default_rules();
        // greeting + pricing → pricing (earlier)
        assert_eq!(engine.reply("hello, what's the price?"), PRICING_REPLY);
        // greeting + thanks → greeting (earlier)
        assert_eq!(engine.reply("hey thanks"), GREETING_REPLY);
        // curriculum + enrollment → curriculum
        assert_eq!(engine.reply("can I enroll for grade 5"), CURRICULUM_REPLY);
        // scheduling + trial → scheduling
        assert_eq!(engine.reply("what time is the free demo"), SCHEDULING_REPLY);
    }

    #[test]
    fn greeting_keyword_hi_also_matches_inside_words() {
        let engine = AutoReplyEngine::default_rules();
        // "this" contains "hi"; kept as substring semantics
        assert_eq!(engine.reply("this"), GREETING_REPLY);
    }
}

//! Greeting phrases for the `hello` command

use std::fs;
use std::path::Path;

use chrono::Utc;

/// Reply used when the configured phrase file cannot be read
pub const FALLBACK_GREETING: &str = "How can I help you?";

const BUILTIN_PHRASES: &[&str] = &[
    "How can I help you?",
    "Hello! What shall we do with your contacts today?",
    "Hi there! Ready when you are.",
    "Good to see you! Need to add someone?",
    "Hey! Ask me about upcoming birthdays.",
];

/// Picks a greeting from a list of phrases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeter {
    phrases: Vec<String>,
}

impl Default for Greeter {
    fn default() -> Self {
        Self::new(BUILTIN_PHRASES.iter().map(|p| p.to_string()).collect())
    }
}

impl Greeter {
    /// Creates a greeter; blank phrases are dropped
    pub fn new(phrases: Vec<String>) -> Self {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if phrases.is_empty() {
            Self {
                phrases: vec![FALLBACK_GREETING.to_string()],
            }
        } else {
            Self { phrases }
        }
    }

    /// Reads phrases from a file, one per line, or uses the built-in list
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::new(content.lines().map(str::to_string).collect()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read greetings file");
                Self::new(vec![FALLBACK_GREETING.to_string()])
            }
        }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Returns the phrase selected by `seed`
    pub fn pick(&self, seed: &[u8]) -> &str {
        let hash = blake3::hash(seed);
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&hash.as_bytes()[..8]);
        let index = (u64::from_le_bytes(prefix) % self.phrases.len() as u64) as usize;
        &self.phrases[index]
    }

    /// Returns a phrase that varies from call to call
    pub fn greet(&self) -> &str {
        let now = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        self.pick(&now.to_le_bytes())
    }
}

//! Natural-language command interpreter.
//!
//! Free text is dispatched through an ordered list of independent
//! matchers; the first matcher to accept the text wins and no further
//! matchers run. Every matcher is a small, individually testable unit,
//! and the interpreter itself is pure: side effects (broadcasts, action
//! dispatch) happen in [`super::chat::ChatService`].

use std::fmt;

use crate::domain::action::{Location, ObjectInfo, RobotAction};

/// Canned reply announcing the location stream.
const LOCATION_REPLY: &str = "제가 지금 있는 위치를 보여드리겠습니다.";

/// Canned identity reply.
const IDENTITY_REPLY: &str =
    "안녕하세요! 저는 CLARA입니다. 컴퓨터를 제어하고 로봇을 조작하는 것을 도와드릴 수 있습니다.";

/// Canned greeting reply.
const GREETING_REPLY: &str = "안녕하세요! 무엇을 도와드릴까요?";

/// Canned multi-line usage reply.
const HELP_REPLY: &str = "다음과 같은 명령을 사용할 수 있습니다.

1. 물체 이동
   • \"[물체]를 [위치]로 옮겨줘\"
   • 예시: \"사과를 테이블 위로 옮겨줘\"

2. 위치 확인
   • \"어디야?\"
   • \"어디에 있어?\"

3. 기본 동작
   • \"홈 위치로 이동\"

도움이 필요하시면 \"도움말\" 또는 \"help\"를 입력해주세요.";

/// Canned fallback reply for text no matcher accepts.
const FALLBACK_REPLY: &str = "명령을 이해하지 못했습니다. '사과를 테이블 위로 옮겨줘'와 같은 \
     형식으로 말씀해 주세요. 도움말을 보시려면 'help'를 입력해주세요.";

/// Phrasings that ask where the robot is.
const LOCATION_PATTERNS: [&str; 7] = [
    "어디야",
    "어디에 있어",
    "어디 있어",
    "위치가 어디야",
    "지금 어디야",
    "지금 어디에 있어",
    "현재 위치",
];

/// Particles that may follow the location token, longest first so the
/// compound forms win over their suffixes.
const LOCATION_PARTICLES: [&str; 5] = ["위로", "위에", "으로", "로", "에"];

/// Verbs that complete a move command.
const MOVE_VERBS: [&str; 4] = ["옮겨줘", "옮겨", "놓아줘", "놓아"];

/// What a matcher decided to do with the input text.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Answer with canned text, no side effect.
    Reply(String),
    /// Answer with canned text and point the client at the live stream.
    ShowStream {
        /// The canned reply accompanying the stream reference.
        reply: String,
    },
    /// Dispatch an action through the executor.
    Dispatch(RobotAction),
}

/// A single dispatch rule: examine the text, optionally claim it.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns the intent if this matcher accepts the text.
    fn try_match(&self, text: &str) -> Option<Intent>;
}

/// Matches the fixed set of "where are you" phrasings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationQueryMatcher;

impl Matcher for LocationQueryMatcher {
    fn try_match(&self, text: &str) -> Option<Intent> {
        LOCATION_PATTERNS
            .iter()
            .any(|pattern| text.contains(pattern))
            .then(|| Intent::ShowStream {
                reply: LOCATION_REPLY.to_string(),
            })
    }
}

/// Matches "who are you" questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityQueryMatcher;

impl Matcher for IdentityQueryMatcher {
    fn try_match(&self, text: &str) -> Option<Intent> {
        (text.contains("너는 누구니") || text.contains("누구니"))
            .then(|| Intent::Reply(IDENTITY_REPLY.to_string()))
    }
}

/// Matches greetings in Korean or English.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingMatcher;

impl Matcher for GreetingMatcher {
    fn try_match(&self, text: &str) -> Option<Intent> {
        let lower = text.to_lowercase();
        (lower.contains("안녕") || lower.contains("hello"))
            .then(|| Intent::Reply(GREETING_REPLY.to_string()))
    }
}

/// Matches the help keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpMatcher;

impl Matcher for HelpMatcher {
    fn try_match(&self, text: &str) -> Option<Intent> {
        (text.contains("도움말") || text.to_lowercase().contains("help"))
            .then(|| Intent::Reply(HELP_REPLY.to_string()))
    }
}

/// Matches structured move phrases of the form
/// `<object>(을|를) <location>(위로|위에|으로|로|에) (옮겨줘|옮겨|놓아줘|놓아)`
/// and builds a `pick_and_place` action from the extracted tokens.
///
/// Particles may be suffixed directly to the location token
/// ("테이블로") or stand alone after whitespace ("테이블 위로").
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveCommandMatcher;

impl Matcher for MoveCommandMatcher {
    fn try_match(&self, text: &str) -> Option<Intent> {
        let (object, location) = parse_move_phrase(text)?;
        tracing::info!(%object, %location, "parsed move command");
        Some(Intent::Dispatch(RobotAction::pick_and_place(
            ObjectInfo::named(object),
            Location::named(location),
        )))
    }
}

/// Extracts `(object, location)` from a move phrase, or `None` if the
/// text is not one.
fn parse_move_phrase(text: &str) -> Option<(String, String)> {
    let tokens = tokenize(text);
    for (i, token) in tokens.iter().enumerate() {
        let Some((object, rest)) = split_at_object_particle(token) else {
            continue;
        };
        let tail = tokens.get(i + 1..).unwrap_or(&[]);

        let location = if rest.is_empty() {
            // "사과를 테이블로 옮겨줘" — location is the next token.
            let candidate = tail.first()?;
            match_location(candidate, tail.get(1..).unwrap_or(&[]))
        } else {
            // "사과를테이블로옮겨줘" — everything ran together.
            match_location(rest, tail)
        };

        if let Some(location) = location {
            return Some((object.to_string(), location));
        }
    }
    None
}

/// Splits a token at the object particle `을`/`를`, requiring a
/// non-empty object name before it. Binds the last occurrence so names
/// containing a particle syllable ("마을을" → 마을) keep their full
/// form.
fn split_at_object_particle(token: &str) -> Option<(&str, &str)> {
    for (i, c) in token.char_indices().rev() {
        if (c == '을' || c == '를') && i > 0 {
            let object = token.get(..i)?;
            let rest = token.get(i + c.len_utf8()..)?;
            return Some((object, rest));
        }
    }
    None
}

/// Resolves the location name from `candidate`, verifying that a move
/// verb follows the location particle. The particle binds at its last
/// occurrence, so a name like "에어컨에" splits into 에어컨 + 에 rather
/// than rejecting on the leading syllable.
fn match_location(candidate: &str, following: &[&str]) -> Option<String> {
    // Particle fused into the candidate: "테이블로", "테이블위로옮겨줘".
    for particle in LOCATION_PARTICLES {
        if let Some(pos) = candidate.rfind(particle) {
            if pos == 0 {
                continue;
            }
            let name = candidate.get(..pos)?;
            let remainder = candidate.get(pos + particle.len()..)?;
            if verb_follows(remainder, following) {
                return Some(name.to_string());
            }
        }
    }

    // Particle as its own token: "테이블 위로 옮겨줘".
    let next = following.first()?;
    for particle in LOCATION_PARTICLES {
        if let Some(remainder) = next.strip_prefix(particle)
            && verb_follows(remainder, following.get(1..).unwrap_or(&[]))
        {
            return Some(candidate.to_string());
        }
    }
    None
}

/// True when `remainder` (text directly after the particle) or the
/// next token begins with one of the move verbs.
fn verb_follows(remainder: &str, following: &[&str]) -> bool {
    if remainder.is_empty() {
        following.first().is_some_and(|token| begins_with_verb(token))
    } else {
        begins_with_verb(remainder)
    }
}

fn begins_with_verb(text: &str) -> bool {
    MOVE_VERBS.iter().any(|verb| text.starts_with(verb))
}

/// Splits text into runs of Hangul syllables and ASCII letters, the
/// character class the move phrase is built from.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if is_word_char(c) {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take()
            && let Some(token) = text.get(s..i)
        {
            tokens.push(token);
        }
    }
    if let Some(s) = start
        && let Some(token) = text.get(s..)
    {
        tokens.push(token);
    }
    tokens
}

const fn is_word_char(c: char) -> bool {
    matches!(c, '가'..='힣') || c.is_ascii_alphabetic()
}

/// Ordered first-match-wins dispatcher from free text to an [`Intent`].
#[derive(Debug)]
pub struct CommandInterpreter {
    matchers: Vec<Box<dyn Matcher>>,
}

impl CommandInterpreter {
    /// Creates the interpreter with the standard matcher priority:
    /// location query, identity, greeting, help, move command.
    #[must_use]
    pub fn new() -> Self {
        Self {
            matchers: vec![
                Box::new(LocationQueryMatcher),
                Box::new(IdentityQueryMatcher),
                Box::new(GreetingMatcher),
                Box::new(HelpMatcher),
                Box::new(MoveCommandMatcher),
            ],
        }
    }

    /// Dispatches `text` to the first accepting matcher, falling back
    /// to the "command not understood" reply.
    #[must_use]
    pub fn interpret(&self, text: &str) -> Intent {
        for matcher in &self.matchers {
            if let Some(intent) = matcher.try_match(text) {
                return intent;
            }
        }
        Intent::Reply(FALLBACK_REPLY.to_string())
    }
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

//! Categorical tokens and how they are shown.
//!
//! Categorical values arrive as upper-snake tokens (`LOGIN`,
//! `IN_PROGRESS`). Every place that shows or searches one goes through
//! [`canonical_label`] or the [`Vocabulary`] descriptor table, so that a
//! query typed against the on-screen label also finds the stored token.

use std::collections::BTreeMap;

use serde::Serialize;

/// Turn an internal token into its human-readable label.
///
/// Lowercases, replaces `_` and `-` separators with spaces, then
/// uppercases the first character: `"IN_PROGRESS"` becomes `"In progress"`.
pub fn canonical_label(token: &str) -> String {
    let spaced: String = token
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Display hints for one categorical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayDescriptor {
    pub label: String,
    pub color: &'static str,
    pub icon: &'static str,
}

impl DisplayDescriptor {
    /// Descriptor for a token nobody registered: canonical label, neutral styling.
    pub fn fallback(token: &str) -> Self {
        Self {
            label: canonical_label(token),
            color: NEUTRAL_COLOR,
            icon: NEUTRAL_ICON,
        }
    }
}

const NEUTRAL_COLOR: &str = "gray";
const NEUTRAL_ICON: &str = "circle";

/// A closed categorical enumeration with an escape hatch for unknown tokens.
pub trait Category: Sized {
    /// Record field this enumeration lives in.
    const FIELD: &'static str;

    /// All known variants, in display order.
    fn known() -> Vec<Self>;

    /// Parse a token; unknown tokens become the `Other` variant.
    fn from_token(token: &str) -> Self;

    /// The stored token.
    fn token(&self) -> &str;

    /// Display hints for this value.
    fn descriptor(&self) -> DisplayDescriptor;
}

/// Kind of operation recorded in the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Creation,
    Modification,
    Suppression,
    Login,
    Logout,
    Assignment,
    Other(String),
}

impl Category for ActionKind {
    const FIELD: &'static str = "action";

    fn known() -> Vec<Self> {
        vec![
            ActionKind::Creation,
            ActionKind::Modification,
            ActionKind::Suppression,
            ActionKind::Login,
            ActionKind::Logout,
            ActionKind::Assignment,
        ]
    }

    fn from_token(token: &str) -> Self {
        match token {
            "CREATION" => ActionKind::Creation,
            "MODIFICATION" => ActionKind::Modification,
            "SUPPRESSION" => ActionKind::Suppression,
            "LOGIN" => ActionKind::Login,
            "LOGOUT" => ActionKind::Logout,
            "ASSIGNMENT" => ActionKind::Assignment,
            other => ActionKind::Other(other.to_string()),
        }
    }

    fn token(&self) -> &str {
        match self {
            ActionKind::Creation => "CREATION",
            ActionKind::Modification => "MODIFICATION",
            ActionKind::Suppression => "SUPPRESSION",
            ActionKind::Login => "LOGIN",
            ActionKind::Logout => "LOGOUT",
            ActionKind::Assignment => "ASSIGNMENT",
            ActionKind::Other(token) => token.as_str(),
        }
    }

    fn descriptor(&self) -> DisplayDescriptor {
        let (color, icon) = match self {
            ActionKind::Creation => ("green", "plus"),
            ActionKind::Modification => ("blue", "pencil"),
            ActionKind::Suppression => ("red", "trash"),
            ActionKind::Login => ("teal", "log-in"),
            ActionKind::Logout => ("slate", "log-out"),
            ActionKind::Assignment => ("purple", "user-plus"),
            ActionKind::Other(token) => return DisplayDescriptor::fallback(token),
        };
        DisplayDescriptor {
            label: canonical_label(self.token()),
            color,
            icon,
        }
    }
}

/// Kind of entity an audit entry refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Task,
    User,
    Comment,
    Team,
    Other(String),
}

impl Category for EntityKind {
    const FIELD: &'static str = "entity";

    fn known() -> Vec<Self> {
        vec![
            EntityKind::Project,
            EntityKind::Task,
            EntityKind::User,
            EntityKind::Comment,
            EntityKind::Team,
        ]
    }

    fn from_token(token: &str) -> Self {
        match token {
            "PROJECT" => EntityKind::Project,
            "TASK" => EntityKind::Task,
            "USER" => EntityKind::User,
            "COMMENT" => EntityKind::Comment,
            "TEAM" => EntityKind::Team,
            other => EntityKind::Other(other.to_string()),
        }
    }

    fn token(&self) -> &str {
        match self {
            EntityKind::Project => "PROJECT",
            EntityKind::Task => "TASK",
            EntityKind::User => "USER",
            EntityKind::Comment => "COMMENT",
            EntityKind::Team => "TEAM",
            EntityKind::Other(token) => token.as_str(),
        }
    }

    fn descriptor(&self) -> DisplayDescriptor {
        let (color, icon) = match self {
            EntityKind::Project => ("indigo", "folder"),
            EntityKind::Task => ("amber", "check-square"),
            EntityKind::User => ("cyan", "user"),
            EntityKind::Comment => ("gray", "message-square"),
            EntityKind::Team => ("pink", "users"),
            EntityKind::Other(token) => return DisplayDescriptor::fallback(token),
        };
        DisplayDescriptor {
            label: canonical_label(self.token()),
            color,
            icon,
        }
    }
}

/// Workflow status of a task. Labels are the French ones shown on the boards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Todo,
    InProgress,
    InReview,
    Done,
    Blocked,
    Other(String),
}

impl Category for TaskStatus {
    const FIELD: &'static str = "status";

    fn known() -> Vec<Self> {
        vec![
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::InReview,
            TaskStatus::Done,
            TaskStatus::Blocked,
        ]
    }

    fn from_token(token: &str) -> Self {
        match token {
            "TODO" => TaskStatus::Todo,
            "IN_PROGRESS" => TaskStatus::InProgress,
            "IN_REVIEW" => TaskStatus::InReview,
            "DONE" => TaskStatus::Done,
            "BLOCKED" => TaskStatus::Blocked,
            other => TaskStatus::Other(other.to_string()),
        }
    }

    fn token(&self) -> &str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::InReview => "IN_REVIEW",
            TaskStatus::Done => "DONE",
            TaskStatus::Blocked => "BLOCKED",
            TaskStatus::Other(token) => token.as_str(),
        }
    }

    fn descriptor(&self) -> DisplayDescriptor {
        let (label, color, icon) = match self {
            TaskStatus::Todo => ("À faire", "gray", "circle"),
            TaskStatus::InProgress => ("En cours", "blue", "loader"),
            TaskStatus::InReview => ("En revue", "orange", "eye"),
            TaskStatus::Done => ("Terminé", "green", "check-circle"),
            TaskStatus::Blocked => ("Bloqué", "red", "alert-octagon"),
            TaskStatus::Other(token) => return DisplayDescriptor::fallback(token),
        };
        DisplayDescriptor {
            label: label.to_string(),
            color,
            icon,
        }
    }
}

/// Descriptor lookup table keyed by `(field, token)`.
///
/// Defined once and shared by everything that shows or searches a
/// categorical value.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: BTreeMap<(String, String), DisplayDescriptor>,
}

impl Vocabulary {
    /// An empty table: every token falls back to its canonical label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the built-in action, entity and task-status enumerations.
    pub fn standard() -> Self {
        let mut vocabulary = Self::new();
        vocabulary.register::<ActionKind>();
        vocabulary.register::<EntityKind>();
        vocabulary.register::<TaskStatus>();
        vocabulary
    }

    /// Add every known variant of an enumeration.
    pub fn register<C: Category>(&mut self) {
        for value in C::known() {
            self.insert(C::FIELD, value.token(), value.descriptor());
        }
    }

    /// Add or replace a single descriptor.
    pub fn insert(&mut self, field: &str, token: &str, descriptor: DisplayDescriptor) {
        self.entries
            .insert((field.to_string(), token.to_string()), descriptor);
    }

    /// Descriptor for a value, falling back to the canonical label.
    pub fn describe(&self, field: &str, token: &str) -> DisplayDescriptor {
        self.entries
            .get(&(field.to_string(), token.to_string()))
            .cloned()
            .unwrap_or_else(|| DisplayDescriptor::fallback(token))
    }

    /// Lowercased labels a search query may hit for this value.
    ///
    /// Always the canonical label; the registered label too when it differs.
    pub fn search_labels(&self, field: &str, token: &str) -> Vec<String> {
        let canonical = canonical_label(token).to_lowercase();
        let mut labels = vec![canonical];
        if let Some(descriptor) = self.entries.get(&(field.to_string(), token.to_string())) {
            let shown = descriptor.label.to_lowercase();
            if shown != labels[0] {
                labels.push(shown);
            }
        }
        labels
    }
}

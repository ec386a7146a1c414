use serde::{Deserialize, Serialize};
use std::fmt;

/// Portal a user signs in to.
///
/// Roles are disjoint: an admin session does not open the analyst portal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
    Admin,
    Analyst,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Instructor, Role::Admin, Role::Analyst];

    /// Parse the `role` field of a token response. Unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Some(Role::Student),
            "instructor" => Some(Role::Instructor),
            "admin" => Some(Role::Admin),
            "analyst" => Some(Role::Analyst),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
            Role::Admin => "admin",
            Role::Analyst => "analyst",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Instructor => "Instructor",
            Role::Admin => "Admin",
            Role::Analyst => "Analyst",
        }
    }

    /// Public login route for this portal.
    pub fn login_route(&self) -> String {
        format!("/{}/login", self.as_str())
    }

    pub fn dashboard_route(&self) -> String {
        format!("/{}/dashboard", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity and bearer credential held by the client.
///
/// All three fields are always present together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub role: Role,
    pub token: String,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role, user_id: i64) -> Self {
        Self {
            user_id,
            role,
            token: token.into(),
        }
    }

    /// Identity half of the session, as persisted under the `user` key.
    pub fn persisted_user(&self) -> PersistedUser {
        PersistedUser {
            user_id: self.user_id,
            role: self.role.as_str().to_string(),
        }
    }
}

/// Serialized `{user_id, role}` stored next to the token.
///
/// `role` stays a string so that a value written by another client version
/// deserializes and is then rejected by [`Role::parse`] instead of failing
/// the whole read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedUser {
    pub user_id: i64,
    pub role: String,
}

// ── Auth payloads ───────────────────────────────────────────────────

/// Response of every login and signup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub role: String,
    pub user_id: i64,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl TokenResponse {
    /// Convert into a session. Fails when the server reports a role this
    /// client does not know.
    pub fn into_session(self) -> Result<Session, crate::AppError> {
        let role = Role::parse(&self.role).ok_or_else(|| {
            crate::AppError::decode(format!("Unknown role in token response: {}", self.role))
        })?;
        Ok(Session::new(self.access_token, role, self.user_id))
    }
}

/// Login request shared by all four portals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email_id: String,
    pub password: String,
}

/// Self-service signup, students only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentSignupRequest {
    pub email_id: String,
    pub password: String,
    pub age: i32,
    pub skill_level: String,
    pub category: String,
    pub country: String,
}

/// Skill levels offered on the signup form.
pub const SKILL_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced"];

/// Student categories offered on the signup form.
pub const STUDENT_CATEGORIES: &[&str] = &["Undergraduate", "Postgraduate", "PhD", "Professional"];

pub const MIN_STUDENT_AGE: i32 = 15;
pub const MAX_STUDENT_AGE: i32 = 80;

impl StudentSignupRequest {
    /// Client-side checks run before the signup request is sent.
    pub fn validate(&self) -> Result<(), crate::AppError> {
        if self.email_id.trim().is_empty() || self.password.is_empty() {
            return Err(crate::AppError::validation("Email and password are required"));
        }
        if !(MIN_STUDENT_AGE..=MAX_STUDENT_AGE).contains(&self.age) {
            return Err(crate::AppError::validation(format!(
                "Age must be between {MIN_STUDENT_AGE} and {MAX_STUDENT_AGE}"
            )));
        }
        if !SKILL_LEVELS.contains(&self.skill_level.as_str()) {
            return Err(crate::AppError::validation("Choose a skill level"));
        }
        if self.country.trim().is_empty() {
            return Err(crate::AppError::validation("Country is required"));
        }
        Ok(())
    }
}

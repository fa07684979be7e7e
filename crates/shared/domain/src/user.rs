//! User account entity, input forms and validation rules.

use std::convert::Infallible;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::constants::UNSET_ID;
use crate::error::{DomainResult, Field, ValidationError};
use crate::password::Password;
use crate::sanitize;

// =============================================================================
// Validation rules
// =============================================================================

/// Context a user form is validated for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Action {
    #[default]
    Create,
    Update,
    Login,
}

/// Which fields an action requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    pub nickname: bool,
    pub password: bool,
    pub email: bool,
}

impl Action {
    /// Per-action requirement table.
    pub const fn rules(self) -> FieldRules {
        match self {
            Action::Create | Action::Update => FieldRules {
                nickname: true,
                password: true,
                email: true,
            },
            Action::Login => FieldRules {
                nickname: false,
                password: true,
                email: true,
            },
        }
    }
}

/// Case-insensitive; anything unrecognised means `Create`.
impl FromStr for Action {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "update" => Action::Update,
            "login" => Action::Login,
            _ => Action::Create,
        })
    }
}

/// Email must be present and syntactically valid.
pub fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::required(Field::Email));
    }
    if !email.validate_email() {
        return Err(ValidationError::invalid(Field::Email));
    }
    Ok(())
}

fn require(value: &str, field: Field) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::required(field))
    } else {
        Ok(())
    }
}

// =============================================================================
// Input forms
// =============================================================================

/// Untrusted user input (e.g. a request payload) on its way to storage.
///
/// `password` holds plaintext until [`UserForm::hash_password`] runs.
#[derive(Clone, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for UserForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserForm")
            .field("id", &self.id)
            .field("nickname", &self.nickname)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl UserForm {
    pub fn new(
        nickname: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UNSET_ID,
            nickname: nickname.into(),
            email: email.into(),
            password: password.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reset the id, sanitize nickname and email, and stamp both timestamps.
    pub fn prepare(&mut self) {
        self.id = UNSET_ID;
        self.nickname = sanitize::clean(&self.nickname);
        self.email = sanitize::clean(&self.email);
        let now = Utc::now();
        self.created_at = now;
        self.updated_at = now;
    }

    /// Check the fields `action` requires; the first failing rule wins.
    pub fn validate(&self, action: Action) -> Result<(), ValidationError> {
        let rules = action.rules();
        if rules.nickname {
            require(&self.nickname, Field::Nickname)?;
        }
        if rules.password {
            require(&self.password, Field::Password)?;
        }
        if rules.email {
            check_email(&self.email)?;
        }
        Ok(())
    }

    /// Replace the plaintext password with its hash.
    pub fn hash_password(&mut self) -> DomainResult<()> {
        self.password = Password::new(&self.password)?.into_string();
        Ok(())
    }
}

/// Partial update of an existing account.
///
/// Absent fields are left untouched. The password is re-hashed only when a
/// new plaintext is supplied.
#[derive(Clone, Default, Deserialize)]
pub struct UserPatch {
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPatch")
            .field("nickname", &self.nickname)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl UserPatch {
    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sanitize the text fields that are present.
    pub fn prepare(&mut self) {
        if let Some(nickname) = self.nickname.as_mut() {
            *nickname = sanitize::clean(nickname);
        }
        if let Some(email) = self.email.as_mut() {
            *email = sanitize::clean(email);
        }
    }

    /// Present fields obey the same rules as a full form.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(nickname) = &self.nickname {
            require(nickname, Field::Nickname)?;
        }
        if let Some(password) = &self.password {
            require(password, Field::Password)?;
        }
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        Ok(())
    }
}

// =============================================================================
// Stored entity
// =============================================================================

/// Persisted user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub nickname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check a login attempt against the stored hash.
    pub fn verify_password(&self, plain_text: &str) -> DomainResult<()> {
        Password::from_hash(self.password_hash.clone()).verify(plain_text)
    }
}

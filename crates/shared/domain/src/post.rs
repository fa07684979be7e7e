//! Blog post entity and input forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::UNSET_ID;
use crate::error::{Field, ValidationError};
use crate::sanitize;
use crate::user::User;

/// Untrusted post input on its way to storage.
#[derive(Debug, Clone, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_id: i32,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl PostForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: UNSET_ID,
            title: title.into(),
            content: content.into(),
            author_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reset the id, sanitize title and content, and stamp both timestamps.
    pub fn prepare(&mut self) {
        self.id = UNSET_ID;
        self.title = sanitize::clean(&self.title);
        self.content = sanitize::clean(&self.content);
        let now = Utc::now();
        self.created_at = now;
        self.updated_at = now;
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::required(Field::Title));
        }
        if self.content.is_empty() {
            return Err(ValidationError::required(Field::Content));
        }
        if self.author_id < 1 {
            return Err(ValidationError::required(Field::Author));
        }
        Ok(())
    }
}

/// Partial update of an existing post. Ownership never changes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn prepare(&mut self) {
        if let Some(title) = self.title.as_mut() {
            *title = sanitize::clean(title);
        }
        if let Some(content) = self.content.as_mut() {
            *content = sanitize::clean(content);
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.as_deref() == Some("") {
            return Err(ValidationError::required(Field::Title));
        }
        if self.content.as_deref() == Some("") {
            return Err(ValidationError::required(Field::Content));
        }
        Ok(())
    }
}

/// Persisted blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_owned_by(&self, author_id: i32) -> bool {
        self.author_id == author_id
    }
}

/// Post joined with its author
#[derive(Debug, Clone, Serialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_sanitizes_and_resets_id() {
        let mut form = PostForm::new("  <h1>Hello</h1> ", " body ", 3);
        form.id = 11;
        form.prepare();

        assert_eq!(form.id, UNSET_ID);
        assert_eq!(form.title, "&lt;h1&gt;Hello&lt;/h1&gt;");
        assert_eq!(form.content, "body");
        assert_eq!(form.author_id, 3);
    }

    #[test]
    fn test_validate_rules_in_order() {
        assert_eq!(
            PostForm::new("", "", 0).validate().unwrap_err(),
            ValidationError::required(Field::Title)
        );
        assert_eq!(
            PostForm::new("t", "", 0).validate().unwrap_err(),
            ValidationError::required(Field::Content)
        );
        assert_eq!(
            PostForm::new("t", "c", 0).validate().unwrap_err(),
            ValidationError::required(Field::Author)
        );
        assert!(PostForm::new("t", "c", 1).validate().is_ok());
    }

    #[test]
    fn test_patch_rejects_blanked_fields() {
        let mut patch = PostPatch::default().title("   ");
        patch.prepare();
        assert_eq!(
            patch.validate().unwrap_err(),
            ValidationError::required(Field::Title)
        );
        assert!(PostPatch::default().content("new").validate().is_ok());
    }

    #[test]
    fn test_ownership() {
        let post = Post {
            id: 1,
            title: "t".to_string(),
            content: "c".to_string(),
            author_id: 5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(post.is_owned_by(5));
        assert!(!post.is_owned_by(6));
    }
}

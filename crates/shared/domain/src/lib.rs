//! Domain layer - Core blog entities, input rules and credentials.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod password;
pub mod post;
pub mod sanitize;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult, Field, Problem, ValidationError};
pub use password::{hash, verify_password, Password};
pub use post::{Post, PostForm, PostPatch, PostWithAuthor};
pub use user::{Action, FieldRules, User, UserForm, UserPatch};

//! Service layer - account and post use cases.

mod post_service;
mod user_service;

pub use post_service::{PostManager, PostService};
pub use user_service::{UserManager, UserService};

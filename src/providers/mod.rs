pub mod dev_auth;
pub mod openai;
pub mod supabase;
pub mod traits;

pub use dev_auth::DevAuth;
pub use traits::{AuthError, Authenticator, ChatMessage, CompletionProvider, Role, Session};

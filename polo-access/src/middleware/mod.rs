pub mod access;
pub mod session;

pub use access::{require_access, require_general_access, require_module};
pub use session::{session_middleware, CurrentPrincipal};

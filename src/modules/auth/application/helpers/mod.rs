mod session_resolver;

pub use session_resolver::{SessionError, SessionResolver};

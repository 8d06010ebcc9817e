mod identity;

pub use identity::{access_denied, bearer_credential, CurrentIdentity, OptionalIdentity};

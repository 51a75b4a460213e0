/// Business logic that does not belong to a single handler
pub mod session;

pub use session::{IssuedSession, SessionIssuer};

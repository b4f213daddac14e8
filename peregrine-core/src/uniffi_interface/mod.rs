pub mod errors;
pub mod logging;
pub mod objects;
pub mod session;

pub use errors::CoachError;
pub use session::CoachSession;

//! Who is signed in, what role they carry, and where that survives between
//! runs. Keep the public surface thin and split implementation across
//! sub-modules.

mod profile;
mod session;
mod store;

pub use profile::{Role, UserProfile};
pub use session::{Session, SessionState};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoredCredentials};

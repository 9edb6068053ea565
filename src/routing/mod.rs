//! Route table, access policy, and the guards that apply it at the
//! navigation boundary.

mod guard;
mod policy;
mod route;

pub use guard::{protected, public, GuardOutcome};
pub use policy::{decide, Decision};
pub use route::Route;

pub mod peg;
pub mod result;
pub mod role;

pub use peg::PegEvent;
pub use result::{CategoryView, PersonResult, QuotaState, Remaining};
pub use role::{ParseRoleError, Role};

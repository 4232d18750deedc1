pub mod user;
pub mod page;
pub mod membership;
pub mod snapshot;

pub use user::*;
pub use page::*;
pub use membership::*;
pub use snapshot::*;

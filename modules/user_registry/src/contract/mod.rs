pub mod model;

pub use model::{CreatedUser, NewUser, SearchType, User, UserPatch};

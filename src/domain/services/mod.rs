//! Domain services - Pure business logic operations

mod profession_index;

pub use profession_index::{LookupFailure, ProfessionIndex};

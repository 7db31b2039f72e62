pub mod candidate;
pub mod poll;
pub mod vote_record;

pub use candidate::*;
pub use poll::*;
pub use vote_record::*;

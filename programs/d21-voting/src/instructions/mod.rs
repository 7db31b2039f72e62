// One file per instruction: the accounts it touches and the handler body

pub mod add_candidate;
pub mod cast_votes;
pub mod close_poll;
pub mod create_poll;
pub mod init_vote_record;

pub use add_candidate::*;
pub use cast_votes::*;
pub use close_poll::*;
pub use create_poll::*;
pub use init_vote_record::*;

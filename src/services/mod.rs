pub mod results;
pub mod votes;

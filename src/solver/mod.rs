pub mod exact;
pub mod greedy;

pub use exact::{chromatic_number, exact_coloring, first_proper_candidate, CandidateColorings};
pub use greedy::{greedy_coloring, VertexOrder};

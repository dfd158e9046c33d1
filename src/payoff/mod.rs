//! Payoff math: the blended-rate simulator, strategy ordering, the
//! month-by-month projection and the combined [`Plan`]. Everything here is
//! pure and synchronous.

mod error;
mod order;
mod plan;
mod projection;
mod simulate;

pub use error::{InputProblem, PayoffError};
pub use order::{focus, order};
pub use plan::Plan;
pub use projection::MAX_PROJECTION_MONTHS;

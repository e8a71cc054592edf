pub mod input;
pub mod plan;
pub mod sampling;

pub use input::{InputBundle, InputError};
pub use plan::{ChainResult, FinalDocument, Plan, PlanSource};
pub use sampling::SamplingConfig;

pub mod coordinator;
pub mod executor;

pub use coordinator::{JobReport, PipelineCoordinator};
pub use executor::{TranscodeExecutor, VariantResult, VariantStatus};

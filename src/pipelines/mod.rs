//! Workflow pipelines orchestrating stateless services.

pub mod encrypt;
pub mod scratch;
pub mod stage;

pub use encrypt::EncryptWorkflow;
pub use scratch::ScratchSpace;
pub use stage::PipelineStage;

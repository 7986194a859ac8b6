//! Deploy execution: invocation plan, tool runner and URL detection.

pub mod detect;
pub mod plan;
pub mod report;
pub mod runner;

pub use detect::detect_deploy_url;
pub use plan::DeployPlan;
pub use report::{DeployReport, EXIT_FAILURE, EXIT_SUCCESS};
pub use runner::{DeployError, OutputSink, RunOutcome, run_deploy};

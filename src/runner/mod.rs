pub mod case;
pub mod executor;
pub mod reporter;
pub mod types;

pub use case::{HandlerModifier, TestConfig, TestStatement, noop};
pub use executor::{assert_test_case, run_test_case, test_request, try_test_request};
pub use reporter::{Reporter, TestReporter};
pub use types::{CaseReport, Checkpoint, Stage, StageFailure, StatementOutcome};

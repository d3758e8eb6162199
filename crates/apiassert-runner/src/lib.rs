//! apiassert runner - executes fixture-driven API test cases
//!
//! Loads case records from JSON fixture files, sends each entity's request
//! through a [`Dispatcher`], checks the HTTP status and then verifies the
//! response body with the structural comparator or a registered handler.

pub mod config;
pub mod http;
pub mod loader;
pub mod model;
pub mod runner;

pub use config::{HttpConfig, RunnerConfig};
pub use http::{Dispatcher, HttpExchange, ReqwestDispatcher};
pub use loader::load_case;
pub use model::{AssertionFixture, Entity, Request, ResponseEnvelope, TestCase};
pub use runner::{CaseReport, CaseRunner, EntityOutcome};

//! Test infrastructure shared by unit and integration tests.


pub use context::TestContext;
pub use db::TestDb;

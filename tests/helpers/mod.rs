// Test helpers shared by integration and contract tests.
//
// Reports are computed against an in-memory catalog store seeded with the
// fixtures below, so most tests need no database. `test_database` loads the
// same fixtures into MySQL for the tests that exercise the SQL store.
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;


pub use test_data::*;
pub use test_database::*;

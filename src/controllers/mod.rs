//! State machines behind the admin screens.
//!
//! Controllers hold no transport handle: each mutating step returns the
//! remote call to perform as a value, and the response is fed back through
//! `apply`/`resolve`. The services module composes these steps with a
//! repository; tests drive them directly.

pub mod delete;
pub mod form;
pub mod list;

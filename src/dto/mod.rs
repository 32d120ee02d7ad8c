//! View-state snapshots crossing the rendering boundary.

pub mod vouchers;

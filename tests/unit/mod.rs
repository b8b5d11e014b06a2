//! Unit test modules.

mod picker_test;
mod session_test;
mod store_test;
mod tracks_test;

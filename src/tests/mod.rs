pub mod window_tests;
pub mod range_tests;
pub mod guard_tests;
pub mod literal_tests;

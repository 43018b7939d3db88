mod common;
mod create_tests;
mod show_data_tests;

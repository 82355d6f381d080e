pub mod json_file_option_store;
pub mod memory_option_store;
pub mod stored_scheduler;

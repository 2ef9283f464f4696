pub mod file_formats;
pub mod process;

pub mod http;
pub mod organization;
pub mod orgdirectory;

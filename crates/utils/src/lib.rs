pub mod forms;
pub mod response;

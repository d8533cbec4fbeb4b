pub mod camel;
pub mod common;
pub mod event;
pub mod owner;
pub mod race_loop;
pub mod race_result;
pub mod registration;

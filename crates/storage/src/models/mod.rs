mod camel;
mod event;
mod owner;
mod principal;
mod race_loop;
mod race_result;
mod registration;

pub use camel::{AgeClass, Camel, Sex};
pub use event::Event;
pub use owner::{BankDetails, Owner};
pub use principal::{Principal, Role};
pub use race_loop::RaceLoop;
pub use race_result::{RaceResult, ResultScope};
pub use registration::Registration;

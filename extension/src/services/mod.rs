pub mod messaging;
pub mod storage;

pub use messaging::{greet_background, ChromeMessenger, Messenger};
pub use storage::{ChromeStorage, CounterStore};

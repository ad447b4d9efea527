pub mod ledger_state;
pub mod schedules;

pub use ledger_state::*;
pub use schedules::*;

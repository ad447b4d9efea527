pub mod initialize_ledger;
pub mod deposit_tokens;
pub mod register_beneficiary;
pub mod activate_schedule;
pub mod release;
pub mod revoke;
pub mod emit_vested_quote;
pub mod admin_sweep;

pub use initialize_ledger::*;
pub use deposit_tokens::*;
pub use register_beneficiary::*;
pub use activate_schedule::*;
pub use release::*;
pub use revoke::*;
pub use emit_vested_quote::*;
pub use admin_sweep::*;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BONDING CURVE TOKEN (BCT) - REFERENCE LEDGER
//
// In-process token contract driven by the bct-core pricer.
// - Payable Mint: reserve in, tokens out along the curve
// - Burn: tokens in, reserve out (minus withdrawal fee)
// - Transfer, balance and quote queries
// - SharedToken: Arc<Mutex<_>> handle for concurrent callers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// Ledger state, ABI (actions/events/responses) and execution
pub mod token;
// Thread-safe handle
pub mod shared;

pub use shared::SharedToken;
pub use token::{
    validate_action, BctAction, BctEvent, BctResponse, BctToken, TokenMetadata, MUST_SEND_ETHER,
};

//! 积分账本模块

pub mod clock;
pub mod types;
#[allow(clippy::module_inception)]
mod ledger;

pub use clock::{Clock, IdGenerator, ManualClock, SequentialIds, SystemClock, UuidGenerator};
pub use types::{
    Dashboard, LeaderboardEntry, Page, RedemptionOutcome, RemittanceReceipt, RemittanceRequest,
    SendGiftRequest, TransactionQuery,
};
pub use ledger::{Ledger, REDEEM_SUCCESS_MESSAGE, gift_success_message};

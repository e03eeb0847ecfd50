pub mod countdown;
pub mod footer;
pub mod header;
pub mod quiz_card;
pub mod redeem_dialog;

use anchor_lang::prelude::*;

#[event]
pub struct EventCreated {
    pub event_id: u64,
    pub admin: Pubkey,
    pub fee: u64,
    pub metadata_cid: String,
    pub is_group_event: bool,
}

#[event]
pub struct UserRegistered {
    pub event_id: u64,
    pub participant_id: u64,
    pub participant: Pubkey,
    pub metadata_cid: String,
}

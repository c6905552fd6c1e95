pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod payment;
mod pda;
pub mod state;

use anchor_lang::prelude::*;

pub use instructions::*;

declare_id!("2HhdBxK6yiceTJnn8BnFZXcjmQtBVMM8uA1TQUdziW3d");

#[program]
pub mod event_registry {
    use super::*;

    /// Creates a new event.
    ///
    /// This instruction increments the global event counter in the `Registry`
    /// (creating it on first use) and initializes the `Event` account at the new id.
    /// The signer becomes the event admin.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The context containing all necessary accounts.
    /// * `fee` - The registration fee in lamports, paid to the admin. Zero for free events.
    /// * `metadata_cid` - Content identifier of the off-chain event metadata.
    /// * `is_group_event` - Whether the event is a group event.
    pub fn create_event(
        ctx: Context<CreateEvent>,
        fee: u64,
        metadata_cid: String,
        is_group_event: bool,
    ) -> Result<u64> {
        create_event_handler(ctx, fee, metadata_cid, is_group_event)
    }

    /// Registers the signer for an event.
    ///
    /// For paid events the instruction must be directly preceded by a System Program
    /// transfer of exactly the fee to the event admin. On success a `Ticket` and a
    /// `Participant` index entry are created and the event's participant counter
    /// advances.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The context containing all necessary accounts.
    /// * `event_id` - The ID of the event to register for.
    /// * `user_metadata_cid` - Content identifier of the registrant's off-chain profile.
    pub fn register_user(
        ctx: Context<RegisterUser>,
        event_id: u64,
        user_metadata_cid: String,
    ) -> Result<u64> {
        register_user_handler(ctx, event_id, user_metadata_cid)
    }

    /// Returns the wallet registered under `participant_id` for `event_id`.
    pub fn verify_ticket(
        ctx: Context<VerifyTicket>,
        event_id: u64,
        participant_id: u64,
    ) -> Result<Pubkey> {
        verify_ticket_handler(ctx, event_id, participant_id)
    }
}

use crate::{
    constants::{EVENT_SEED, TICKET_SEED},
    pda,
    state::{ticket_holder, Event, Ticket},
};
use anchor_lang::prelude::*;

/// Contextual accounts required to look up a ticket at check-in.
#[derive(Accounts)]
#[instruction(event_id: u64, participant_id: u64)]
pub struct VerifyTicket<'info> {
    /// CHECK: Address is checked by seeds; loaded in the handler.
    #[account(
        seeds = [EVENT_SEED, event_id.to_be_bytes().as_ref()],
        bump,
    )]
    pub event: UncheckedAccount<'info>,

    /// CHECK: Address is checked by seeds; loaded in the handler.
    #[account(
        seeds = [TICKET_SEED, event_id.to_be_bytes().as_ref(), participant_id.to_be_bytes().as_ref()],
        bump,
    )]
    pub ticket: UncheckedAccount<'info>,
}

/// Resolves a scanned (event id, participant id) pair to the registered wallet.
///
/// Read-only: the ticket is not marked or modified.
pub fn verify_ticket_handler(
    ctx: Context<VerifyTicket>,
    event_id: u64,
    participant_id: u64,
) -> Result<Pubkey> {
    let event: Option<Event> = pda::load(&ctx.accounts.event.to_account_info())?;
    let ticket: Option<Ticket> = pda::load(&ctx.accounts.ticket.to_account_info())?;
    let holder = ticket_holder(event.as_ref(), ticket.as_ref())?;

    msg!(
        "Ticket {} of event {} belongs to {}",
        participant_id,
        event_id,
        holder
    );

    Ok(holder)
}

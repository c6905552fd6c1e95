use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions as instructions_sysvar;

use crate::{
    constants::{EVENT_SEED, PARTICIPANT_SEED, TICKET_SEED},
    events::UserRegistered,
    payment::Payment,
    pda,
    state::{register, Event},
};

/// Contextual accounts required to register a user for an event.
#[derive(Accounts)]
#[instruction(event_id: u64)]
pub struct RegisterUser<'info> {
    /// The user registering. Must be a signer; pays rent for the new accounts.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The event being registered for.
    /// CHECK: Address is checked by seeds; the data is loaded in the handler so a
    /// missing event reports `EventNotFound`.
    #[account(
        mut,
        seeds = [EVENT_SEED, event_id.to_be_bytes().as_ref()],
        bump,
    )]
    pub event: UncheckedAccount<'info>,

    /// The (event, user) index entry. Created by this instruction; if it already
    /// exists the user is registered.
    /// CHECK: Address is checked by seeds; ownership is inspected in the handler.
    #[account(
        mut,
        seeds = [PARTICIPANT_SEED, event_id.to_be_bytes().as_ref(), user.key().as_ref()],
        bump,
    )]
    pub participant: UncheckedAccount<'info>,

    /// The ticket for the participant id this registration receives.
    /// CHECK: The PDA depends on the event's current counter and is verified in
    /// the handler before creation.
    #[account(mut)]
    pub ticket: UncheckedAccount<'info>,

    /// CHECK: Instructions sysvar, used to read the accompanying payment.
    #[account(address = instructions_sysvar::ID)]
    pub instructions: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Handles the logic for registering a user.
///
/// Every check runs in `state::register` before the first account is
/// written.
///
/// # Arguments
///
/// * `ctx` - The context containing all necessary accounts.
/// * `event_id` - The ID of the event to register for.
/// * `user_metadata_cid` - Content identifier of the registrant's off-chain profile.
///
/// # Returns
///
/// The participant id assigned within the event.
pub fn register_user_handler(
    ctx: Context<RegisterUser>,
    event_id: u64,
    user_metadata_cid: String,
) -> Result<u64> {
    let event_info = ctx.accounts.event.to_account_info();
    let payment = Payment::preceding(ctx.program_id, &ctx.accounts.instructions.to_account_info())?;
    let user = ctx.accounts.user.key();

    let registration = register(
        pda::load::<Event>(&event_info)?,
        user,
        user_metadata_cid,
        payment.as_ref(),
        pda::is_initialized(&ctx.accounts.participant.to_account_info()),
    )?;
    let participant_id = registration.participant_id;

    let ticket_bump = pda::check_ticket_address(
        ctx.program_id,
        &ctx.accounts.ticket.key(),
        event_id,
        participant_id,
    )?;

    let event_id_bytes = event_id.to_be_bytes();
    let participant_id_bytes = participant_id.to_be_bytes();
    let payer = ctx.accounts.user.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();

    // Ticket
    pda::create(
        &ctx.accounts.ticket.to_account_info(),
        &payer,
        &system_program,
        &[TICKET_SEED, &event_id_bytes, &participant_id_bytes, &[ticket_bump]],
        &registration.ticket(ticket_bump),
    )?;

    // Participant index
    let participant_bump = ctx.bumps.participant;
    pda::create(
        &ctx.accounts.participant.to_account_info(),
        &payer,
        &system_program,
        &[PARTICIPANT_SEED, &event_id_bytes, user.as_ref(), &[participant_bump]],
        &registration.participant(participant_bump),
    )?;

    // Event counter
    pda::store(&event_info, &registration.event)?;

    emit!(UserRegistered {
        event_id,
        participant_id,
        participant: user,
        metadata_cid: registration.metadata_cid,
    });
    msg!("User registered: event {} participant {}", event_id, participant_id);

    Ok(participant_id)
}

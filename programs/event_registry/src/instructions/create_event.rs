use crate::{
    constants::{DISCRIMINATOR_LENGHT, EVENT_SEED, REGISTRY_SEED},
    events::EventCreated,
    state::{Event, Registry},
};
use anchor_lang::prelude::*;

/// Contextual accounts required to create a new event.
#[derive(Accounts)]
pub struct CreateEvent<'info> {
    /// The registry root holding the global event counter.
    /// It is initialized by the first event creation.
    #[account(
        init_if_needed,
        payer = admin,
        space = DISCRIMINATOR_LENGHT + Registry::INIT_SPACE,
        seeds = [REGISTRY_SEED],
        bump
    )]
    pub registry: Account<'info, Registry>,

    /// The new event account, initialized by this instruction.
    /// The PDA is derived from the event id about to be minted.
    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_LENGHT + Event::INIT_SPACE,
        seeds = [EVENT_SEED, registry.pending_event_id().to_be_bytes().as_ref()],
        bump,
    )]
    pub event: Account<'info, Event>,

    /// The administrator creating the event. Must be a signer.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The system program, required for creating accounts.
    pub system_program: Program<'info, System>,
}

/// Handles the logic for creating a new event.
///
/// # Arguments
///
/// * `ctx` - The context containing all necessary accounts.
/// * `fee` - Lamports every registrant pays to the admin. Zero for a free event.
/// * `metadata_cid` - Content identifier of the off-chain event description.
/// * `is_group_event` - Classification flag, stored as given.
///
/// # Returns
///
/// The id assigned to the new event.
pub fn create_event_handler(
    ctx: Context<CreateEvent>,
    fee: u64,
    metadata_cid: String,
    is_group_event: bool,
) -> Result<u64> {
    let admin = ctx.accounts.admin.key();
    let registry = &mut ctx.accounts.registry;
    registry.bump = ctx.bumps.registry;
    let event = registry.create_event(
        admin,
        fee,
        metadata_cid.clone(),
        is_group_event,
        ctx.bumps.event,
    )?;
    let event_id = event.event_id;
    ctx.accounts.event.set_inner(event);

    emit!(EventCreated {
        event_id,
        admin,
        fee,
        metadata_cid,
        is_group_event,
    });
    msg!("Event created: {}", event_id);

    Ok(event_id)
}

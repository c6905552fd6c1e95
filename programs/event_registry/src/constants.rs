use anchor_lang::prelude::*;

/// The length of the discriminator for an Anchor account.
pub const DISCRIMINATOR_LENGHT: usize = 8;

/// Upper bound for an off-chain metadata CID, in bytes.
#[constant]
pub const MAX_METADATA_CID_LEN: usize = 96;

/// Seed for the singleton registry PDA holding the event counter.
#[constant]
pub const REGISTRY_SEED: &[u8] = b"registry";

/// Seed for the event PDA.
#[constant]
pub const EVENT_SEED: &[u8] = b"event";

/// Seed for the participant index PDA.
#[constant]
pub const PARTICIPANT_SEED: &[u8] = b"participant";

/// Seed for the ticket PDA.
#[constant]
pub const TICKET_SEED: &[u8] = b"ticket";

//! Reading the payment that accompanies a registration.
//!
//! A paid registration is sent as a transaction whose instruction directly
//! before `register_user` is a System Program transfer. The program only
//! inspects that transfer through the instructions sysvar; moving the
//! lamports is the runtime's job. Registrations reached through CPI never
//! see a payment.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{
    get_stack_height, Instruction, TRANSACTION_LEVEL_STACK_HEIGHT,
};
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};

/// `SystemInstruction::Transfer` variant index in the bincode encoding.
const SYSTEM_TRANSFER_TAG: u32 = 2;

/// Length of an encoded transfer: `u32` tag followed by `u64` lamports.
const SYSTEM_TRANSFER_DATA_LEN: usize = 12;

/// Amount and receiver of a lamport transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payment {
    pub amount: u64,
    pub receiver: Pubkey,
}

impl Payment {
    /// Decodes a System Program transfer. Any other instruction yields `None`.
    pub fn from_instruction(ix: &Instruction) -> Option<Self> {
        if ix.program_id != anchor_lang::system_program::ID
            || ix.data.len() != SYSTEM_TRANSFER_DATA_LEN
        {
            return None;
        }

        let tag = u32::from_le_bytes(ix.data[..4].try_into().ok()?);
        if tag != SYSTEM_TRANSFER_TAG {
            return None;
        }
        let amount = u64::from_le_bytes(ix.data[4..].try_into().ok()?);
        let receiver = ix.accounts.get(1)?.pubkey;

        Some(Self { amount, receiver })
    }

    /// Picks the payment for a registration from the executing top-level
    /// instruction and the one before it.
    ///
    /// When the top-level instruction belongs to another program, this
    /// program was reached through CPI and the transfer before it is not a
    /// payment for this registration.
    pub fn accompanying(
        program_id: &Pubkey,
        current: &Instruction,
        previous: Option<&Instruction>,
    ) -> Option<Self> {
        if current.program_id != *program_id {
            return None;
        }
        previous.and_then(Self::from_instruction)
    }

    /// Returns the transfer placed immediately before the executing
    /// instruction, if there is one and the registry was invoked directly by
    /// the transaction.
    pub fn preceding(program_id: &Pubkey, instructions_sysvar: &AccountInfo) -> Result<Option<Self>> {
        if get_stack_height() != TRANSACTION_LEVEL_STACK_HEIGHT {
            msg!("Registration reached through CPI; no accompanying payment");
            return Ok(None);
        }

        let current = load_current_index_checked(instructions_sysvar)?;
        let current_ix = load_instruction_at_checked(usize::from(current), instructions_sysvar)?;
        let previous_ix = match current.checked_sub(1) {
            Some(previous) => Some(load_instruction_at_checked(
                usize::from(previous),
                instructions_sysvar,
            )?),
            None => None,
        };

        Ok(Self::accompanying(program_id, &current_ix, previous_ix.as_ref()))
    }
}

//! Manual load/create for program accounts whose absence or presence is a
//! registry error rather than an account-validation failure.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{
    allocate, assign, create_account, transfer, Allocate, Assign, CreateAccount, Transfer,
};
use anchor_lang::Space;

use crate::{
    constants::{DISCRIMINATOR_LENGHT, TICKET_SEED},
    errors::RegistryError,
};

/// True once the account has been created and handed to this program.
pub fn is_initialized(info: &AccountInfo) -> bool {
    info.owner == &crate::ID && !info.data_is_empty()
}

/// Deserializes a program account, or `None` if it was never created.
pub fn load<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if !is_initialized(info) {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..]).map(Some)
}

/// Writes `value` (discriminator included) over the account data.
pub fn store<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer = &mut data[..];
    value.try_serialize(&mut writer)
}

/// The ticket address depends on the participant id being issued, so the
/// client's account is checked once that id is known. Returns the bump.
pub fn check_ticket_address(
    program_id: &Pubkey,
    given: &Pubkey,
    event_id: u64,
    participant_id: u64,
) -> Result<u8> {
    let (expected, bump) = Pubkey::find_program_address(
        &[
            TICKET_SEED,
            &event_id.to_be_bytes(),
            &participant_id.to_be_bytes(),
        ],
        program_id,
    );
    require_keys_eq!(*given, expected, RegistryError::AccountMismatch);
    Ok(bump)
}

/// Creates a rent-exempt PDA owned by this program and stores `value` in it.
///
/// A PDA can be pre-funded by anyone, so an address that already holds
/// lamports is topped up, allocated and assigned instead of created.
pub fn create<'info, T: AccountSerialize + Space>(
    account: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    signer_seeds: &[&[u8]],
    value: &T,
) -> Result<()> {
    let space = DISCRIMINATOR_LENGHT + T::INIT_SPACE;
    let rent = Rent::get()?.minimum_balance(space);
    let signer = &[signer_seeds];

    let current = account.lamports();
    if current == 0 {
        create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: account.clone(),
                },
                signer,
            ),
            rent,
            space as u64,
            &crate::ID,
        )?;
    } else {
        let top_up = rent.saturating_sub(current);
        if top_up > 0 {
            transfer(
                CpiContext::new(
                    system_program.clone(),
                    Transfer {
                        from: payer.clone(),
                        to: account.clone(),
                    },
                ),
                top_up,
            )?;
        }
        allocate(
            CpiContext::new_with_signer(
                system_program.clone(),
                Allocate {
                    account_to_allocate: account.clone(),
                },
                signer,
            ),
            space as u64,
        )?;
        assign(
            CpiContext::new_with_signer(
                system_program.clone(),
                Assign {
                    account_to_assign: account.clone(),
                },
                signer,
            ),
            &crate::ID,
        )?;
    }

    store(account, value)
}

use anchor_lang::prelude::*;

use crate::{constants::MAX_METADATA_CID_LEN, errors::RegistryError, payment::Payment};

/// Singleton root holding the number of events created so far.
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Registry {
    pub event_counter: u64,
    pub bump: u8,
}

impl Registry {
    /// Id the next event would receive. Only used to derive the new event's
    /// address; `open_event` performs the checked increment.
    pub fn pending_event_id(&self) -> u64 {
        self.event_counter.wrapping_add(1)
    }

    /// Mints the next event id.
    pub fn open_event(&mut self) -> Result<u64> {
        let event_id = self
            .event_counter
            .checked_add(1)
            .ok_or(RegistryError::NumericOverflow)?;
        self.event_counter = event_id;
        Ok(event_id)
    }

    /// Validates the inputs of a new event, mints its id and builds the
    /// record. On error the counter is unchanged.
    pub fn create_event(
        &mut self,
        admin: Pubkey,
        fee: u64,
        metadata_cid: String,
        is_group_event: bool,
        bump: u8,
    ) -> Result<Event> {
        validate_metadata_cid(&metadata_cid)?;
        let event_id = self.open_event()?;

        Ok(Event::new(
            event_id,
            admin,
            fee,
            metadata_cid,
            is_group_event,
            bump,
        ))
    }
}

#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Event {
    pub event_id: u64,
    pub admin: Pubkey,
    /// Lamports each registrant pays to `admin`. Zero means free.
    pub fee: u64,
    #[max_len(MAX_METADATA_CID_LEN)]
    pub metadata_cid: String,
    pub is_group_event: bool,
    pub next_participant_id: u64,
    pub bump: u8,
}

impl Event {
    pub fn new(
        event_id: u64,
        admin: Pubkey,
        fee: u64,
        metadata_cid: String,
        is_group_event: bool,
        bump: u8,
    ) -> Self {
        Self {
            event_id,
            admin,
            fee,
            metadata_cid,
            is_group_event,
            next_participant_id: 1,
            bump,
        }
    }

    /// Free events accept anything. Paid events need a transfer of exactly
    /// `fee` lamports to the admin.
    pub fn check_payment(&self, payment: Option<&Payment>) -> Result<()> {
        if self.fee == 0 {
            return Ok(());
        }

        match payment {
            Some(p) if p.amount == self.fee && p.receiver == self.admin => Ok(()),
            Some(p) => {
                msg!(
                    "Payment mismatch: expected {} to {}, got {} to {}",
                    self.fee,
                    self.admin,
                    p.amount,
                    p.receiver
                );
                err!(RegistryError::PaymentMismatch)
            }
            None => {
                msg!("Payment mismatch: no transfer precedes the registration");
                err!(RegistryError::PaymentMismatch)
            }
        }
    }

    /// Runs the registration checks in order and, when they all pass,
    /// consumes the next participant id.
    ///
    /// Only `self` is touched, so a failed admission leaves the event as it
    /// was and the caller has not written anything yet.
    pub fn admit(&mut self, payment: Option<&Payment>, already_registered: bool) -> Result<u64> {
        self.check_payment(payment)?;
        require!(!already_registered, RegistryError::AlreadyRegistered);

        let participant_id = self.next_participant_id;
        self.next_participant_id = participant_id
            .checked_add(1)
            .ok_or(RegistryError::NumericOverflow)?;

        Ok(participant_id)
    }
}

/// Index entry for one identity in one event. Its existence blocks a second
/// registration.
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Participant {
    pub event_id: u64,
    pub wallet: Pubkey,
    pub participant_id: u64,
    pub bump: u8,
}

#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Ticket {
    pub event_id: u64,
    pub participant_id: u64,
    pub participant: Pubkey,
    #[max_len(MAX_METADATA_CID_LEN)]
    pub metadata_cid: String,
    pub bump: u8,
}

/// Event metadata must point somewhere and fit the account.
pub fn validate_metadata_cid(cid: &str) -> Result<()> {
    require!(!cid.is_empty(), RegistryError::MetadataCidEmpty);
    validate_metadata_cid_len(cid)
}

/// Registrant metadata is opaque; only the account space bounds it.
pub fn validate_metadata_cid_len(cid: &str) -> Result<()> {
    require!(
        cid.len() <= MAX_METADATA_CID_LEN,
        RegistryError::MetadataCidTooLong
    );
    Ok(())
}

/// An accepted registration: the event with its advanced counter and
/// everything needed to build the ticket and index entry.
#[derive(Debug, PartialEq)]
pub struct Registration {
    pub event: Event,
    pub participant_id: u64,
    pub wallet: Pubkey,
    pub metadata_cid: String,
}

impl Registration {
    pub fn ticket(&self, bump: u8) -> Ticket {
        Ticket {
            event_id: self.event.event_id,
            participant_id: self.participant_id,
            participant: self.wallet,
            metadata_cid: self.metadata_cid.clone(),
            bump,
        }
    }

    pub fn participant(&self, bump: u8) -> Participant {
        Participant {
            event_id: self.event.event_id,
            wallet: self.wallet,
            participant_id: self.participant_id,
            bump,
        }
    }
}

/// Decides a registration from what is currently stored.
///
/// `event` is the loaded event account, if any, and `already_registered`
/// whether the (event, wallet) index entry exists. Checks run in order:
/// event exists, metadata fits, payment, duplicate, counter overflow. Nothing
/// is written here; the caller persists the returned records only on `Ok`.
pub fn register(
    event: Option<Event>,
    wallet: Pubkey,
    metadata_cid: String,
    payment: Option<&Payment>,
    already_registered: bool,
) -> Result<Registration> {
    let mut event = event.ok_or(RegistryError::EventNotFound)?;
    validate_metadata_cid_len(&metadata_cid)?;
    let participant_id = event.admit(payment, already_registered)?;

    Ok(Registration {
        event,
        participant_id,
        wallet,
        metadata_cid,
    })
}

/// Resolves a check-in lookup to the registered wallet.
pub fn ticket_holder(event: Option<&Event>, ticket: Option<&Ticket>) -> Result<Pubkey> {
    event.ok_or(RegistryError::EventNotFound)?;
    let ticket = ticket.ok_or(RegistryError::TicketNotFound)?;
    Ok(ticket.participant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            anchor_lang::error::Error::ProgramError(e) => panic!("unexpected {e:?}"),
        }
    }

    fn sample_event(admin: Pubkey, fee: u64) -> Event {
        Event::new(1, admin, fee, "bafy-event".to_string(), false, 255)
    }

    #[test]
    fn registry_counts_from_one() {
        let mut registry = Registry {
            event_counter: 0,
            bump: 254,
        };
        assert_eq!(registry.pending_event_id(), 1);
        assert_eq!(registry.open_event().unwrap(), 1);
        assert_eq!(registry.open_event().unwrap(), 2);
        assert_eq!(registry.event_counter, 2);
    }

    #[test]
    fn registry_refuses_to_wrap() {
        let mut registry = Registry {
            event_counter: u64::MAX,
            bump: 254,
        };
        let err = registry.open_event().unwrap_err();
        assert_eq!(code(err), u32::from(RegistryError::NumericOverflow));
        assert_eq!(registry.event_counter, u64::MAX);
    }

    #[test]
    fn new_event_starts_at_participant_one() {
        let event = Event::new(7, Pubkey::new_unique(), 0, "cid".to_string(), true, 1);
        assert_eq!(event.next_participant_id, 1);
        assert!(event.is_group_event);
    }

    #[test]
    fn free_event_ignores_payment() {
        let event = sample_event(Pubkey::new_unique(), 0);
        let stray = Payment {
            amount: 3,
            receiver: Pubkey::new_unique(),
        };
        assert!(event.check_payment(None).is_ok());
        assert!(event.check_payment(Some(&stray)).is_ok());
    }

    #[test]
    fn paid_event_needs_exact_amount_to_admin() {
        let admin = Pubkey::new_unique();
        let event = sample_event(admin, 100);

        let exact = Payment {
            amount: 100,
            receiver: admin,
        };
        assert!(event.check_payment(Some(&exact)).is_ok());

        for bad in [
            Payment {
                amount: 50,
                receiver: admin,
            },
            Payment {
                amount: 150,
                receiver: admin,
            },
            Payment {
                amount: 100,
                receiver: Pubkey::new_unique(),
            },
        ] {
            let err = event.check_payment(Some(&bad)).unwrap_err();
            assert_eq!(code(err), u32::from(RegistryError::PaymentMismatch));
        }

        let err = event.check_payment(None).unwrap_err();
        assert_eq!(code(err), u32::from(RegistryError::PaymentMismatch));
    }

    #[test]
    fn payment_is_checked_before_duplicate() {
        let mut event = sample_event(Pubkey::new_unique(), 100);
        let err = event.admit(None, true).unwrap_err();
        assert_eq!(code(err), u32::from(RegistryError::PaymentMismatch));
    }

    #[test]
    fn admit_hands_out_sequential_ids() {
        let mut event = sample_event(Pubkey::new_unique(), 0);
        assert_eq!(event.admit(None, false).unwrap(), 1);
        assert_eq!(event.admit(None, false).unwrap(), 2);
        assert_eq!(event.next_participant_id, 3);
    }

    #[test]
    fn rejected_admission_leaves_event_untouched() {
        let mut event = sample_event(Pubkey::new_unique(), 0);
        event.admit(None, false).unwrap();
        let before = event.clone();

        let err = event.admit(None, true).unwrap_err();
        assert_eq!(code(err), u32::from(RegistryError::AlreadyRegistered));
        assert_eq!(event, before);
    }

    #[test]
    fn admit_refuses_to_wrap() {
        let mut event = sample_event(Pubkey::new_unique(), 0);
        event.next_participant_id = u64::MAX;

        let err = event.admit(None, false).unwrap_err();
        assert_eq!(code(err), u32::from(RegistryError::NumericOverflow));
        assert_eq!(event.next_participant_id, u64::MAX);
    }

    #[test]
    fn create_event_validates_before_counting() {
        let mut registry = Registry {
            event_counter: 4,
            bump: 254,
        };
        let admin = Pubkey::new_unique();

        let err = registry
            .create_event(admin, 10, String::new(), false, 1)
            .unwrap_err();
        assert_eq!(code(err), u32::from(RegistryError::MetadataCidEmpty));
        assert_eq!(registry.event_counter, 4);

        let event = registry
            .create_event(admin, 10, "bafy".to_string(), true, 1)
            .unwrap();
        assert_eq!(event.event_id, 5);
        assert_eq!(event.admin, admin);
        assert_eq!(event.next_participant_id, 1);
        assert_eq!(registry.event_counter, 5);
    }

    #[test]
    fn register_reports_missing_event_first() {
        // Oversized metadata, no payment and a duplicate flag all lose to the
        // missing event.
        let err = register(
            None,
            Pubkey::new_unique(),
            "x".repeat(MAX_METADATA_CID_LEN + 1),
            None,
            true,
        )
        .unwrap_err();
        assert_eq!(code(err), u32::from(RegistryError::EventNotFound));
    }

    #[test]
    fn register_accepts_empty_user_metadata() {
        let event = sample_event(Pubkey::new_unique(), 0);
        let wallet = Pubkey::new_unique();

        let registration = register(Some(event), wallet, String::new(), None, false).unwrap();

        assert_eq!(registration.participant_id, 1);
        assert_eq!(registration.ticket(9).metadata_cid, "");
        assert_eq!(registration.ticket(9).participant, wallet);
    }

    #[test]
    fn register_builds_records_for_the_issued_id() {
        let mut event = sample_event(Pubkey::new_unique(), 0);
        event.next_participant_id = 4;
        let wallet = Pubkey::new_unique();

        let registration =
            register(Some(event), wallet, "bafy-user".to_string(), None, false).unwrap();

        assert_eq!(registration.event.next_participant_id, 5);
        assert_eq!(
            registration.ticket(7),
            Ticket {
                event_id: 1,
                participant_id: 4,
                participant: wallet,
                metadata_cid: "bafy-user".to_string(),
                bump: 7,
            }
        );
        assert_eq!(
            registration.participant(8),
            Participant {
                event_id: 1,
                wallet,
                participant_id: 4,
                bump: 8,
            }
        );
    }

    #[test]
    fn ticket_holder_lookup() {
        let event = sample_event(Pubkey::new_unique(), 0);
        let wallet = Pubkey::new_unique();
        let ticket = register(Some(event.clone()), wallet, "cid".to_string(), None, false)
            .unwrap()
            .ticket(1);

        assert_eq!(ticket_holder(Some(&event), Some(&ticket)).unwrap(), wallet);

        let err = ticket_holder(Some(&event), None).unwrap_err();
        assert_eq!(code(err), u32::from(RegistryError::TicketNotFound));

        let err = ticket_holder(None, Some(&ticket)).unwrap_err();
        assert_eq!(code(err), u32::from(RegistryError::EventNotFound));
    }

    #[test]
    fn metadata_cid_bounds() {
        assert!(validate_metadata_cid("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG").is_ok());

        let err = validate_metadata_cid("").unwrap_err();
        assert_eq!(code(err), u32::from(RegistryError::MetadataCidEmpty));

        let longest = "a".repeat(MAX_METADATA_CID_LEN);
        assert!(validate_metadata_cid(&longest).is_ok());

        let err = validate_metadata_cid(&format!("{longest}a")).unwrap_err();
        assert_eq!(code(err), u32::from(RegistryError::MetadataCidTooLong));

        assert!(validate_metadata_cid_len("").is_ok());
        let err = validate_metadata_cid_len(&format!("{longest}a")).unwrap_err();
        assert_eq!(code(err), u32::from(RegistryError::MetadataCidTooLong));
    }
}

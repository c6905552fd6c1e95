use anchor_lang::prelude::*;

#[error_code]
pub enum RegistryError {
    #[msg("Event not found")]
    EventNotFound,
    #[msg("Payment amount or receiver does not match the event fee")]
    PaymentMismatch,
    #[msg("Already registered for this event")]
    AlreadyRegistered,
    #[msg("Numeric overflow")]
    NumericOverflow,

    #[msg("Metadata CID must not be empty")]
    MetadataCidEmpty,
    #[msg("Metadata CID is too long")]
    MetadataCidTooLong,

    #[msg("Account address does not match its expected PDA")]
    AccountMismatch,
    #[msg("Ticket not found")]
    TicketNotFound,
}

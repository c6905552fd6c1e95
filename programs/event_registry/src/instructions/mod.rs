pub mod create_event;
pub mod register_user;
pub mod verify_ticket;

pub use create_event::*;
pub use register_user::*;
pub use verify_ticket::*;

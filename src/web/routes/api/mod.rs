pub mod waitlist;

pub use waitlist::{waitlist, waitlist_preflight};

pub mod catalog;
pub mod pricing;
pub mod waitlist_entry;

pub mod stacks;
pub mod waitlist;

pub mod insight;
pub mod record;

pub(super) mod deck;
pub(super) mod help;

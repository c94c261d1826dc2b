// Pipelines — end-to-end runs over a built model.

pub mod simulate;
pub mod sweep;

pub(crate) mod health;
pub(crate) mod history;
pub(crate) mod predict;
pub(crate) mod symbols;

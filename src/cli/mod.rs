pub(crate) mod args;
pub(crate) mod commands;

pub(crate) use args::{Cli, OnError};
pub(crate) use commands::Commands;

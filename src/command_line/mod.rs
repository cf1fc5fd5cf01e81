pub(crate) mod cli;

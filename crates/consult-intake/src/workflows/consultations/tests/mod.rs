pub(crate) mod common;

mod intake;
mod scoring;

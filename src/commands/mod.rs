use crate::{Data, Error};

pub mod memory;

pub fn load_all() -> Vec<poise::Command<Data, Error>> {
    vec![memory::memory()]
}

pub mod emoji;

pub mod colors {
    use poise::serenity_prelude::Colour;

    pub const MOON: Colour = Colour::new(0xA6B1E1);
    pub const MINT: Colour = Colour::new(0x4ECCA3);
}

pub use emoji::icon;

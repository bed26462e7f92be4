pub mod assets;
pub mod audio;
pub mod ui;

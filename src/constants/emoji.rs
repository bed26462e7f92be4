pub mod icon {
    pub const CHECK: &str = "✅";
    pub const ERROR: &str = "⛔";
    pub const BELL: &str = "🔔";
    pub const TIMER: &str = "⏳";
    pub const GIFT: &str = "🎁";
    pub const MISTAKE: &str = "❌";
    pub const SOUND: &str = "🔊";
    pub const SHUFFLE: &str = "🔀";
}

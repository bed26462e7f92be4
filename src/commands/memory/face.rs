use crate::functions::assets::AssetPaths;
use rand::{Rng, seq::SliceRandom};

const EMOJI_POOL: [&str; 40] = [
    "🍎", "🍌", "🍇", "🍒", "🍋", "🍉", "🍓", "🍑", "🥥", "🥝", "🍊", "🍍", "🥕", "🌽", "🥦", "🍪",
    "🌶️", "🍆", "🥔", "🧄", "🧅", "🍄", "🧀", "🥨", "🍿", "🍩", "🍰", "🧁", "🍫", "🍯", "🍭", "🍡",
    "🍙", "🍣", "🍤", "🍕", "🍔", "🌮", "🥐", "🥞",
];

#[derive(Clone, Copy, Debug, Eq, PartialEq, poise::ChoiceParameter)]
pub enum FaceKind {
    #[name = "emoji"]
    Emoji,
    #[name = "números"]
    Index,
    #[name = "imagens"]
    Image,
}

impl FaceKind {
    /// Parses the `PAIRS_FACES` setting.
    pub fn from_setting(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "emoji" => Some(Self::Emoji),
            "index" => Some(Self::Index),
            "image" => Some(Self::Image),
            _ => None,
        }
    }
}

/// What a tile shows once revealed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Face {
    Emoji(&'static str),
    Index(usize),
    Image { key: usize, url: String },
}

impl Face {
    pub fn label(&self) -> String {
        match self {
            Face::Emoji(emoji) => (*emoji).to_string(),
            Face::Index(number) => number.to_string(),
            Face::Image { key, .. } => format!("🖼️ {key}"),
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            Face::Image { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Picks `pairs` distinct faces of the given kind. Emoji are drawn at random
/// from the pool; numbers and images are keyed `1..=pairs`. Returns `None`
/// when images are asked for but no image base is configured.
pub fn deal<R: Rng + ?Sized>(
    kind: FaceKind,
    pairs: usize,
    assets: &AssetPaths,
    rng: &mut R,
) -> Option<Vec<Face>> {
    match kind {
        FaceKind::Emoji => {
            let mut emojis = EMOJI_POOL.to_vec();
            emojis.shuffle(rng);
            Some(emojis.into_iter().take(pairs).map(Face::Emoji).collect())
        }
        FaceKind::Index => Some((1..=pairs).map(Face::Index).collect()),
        FaceKind::Image => (1..=pairs)
            .map(|key| assets.image_url(key).map(|url| Face::Image { key, url }))
            .collect(),
    }
}

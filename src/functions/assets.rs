use std::fmt::Display;

/// Maps logical asset keys to concrete URLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPaths {
    image_base: Option<String>,
    sound_base: String,
}

impl AssetPaths {
    pub fn new(image_base: Option<String>, sound_base: impl Into<String>) -> Self {
        Self {
            image_base: image_base
                .map(|base| base.trim_end_matches('/').to_string())
                .filter(|base| !base.is_empty()),
            sound_base: sound_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn has_images(&self) -> bool {
        self.image_base.is_some()
    }

    /// `None` when no image base is configured.
    pub fn image_url(&self, key: impl Display) -> Option<String> {
        self.image_base
            .as_ref()
            .map(|base| format!("{base}/images/donkey_{key}.png"))
    }

    pub fn sound_url(&self, name: &str) -> String {
        format!("{}/{}", self.sound_base, name.trim_start_matches('/'))
    }

    /// Base of image URLs that Discord could not fetch, if any.
    pub fn relative_image_base(&self) -> Option<&str> {
        self.image_base.as_deref().filter(|base| !is_web_url(base))
    }
}

/// Discord only accepts `http(s)` links in embeds.
pub fn is_web_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_image_urls_from_base() {
        let assets = AssetPaths::new(Some("https://cdn.test/pairs/".into()), "/public/sounds");
        assert!(assets.has_images());
        assert_eq!(
            assets.image_url(3).as_deref(),
            Some("https://cdn.test/pairs/images/donkey_3.png")
        );
    }

    #[test]
    fn images_need_a_base() {
        let assets = AssetPaths::new(None, "/public/sounds");
        assert!(!assets.has_images());
        assert_eq!(assets.image_url(1), None);

        let blank = AssetPaths::new(Some("/".into()), "/public/sounds");
        assert!(!blank.has_images());
    }

    #[test]
    fn flags_image_base_without_scheme() {
        let local = AssetPaths::new(Some("/public".into()), "/public/sounds");
        assert_eq!(local.relative_image_base(), Some("/public"));

        let remote = AssetPaths::new(Some("http://cdn.test".into()), "/public/sounds");
        assert_eq!(remote.relative_image_base(), None);
        assert_eq!(AssetPaths::new(None, "/s").relative_image_base(), None);
    }

    #[test]
    fn joins_sound_names_with_single_slash() {
        let assets = AssetPaths::new(None, "/public/sounds/");
        assert_eq!(assets.sound_url("win_1.ogg"), "/public/sounds/win_1.ogg");
        assert_eq!(assets.sound_url("/wrong_2.ogg"), "/public/sounds/wrong_2.ogg");
    }
}

/// Builds public URLs for bundled images and stored files.
pub trait AssetResolver: Send + Sync {
    fn image_url(&self, image: &str, component: &str) -> String;

    /// URL that serves a stored file through the file-serving callback.
    fn file_url(&self, pathname: &str) -> String;
}

#[derive(Clone, Debug)]
pub struct SiteAssets {
    wwwroot: String,
    theme: String,
}

impl SiteAssets {
    pub fn new(wwwroot: impl Into<String>) -> Self {
        let wwwroot = wwwroot.into().trim_end_matches('/').to_owned();
        Self {
            wwwroot,
            theme: "boost".to_owned(),
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn wwwroot(&self) -> &str {
        &self.wwwroot
    }
}

impl AssetResolver for SiteAssets {
    fn image_url(&self, image: &str, component: &str) -> String {
        format!(
            "{}/theme/image.php/{}/{}/1/{}",
            self.wwwroot, self.theme, component, image
        )
    }

    fn file_url(&self, pathname: &str) -> String {
        let encoded = pathname
            .split('/')
            .map(urlencoding::encode)
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/pluginfile.php{}", self.wwwroot, encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::{AssetResolver, SiteAssets};

    #[test]
    fn urls_are_built_from_site_root() {
        let assets = SiteAssets::new("https://lms.example.org/");
        assert_eq!(
            assets.image_url("avatar_gris-8", "block_ludifica"),
            "https://lms.example.org/theme/image.php/boost/block_ludifica/1/avatar_gris-8"
        );
        assert_eq!(
            assets.file_url("/1/block_ludifica/avatarbust/3/fox.png"),
            "https://lms.example.org/pluginfile.php/1/block_ludifica/avatarbust/3/fox.png"
        );
    }

    #[test]
    fn file_path_segments_are_encoded() {
        let assets = SiteAssets::new("https://lms.example.org");
        assert_eq!(
            assets.file_url("/1/block_ludifica/avatarbust/3/red fox#2.png"),
            "https://lms.example.org/pluginfile.php/1/block_ludifica/avatarbust/3/red%20fox%232.png"
        );
    }

    #[test]
    fn theme_can_be_overridden() {
        let assets = SiteAssets::new("https://lms.example.org").with_theme("classic");
        assert_eq!(
            assets.image_url("avatar_gris-8", "block_ludifica"),
            "https://lms.example.org/theme/image.php/classic/block_ludifica/1/avatar_gris-8"
        );
    }
}

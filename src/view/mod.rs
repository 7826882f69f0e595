use std::path::{Path, PathBuf};

use crate::post::Post;

pub mod list_renderer;
pub mod post_renderer;
pub mod page_renderer;
pub mod rss_renderer;

#[derive(ramhorns::Content)]
pub struct SiteHeader<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub on_home: bool,
    pub on_movies: bool,
    pub on_about: bool,
}

/// Listing of posts carrying `tag`, percent-encoded as one path segment
pub fn tag_link(tag: &str) -> String {
    format!("/tag/{}/", urlencoding::encode(tag))
}

#[derive(ramhorns::Content)]
pub struct ViewTag<'a> {
    pub tag: &'a str,
    pub tag_link: String,
}

impl<'a> ViewTag<'a> {
    pub fn from_tags(tags: &'a [String]) -> Vec<ViewTag<'a>> {
        tags.iter()
            .map(|t| ViewTag { tag: t.as_str(), tag_link: tag_link(t) })
            .collect()
    }
}

#[derive(ramhorns::Content)]
pub struct PostCard<'a> {
    pub id: u32,
    pub link: String,
    pub title: &'a str,
    pub date: &'a str,
    pub has_image: bool,
    pub image: String,
    pub excerpt: &'a str,
    pub tags: Vec<ViewTag<'a>>,
    pub reading_time: u32,
    pub likes: u64,
}

impl<'a> PostCard<'a> {
    pub fn new(post: &'a Post, images: &ImageProbe, likes: u64) -> Self {
        let image = images.resolve(&post.image);
        PostCard {
            id: post.id.0,
            link: format!("/post/{}/", post.id),
            title: post.title.as_str(),
            date: post.date.as_str(),
            has_image: image.is_some(),
            image: image.unwrap_or_default(),
            excerpt: post.excerpt(),
            tags: ViewTag::from_tags(&post.tags),
            reading_time: post.reading_time(),
            likes,
        }
    }
}

/// Decides whether an image can be shown or a placeholder is needed.
/// Remote images are trusted, local ones must exist under `<public_dir>/images`.
pub struct ImageProbe {
    images_dir: PathBuf,
}

impl ImageProbe {
    pub fn new(public_dir: &Path) -> Self {
        ImageProbe { images_dir: public_dir.join("images") }
    }

    pub fn resolve(&self, image: &str) -> Option<String> {
        let image = image.trim();
        if image.starts_with("https://") || image.starts_with("http://") {
            return Some(image.to_string());
        }

        let file_name = image.trim_start_matches('/').strip_prefix("images/")?;
        if file_name.is_empty() || file_name.contains("..") {
            return None;
        }

        if self.images_dir.join(file_name).is_file() {
            Some(format!("/images/{}", file_name))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use super::*;

    #[test]
    fn test_tag_link() {
        assert_eq!(tag_link("film"), "/tag/film/");
        assert_eq!(tag_link("c#"), "/tag/c%23/");
        assert_eq!(tag_link("a/b?c"), "/tag/a%2Fb%3Fc/");
        assert_eq!(tag_link("road trip"), "/tag/road%20trip/");

        let tags = vec!["sci/fi".to_string()];
        let view_tags = ViewTag::from_tags(&tags);
        assert_eq!(view_tags[0].tag, "sci/fi");
        assert_eq!(view_tags[0].tag_link, "/tag/sci%2Ffi/");
    }

    #[test]
    fn test_image_probe() {
        let public_dir = env::temp_dir().join(format!("silentframe-images-{}", std::process::id()));
        fs::create_dir_all(public_dir.join("images")).unwrap();
        fs::write(public_dir.join("images").join("byme.jpg"), b"jpg").unwrap();

        let probe = ImageProbe::new(&public_dir);
        assert_eq!(probe.resolve("/images/byme.jpg"), Some("/images/byme.jpg".to_string()));
        assert_eq!(probe.resolve("images/byme.jpg"), Some("/images/byme.jpg".to_string()));
        assert_eq!(probe.resolve("https://example.com/a.jpg"), Some("https://example.com/a.jpg".to_string()));
        assert_eq!(probe.resolve(""), None);
        assert_eq!(probe.resolve("/images/missing.jpg"), None);
        assert_eq!(probe.resolve("/images/../images/byme.jpg"), None);
        assert_eq!(probe.resolve("/elsewhere/byme.jpg"), None);

        fs::remove_dir_all(&public_dir).unwrap();
    }
}

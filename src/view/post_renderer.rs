use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::post::Post;
use crate::view::{ImageProbe, SiteHeader, ViewTag};

#[derive(ramhorns::Content)]
struct ViewParagraph<'a> {
    text: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    site: SiteHeader<'a>,
    id: u32,
    post_title: &'a str,
    date: &'a str,
    reading_time: u32,
    likes: u64,
    has_image: bool,
    image: String,
    paragraphs: Vec<ViewParagraph<'a>>,
    tags: Vec<ViewTag<'a>>,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    pub fn render(&self, site: SiteHeader, post: &Post, images: &ImageProbe, likes: u64) -> String {
        let image = images.resolve(&post.image);
        let paragraphs = post.paragraphs().into_iter()
            .map(|text| ViewParagraph { text })
            .collect();

        self.template.render(&ViewItem {
            site,
            id: post.id.0,
            post_title: post.title.as_str(),
            date: post.date.as_str(),
            reading_time: post.reading_time(),
            likes,
            has_image: image.is_some(),
            image: image.unwrap_or_default(),
            paragraphs,
            tags: ViewTag::from_tags(&post.tags),
        })
    }
}

use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::view::{PostCard, SiteHeader, ViewTag};

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    site: SiteHeader<'a>,
    heading: &'a str,
    query: &'a str,
    featured: Vec<PostCard<'a>>,
    post_list: Vec<PostCard<'a>>,
    no_results: bool,
    tags: Vec<ViewTag<'a>>,
    page_list: Vec<ViewPagination>,
    show_pagination: bool,
}

#[derive(ramhorns::Content)]
struct ViewPagination {
    current: bool,
    number: u32,
    link: String,
}

/// What goes in one rendered listing page
pub struct ListView<'a> {
    pub heading: &'a str,
    pub query: &'a str,
    pub featured: Option<PostCard<'a>>,
    pub post_list: Vec<PostCard<'a>>,
    pub tags: &'a [String],
    pub cur_page: u32,
    pub page_count: u32,
    /// Link prefix for pagination, `?page=N` is appended
    pub page_link: String,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    pub fn render(&self, site: SiteHeader, view: ListView) -> String {
        let separator = if view.page_link.contains('?') { '&' } else { '?' };
        let page_list: Vec<ViewPagination> = (1..=view.page_count)
            .map(|number| ViewPagination {
                current: number == view.cur_page,
                number,
                link: format!("{}{}page={}", view.page_link, separator, number),
            })
            .collect();

        let no_results = view.featured.is_none() && view.post_list.is_empty();
        self.template.render(&ListPage {
            site,
            heading: view.heading,
            query: view.query,
            featured: view.featured.into_iter().collect(),
            post_list: view.post_list,
            no_results,
            tags: ViewTag::from_tags(view.tags),
            page_list,
            show_pagination: view.page_count > 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::post::{Post, PostId};
    use crate::test_data::{POST_DATA, POST_RAIN};
    use crate::view::ImageProbe;

    use super::*;

    const TEMPLATE: &str = "{{#site}}[{{title}}]{{/site}}\
{{#featured}}FEATURED=({{title}}|{{excerpt}}|{{likes}}|{{#has_image}}img{{/has_image}}{{^has_image}}no-img{{/has_image}}){{/featured}}\
LIST={{#post_list}}({{link}}|{{title}}|{{date}}|{{reading_time}}|{{#tags}}#{{tag}}{{/tags}}){{/post_list}}\
{{#no_results}}EMPTY{{/no_results}}\
{{#show_pagination}}PAGES={{#page_list}}{{#current}}*{{/current}}{{link}};{{/page_list}}{{/show_pagination}}\
Q=[{{query}}]";

    fn site() -> SiteHeader<'static> {
        SiteHeader { title: "Frame", subtitle: "", on_home: true, on_movies: false, on_about: false }
    }

    #[test]
    fn render_home() {
        let featured = Post::parse(PostId(1), "standbyme.txt", POST_DATA);
        let rain = Post::parse(PostId(2), "rain.txt", POST_RAIN);
        let probe = ImageProbe::new(Path::new("/nonexistent"));
        let renderer = ListRenderer::new(TEMPLATE).unwrap();

        let tags: Vec<String> = vec![];
        let rendered = renderer.render(site(), ListView {
            heading: "",
            query: "<night>",
            featured: Some(PostCard::new(&featured, &probe, 4)),
            post_list: vec![PostCard::new(&rain, &probe, 0)],
            tags: &tags,
            cur_page: 2,
            page_count: 2,
            page_link: "/?q=night".to_string(),
        });

        assert_eq!(rendered, "[Frame]\
FEATURED=(Stand by Me|Four boys walk along a railway line.|4|no-img)\
LIST=(/post/2/|Steel and Rain|2023-05-05|1|#city#night)\
PAGES=/?q=night&amp;page=1;*/?q=night&amp;page=2;\
Q=[&lt;night&gt;]");
    }

    #[test]
    fn render_empty() {
        let renderer = ListRenderer::new(TEMPLATE).unwrap();
        let tags: Vec<String> = vec![];
        let rendered = renderer.render(site(), ListView {
            heading: "",
            query: "",
            featured: None,
            post_list: vec![],
            tags: &tags,
            cur_page: 1,
            page_count: 0,
            page_link: "/".to_string(),
        });
        assert_eq!(rendered, "[Frame]LIST=EMPTYQ=[]");
    }
}

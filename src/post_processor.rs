use std::io;
use std::io::ErrorKind;
use std::path::Path;

use ntex::web;
use ntex::web::Error;
use ntex_files::NamedFile;
use serde::Serialize;

use crate::config::Config;
use crate::like_store::LikeCounter;
use crate::movies::MOVIES;
use crate::paginator::Paginator;
use crate::post::Post;
use crate::post_collection::PostCollection;
use crate::view::list_renderer::{ListRenderer, ListView};
use crate::view::page_renderer::PageRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::RssChannel;
use crate::view::{tag_link, ImageProbe, PostCard, SiteHeader};

#[derive(Copy, Clone, PartialEq)]
pub enum Section {
    Home,
    Post,
    Movies,
    About,
}

pub fn site_header(config: &Config, section: Section) -> SiteHeader {
    SiteHeader {
        title: config.site.title.as_str(),
        subtitle: config.site.subtitle.as_deref().unwrap_or(""),
        on_home: section == Section::Home,
        on_movies: section == Section::Movies,
        on_about: section == Section::About,
    }
}

pub fn read_template(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    match std::fs::read_to_string(&full_path) {
        Ok(src) => Ok(src),
        Err(e) => Err(io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e))),
    }
}

pub fn get_file(root_dir: &Path, file: &str) -> Result<NamedFile, Error> {
    if file.contains("..") || file.contains('/') || file.contains('\\') {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    Ok(NamedFile::open(root_dir.join(file))?)
}

fn render_list(config: &Config, site: SiteHeader, list: ListView) -> io::Result<String> {
    let template_src = read_template(&config.paths.template_dir, "home.tpl")?;
    let renderer = ListRenderer::new(&template_src)?;
    Ok(renderer.render(site, list))
}

fn page_link(base: &str, query: &str) -> String {
    if query.is_empty() {
        return base.to_string();
    }
    match serde_urlencoded::to_string([("q", query)]) {
        Ok(encoded) => format!("{}?{}", base, encoded),
        Err(_) => base.to_string(),
    }
}

/// Home page: the newest post is always featured, the rest is searchable and paginated
pub fn render_home(config: &Config, posts: &PostCollection, likes: &LikeCounter, images: &ImageProbe,
                   query: &str, cur_page: u32) -> io::Result<String> {
    let listing: Vec<&Post> = posts.listing().iter().filter(|p| p.matches(query)).collect();
    let paginator = Paginator::from(&listing, config.blog.page_size);
    let (cur_page, page_posts) = paginator.page_or_first(cur_page);

    let featured = if cur_page == 1 {
        posts.featured().map(|p| PostCard::new(p, images, likes.get(p.id)))
    } else {
        None
    };

    let tags = posts.tags();
    let list = ListView {
        heading: "",
        query,
        featured,
        post_list: page_posts.iter().map(|p| PostCard::new(p, images, likes.get(p.id))).collect(),
        tags: &tags,
        cur_page,
        page_count: paginator.page_count(),
        page_link: page_link("/", query),
    };

    render_list(config, site_header(config, Section::Home), list)
}

pub fn render_tag_list(config: &Config, posts: &PostCollection, likes: &LikeCounter, images: &ImageProbe,
                       tag: &str, cur_page: u32) -> io::Result<String> {
    let tagged = posts.with_tag(tag);
    let paginator = Paginator::from(&tagged, config.blog.page_size);
    let (cur_page, page_posts) = paginator.page_or_first(cur_page);

    let heading = format!("#{}", tag);
    let tags = posts.tags();
    let list = ListView {
        heading: &heading,
        query: "",
        featured: None,
        post_list: page_posts.iter().map(|p| PostCard::new(p, images, likes.get(p.id))).collect(),
        tags: &tags,
        cur_page,
        page_count: paginator.page_count(),
        page_link: tag_link(tag),
    };

    render_list(config, site_header(config, Section::Home), list)
}

pub fn render_post(config: &Config, post: &Post, likes: &LikeCounter, images: &ImageProbe) -> io::Result<String> {
    let template_src = read_template(&config.paths.template_dir, "post.tpl")?;
    let renderer = PostRenderer::new(&template_src)?;
    Ok(renderer.render(site_header(config, Section::Post), post, images, likes.get(post.id)))
}

pub fn render_movies(config: &Config, images: &ImageProbe) -> io::Result<String> {
    let template_src = read_template(&config.paths.template_dir, "movies.tpl")?;
    let renderer = PageRenderer::new(&template_src)?;
    Ok(renderer.render_movies(site_header(config, Section::Movies), MOVIES, images))
}

pub fn render_about(config: &Config, posts: &PostCollection) -> io::Result<String> {
    let template_src = read_template(&config.paths.template_dir, "about.tpl")?;
    let renderer = PageRenderer::new(&template_src)?;
    Ok(renderer.render_about(site_header(config, Section::About), posts.len(), MOVIES.len()))
}

pub fn render_feed(config: &Config, posts: &PostCollection) -> io::Result<Vec<u8>> {
    let newest: Vec<&Post> = posts.posts().iter().take(config.rss_size()).collect();
    let rss = RssChannel {
        ch_title: &config.site.title,
        ch_link: &config.site.site_url,
        ch_desc: &config.site.description,
    };

    rss.render(&newest)
        .map_err(|e| io::Error::new(ErrorKind::Other, format!("Error rendering feed: {}", e)))
}

#[derive(Serialize)]
pub struct PostSummary<'a> {
    #[serde(flatten)]
    pub post: &'a Post,
    pub reading_time: u32,
    pub likes: u64,
}

pub fn post_summaries<'a>(posts: &'a PostCollection, likes: &LikeCounter, query: &str) -> Vec<PostSummary<'a>> {
    posts.search(query)
        .into_iter()
        .map(|post| PostSummary {
            post,
            reading_time: post.reading_time(),
            likes: likes.get(post.id),
        })
        .collect()
}

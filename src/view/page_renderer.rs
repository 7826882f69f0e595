use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::movies::Movie;
use crate::view::{ImageProbe, SiteHeader};

#[derive(ramhorns::Content)]
struct ViewMovie<'a> {
    title: &'a str,
    year: &'a str,
    note: &'a str,
    has_image: bool,
    image: String,
}

#[derive(ramhorns::Content)]
struct MoviesPage<'a> {
    site: SiteHeader<'a>,
    movies: Vec<ViewMovie<'a>>,
}

#[derive(ramhorns::Content)]
struct AboutPage<'a> {
    site: SiteHeader<'a>,
    post_count: u64,
    movie_count: u64,
}

/// Static pages: movie picks and about
pub struct PageRenderer<'a> {
    pub template: Template<'a>,
}

impl PageRenderer<'_> {
    pub fn new(page_tpl_src: &str) -> io::Result<PageRenderer> {
        let template = match Template::new(page_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing page template: {}", e)));
            }
        };

        Ok(PageRenderer {
            template,
        })
    }

    pub fn render_movies(&self, site: SiteHeader, movies: &[Movie], images: &ImageProbe) -> String {
        let movies = movies.iter()
            .map(|m| {
                let image = images.resolve(m.image);
                ViewMovie {
                    title: m.title,
                    year: m.year,
                    note: m.note,
                    has_image: image.is_some(),
                    image: image.unwrap_or_default(),
                }
            })
            .collect();

        self.template.render(&MoviesPage { site, movies })
    }

    pub fn render_about(&self, site: SiteHeader, post_count: usize, movie_count: usize) -> String {
        self.template.render(&AboutPage {
            site,
            post_count: post_count as u64,
            movie_count: movie_count as u64,
        })
    }
}

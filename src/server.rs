use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use serde_json::json;
use spdlog::{error, info, warn};

use crate::config::Config;
use crate::content_cache::{ContentCache, Expire};
use crate::like_store::{FileStore, LikeCounter};
use crate::post::PostId;
use crate::post_collection::PostCollection;
use crate::post_processor::*;
use crate::post_source::Source;
use crate::query_string::QueryString;
use crate::view::ImageProbe;

struct AppState {
    config: Config,
    source: Source,
    posts: ContentCache<PostCollection>,
    likes: Mutex<LikeCounter>,
    images: ImageProbe,
}

impl AppState {
    fn expire(&self) -> Expire {
        match chrono::Duration::from_std(self.config.reload_after()) {
            Ok(duration) => Expire::After(duration),
            Err(_) => Expire::Never,
        }
    }

    /// The cached collection, reloaded from the source once expired.
    /// A reload that finds nothing keeps the previous posts.
    async fn posts(&self) -> Arc<PostCollection> {
        if let Some(posts) = self.posts.get() {
            return posts;
        }

        info!("Reloading {} post files", self.config.blog.files.len());
        let posts = PostCollection::load(&self.source, &self.config.blog.files).await;
        if posts.is_empty() {
            if let Some(previous) = self.posts.renew(self.expire()).filter(|p| !p.is_empty()) {
                warn!("No post could be loaded, serving the previous {} posts", previous.len());
                return previous;
            }
        }
        self.posts.store(posts, self.expire())
    }

    fn likes(&self) -> MutexGuard<'_, LikeCounter> {
        self.likes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

type State = web::types::State<Arc<AppState>>;

fn query_string(req: &HttpRequest) -> QueryString {
    match req.uri().query() {
        Some(query_str) => QueryString::from(query_str),
        None => QueryString::default(),
    }
}

fn html_response(rendered: io::Result<String>, what: &str) -> web::HttpResponse {
    match rendered {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            error!("Error rendering {}: {}", what, e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error rendering {}: {}", what, e))
        }
    }
}

fn parse_post_id(id: &str) -> Option<PostId> {
    id.parse::<u32>().ok().map(PostId)
}

// Begin: Redirect region --------
#[web::get("/post/{id}")]
async fn post_wo_slash(path: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", path.into_inner() + "/")
        .content_type("text/html; charset=utf-8")
        .finish()
}

#[web::get("/tag/{tag}")]
async fn tag_wo_slash(path: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", path.into_inner() + "/")
        .content_type("text/html; charset=utf-8")
        .finish()
}
// End: Redirect region --------

#[web::get("/")]
async fn index(req: HttpRequest, state: State) -> web::HttpResponse {
    let posts = state.posts().await;
    let qs = query_string(&req);

    let likes = state.likes();
    let rendered = render_home(&state.config, &posts, &likes, &state.images, qs.get_query(), qs.get_page());
    html_response(rendered, "home")
}

#[web::get("/tag/{tag}/")]
async fn tag_list(req: HttpRequest, path: web::types::Path<String>, state: State) -> web::HttpResponse {
    let posts = state.posts().await;
    let tag = path.into_inner();
    let qs = query_string(&req);

    let likes = state.likes();
    let rendered = render_tag_list(&state.config, &posts, &likes, &state.images, &tag, qs.get_page());
    html_response(rendered, "tag list")
}

#[web::get("/post/{id}/")]
async fn view(path: web::types::Path<String>, state: State) -> web::HttpResponse {
    let posts = state.posts().await;
    let id = path.into_inner();

    let Some(post) = parse_post_id(&id).and_then(|id| posts.find(id)) else {
        return web::HttpResponse::NotFound()
            .body(format!("Could not find post {}", id));
    };

    let likes = state.likes();
    html_response(render_post(&state.config, post, &likes, &state.images), "post")
}

#[web::post("/like/{id}")]
async fn like(path: web::types::Path<String>, state: State) -> web::HttpResponse {
    let posts = state.posts().await;
    let id = path.into_inner();

    let Some(post_id) = parse_post_id(&id).filter(|id| posts.find(*id).is_some()) else {
        return web::HttpResponse::NotFound()
            .body(format!("Could not find post {}", id));
    };

    let count = state.likes().increment(post_id);
    match count {
        Ok(count) => web::HttpResponse::Ok()
            .content_type("application/json")
            .body(json!({ "id": post_id.to_string(), "likes": count }).to_string()),
        Err(e) => {
            error!("Error saving like for post {}: {}", post_id, e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error saving like: {}", e))
        }
    }
}

#[web::get("/movies")]
async fn movies(state: State) -> web::HttpResponse {
    html_response(render_movies(&state.config, &state.images), "movies")
}

#[web::get("/about")]
async fn about(state: State) -> web::HttpResponse {
    let posts = state.posts().await;
    html_response(render_about(&state.config, &posts), "about")
}

#[web::get("/feed.xml")]
async fn rss_feed(state: State) -> web::HttpResponse {
    let posts = state.posts().await;
    match render_feed(&state.config, &posts) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/rss+xml; charset=utf-8")
            .body(xml),
        Err(e) => {
            error!("{}", e);
            web::HttpResponse::InternalServerError()
                .body(e.to_string())
        }
    }
}

#[web::get("/api/posts")]
async fn api_posts(req: HttpRequest, state: State) -> web::HttpResponse {
    let posts = state.posts().await;
    let qs = query_string(&req);

    let likes = state.likes();
    let summaries = post_summaries(&posts, &likes, qs.get_query());
    match serde_json::to_string(&summaries) {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("application/json")
            .body(body),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error listing posts: {}", e)),
    }
}

#[web::get("/images/{file_name}")]
async fn image_files(path: web::types::Path<String>, state: State) -> Result<NamedFile, web::Error> {
    get_file(&state.config.paths.public_dir.join("images"), &path.into_inner())
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: State) -> Result<NamedFile, web::Error> {
    get_file(&state.config.paths.public_dir, &path.into_inner())
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let source = config.post_source()?;
    let likes_dir = config.paths.likes_dir.clone().unwrap_or_else(|| PathBuf::from("data"));
    let likes = LikeCounter::open(Box::new(FileStore::new(likes_dir)?));
    let images = ImageProbe::new(&config.paths.public_dir);

    let app_state = Arc::new(AppState {
        source,
        posts: ContentCache::new(),
        likes: Mutex::new(likes),
        images,
        config,
    });

    // Load once before accepting requests, failed files are reported here
    let posts = app_state.posts().await;
    for post in posts.posts() {
        info!("Post {}: {} ({})", post.id, post.title, post.filename);
    }

    let bind_addr = app_state.config.server.address.clone();
    let bind_port = app_state.config.server.port;

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(tag_list)
            .service(tag_wo_slash)
            .service(view)
            .service(post_wo_slash)
            .service(like)
            .service(movies)
            .service(about)
            .service(rss_feed)
            .service(api_posts)
            .service(image_files)
            .service(public_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}

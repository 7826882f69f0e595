use std::cmp::Ordering;

use futures::future::join_all;
use spdlog::{info, warn};

use crate::post::{Post, PostId};
use crate::post_source::PostSource;

/// Posts loaded from the configured files, newest first.
#[derive(Debug, Default)]
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    /// Fetches every file concurrently. Files that cannot be fetched are logged and left out,
    /// ids still follow the position in `files`.
    pub async fn load<S: PostSource>(source: &S, files: &[String]) -> PostCollection {
        let fetches = files.iter()
            .enumerate()
            .map(|(i, file_name)| async move {
                let id = PostId(i as u32 + 1);
                (id, file_name, source.fetch(file_name).await)
            });

        let mut posts = vec![];
        for (id, file_name, result) in join_all(fetches).await {
            match result {
                Ok(content) => posts.push(Post::parse(id, file_name, &content)),
                Err(e) => warn!("Could not load blog {}: {}", file_name, e),
            }
        }

        info!("Loaded {} of {} posts", posts.len(), files.len());
        Self::from_posts(posts)
    }

    pub fn from_posts(mut posts: Vec<Post>) -> PostCollection {
        // sort by date reversed, undated posts go last
        posts.sort_by(|a, b| {
            match (a.calendar_date(), b.calendar_date()) {
                (Some(da), Some(db)) => db.cmp(&da),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
        PostCollection { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn featured(&self) -> Option<&Post> {
        self.posts.first()
    }

    /// Everything but the featured post
    pub fn listing(&self) -> &[Post] {
        self.posts.get(1..).unwrap_or(&[])
    }

    pub fn find(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn search(&self, query: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.matches(query)).collect()
    }

    pub fn with_tag(&self, tag: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.has_tag(tag)).collect()
    }

    /// All tags, most used first
    pub fn tags(&self) -> Vec<String> {
        let mut tag_list: Vec<(String, u32)> = vec![];
        for tag in self.posts.iter().flat_map(|p| p.tags.iter()) {
            match tag_list.iter_mut().find(|(t, _)| t == tag) {
                Some((_, count)) => *count += 1,
                None => tag_list.push((tag.clone(), 1)),
            }
        }

        tag_list.sort_by(|(_, va), (_, vb)| vb.cmp(va));
        tag_list.into_iter().map(|(k, _v)| k).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use futures::executor::block_on;

    use crate::post_source::FetchError;
    use crate::test_data::{POST_DATA, POST_RAIN, POST_RIDGE};

    use super::*;

    struct MapSource {
        files: HashMap<&'static str, &'static str>,
    }

    impl PostSource for MapSource {
        async fn fetch(&self, file_name: &str) -> Result<String, FetchError> {
            match self.files.get(file_name) {
                Some(content) => Ok(content.to_string()),
                None => Err(FetchError::Status { url: file_name.to_string(), status: 404 }),
            }
        }
    }

    fn post(id: u32, title: &str, date: &str, tags: &str) -> Post {
        let content = format!("{}\n{}\n\n{}\n\nBody of {}", title, date, tags, title);
        Post::parse(PostId(id), &format!("{}.txt", id), &content)
    }

    fn file_list(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sort_by_date_desc() {
        let collection = PostCollection::from_posts(vec![
            post(1, "a", "2024-01-01", ""),
            post(2, "b", "2023-05-05", ""),
            post(3, "c", "2024-06-01", ""),
        ]);
        let dates: Vec<&str> = collection.posts().iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, ["2024-06-01", "2024-01-01", "2023-05-05"]);
    }

    #[test]
    fn test_undated_posts_go_last() {
        let collection = PostCollection::from_posts(vec![
            post(1, "a", "one summer", ""),
            post(2, "b", "2023-05-05", ""),
            post(3, "c", "later", ""),
            post(4, "d", "2024-06-01", ""),
        ]);
        let ids: Vec<u32> = collection.posts().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, [4, 2, 1, 3]);
    }

    #[test]
    fn test_load_keeps_positional_ids() {
        let source = MapSource {
            files: HashMap::from([
                ("standbyme.txt", POST_DATA),
                ("ridge.txt", POST_RIDGE),
                ("rain.txt", POST_RAIN),
            ]),
        };
        let files = file_list(&["rain.txt", "standbyme.txt", "ridge.txt"]);
        let collection = block_on(PostCollection::load(&source, &files));

        assert_eq!(collection.len(), 3);
        let ids: Vec<(u32, &str)> = collection.posts().iter().map(|p| (p.id.0, p.filename.as_str())).collect();
        assert_eq!(ids, [(2, "standbyme.txt"), (3, "ridge.txt"), (1, "rain.txt")]);
    }

    #[test]
    fn test_load_partial_failure() {
        let source = MapSource {
            files: HashMap::from([
                ("standbyme.txt", POST_DATA),
                ("rain.txt", POST_RAIN),
            ]),
        };
        let files = file_list(&["standbyme.txt", "missing.txt", "rain.txt"]);
        let collection = block_on(PostCollection::load(&source, &files));

        assert_eq!(collection.len(), 2);
        assert!(collection.find(PostId(2)).is_none());
        assert_eq!(collection.find(PostId(1)).unwrap().title, "Stand by Me");
        assert_eq!(collection.find(PostId(3)).unwrap().title, "Steel and Rain");
    }

    #[test]
    fn test_load_all_failing() {
        let source = MapSource { files: HashMap::new() };
        let collection = block_on(PostCollection::load(&source, &file_list(&["a.txt", "b.txt"])));
        assert!(collection.is_empty());
        assert!(collection.featured().is_none());
        assert!(collection.listing().is_empty());
    }

    #[test]
    fn test_featured_and_listing() {
        let collection = PostCollection::from_posts(vec![
            post(1, "old", "2020-01-01", ""),
            post(2, "new", "2024-01-01", ""),
            post(3, "mid", "2022-01-01", ""),
        ]);
        assert_eq!(collection.featured().unwrap().title, "new");
        let listing: Vec<&str> = collection.listing().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(listing, ["mid", "old"]);
    }

    #[test]
    fn test_search() {
        let collection = PostCollection::from_posts(vec![
            Post::parse(PostId(1), "ridge.txt", POST_RIDGE),
            Post::parse(PostId(2), "rain.txt", POST_RAIN),
        ]);
        let found: Vec<&str> = collection.search("ridge").iter().map(|p| p.title.as_str()).collect();
        assert_eq!(found, ["Into the Ridge"]);
        assert_eq!(collection.search("NIGHT").len(), 1);
        assert_eq!(collection.search(" ").len(), 2);
        assert!(collection.search("desert").is_empty());
    }

    #[test]
    fn test_tags_by_frequency() {
        let collection = PostCollection::from_posts(vec![
            post(1, "a", "2024-01-03", "film, night"),
            post(2, "b", "2024-01-02", "city, night"),
            post(3, "c", "2024-01-01", "night, film"),
        ]);
        assert_eq!(collection.tags(), ["night", "film", "city"]);
        let with_film: Vec<u32> = collection.with_tag("film").iter().map(|p| p.id.0).collect();
        assert_eq!(with_film, [1, 3]);
    }
}

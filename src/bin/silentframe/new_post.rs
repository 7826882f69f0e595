use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};

use silentframe::text_utils::{format_date, slugify, today};

use crate::{NewArgs, PostOutput};

fn render_post(title: &str, date: &str, image: &str, tags: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "{}", title.trim());
    let _ = writeln!(&mut buf, "{}", date);
    let _ = writeln!(&mut buf, "{}", image.trim());
    let _ = writeln!(&mut buf, "{}", tags.trim());
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "This is a body example. Paragraphs are separated by a blank line.");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "Please remove it and replace with your content.");

    buf
}

pub fn new_post_cmd(args: NewArgs) -> Result<()> {
    let date = format_date(&today());
    let post = render_post(&args.title, &date, &args.image, &args.tags);

    match args.output {
        PostOutput::Stdout => print!("{}", post),
        PostOutput::File => {
            let slug = slugify(&args.title);
            if slug.is_empty() {
                bail!("Could not make a file name out of the title {:?}", args.title);
            }
            let file_path = PathBuf::from(format!("{}.txt", slug));
            if file_path.exists() {
                bail!("{} already exists", file_path.display());
            }
            fs::write(&file_path, post)?;
            println!("Created {}", file_path.display());
            println!("Add \"{}\" to blog.files in the configuration to publish it", file_path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use silentframe::post::{Post, PostId};

    use super::*;

    #[test]
    fn test_render_post() {
        let post = render_post("Steel and Rain ", "2024-02-27", "/images/rain.jpg", "city, night");
        assert_eq!(post, "Steel and Rain
2024-02-27
/images/rain.jpg
city, night

This is a body example. Paragraphs are separated by a blank line.

Please remove it and replace with your content.
");
    }

    #[test]
    fn test_rendered_post_parses_back() {
        let content = render_post("Letter", "2024-02-27", "", "");
        let post = Post::parse(PostId(1), "letter.txt", &content);
        assert_eq!(post.title, "Letter");
        assert_eq!(post.date, "2024-02-27");
        assert_eq!(post.image, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.paragraphs().len(), 2);
    }
}

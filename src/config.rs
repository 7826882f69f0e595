use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs, io};

use serde::Deserialize;

use crate::post_source::{DirSource, HttpSource, Source};

#[derive(Deserialize)]
pub struct Site {
    pub title: String,
    pub subtitle: Option<String>,
    pub site_url: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub likes_dir: Option<PathBuf>,
}

#[derive(Deserialize)]
pub struct Blog {
    pub files: Vec<String>,
    pub page_size: u32,
    pub reload_secs: Option<u64>,
    pub rss_size: Option<usize>,
}

#[derive(Deserialize)]
pub struct SourceCfg {
    pub base_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub blog: Blog,
    pub source: SourceCfg,
    pub server: Server,
    pub log: Option<Log>,
}

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RELOAD_SECS: u64 = 300;
const DEFAULT_RSS_SIZE: usize = 10;

impl Config {
    pub fn reload_after(&self) -> Duration {
        Duration::from_secs(self.blog.reload_secs.unwrap_or(DEFAULT_RELOAD_SECS))
    }

    pub fn rss_size(&self) -> usize {
        self.blog.rss_size.unwrap_or(DEFAULT_RSS_SIZE)
    }

    pub fn post_source(&self) -> io::Result<Source> {
        match (&self.source.base_dir, &self.source.base_url) {
            (Some(base_dir), None) => Ok(Source::Dir(DirSource::new(base_dir.clone()))),
            (None, Some(base_url)) => {
                let timeout = Duration::from_secs(self.source.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
                match HttpSource::new(base_url, timeout) {
                    Ok(source) => Ok(Source::Http(source)),
                    Err(e) => Err(io::Error::new(ErrorKind::Other, format!("Error creating http client: {}", e))),
                }
            }
            _ => Err(io::Error::new(
                ErrorKind::InvalidData, "Exactly one of source.base_dir or source.base_url must be set")),
        }
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe()?;
        let exe_dir = cur_exe.parent().and_then(|p| p.to_str()).unwrap_or(".");
        let str_path = path.to_string_lossy();
        Ok(PathBuf::from(str_path.replace("${exe_dir}", exe_dir)))
    } else {
        Ok(path)
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir)?,
        public_dir: parse_path(cfg.paths.public_dir)?,
        likes_dir: cfg.paths.likes_dir.map(parse_path).transpose()?,
    };
    cfg.source.base_dir = cfg.source.base_dir.map(parse_path).transpose()?;

    if cfg.blog.page_size == 0 {
        return Err(io::Error::new(ErrorKind::InvalidData, "blog.page_size must be greater than 0"));
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r##"
[site]
title = "The Silent Frame"
site_url = "https://example.com"
description = "Cinematic journal"

[paths]
template_dir = "res/template"
public_dir = "res/public"

[blog]
files = ["standbyme.txt", "letter.txt"]
page_size = 9

[source]
base_dir = "res/blogs"

[server]
address = "0.0.0.0"
port = 8001
"##;

    #[test]
    fn test_parse_config() {
        let cfg = parse_config(CONFIG).unwrap();
        assert_eq!(cfg.site.title, "The Silent Frame");
        assert!(cfg.site.subtitle.is_none());
        assert_eq!(cfg.blog.files, ["standbyme.txt", "letter.txt"]);
        assert_eq!(cfg.reload_after(), Duration::from_secs(300));
        assert_eq!(cfg.rss_size(), 10);
        assert!(cfg.log.is_none());
        assert!(matches!(cfg.post_source().unwrap(), Source::Dir(_)));
    }

    #[test]
    fn test_source_must_be_unique() {
        let both = CONFIG.replace("base_dir = \"res/blogs\"", "base_dir = \"res/blogs\"\nbase_url = \"https://example.com/blogs\"");
        let cfg = parse_config(&both).unwrap();
        assert!(cfg.post_source().is_err());

        let none = CONFIG.replace("base_dir = \"res/blogs\"", "timeout_secs = 3");
        let cfg = parse_config(&none).unwrap();
        assert!(cfg.post_source().is_err());
    }

    #[test]
    fn test_http_source() {
        let http = CONFIG.replace("base_dir = \"res/blogs\"", "base_url = \"https://example.com/blogs\"");
        let cfg = parse_config(&http).unwrap();
        match cfg.post_source().unwrap() {
            Source::Http(source) => assert_eq!(source.base_url, "https://example.com/blogs"),
            Source::Dir(_) => panic!("expected http source"),
        }
    }

    #[test]
    fn test_zero_page_size() {
        let cfg = CONFIG.replace("page_size = 9", "page_size = 0");
        assert_eq!(parse_config(&cfg).err().unwrap().kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_log_section() {
        let cfg = format!("{}\n[log]\nlevel = \"Debug\"\nlog_to_console = true\n", CONFIG);
        let cfg = parse_config(&cfg).unwrap();
        let log = cfg.log.unwrap();
        assert!(matches!(log.level, LogLevel::Debug));
        assert!(log.location.is_none());
    }

    #[test]
    fn test_sample_config() {
        let cfg = parse_config(include_str!("../silentframe.toml")).unwrap();
        assert_eq!(cfg.blog.files.len(), 4);
        assert!(!cfg.paths.template_dir.starts_with("${exe_dir}"));
        assert!(cfg.paths.template_dir.ends_with("res/template"));
        assert!(matches!(cfg.log.as_ref().map(|l| l.level), Some(LogLevel::Info)));
    }
}

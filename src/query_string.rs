use std::collections::HashMap;

#[derive(PartialEq, Debug, Default)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    pub fn get_page(&self) -> u32 {
        match self.items.get("page").and_then(|val| val.parse::<u32>().ok()) {
            Some(page) if page > 0 => page,
            _ => 1,
        }
    }

    /// Search text, trimmed. Empty when not present.
    pub fn get_query(&self) -> &str {
        self.items.get("q").map(|q| q.trim()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_page() {
        assert_eq!(QueryString::from("page=3").get_page(), 3);
        assert_eq!(QueryString::from("page=0").get_page(), 1);
        assert_eq!(QueryString::from("page=-2").get_page(), 1);
        assert_eq!(QueryString::from("page=abc").get_page(), 1);
        assert_eq!(QueryString::from("").get_page(), 1);
    }

    #[test]
    fn test_get_query() {
        assert_eq!(QueryString::from("q=Into+the%20Ridge&page=2").get_query(), "Into the Ridge");
        assert_eq!(QueryString::from("q=%20%20").get_query(), "");
        assert_eq!(QueryString::from("page=2").get_query(), "");
    }

    #[test]
    fn test_parse_query_str() {
        let buf = "bread=baguette&cheese=comt%C3%A9";
        let meal = vec![
            ("bread".to_owned(), "baguette".to_owned()),
            ("cheese".to_owned(), "comté".to_owned()),
        ].into_iter().collect::<HashMap<_, _>>();

        assert_eq!(QueryString::from(buf), QueryString { items: meal });
    }

    #[test]
    fn test_parse_key_only_query_str() {
        let expected: HashMap<String, String> = vec![("key-only".to_string(), "".to_string())].into_iter().collect();
        assert_eq!(QueryString::from("key-only"), QueryString { items: expected });
    }
}

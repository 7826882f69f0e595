use std::io::Cursor;

use chrono::{NaiveTime, TimeZone, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::post::Post;

/* Example
<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">
<channel>
  <title>The Silent Frame</title>
  <link>https://example.com</link>
  <description>Cinematic journal</description>
  <item>
    <title>Stand by Me</title>
    <link>https://example.com/post/1/</link>
    <guid isPermaLink="false">1</guid>
    <description><![CDATA[Four boys walk along a railway line.]]></description>
    <pubDate>Sat, 1 Jun 2024 00:00:00 +0000</pubDate>
  </item>
</channel>
</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, posts: &[&Post]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;

        for post in posts {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", &post.title)?;
            let link = full_link(self.ch_link, &post.id.to_string());
            push_text(&mut writer, "link", &link)?;

            let guid = post.id.to_string();
            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "false"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(&guid)))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            push_cdata(&mut writer, "description", post.excerpt())?;

            // Posts with free-text dates have no pubDate
            if let Some(date) = post.calendar_date() {
                let dt = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));
                push_text(&mut writer, "pubDate", &dt.to_rfc2822())?;
            }

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn full_link(base_url: &str, id: &str) -> String {
    format!("{}/post/{}/", base_url.trim_end_matches('/'), id)
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    let text = text.replace("]]>", "]] >");
    writer.write_event(Event::CData(BytesCData::new(text.as_str())))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use crate::post::PostId;
    use crate::test_data::POST_DATA;

    use super::*;

    #[test]
    fn render_xml() {
        let dated = Post::parse(PostId(1), "standbyme.txt", POST_DATA);
        let undated = Post::parse(PostId(2), "x.txt", "A & B\nsome summer\n\n\nIt was ]]> hot.");

        let rss = RssChannel {
            ch_title: "The Silent Frame",
            ch_link: "https://example.com/",
            ch_desc: "Cinematic journal",
        };
        let xml = rss.render(&[&dated, &undated]).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>The Silent Frame</title><link>https://example.com/</link><description>Cinematic journal</description><item><title>Stand by Me</title><link>https://example.com/post/1/</link><guid isPermaLink="false">1</guid><description><![CDATA[Four boys walk along a railway line.]]></description><pubDate>Sat, 1 Jun 2024 00:00:00 +0000</pubDate></item><item><title>A &amp; B</title><link>https://example.com/post/2/</link><guid isPermaLink="false">2</guid><description><![CDATA[It was ]] > hot.]]></description></item></channel></rss>"##;
}

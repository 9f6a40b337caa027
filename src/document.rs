/// Name of the meta tag written by the SEO injector.
pub const DESCRIPTION_META: &str = "description";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

/// DocumentHead
///
/// The observable `<head>` state of the hosted page: its title and the named
/// meta tags. Navigation hooks mutate it; `render` produces the HTML fragment
/// a host page would embed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentHead {
    title: String,
    meta: Vec<MetaTag>,
}

impl DocumentHead {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            meta: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Content of the meta tag called `name`, if present.
    pub fn meta(&self, name: &str) -> Option<&str> {
        self.meta
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.content.as_str())
    }

    /// Updates the tag called `name`, creating it at the end when missing.
    pub fn upsert_meta(&mut self, name: &str, content: impl Into<String>) {
        let content = content.into();
        match self.meta.iter_mut().find(|tag| tag.name == name) {
            Some(tag) => tag.content = content,
            None => self.meta.push(MetaTag {
                name: name.to_string(),
                content,
            }),
        }
    }

    pub fn render(&self) -> String {
        let mut html = format!("<title>{}</title>", escape(&self.title));
        for tag in &self.meta {
            html.push_str(&format!(
                "\n<meta name=\"{}\" content=\"{}\">",
                escape(&tag.name),
                escape(&tag.content)
            ));
        }
        html
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

//! Outgoing replies produced by cog commands

/// Rich message body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Embed {
    pub description: String,
    pub image: Option<String>,
    pub footer: Option<String>,
}

impl Embed {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, url: Option<impl Into<String>>) -> Self {
        self.image = url.map(Into::into);
        self
    }

    pub fn with_footer(mut self, footer: Option<String>) -> Self {
        self.footer = footer;
        self
    }
}

/// A reply sent back to the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Embed(Embed),
    /// Image delivered as a spoilered attachment instead of being embedded
    Spoiler(String),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    /// Plain text rendering of the reply, as shown by the console adapter
    pub fn render(&self) -> String {
        match self {
            Reply::Text(text) => text.clone(),
            Reply::Embed(embed) => {
                let mut out = embed.description.clone();
                if let Some(image) = &embed.image {
                    out.push_str(&format!("\n[image] {}", image));
                }
                if let Some(footer) = &embed.footer {
                    out.push_str(&format!("\n-- {}", footer));
                }
                out
            }
            Reply::Spoiler(url) => format!("||{}||", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embed() {
        let reply = Reply::Embed(
            Embed::new("Anna hugs Bo.")
                .with_image(Some("https://example.com/hug.gif"))
                .with_footer(Some("Credits: Kirin".to_string())),
        );
        assert_eq!(
            reply.render(),
            "Anna hugs Bo.\n[image] https://example.com/hug.gif\n-- Credits: Kirin"
        );
    }

    #[test]
    fn test_render_spoiler() {
        assert_eq!(Reply::Spoiler("u".into()).render(), "||u||");
    }
}

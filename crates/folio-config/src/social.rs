/// The finite set of social keys folio knows how to turn into a link.
/// Anything outside this set still renders, just without a URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialPlatform {
    Github,
    Linkedin,
    X,
    Mastodon,
    Facebook,
    Instagram,
    Reddit,
    Threads,
    Youtube,
    Medium,
    Dev,
    Stackoverflow,
    Telegram,
    Website,
    Phone,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub label: String,
    pub target: String,
}

impl SocialPlatform {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "github" => Some(Self::Github),
            "linkedin" => Some(Self::Linkedin),
            "x" => Some(Self::X),
            "mastodon" => Some(Self::Mastodon),
            "facebook" => Some(Self::Facebook),
            "instagram" => Some(Self::Instagram),
            "reddit" => Some(Self::Reddit),
            "threads" => Some(Self::Threads),
            "youtube" => Some(Self::Youtube),
            "medium" => Some(Self::Medium),
            "dev" => Some(Self::Dev),
            "stackoverflow" => Some(Self::Stackoverflow),
            "telegram" => Some(Self::Telegram),
            "website" => Some(Self::Website),
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::Linkedin => "LinkedIn",
            Self::X => "X",
            Self::Mastodon => "Mastodon",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Reddit => "Reddit",
            Self::Threads => "Threads",
            Self::Youtube => "YouTube",
            Self::Medium => "Medium",
            Self::Dev => "Dev",
            Self::Stackoverflow => "Stack Overflow",
            Self::Telegram => "Telegram",
            Self::Website => "Website",
            Self::Phone => "Phone",
            Self::Email => "Email",
        }
    }

    pub fn link(self, handle: &str) -> String {
        match self {
            Self::Github => format!("https://github.com/{handle}"),
            Self::Linkedin => format!("https://www.linkedin.com/in/{handle}"),
            Self::X => format!("https://x.com/{handle}"),
            // Mastodon handles are `user@instance`.
            Self::Mastodon => match handle.split_once('@') {
                Some((user, instance)) => format!("https://{instance}/@{user}"),
                None => handle.to_string(),
            },
            Self::Facebook => format!("https://www.facebook.com/{handle}"),
            Self::Instagram => format!("https://www.instagram.com/{handle}"),
            Self::Reddit => format!("https://www.reddit.com/user/{handle}"),
            Self::Threads => format!("https://www.threads.net/@{handle}"),
            Self::Youtube => format!("https://www.youtube.com/@{handle}"),
            Self::Medium => format!("https://medium.com/@{handle}"),
            Self::Dev => format!("https://dev.to/{handle}"),
            Self::Stackoverflow => format!("https://stackoverflow.com/users/{handle}"),
            Self::Telegram => format!("https://t.me/{handle}"),
            Self::Website => handle.to_string(),
            Self::Phone => format!("tel:{handle}"),
            Self::Email => format!("mailto:{handle}"),
        }
    }
}

/// Resolves a social entry to a display label and target. Unrecognized keys
/// degrade gracefully: the key becomes the label and the handle is passed
/// through verbatim.
pub fn resolve_social_link(key: &str, handle: &str) -> SocialLink {
    match SocialPlatform::from_key(key) {
        Some(platform) => SocialLink {
            label: platform.label().to_string(),
            target: platform.link(handle),
        },
        None => SocialLink {
            label: key.to_string(),
            target: handle.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_expand_to_profile_urls() {
        let link = resolve_social_link("linkedin", "alice");
        assert_eq!(link.label, "LinkedIn");
        assert_eq!(link.target, "https://www.linkedin.com/in/alice");

        let link = resolve_social_link("email", "alice@example.com");
        assert_eq!(link.target, "mailto:alice@example.com");
    }

    #[test]
    fn mastodon_handles_split_into_instance_urls() {
        let link = resolve_social_link("mastodon", "alice@fosstodon.org");
        assert_eq!(link.target, "https://fosstodon.org/@alice");
    }

    #[test]
    fn unknown_keys_degrade_to_verbatim_values() {
        let link = resolve_social_link("gopher", "gopher://example.org");
        assert_eq!(link.label, "gopher");
        assert_eq!(link.target, "gopher://example.org");
    }
}

/// Quality tier selectable by the user, one per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    Best,
    Hd720,
    Sd480,
    Lowest144,
    AudioOnly,
}

/// Format selector and output container derived from a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFormat {
    /// Declarative stream-selection expression passed to yt-dlp via `-f`.
    pub selector: &'static str,
    /// Final multiplexed file format after merge or transcode.
    pub container: &'static str,
}

impl QualityTier {
    /// Strict parse of a menu token. The interactive prompt loops on `None`.
    pub fn try_from_choice(token: &str) -> Option<Self> {
        match token.trim() {
            "1" => Some(Self::Best),
            "2" => Some(Self::Hd720),
            "3" => Some(Self::Sd480),
            "4" => Some(Self::Lowest144),
            "5" => Some(Self::AudioOnly),
            _ => None,
        }
    }

    /// Lenient parse: an unrecognized token falls back to best quality.
    pub fn from_choice(token: &str) -> Self {
        Self::try_from_choice(token).unwrap_or_else(|| {
            tracing::warn!(token, "unrecognized quality choice, defaulting to best");
            Self::Best
        })
    }

    /// Apply the audio-only override on top of the chosen tier.
    pub fn with_audio_only(self, audio_only: bool) -> Self {
        if audio_only { Self::AudioOnly } else { self }
    }

    /// Single source of truth for the tier/selector/container relationship.
    pub fn resolve(self) -> ResolvedFormat {
        match self {
            Self::Best => ResolvedFormat {
                selector: "bestvideo+bestaudio/best",
                container: "mp4",
            },
            Self::Hd720 => ResolvedFormat {
                selector: "bestvideo[height<=720]+bestaudio/best[height<=720]",
                container: "mp4",
            },
            Self::Sd480 => ResolvedFormat {
                selector: "bestvideo[height<=480]+bestaudio/best[height<=480]",
                container: "mp4",
            },
            Self::Lowest144 => ResolvedFormat {
                selector: "bestvideo[height<=144]+bestaudio/best[height<=144]",
                container: "mp4",
            },
            Self::AudioOnly => ResolvedFormat {
                selector: "bestaudio/best",
                container: "mp3",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_tiers_resolve_to_mp4() {
        for tier in [
            QualityTier::Best,
            QualityTier::Hd720,
            QualityTier::Sd480,
            QualityTier::Lowest144,
        ] {
            assert_eq!(tier.resolve().container, "mp4");
        }
    }

    #[test]
    fn audio_tier_resolves_to_mp3() {
        let resolved = QualityTier::AudioOnly.resolve();
        assert_eq!(resolved.selector, "bestaudio/best");
        assert_eq!(resolved.container, "mp3");
    }

    #[test]
    fn choice_2_is_720p_mp4() {
        let resolved = QualityTier::from_choice("2").resolve();
        assert_eq!(
            resolved.selector,
            "bestvideo[height<=720]+bestaudio/best[height<=720]"
        );
        assert_eq!(resolved.container, "mp4");
    }

    #[test]
    fn choice_5_is_audio() {
        assert_eq!(QualityTier::from_choice("5"), QualityTier::AudioOnly);
    }

    #[test]
    fn unrecognized_choice_clamps_to_best() {
        assert_eq!(QualityTier::from_choice("9"), QualityTier::Best);
        assert_eq!(QualityTier::from_choice(""), QualityTier::Best);
        assert_eq!(QualityTier::from_choice("garbage"), QualityTier::Best);
    }

    #[test]
    fn strict_parse_rejects_unknown_tokens() {
        assert_eq!(QualityTier::try_from_choice("9"), None);
        assert_eq!(QualityTier::try_from_choice(" 3 "), Some(QualityTier::Sd480));
    }

    #[test]
    fn audio_only_overrides_video_tier() {
        let tier = QualityTier::Hd720.with_audio_only(true);
        assert_eq!(tier.resolve().container, "mp3");
        assert_eq!(
            QualityTier::Hd720.with_audio_only(false),
            QualityTier::Hd720
        );
    }
}
